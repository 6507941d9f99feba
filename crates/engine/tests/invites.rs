use engine::{Engine, EngineError, InviteStatus, MemoryStore, Role, User};

async fn engine_with_users(names: &[&str]) -> (Engine, Vec<User>) {
    let engine = Engine::builder().store(MemoryStore::new()).build();
    let mut users = Vec::new();
    for name in names {
        users.push(engine.register_user(name, "password").await.unwrap());
    }
    (engine, users)
}

async fn befriend(engine: &Engine, a: &User, b: &User) {
    engine.add_friend(a.id, &b.username).await.unwrap();
}

#[tokio::test]
async fn invite_then_accept_end_to_end() {
    let (engine, users) = engine_with_users(&["frida", "ulrik"]).await;
    let (frida, ulrik) = (&users[0], &users[1]);
    befriend(&engine, frida, ulrik).await;

    let group = engine
        .new_group(frida.id, "Climbing", "weekly bouldering", None)
        .await
        .unwrap();

    let invite = engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap();
    assert_eq!(invite.status, InviteStatus::Pending);

    let pending = engine.group_invites(frida.id, group.id).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].to_user_id, ulrik.id);

    let accepted = engine.accept_invite(ulrik.id, invite.id).await.unwrap();
    assert_eq!(accepted.status, InviteStatus::Accepted);

    let detail = engine.group_detail(ulrik.id, group.id).await.unwrap();
    let joined = detail
        .members
        .iter()
        .find(|m| m.member.user_id == ulrik.id)
        .unwrap();
    assert_eq!(joined.member.role, Role::Member);

    // Terminal state: a second accept must not re-run the side effects.
    let err = engine.accept_invite(ulrik.id, invite.id).await.unwrap_err();
    assert!(matches!(err, EngineError::AlreadyProcessed(_)));
    let detail = engine.group_detail(ulrik.id, group.id).await.unwrap();
    assert_eq!(detail.members.len(), 2);
}

#[tokio::test]
async fn duplicate_pending_invite_is_rejected() {
    let (engine, users) = engine_with_users(&["frida", "ulrik"]).await;
    let (frida, ulrik) = (&users[0], &users[1]);
    befriend(&engine, frida, ulrik).await;
    let group = engine.new_group(frida.id, "Padel", "", None).await.unwrap();

    engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap();
    let err = engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::DuplicateInvite(_)));

    let pending = engine.group_invites(frida.id, group.id).await.unwrap();
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn inviting_a_non_friend_fails_without_a_row() {
    let (engine, users) = engine_with_users(&["frida", "ulrik"]).await;
    let (frida, ulrik) = (&users[0], &users[1]);
    let group = engine.new_group(frida.id, "Padel", "", None).await.unwrap();

    let err = engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFriends(_)));

    let pending = engine.group_invites(frida.id, group.id).await.unwrap();
    assert!(pending.is_empty());
}

#[tokio::test]
async fn inviting_an_existing_member_fails() {
    let (engine, users) = engine_with_users(&["frida", "ulrik"]).await;
    let (frida, ulrik) = (&users[0], &users[1]);
    befriend(&engine, frida, ulrik).await;
    let group = engine.new_group(frida.id, "Padel", "", None).await.unwrap();

    let invite = engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap();
    engine.accept_invite(ulrik.id, invite.id).await.unwrap();

    let err = engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::AlreadyMember(_)));
}

#[tokio::test]
async fn plain_members_cannot_invite() {
    let (engine, users) = engine_with_users(&["frida", "ulrik", "wanda"]).await;
    let (frida, ulrik, wanda) = (&users[0], &users[1], &users[2]);
    befriend(&engine, frida, ulrik).await;
    befriend(&engine, ulrik, wanda).await;
    let group = engine.new_group(frida.id, "Padel", "", None).await.unwrap();

    let invite = engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap();
    engine.accept_invite(ulrik.id, invite.id).await.unwrap();

    let err = engine
        .invite_member(ulrik.id, group.id, wanda.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn reject_touches_only_the_status() {
    let (engine, users) = engine_with_users(&["frida", "ulrik"]).await;
    let (frida, ulrik) = (&users[0], &users[1]);
    befriend(&engine, frida, ulrik).await;
    let group = engine.new_group(frida.id, "Padel", "", None).await.unwrap();

    let invite = engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap();
    let rejected = engine.reject_invite(ulrik.id, invite.id).await.unwrap();
    assert_eq!(rejected.status, InviteStatus::Rejected);

    let detail = engine.group_detail(frida.id, group.id).await.unwrap();
    assert_eq!(detail.members.len(), 1);

    let err = engine.reject_invite(ulrik.id, invite.id).await.unwrap_err();
    assert!(matches!(err, EngineError::AlreadyProcessed(_)));
}

#[tokio::test]
async fn only_the_addressee_may_resolve_an_invite() {
    let (engine, users) = engine_with_users(&["frida", "ulrik", "wanda"]).await;
    let (frida, ulrik, wanda) = (&users[0], &users[1], &users[2]);
    befriend(&engine, frida, ulrik).await;
    let group = engine.new_group(frida.id, "Padel", "", None).await.unwrap();

    let invite = engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap();

    let err = engine.accept_invite(wanda.id, invite.id).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
    let err = engine.reject_invite(frida.id, invite.id).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
}

#[tokio::test]
async fn separate_inviters_may_hold_pending_invites_for_one_target() {
    let (engine, users) = engine_with_users(&["frida", "anja", "ulrik"]).await;
    let (frida, anja, ulrik) = (&users[0], &users[1], &users[2]);
    befriend(&engine, frida, anja).await;
    befriend(&engine, frida, ulrik).await;
    befriend(&engine, anja, ulrik).await;
    let group = engine.new_group(frida.id, "Padel", "", None).await.unwrap();

    let invite = engine
        .invite_member(frida.id, group.id, anja.id)
        .await
        .unwrap();
    engine.accept_invite(anja.id, invite.id).await.unwrap();
    engine
        .change_member_role(frida.id, group.id, anja.id, Role::Admin)
        .await
        .unwrap();

    // Dedup is per (from, to, group) triple, so both can stand.
    let first = engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap();
    let second = engine
        .invite_member(anja.id, group.id, ulrik.id)
        .await
        .unwrap();

    engine.accept_invite(ulrik.id, first.id).await.unwrap();
    engine.accept_invite(ulrik.id, second.id).await.unwrap();

    // Accepting the second invite must not duplicate the membership.
    let detail = engine.group_detail(ulrik.id, group.id).await.unwrap();
    let occurrences = detail
        .members
        .iter()
        .filter(|m| m.member.user_id == ulrik.id)
        .count();
    assert_eq!(occurrences, 1);
}

#[tokio::test]
async fn user_inbox_is_enriched_with_sender_and_group() {
    let (engine, users) = engine_with_users(&["frida", "ulrik"]).await;
    let (frida, ulrik) = (&users[0], &users[1]);
    befriend(&engine, frida, ulrik).await;
    let group = engine
        .new_group(frida.id, "Climbing", "", None)
        .await
        .unwrap();

    engine
        .invite_member(frida.id, group.id, ulrik.id)
        .await
        .unwrap();

    let inbox = engine.pending_invites_for_user(ulrik.id).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].from_username, "frida");
    assert_eq!(inbox[0].group_name, "Climbing");

    // The sender sees nothing pending addressed to them.
    assert!(
        engine
            .pending_invites_for_user(frida.id)
            .await
            .unwrap()
            .is_empty()
    );
}
