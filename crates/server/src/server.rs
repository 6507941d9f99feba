use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};

use std::sync::Arc;

use crate::{balances, expenses, groups, invites, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Resolves Basic credentials to a user and injects it into the request.
///
/// The resolved user is re-read from the store on every request; nothing is
/// cached between calls.
async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = state
        .engine
        .resolve_actor(auth_header.username(), auth_header.password())
        .await
        .map_err(|err| {
            tracing::error!("actor resolution failed: {err}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let authed = Router::new()
        .route("/friends", post(user::friend_new))
        .route("/groups", post(groups::group_new).get(groups::list))
        .route("/groups/{group_id}", get(groups::get).patch(groups::update))
        .route(
            "/groups/{group_id}/members/{user_id}",
            patch(groups::change_role).delete(groups::remove_member),
        )
        .route(
            "/groups/{group_id}/invites",
            post(invites::invite_new).get(invites::list_for_group),
        )
        .route("/invites", get(invites::inbox))
        .route("/invites/{invite_id}/accept", post(invites::accept))
        .route("/invites/{invite_id}/reject", post(invites::reject))
        .route(
            "/groups/{group_id}/expenses",
            post(expenses::expense_new).get(expenses::list),
        )
        .route(
            "/expenses/{expense_id}",
            patch(expenses::update).delete(expenses::delete),
        )
        .route("/groups/{group_id}/balances", get(balances::get))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/register", post(user::register))
        .merge(authed)
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
