pub use document::Document;
pub use error::{EngineError, StoreError};
pub use expenses::Expense;
pub use groups::{Group, GroupMember, MemberRecord, Role};
pub use invites::{GroupInvite, InviteStatus};
pub use ops::{
    Engine, EngineBuilder, ExpenseDetail, GroupAction, GroupDetail, MemberBalance, MemberDetail,
    NewExpense, ParticipantSummary, PendingInvite,
};
pub use store::{JsonFileStore, MemoryStore, Store, StoreFuture};
pub use users::User;

mod document;
mod error;
mod expenses;
mod groups;
mod invites;
mod ops;
mod store;
mod users;

type ResultEngine<T> = Result<T, EngineError>;
