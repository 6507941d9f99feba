use tokio::sync::Mutex;

use crate::{Document, EngineError, MemoryStore, ResultEngine, Store};

mod access;
mod balances;
mod expenses;
mod groups;
mod invites;
mod users;

pub use access::GroupAction;
pub use balances::MemberBalance;
pub use expenses::{ExpenseDetail, NewExpense, ParticipantSummary};
pub use groups::{GroupDetail, MemberDetail};
pub use invites::PendingInvite;

/// The domain core. Every operation loads the shared document, works on it
/// in memory, and persists it whole on success.
pub struct Engine {
    store: Box<dyn Store>,
    // Serializes read-modify-write cycles; without it two concurrent
    // mutations would overwrite each other last-writer-wins.
    write_lock: Mutex<()>,
}

impl Engine {
    /// Return a builder for `Engine`.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Loads the document and applies a read-only projection.
    pub(crate) async fn read<T>(
        &self,
        f: impl FnOnce(&Document) -> ResultEngine<T>,
    ) -> ResultEngine<T> {
        let doc = self.store.load().await?;
        f(&doc)
    }

    /// Loads the document, applies a mutation, and saves it back.
    ///
    /// The save only happens when the closure succeeds, so a failed
    /// precondition or a store error never leaves a half-applied state.
    pub(crate) async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Document) -> ResultEngine<T>,
    ) -> ResultEngine<T> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.store.load().await?;
        let value = f(&mut doc)?;
        self.store.save(&doc).await?;
        Ok(value)
    }
}

fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// The builder for `Engine`.
pub struct EngineBuilder {
    store: Box<dyn Store>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
        }
    }
}

impl EngineBuilder {
    /// Pass the backing store.
    pub fn store(mut self, store: impl Store + 'static) -> EngineBuilder {
        self.store = Box::new(store);
        self
    }

    /// Construct `Engine`.
    pub fn build(self) -> Engine {
        Engine {
            store: self.store,
            write_lock: Mutex::new(()),
        }
    }
}
