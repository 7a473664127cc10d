//! Optimistic mutations: change local state first, confirm remotely, undo on
//! failure.
//!
//! [`perform_optimistic`] is the one place the apply/commit/revert sequence
//! lives. Views call it with closures for their particular mutation instead
//! of repeating the rollback logic at each call site.
//!
//! ```rust,ignore
//! let outcome = perform_optimistic(
//!     &mut fonts,
//!     |fonts| flip_favorite(fonts, id),           // returns the old flag
//!     || api.toggle_favorite(id),
//!     |fonts, old| restore_favorite(fonts, id, old),
//! )
//! .await;
//! ```

mod views;

use std::fmt;

pub use views::{CatalogApi, FavoritesView, FontListView};

/// How an optimistic mutation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T, E> {
    /// The remote write succeeded. Local state was already correct.
    Committed(T),
    /// The remote write failed and local state was reverted.
    RolledBack(E),
}

impl<T, E> MutationOutcome<T, E> {
    pub fn is_committed(&self) -> bool {
        matches!(self, MutationOutcome::Committed(_))
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            MutationOutcome::Committed(_) => None,
            MutationOutcome::RolledBack(e) => Some(e),
        }
    }
}

/// A local change that has been applied but not yet confirmed.
///
/// Holds whatever `apply` captured so the change can be undone exactly.
#[derive(Debug)]
#[must_use = "a pending mutation must be settled"]
pub struct PendingMutation<P> {
    snapshot: P,
}

impl<P> PendingMutation<P> {
    pub fn begin<S>(state: &mut S, apply: impl FnOnce(&mut S) -> P) -> Self {
        Self {
            snapshot: apply(state),
        }
    }

    /// Keeps the local change on success. On failure hands the snapshot to
    /// `revert`.
    pub fn settle<S, T, E: fmt::Display>(
        self,
        state: &mut S,
        result: Result<T, E>,
        revert: impl FnOnce(&mut S, P),
    ) -> MutationOutcome<T, E> {
        match result {
            Ok(value) => MutationOutcome::Committed(value),
            Err(e) => {
                log::warn!(target: "fontvault::optimistic", "msg=\"remote write failed, reverting\" error=\"{e}\"");
                revert(state, self.snapshot);
                MutationOutcome::RolledBack(e)
            }
        }
    }
}

/// Applies a local change, awaits the remote write, and reverts the local
/// change if the write fails.
///
/// Never returns the failure as an `Err`: the caller inspects the outcome and
/// reports it however it reports transient problems.
pub async fn perform_optimistic<S, P, T, E, Fut>(
    state: &mut S,
    apply: impl FnOnce(&mut S) -> P,
    commit: impl FnOnce() -> Fut,
    revert: impl FnOnce(&mut S, P),
) -> MutationOutcome<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let pending = PendingMutation::begin(state, apply);
    let result = commit().await;
    pending.settle(state, result, revert)
}
