//! Confirm-then-delete workflow for a single kid.
//!
//! One request per confirmed delete. Failures are reported through
//! [`Notify`] and are not retried.

use tracing::{error, info};

use crate::kid::Kid;

/// Backend that can remove a kid record by id.
#[allow(async_fn_in_trait)]
pub trait KidStore {
    async fn delete_kid(&self, id: &str) -> anyhow::Result<()>;
}

/// Asks the user to approve a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Receives the user-facing result of the workflow.
pub trait Notify {
    fn success(&mut self, msg: &str);
    fn failure(&mut self, msg: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed,
}

pub async fn delete_with_confirmation<S, C, N>(
    store: &S,
    kid: &Kid,
    confirm: &mut C,
    notify: &mut N,
) -> DeleteOutcome
where
    S: KidStore,
    C: Confirm,
    N: Notify,
{
    if !confirm.confirm(&format!("Are you sure you want to delete {}?", kid.name)) {
        info!(kid_id = %kid.id, "delete cancelled");
        return DeleteOutcome::Cancelled;
    }

    match store.delete_kid(&kid.id).await {
        Ok(()) => {
            info!(kid_id = %kid.id, "kid deleted");
            notify.success(&format!("{} deleted successfully", kid.name));
            DeleteOutcome::Deleted
        }
        Err(e) => {
            error!(kid_id = %kid.id, "failed to delete kid: {e:#}");
            notify.failure("Failed to delete kid");
            DeleteOutcome::Failed
        }
    }
}
