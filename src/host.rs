use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;

use crate::error::Result;

/// Capacity of the change notification channel
pub const CHANGE_CHANNEL_CAPACITY: usize = 32;

/// What changed on the host side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// Branch or repository state moved
    Repository,
    /// The message text was edited
    Message,
}

/// Trait for the environment that owns the branch and the message being edited
///
/// The driver only talks to its host through this interface.
pub trait MessageHost: Send + Sync {
    /// Name of the checked-out branch, if there is one
    fn current_branch_name(&self) -> Result<Option<String>>;

    fn current_message(&self) -> Result<String>;

    fn set_current_message(&self, message: &str) -> Result<()>;

    /// Subscribe to state change notifications
    fn subscribe(&self) -> broadcast::Receiver<StateChange>;
}

/// In-memory host used for stdin/stdout formatting and for tests
#[derive(Debug, Clone)]
pub struct MemoryHost {
    branch: Arc<Mutex<Option<String>>>,
    message: Arc<Mutex<String>>,
    /// Number of times the message was written through the host
    writes: Arc<Mutex<usize>>,
    changes: broadcast::Sender<StateChange>,
}

impl MemoryHost {
    pub fn new(branch: Option<&str>, message: &str) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            branch: Arc::new(Mutex::new(branch.map(str::to_string))),
            message: Arc::new(Mutex::new(message.to_string())),
            writes: Arc::new(Mutex::new(0)),
            changes,
        }
    }

    /// Switch branch and notify subscribers
    pub fn checkout(&self, branch: Option<&str>) {
        *self.branch.lock().unwrap_or_else(PoisonError::into_inner) = branch.map(str::to_string);
        let _ = self.changes.send(StateChange::Repository);
    }

    /// Simulate the user typing: replace the message and notify subscribers
    pub fn edit_message(&self, message: &str) {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = message.to_string();
        let _ = self.changes.send(StateChange::Message);
    }

    pub fn message(&self) -> String {
        self.message.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MessageHost for MemoryHost {
    fn current_branch_name(&self) -> Result<Option<String>> {
        Ok(self.branch.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn current_message(&self) -> Result<String> {
        Ok(self.message())
    }

    fn set_current_message(&self, message: &str) -> Result<()> {
        *self.message.lock().unwrap_or_else(PoisonError::into_inner) = message.to_string();
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }
}
