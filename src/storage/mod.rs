pub mod file;
pub mod memory;

use thiserror::Error;

use crate::core::GoalState;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

/// Key under which the goal snapshot is stored.
pub const STATE_KEY: &str = "goalState";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous key-value store holding serialized snapshots.
pub trait BlobStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistError>;
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistError> {
        (**self).save(key, blob)
    }
}

/// Read the persisted snapshot, falling back to the initial goals when there
/// is none or it cannot be read.
pub fn load_snapshot<B: BlobStore + ?Sized>(store: &B) -> GoalState {
    match store.load(STATE_KEY) {
        Ok(Some(blob)) => match GoalState::from_json(&blob) {
            Ok(state) => {
                log::info!("Loaded {} goals", state.len());
                state
            }
            Err(e) => {
                log::warn!("Stored goals are unreadable, starting from defaults: {}", e);
                GoalState::initial()
            }
        },
        Ok(None) => {
            log::info!("No stored goals, starting from defaults");
            GoalState::initial()
        }
        Err(e) => {
            log::error!("Failed to load goals: {}", e);
            GoalState::initial()
        }
    }
}

pub fn save_snapshot<B: BlobStore + ?Sized>(
    store: &mut B,
    state: &GoalState,
) -> Result<(), PersistError> {
    let json = state.to_json()?;
    store.save(STATE_KEY, &json)
}
