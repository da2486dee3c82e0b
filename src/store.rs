use chrono::NaiveDate;

use crate::core::{GoalError, GoalIcon, GoalState};
use crate::storage::{self, BlobStore, PersistError};

/// What happened to the snapshot after an operation.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing changed (unknown goal, counter already at a bound, ...).
    Unchanged,
    /// The snapshot changed and was written.
    Saved,
    /// The snapshot changed in memory but could not be written.
    SaveFailed(PersistError),
}

impl Outcome {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    pub fn save_error(&self) -> Option<&PersistError> {
        match self {
            Self::SaveFailed(e) => Some(e),
            _ => None,
        }
    }
}

/// Owner of the current goal snapshot.
///
/// All mutations go through [`GoalStore::commit`], which swaps in the new
/// snapshot and writes it to the injected blob store. The in-memory snapshot
/// stays authoritative when a write fails.
pub struct GoalStore<B: BlobStore> {
    state: GoalState,
    blob: B,
    selected: Option<String>,
}

impl<B: BlobStore> GoalStore<B> {
    /// Load the persisted snapshot (or the defaults) from `blob`.
    pub fn open(blob: B) -> Self {
        let state = storage::load_snapshot(&blob);
        Self::with_state(state, blob)
    }

    pub fn with_state(state: GoalState, blob: B) -> Self {
        Self { state, blob, selected: None }
    }

    pub fn state(&self) -> &GoalState {
        &self.state
    }

    pub fn blob(&self) -> &B {
        &self.blob
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select `id`, or clear the selection if it is already selected.
    /// Unknown ids are ignored.
    pub fn select(&mut self, id: &str) {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        } else if self.state.contains(id) {
            self.selected = Some(id.to_string());
        }
    }

    fn commit(&mut self, next: GoalState) -> Outcome {
        if next == self.state {
            return Outcome::Unchanged;
        }
        self.state = next;
        match storage::save_snapshot(&mut self.blob, &self.state) {
            Ok(()) => Outcome::Saved,
            Err(e) => {
                log::warn!("Failed to save goals, keeping changes in memory: {}", e);
                Outcome::SaveFailed(e)
            }
        }
    }

    pub fn toggle_day(&mut self, id: &str, day: NaiveDate) -> Outcome {
        let next = self.state.toggle_day(id, day);
        self.commit(next)
    }

    pub fn increment_video_count(&mut self, id: &str) -> Outcome {
        let next = self.state.increment_video_count(id);
        self.commit(next)
    }

    pub fn decrement_video_count(&mut self, id: &str) -> Outcome {
        let next = self.state.decrement_video_count(id);
        self.commit(next)
    }

    pub fn add_goal(&mut self, name: &str, icon: Option<GoalIcon>) -> Result<Outcome, GoalError> {
        let next = self.state.add_goal(name, icon)?;
        if let Some(goal) = next.goals.last() {
            log::info!("Added goal {} ({})", goal.name, goal.id);
        }
        Ok(self.commit(next))
    }

    pub fn edit_goal(
        &mut self,
        id: &str,
        name: &str,
        icon: Option<GoalIcon>,
    ) -> Result<Outcome, GoalError> {
        let next = self.state.edit_goal(id, name, icon)?;
        Ok(self.commit(next))
    }

    pub fn delete_goal(&mut self, id: &str) -> Outcome {
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        let next = self.state.delete_goal(id);
        let outcome = self.commit(next);
        if outcome.is_changed() {
            log::info!("Deleted goal {}", id);
        }
        outcome
    }
}
