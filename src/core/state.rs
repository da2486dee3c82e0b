use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::GoalError;
use super::goal::{Goal, GoalIcon, MAX_VIDEO_COUNT};

/// Complete snapshot of all goals, in insertion order.
///
/// Every operation borrows the current snapshot and returns a new one; the
/// input is never modified. Unknown goal ids leave the snapshot as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalState {
    pub goals: Vec<Goal>,
}

impl GoalState {
    /// The three goals a fresh installation starts with.
    pub fn initial() -> Self {
        let mut channel = Goal::new("1", "Start YouTube Channel", GoalIcon::Youtube);
        channel.video_count = Some(0);
        Self {
            goals: vec![
                channel,
                Goal::new("2", "Create ML Model", GoalIcon::Brain),
                Goal::new("3", "Create Portfolio Website", GoalIcon::Briefcase),
            ],
        }
    }

    pub fn get(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Copy of the snapshot with `f` applied to the goal matching `id`.
    fn map_goal(&self, id: &str, f: impl FnOnce(&mut Goal)) -> GoalState {
        let mut next = self.clone();
        if let Some(goal) = next.goals.iter_mut().find(|g| g.id == id) {
            f(goal);
        }
        next
    }

    pub fn toggle_day(&self, id: &str, day: NaiveDate) -> GoalState {
        self.map_goal(id, |goal| goal.toggle_day(day))
    }

    pub fn increment_video_count(&self, id: &str) -> GoalState {
        match self.get(id) {
            Some(goal) if goal.can_increment_videos() => self.map_goal(id, |goal| {
                goal.video_count = Some((goal.videos() + 1).min(MAX_VIDEO_COUNT));
            }),
            _ => self.clone(),
        }
    }

    pub fn decrement_video_count(&self, id: &str) -> GoalState {
        match self.get(id) {
            Some(goal) if goal.can_decrement_videos() => self.map_goal(id, |goal| {
                goal.video_count = Some(goal.videos().saturating_sub(1));
            }),
            _ => self.clone(),
        }
    }

    /// Append a new goal with a freshly generated id.
    pub fn add_goal(&self, name: &str, icon: Option<GoalIcon>) -> Result<GoalState, GoalError> {
        validate_name(name)?;
        let id = self.fresh_id();
        let mut next = self.clone();
        next.goals.push(Goal::new(id, name, icon.unwrap_or_default()));
        Ok(next)
    }

    /// Rename and re-icon a goal in place. Progress and counters are kept.
    pub fn edit_goal(
        &self,
        id: &str,
        name: &str,
        icon: Option<GoalIcon>,
    ) -> Result<GoalState, GoalError> {
        validate_name(name)?;
        Ok(self.map_goal(id, |goal| {
            goal.name = name.to_string();
            goal.icon = Some(icon.unwrap_or_default());
        }))
    }

    pub fn delete_goal(&self, id: &str) -> GoalState {
        GoalState {
            goals: self.goals.iter().filter(|g| g.id != id).cloned().collect(),
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a persisted snapshot and restore its invariants.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let state: GoalState = serde_json::from_str(json)?;
        Ok(state.normalized())
    }

    /// Repair a snapshot that did not come from this crate: recount progress,
    /// clamp video counters and drop goals whose id was already seen.
    pub fn normalized(mut self) -> Self {
        let mut seen = HashSet::new();
        self.goals.retain(|goal| {
            let fresh = seen.insert(goal.id.clone());
            if !fresh {
                log::warn!("Dropping goal with duplicate id {}", goal.id);
            }
            fresh
        });
        for goal in &mut self.goals {
            goal.recount();
            if let Some(count) = goal.video_count {
                goal.video_count = Some(count.min(MAX_VIDEO_COUNT));
            }
        }
        self
    }
}

/// Names are checked trimmed but stored as typed.
fn validate_name(name: &str) -> Result<(), GoalError> {
    if name.trim().is_empty() {
        Err(GoalError::EmptyName)
    } else {
        Ok(())
    }
}
