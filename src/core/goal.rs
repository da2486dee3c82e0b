use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::calendar::{day_key, parse_day_key};
use super::error::GoalError;

/// Days of completion a goal aims for.
pub const DEFAULT_TARGET: u32 = 30;

/// Upper bound of the per-goal video counter.
pub const MAX_VIDEO_COUNT: u32 = 10;

/// Icon tag shown next to a goal. The set is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalIcon {
    Youtube,
    Brain,
    Briefcase,
    #[default]
    Target,
    Code,
    Book,
}

impl GoalIcon {
    pub const ALL: [GoalIcon; 6] = [
        Self::Youtube,
        Self::Brain,
        Self::Briefcase,
        Self::Target,
        Self::Code,
        Self::Book,
    ];

    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Brain => "brain",
            Self::Briefcase => "briefcase",
            Self::Target => "target",
            Self::Code => "code",
            Self::Book => "book",
        }
    }

    pub fn from_tag(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "youtube" => Some(Self::Youtube),
            "brain" => Some(Self::Brain),
            "briefcase" => Some(Self::Briefcase),
            "target" => Some(Self::Target),
            "code" => Some(Self::Code),
            "book" => Some(Self::Book),
            _ => None,
        }
    }

    /// Single glyph for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Youtube => "\u{25B6}",
            Self::Brain => "\u{2699}",
            Self::Briefcase => "\u{25A3}",
            Self::Target => "\u{25CE}",
            Self::Code => "\u{2328}",
            Self::Book => "\u{2261}",
        }
    }
}

impl fmt::Display for GoalIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for GoalIcon {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| GoalError::UnknownIcon(s.to_string()))
    }
}

/// One tracked objective.
///
/// `progress` is a cache of the number of completed days in `daily_progress`.
/// Only [`Goal::recount`] writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target: u32,
    pub progress: u32,
    #[serde(default, deserialize_with = "deserialize_daily_progress")]
    pub daily_progress: BTreeMap<NaiveDate, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<GoalIcon>,
}

/// Day keys must be exactly `YYYY-MM-DD`; chrono alone would also accept
/// unpadded spellings and merge them with the canonical key.
fn deserialize_daily_progress<'de, D>(deserializer: D) -> Result<BTreeMap<NaiveDate, bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, done)| match parse_day_key(&key) {
            Ok(day) if day_key(day) == key => Ok((day, done)),
            _ => Err(serde::de::Error::custom(GoalError::InvalidDayKey(key))),
        })
        .collect()
}

impl Goal {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: GoalIcon) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target: DEFAULT_TARGET,
            progress: 0,
            daily_progress: BTreeMap::new(),
            video_count: None,
            icon: Some(icon),
        }
    }

    /// The icon to display, `Target` when none was chosen.
    pub fn icon(&self) -> GoalIcon {
        self.icon.unwrap_or_default()
    }

    pub fn is_done_on(&self, day: NaiveDate) -> bool {
        self.daily_progress.get(&day).copied().unwrap_or(false)
    }

    /// Flip the completion flag for `day` and refresh the cached count.
    pub fn toggle_day(&mut self, day: NaiveDate) {
        let done = self.is_done_on(day);
        self.daily_progress.insert(day, !done);
        self.recount();
    }

    pub fn recount(&mut self) {
        self.progress = self.daily_progress.values().filter(|done| **done).count() as u32;
    }

    /// Whether this goal carries the bounded video counter.
    pub fn has_video_counter(&self) -> bool {
        self.video_count.is_some()
    }

    pub fn videos(&self) -> u32 {
        self.video_count.unwrap_or(0)
    }

    pub fn can_increment_videos(&self) -> bool {
        self.videos() < MAX_VIDEO_COUNT
    }

    pub fn can_decrement_videos(&self) -> bool {
        self.videos() > 0
    }

    /// Fraction of the target reached, capped at 1.0.
    pub fn completion_ratio(&self) -> f32 {
        if self.target == 0 {
            return 1.0;
        }
        (self.progress as f32 / self.target as f32).min(1.0)
    }

    pub fn video_ratio(&self) -> f32 {
        (self.videos() as f32 / MAX_VIDEO_COUNT as f32).min(1.0)
    }

    /// Trophy condition: exactly the target number of days completed.
    pub fn is_achieved(&self) -> bool {
        self.progress == self.target
    }
}
