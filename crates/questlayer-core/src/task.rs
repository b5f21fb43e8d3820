//! Reward tasks ("quests") configured by the builder.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Link value that marks the share hub task.
pub const SHARE_HUB_LINK: &str = "share";

/// Opaque task identifier.
///
/// The builder hands out both numeric ids (starter tasks) and string ids
/// (named or generated), so both forms round-trip unchanged through TOML and
/// the embed payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Text(String),
}

impl TaskId {
    /// Fresh random id for a task created without one.
    pub fn generate() -> Self {
        TaskId::Text(uuid::Uuid::new_v4().to_string())
    }

    /// Parse user input for a new id. Canonical integers ("42", not "007"
    /// or "+1") become numeric ids, so the id prints back as typed.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) if n.to_string() == raw => TaskId::Number(n),
            _ => TaskId::Text(raw.to_string()),
        }
    }

    /// Whether this id prints as `raw`. Numeric and string ids with the same
    /// text both match.
    pub fn matches(&self, raw: &str) -> bool {
        match self {
            TaskId::Number(n) => n.to_string() == raw,
            TaskId::Text(s) => s == raw,
        }
    }
}

/// Look a task up by the id as a user typed it.
pub fn find_by_display<'a>(tasks: &'a [Task], raw: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.id.matches(raw))
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{n}"),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for TaskId {
    fn from(n: i64) -> Self {
        TaskId::Number(n)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId::Text(s.to_string())
    }
}

/// A unit of work with an external link and an XP reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, rename = "desc")]
    pub description: String,
    pub link: String,
    pub xp: u64,
}

impl Task {
    pub fn new(
        id: impl Into<TaskId>,
        title: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
        xp: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            link: link.into(),
            xp,
        }
    }

    /// The share hub is rewarded per platform shared, never launched as a quest.
    pub fn is_share_hub(&self) -> bool {
        self.link == SHARE_HUB_LINK
    }

    /// Check reward and link. Id uniqueness is checked at the list level.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::Empty(format!("task {} title", self.id)));
        }
        if self.xp == 0 {
            return Err(ValidationError::ZeroXp(self.id.to_string()));
        }
        if !self.is_share_hub() && url::Url::parse(&self.link).is_err() {
            return Err(ValidationError::InvalidLink {
                id: self.id.to_string(),
                link: self.link.clone(),
            });
        }
        Ok(())
    }
}

/// The starter task list a fresh project ships with.
pub fn starter_tasks() -> Vec<Task> {
    vec![
        Task::new(
            "viral-share",
            "Viral Expansion",
            "Spread the word across your social networks and earn 100 XP per platform shared.",
            SHARE_HUB_LINK,
            100,
        ),
        Task::new(
            TaskId::Number(1),
            "Verify Protocol X",
            "Secure your spot in the ecosystem by following our primary governance channel.",
            "https://twitter.com",
            500,
        ),
        Task::new(
            TaskId::Number(2),
            "Community Discord",
            "Join the verified builders and contributors to unlock restricted channels.",
            "https://discord.com",
            800,
        ),
        Task::new(
            TaskId::Number(3),
            "Review Tokenomics",
            "Deep dive into the latest v3 whitepaper regarding liquidity incentives.",
            "https://google.com",
            300,
        ),
        Task::new(
            TaskId::Number(4),
            "Share Feedback",
            "Help us improve the builder experience by submitting a quick bug report.",
            "https://google.com",
            1200,
        ),
    ]
}
