//! Study checklist: per-topic read/watched/solved flags plus a running count
//! of fully completed topics.

pub mod store;
pub mod topics;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
pub use topics::{AlgorithmTopic, TOPICS, find_topic, require_topic};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info, warn};

use crate::constants::storage::{COMPLETED_TOPICS_KEY, TOPIC_KEY_PREFIX};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChecklistFlag {
    Read,
    Watched,
    Solved,
}

impl ChecklistFlag {
    pub const ALL: [ChecklistFlag; 3] = [Self::Read, Self::Watched, Self::Solved];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Watched => "watched",
            Self::Solved => "solved",
        }
    }
}

impl fmt::Display for ChecklistFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChecklistFlag {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "read" | "r" => Ok(Self::Read),
            "watched" | "watch" | "w" => Ok(Self::Watched),
            "solved" | "solve" | "s" => Ok(Self::Solved),
            other => Err(AppError::config_error(format!(
                "Unknown checklist flag '{other}' (expected read, watched or solved)"
            ))),
        }
    }
}

/// Stored record for a single topic.
///
/// `counted` remembers whether this topic is currently included in the
/// completed-topics counter, so repeated toggles never drift the count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopicProgress {
    pub read: bool,
    pub watched: bool,
    pub solved: bool,
    pub counted: bool,
}

impl TopicProgress {
    pub fn flag(&self, flag: ChecklistFlag) -> bool {
        match flag {
            ChecklistFlag::Read => self.read,
            ChecklistFlag::Watched => self.watched,
            ChecklistFlag::Solved => self.solved,
        }
    }

    pub fn toggle(&mut self, flag: ChecklistFlag) {
        let slot = match flag {
            ChecklistFlag::Read => &mut self.read,
            ChecklistFlag::Watched => &mut self.watched,
            ChecklistFlag::Solved => &mut self.solved,
        };
        *slot = !*slot;
    }

    pub fn is_done(&self) -> bool {
        self.read && self.watched && self.solved
    }

    pub fn checked_count(&self) -> usize {
        ChecklistFlag::ALL.iter().filter(|f| self.flag(**f)).count()
    }
}

/// Result of a toggle, reflecting the in-memory state even if persisting it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub progress: TopicProgress,
    pub completed_total: u32,
}

pub struct ProgressTracker<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn topic_key(topic: &str) -> String {
        format!("{TOPIC_KEY_PREFIX}{topic}")
    }

    /// Current record for `topic`. Missing or unreadable records read as empty.
    pub fn progress(&self, topic: &str) -> TopicProgress {
        let key = Self::topic_key(topic);
        match self.store.get(&key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Ignoring unreadable progress record {key}: {e}");
                TopicProgress::default()
            }),
            Ok(None) => TopicProgress::default(),
            Err(e) => {
                error!("Failed to read progress record {key}: {e}");
                TopicProgress::default()
            }
        }
    }

    pub fn completed_total(&self) -> u32 {
        match self.store.get(COMPLETED_TOPICS_KEY) {
            Ok(Some(raw)) => raw.trim().parse::<i64>().map_or_else(
                |e| {
                    warn!("Ignoring unreadable completed counter '{raw}': {e}");
                    0
                },
                |n| n.clamp(0, i64::from(u32::MAX)) as u32,
            ),
            Ok(None) => 0,
            Err(e) => {
                error!("Failed to read completed counter: {e}");
                0
            }
        }
    }

    /// Flips one flag and keeps the completed counter in step with the
    /// topic's all-done state.
    pub fn toggle(&mut self, topic: &str, flag: ChecklistFlag) -> ToggleOutcome {
        let mut progress = self.progress(topic);
        progress.toggle(flag);

        let mut completed_total = self.completed_total();
        if progress.is_done() && !progress.counted {
            completed_total = completed_total.saturating_add(1);
            progress.counted = true;
            info!("Topic {topic} completed ({completed_total} total)");
        } else if !progress.is_done() && progress.counted {
            completed_total = completed_total.saturating_sub(1);
            progress.counted = false;
            info!("Topic {topic} no longer complete ({completed_total} total)");
        }

        debug!(
            "Toggled {flag} on {topic}: {}/{} checked",
            progress.checked_count(),
            ChecklistFlag::ALL.len()
        );

        if let Err(e) = self.persist(topic, &progress, completed_total) {
            error!("Failed to save progress for {topic}: {e}");
        }

        ToggleOutcome {
            progress,
            completed_total,
        }
    }

    fn persist(
        &mut self,
        topic: &str,
        progress: &TopicProgress,
        completed_total: u32,
    ) -> Result<(), AppError> {
        let record = serde_json::to_string(progress)?;
        self.store.set_many(vec![
            (Self::topic_key(topic), record),
            (COMPLETED_TOPICS_KEY.to_string(), completed_total.to_string()),
        ])
    }

    /// Progress for every catalog topic, in catalog order.
    pub fn summary(&self) -> Vec<(&'static AlgorithmTopic, TopicProgress)> {
        TOPICS
            .iter()
            .map(|topic| (topic, self.progress(topic.slug)))
            .collect()
    }
}
