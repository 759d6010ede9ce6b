//! Task catalogue and weighted task selection

use crate::error::{Result, SwarmError};
use crate::payloads::{
    ANKI_PATH, BOOKS_PATH, HEALTH_PATH, MEDIAS_PATH, SESSIONS_PATH, TALK_PATH, USERS_PATH,
    VOCABULARY_PATH,
};
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use swarm_http::HttpMethod;

/// Every action a simulated user can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {
    Register,
    Login,
    CreateTalk,
    GetTalks,
    CreateMedia,
    GetMedia,
    CreateAnkiReview,
    GetAnkiReview,
    CreateVocabularyReview,
    GetVocabularyReview,
    CreateBook,
    GetBooks,
    HealthCheck,
}

impl Task {
    pub fn all() -> &'static [Task] {
        &[
            Task::Register,
            Task::Login,
            Task::CreateTalk,
            Task::GetTalks,
            Task::CreateMedia,
            Task::GetMedia,
            Task::CreateAnkiReview,
            Task::GetAnkiReview,
            Task::CreateVocabularyReview,
            Task::GetVocabularyReview,
            Task::CreateBook,
            Task::GetBooks,
            Task::HealthCheck,
        ]
    }

    /// Stable snake_case name used in configuration and logs
    pub fn name(&self) -> &'static str {
        match self {
            Task::Register => "register",
            Task::Login => "login",
            Task::CreateTalk => "create_talk",
            Task::GetTalks => "get_talks",
            Task::CreateMedia => "create_media",
            Task::GetMedia => "get_media",
            Task::CreateAnkiReview => "create_anki_review",
            Task::GetAnkiReview => "get_anki_review",
            Task::CreateVocabularyReview => "create_vocabulary_review",
            Task::GetVocabularyReview => "get_vocabulary_review",
            Task::CreateBook => "create_book",
            Task::GetBooks => "get_books",
            Task::HealthCheck => "health_check",
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Task::Register
            | Task::Login
            | Task::CreateTalk
            | Task::CreateMedia
            | Task::CreateAnkiReview
            | Task::CreateVocabularyReview
            | Task::CreateBook => HttpMethod::Post,
            Task::GetTalks
            | Task::GetMedia
            | Task::GetAnkiReview
            | Task::GetVocabularyReview
            | Task::GetBooks
            | Task::HealthCheck => HttpMethod::Get,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Task::Register => USERS_PATH,
            Task::Login => SESSIONS_PATH,
            Task::CreateTalk | Task::GetTalks => TALK_PATH,
            Task::CreateMedia | Task::GetMedia => MEDIAS_PATH,
            Task::CreateAnkiReview | Task::GetAnkiReview => ANKI_PATH,
            Task::CreateVocabularyReview | Task::GetVocabularyReview => VOCABULARY_PATH,
            Task::CreateBook | Task::GetBooks => BOOKS_PATH,
            Task::HealthCheck => HEALTH_PATH,
        }
    }

    /// Status the API answers with when the call succeeds
    pub fn success_status(&self) -> u16 {
        match self.method() {
            HttpMethod::Post if *self != Task::Register => 201,
            _ => 200,
        }
    }

    /// Whether the task needs a bearer token
    pub fn requires_token(&self) -> bool {
        !matches!(self, Task::Register | Task::Login | Task::HealthCheck)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Task {
    type Err = SwarmError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Task::all()
            .iter()
            .copied()
            .find(|task| task.name() == wanted)
            .ok_or_else(|| SwarmError::UnknownTask(s.to_string()))
    }
}

/// Tasks with their relative selection weights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSet {
    entries: Vec<(Task, u32)>,
}

impl TaskSet {
    /// Every task with weight 1
    pub fn uniform() -> Self {
        Self {
            entries: Task::all().iter().map(|task| (*task, 1)).collect(),
        }
    }

    /// Start from [`uniform`](Self::uniform) and override weights by task name
    ///
    /// Tasks given weight 0 are never picked.
    pub fn from_weights(weights: &BTreeMap<String, u32>) -> Result<Self> {
        let mut resolved: BTreeMap<Task, u32> = Task::all().iter().map(|task| (*task, 1)).collect();
        for (name, weight) in weights {
            resolved.insert(name.parse()?, *weight);
        }

        let entries: Vec<(Task, u32)> = resolved
            .into_iter()
            .filter(|(_, weight)| *weight > 0)
            .collect();

        if entries.is_empty() {
            return Err(SwarmError::NoRunnableTasks);
        }

        Ok(Self { entries })
    }

    pub fn weight_of(&self, task: Task) -> u32 {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == task)
            .map(|(_, weight)| *weight)
            .unwrap_or(0)
    }

    pub fn tasks(&self) -> impl Iterator<Item = Task> + '_ {
        self.entries.iter().map(|(task, _)| *task)
    }

    /// Pick a task at random, proportionally to its weight
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Task {
        self.entries
            .choose_weighted(rng, |(_, weight)| u64::from(*weight))
            .map(|(task, _)| *task)
            // Construction guarantees at least one positive weight
            .unwrap_or(self.entries[0].0)
    }
}

impl Default for TaskSet {
    fn default() -> Self {
        Self::uniform()
    }
}
