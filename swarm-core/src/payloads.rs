//! Request bodies and endpoints of the language-tracker API

use crate::fake::FakeData;
use serde::{Deserialize, Serialize};

pub const USERS_PATH: &str = "/v1/users";
pub const SESSIONS_PATH: &str = "/v1/sessions";
pub const TALK_PATH: &str = "/v1/talk";
pub const MEDIAS_PATH: &str = "/v1/medias";
pub const ANKI_PATH: &str = "/v1/anki";
pub const VOCABULARY_PATH: &str = "/v1/vocabulary";
pub const BOOKS_PATH: &str = "/v1/books";
pub const HEALTH_PATH: &str = "/health";

/// Language every review, media and book entry is filed under
pub const TARGET_LANGUAGE: &str = "Japanese";

/// Video submitted by every media entry; the server only accepts YouTube links
pub const MEDIA_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
pub const MEDIA_KIND: &str = "Youtube";
pub const MEDIA_WATCH_TYPE: &str = "Active";

/// Body of `POST /v1/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn generate(fake: &mut FakeData) -> Self {
        let username = format!(
            "{}{}{}",
            fake.user_name(),
            fake.user_name(),
            fake.password(5)
        );
        let password = fake.password(10);
        let email = format!("{}@{}", fake.alphanumeric(10), fake.domain_name());

        Self {
            username,
            email,
            password,
        }
    }
}

/// Body of `POST /v1/sessions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub email: String,
    pub password: String,
}

/// Successful `POST /v1/sessions` response; every other field is ignored
#[derive(Debug, Clone, Deserialize)]
pub struct SessionToken {
    pub token: Option<String>,
}

/// Body of `POST /v1/talk`; the server parses `time` (minutes) from text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
}

impl TalkEntry {
    pub fn generate(fake: &mut FakeData) -> Self {
        Self {
            kind: fake.word().to_string(),
            time: fake.number_with_digits(2).to_string(),
        }
    }
}

/// Body of `POST /v1/medias`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaEntry {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub watch_type: String,
    pub target_language: String,
}

impl Default for MediaEntry {
    fn default() -> Self {
        Self {
            url: MEDIA_URL.to_string(),
            kind: MEDIA_KIND.to_string(),
            watch_type: MEDIA_WATCH_TYPE.to_string(),
            target_language: TARGET_LANGUAGE.to_string(),
        }
    }
}

/// Body of `POST /v1/anki`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnkiReview {
    pub reviewed: u32,
    #[serde(rename = "newCards")]
    pub new_cards: u32,
    pub time: u32,
    pub target_language: String,
}

impl AnkiReview {
    pub fn generate(fake: &mut FakeData) -> Self {
        Self {
            reviewed: fake.number_with_digits(2),
            new_cards: fake.number_with_digits(2),
            time: fake.number_with_digits(2),
            target_language: TARGET_LANGUAGE.to_string(),
        }
    }
}

/// Body of `POST /v1/vocabulary`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyReview {
    pub vocabulary: u32,
    pub target_language: String,
}

impl VocabularyReview {
    pub fn generate(fake: &mut FakeData) -> Self {
        Self {
            vocabulary: fake.number_with_digits(4),
            target_language: TARGET_LANGUAGE.to_string(),
        }
    }
}

/// Body of `POST /v1/books`; page counts travel as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntry {
    pub title: String,
    pub description: String,
    pub pages: String,
    pub read_pages: String,
    pub read_type: String,
    pub target_language: String,
}

impl BookEntry {
    pub fn generate(fake: &mut FakeData) -> Self {
        let pages = fake.number_between(50, 600);
        let read_pages = fake.number_between(0, pages);
        let read_type = if fake.number_between(0, 1) == 0 {
            "Reading"
        } else {
            "Listening"
        };

        Self {
            title: fake.sentence(3).trim_end_matches('.').to_string(),
            description: fake.sentence(8),
            pages: pages.to_string(),
            read_pages: read_pages.to_string(),
            read_type: read_type.to_string(),
            target_language: TARGET_LANGUAGE.to_string(),
        }
    }
}
