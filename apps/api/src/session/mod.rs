//! Session state: the persisted continuity unit of one conversation.

pub mod redis_store;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::agents::parser::Artifact;
use crate::agents::reports::{AnalysisResult, ContentSuggestions, SkillGaps};
use crate::agents::Behavior;

pub use store::{MemorySessionStore, SessionStore, StoreError};

/// Scraped profile record: named sections mapped to free-form values.
pub type ProfileData = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

/// `{role, content}` pair returned by the history API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub content: String,
}

/// Everything the assistant remembers about one conversation.
///
/// `messages` only ever grows. Artifacts are overwritten by the agent that
/// produces them and otherwise carried across turns untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub messages: Vec<ChatMessage>,
    pub profile_data: Option<ProfileData>,
    pub target_role: Option<String>,
    pub analysis_result: Option<AnalysisResult>,
    pub content_suggestions: Option<Artifact<ContentSuggestions>>,
    pub skill_gaps: Option<SkillGaps>,
    pub job_match_score: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Set by the router, taken by the scheduler in the same turn.
    #[serde(skip)]
    pub next_action: Option<Behavior>,
}

impl SessionState {
    /// Profile usable by an agent. An empty record counts as no profile.
    pub fn profile(&self) -> Option<&ProfileData> {
        self.profile_data.as_ref().filter(|p| !p.is_empty())
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::Assistant)
            .map(|m| m.content.as_str())
    }

    /// Replaces the stored profile wholesale. Empty records are ignored.
    pub fn set_profile(&mut self, profile: ProfileData) {
        if !profile.is_empty() {
            self.profile_data = Some(profile);
        }
    }

    /// Replaces the sticky target role. Blank hints are ignored.
    pub fn set_target_role(&mut self, role: &str) {
        let role = role.trim();
        if !role.is_empty() {
            self.target_role = Some(role.to_string());
        }
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.messages
            .iter()
            .map(|m| HistoryEntry {
                role: m.role,
                content: m.content.clone(),
            })
            .collect()
    }
}

/// Session id for a profile URL: lowercase hex SHA-256 of the URL.
///
/// The same URL always re-enters the same session.
pub fn session_id_for_profile_url(profile_url: &str) -> String {
    format!("{:x}", Sha256::digest(profile_url.as_bytes()))
}
