//! Offline doubles for the model and the profile scraper.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::llm_client::{ChatModel, LlmError, PromptMessage};
use crate::scraper::{ProfileSource, ScrapeError};
use crate::session::ProfileData;

/// Reply used once the scripted queue is exhausted.
pub const DEFAULT_REPLY: &str = "Happy to help!";

/// Model that answers from a queue and records every prompt it receives.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<Vec<PromptMessage>>>,
}

impl ScriptedModel {
    pub fn new<I, S>(replies: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<Vec<PromptMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// User payload of the n-th call.
    pub fn user_payload(&self, call: usize) -> String {
        self.calls()[call]
            .iter()
            .rev()
            .find(|m| m.role == crate::llm_client::PromptRole::User)
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn generate(&self, messages: &[PromptMessage]) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        let next = self.replies.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| DEFAULT_REPLY.to_string()))
    }
}

/// Model whose provider is always down.
#[derive(Default)]
pub struct FailingModel {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl ChatModel for FailingModel {
    async fn generate(&self, _messages: &[PromptMessage]) -> Result<String, LlmError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(LlmError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}

/// Scraper double keyed by profile URL.
#[derive(Default)]
pub struct StaticProfileSource {
    profiles: HashMap<String, ProfileData>,
    pub fetches: AtomicUsize,
}

impl StaticProfileSource {
    pub fn with_profile(url: &str, profile: ProfileData) -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(url.to_string(), profile);
        Self {
            profiles,
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProfileSource for StaticProfileSource {
    async fn fetch(&self, profile_url: &str) -> Result<Option<ProfileData>, ScrapeError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.profiles.get(profile_url).cloned())
    }
}

pub fn sample_profile() -> ProfileData {
    let value = json!({
        "fullName": "Jane Doe",
        "headline": "Backend Engineer at Acme",
        "about": "I build reliable services.",
        "experiences": [
            {"title": "Backend Engineer", "company": "Acme", "description": "Maintained billing APIs"}
        ],
        "skills": ["Rust", "PostgreSQL"],
        "educations": [{"school": "State University", "degree": "BSc Computer Science"}]
    });
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("sample profile is an object"),
    }
}
