// Multi-agent assistant: router → specialized agent → responder, once per turn.
// All model calls go through the ChatModel trait in llm_client.

pub mod career_counselor;
pub mod content_generator;
pub mod graph;
pub mod handlers;
pub mod job_matcher;
pub mod parser;
pub mod profile_analyzer;
pub mod prompts;
pub mod registry;
pub mod reports;
pub mod responder;
pub mod router;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::agents::parser::{parse_artifact, Artifact, ArtifactKind};
use crate::errors::AppError;
use crate::llm_client::{ChatModel, PromptMessage};
use crate::session::ProfileData;

/// What the router decided to run for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    ProfileAnalyzer,
    ContentGenerator,
    JobMatcher,
    CareerCounselor,
    /// Skip specialized work and answer from existing state.
    Respond,
}

impl Behavior {
    pub fn as_str(self) -> &'static str {
        match self {
            Behavior::ProfileAnalyzer => "profile_analyzer",
            Behavior::ContentGenerator => "content_generator",
            Behavior::JobMatcher => "job_matcher",
            Behavior::CareerCounselor => "career_counselor",
            Behavior::Respond => "respond",
        }
    }
}

impl std::fmt::Display for Behavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs one structured generation call and parses the reply into an artifact.
///
/// Format problems become `Artifact::Unparsed`; only a failed call is an error.
pub(crate) async fn generate_artifact<T>(
    llm: &dyn ChatModel,
    system: &str,
    payload: String,
) -> Result<Artifact<T>, AppError>
where
    T: DeserializeOwned + ArtifactKind,
{
    let messages = [
        PromptMessage::system(prompts::with_json_only(system)),
        PromptMessage::user(payload),
    ];

    let text = llm
        .generate(&messages)
        .await
        .map_err(|e| AppError::Llm(format!("{} call failed: {e}", T::LABEL)))?;

    Ok(parse_artifact(&text))
}

/// Pretty JSON of the profile, `{}` when there is none.
pub(crate) fn profile_json(profile: Option<&ProfileData>) -> Result<String, AppError> {
    let empty = ProfileData::new();
    serde_json::to_string_pretty(profile.unwrap_or(&empty))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {e}")))
}
