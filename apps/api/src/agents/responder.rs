//! Responder: turns whatever artifacts the session holds into a chat reply.
//!
//! Runs at the end of every turn and is the only agent that writes to history.

use tracing::debug;

use crate::agents::prompts::{response_system, NO_ANALYSIS_CONTEXT};
use crate::errors::AppError;
use crate::llm_client::{ChatModel, PromptMessage};
use crate::session::{ChatMessage, SessionState};

pub async fn respond(state: &mut SessionState, llm: &dyn ChatModel) -> Result<(), AppError> {
    let context = presentation_context(state)?;
    let user_message = state
        .last_message()
        .map(|m| m.content.as_str())
        .unwrap_or_default();

    let messages = [
        PromptMessage::system(response_system()),
        PromptMessage::user(format!(
            "User asked: {user_message}\n\nData to present:\n{context}"
        )),
    ];

    let reply = llm
        .generate(&messages)
        .await
        .map_err(|e| AppError::Llm(format!("Response generation failed: {e}")))?;

    debug!("Reply rendered ({} chars)", reply.len());
    state.messages.push(ChatMessage::assistant(reply));
    Ok(())
}

/// Analysis and content blocks for the reply prompt.
fn presentation_context(state: &SessionState) -> Result<String, AppError> {
    let mut parts = Vec::new();

    if let Some(analysis) = &state.analysis_result {
        parts.push(format!("Analysis Results: {}", pretty(&analysis.to_value())?));
    }
    if let Some(suggestions) = &state.content_suggestions {
        parts.push(format!(
            "Content Suggestions: {}",
            pretty(&suggestions.to_value())?
        ));
    }

    if parts.is_empty() {
        Ok(NO_ANALYSIS_CONTEXT.to_string())
    } else {
        Ok(parts.join("\n\n"))
    }
}

fn pretty(value: &serde_json::Value) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize artifact: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::parser::Artifact;
    use crate::agents::reports::AnalysisResult;
    use crate::llm_client::PromptRole;
    use crate::session::ChatRole;
    use crate::test_support::ScriptedModel;

    #[tokio::test]
    async fn test_reply_is_appended_to_history() {
        let llm = ScriptedModel::new(["Hi there! Share your profile URL to begin."]);
        let mut state = SessionState::default();
        state.messages.push(ChatMessage::user("hello"));

        respond(&mut state, llm.as_ref()).await.unwrap();

        assert_eq!(state.messages.len(), 2);
        let last = state.messages.last().unwrap();
        assert_eq!(last.role, ChatRole::Assistant);
        assert_eq!(last.content, "Hi there! Share your profile URL to begin.");

        let calls = llm.calls();
        assert_eq!(calls[0][0].role, PromptRole::System);
        assert_eq!(
            llm.user_payload(0),
            "User asked: hello\n\nData to present:\nNo analysis available yet."
        );
    }

    #[tokio::test]
    async fn test_context_includes_both_artifacts() {
        let llm = ScriptedModel::new(["Here is what I found."]);
        let mut state = SessionState {
            analysis_result: Some(AnalysisResult::Unavailable {
                error: "No profile data available".to_string(),
            }),
            content_suggestions: Some(Artifact::Unparsed {
                raw: "Lead with impact".to_string(),
            }),
            ..SessionState::default()
        };
        state.messages.push(ChatMessage::user("what now?"));

        respond(&mut state, llm.as_ref()).await.unwrap();

        let payload = llm.user_payload(0);
        assert!(payload.contains("Analysis Results: {"));
        assert!(payload.contains("\"error\": \"No profile data available\""));
        assert!(payload.contains("Content Suggestions: {"));
        assert!(payload.contains("\"raw_content\": true"));
        assert!(!payload.contains(NO_ANALYSIS_CONTEXT));
    }
}
