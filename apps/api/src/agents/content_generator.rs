//! Content Generator: rewrites headline, about, experience and skills for a target role.

use tracing::info;

use crate::agents::prompts::{CONTENT_GENERATION_SYSTEM, DEFAULT_CONTENT_TARGET_ROLE};
use crate::agents::reports::ContentSuggestions;
use crate::agents::{generate_artifact, profile_json};
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::session::SessionState;

/// Writes rewritten sections into `content_suggestions`. `analysis_result` is left alone.
pub async fn generate_content(
    state: &mut SessionState,
    llm: &dyn ChatModel,
) -> Result<(), AppError> {
    let target_role = state
        .target_role
        .as_deref()
        .unwrap_or(DEFAULT_CONTENT_TARGET_ROLE);

    let payload = format!(
        "Profile Data: {}\nTarget Role: {target_role}",
        profile_json(state.profile())?
    );
    let artifact =
        generate_artifact::<ContentSuggestions>(llm, CONTENT_GENERATION_SYSTEM, payload).await?;

    if let Some(suggestions) = artifact.report() {
        info!(
            "Content rewritten: {} experience items",
            suggestions.experience_items.len()
        );
    }

    state.content_suggestions = Some(artifact);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::parser::Artifact;
    use crate::agents::reports::AnalysisResult;
    use crate::test_support::{sample_profile, ScriptedModel};

    #[tokio::test]
    async fn test_defaults_target_role_when_unset() {
        let llm = ScriptedModel::new([r#"{"headline": {"original": "Backend Engineer at Acme", "enhanced": "Backend Engineer | Rust", "improvements": ["keywords"]}}"#]);
        let mut state = SessionState::default();
        state.set_profile(sample_profile());

        generate_content(&mut state, llm.as_ref()).await.unwrap();

        assert!(llm
            .user_payload(0)
            .ends_with("Target Role: General professional profile"));
        let suggestions = state.content_suggestions.unwrap();
        let report = suggestions.report().unwrap();
        assert_eq!(report.headline.unwrap().enhanced, "Backend Engineer | Rust");
    }

    #[tokio::test]
    async fn test_leaves_analysis_result_untouched() {
        let llm = ScriptedModel::new(["{}"]);
        let prior = AnalysisResult::Unavailable {
            error: "earlier".to_string(),
        };
        let mut state = SessionState {
            analysis_result: Some(prior.clone()),
            ..SessionState::default()
        };
        state.set_profile(sample_profile());
        state.set_target_role("Staff Engineer");

        generate_content(&mut state, llm.as_ref()).await.unwrap();

        assert!(llm.user_payload(0).ends_with("Target Role: Staff Engineer"));
        assert_eq!(state.analysis_result, Some(prior));
    }

    #[tokio::test]
    async fn test_prose_reply_keeps_raw_text() {
        let text = "Try leading with your impact on billing reliability.";
        let llm = ScriptedModel::new([text]);
        let mut state = SessionState::default();
        state.set_profile(sample_profile());

        generate_content(&mut state, llm.as_ref()).await.unwrap();

        let suggestions = state.content_suggestions.unwrap();
        assert_eq!(
            suggestions,
            Artifact::Unparsed {
                raw: text.to_string()
            }
        );
        assert_eq!(suggestions.to_value()["suggestions"], text);
        assert_eq!(suggestions.to_value()["raw_content"], true);
    }
}
