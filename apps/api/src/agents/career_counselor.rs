//! Career Counselor: learning plan built on the gaps left by the job matcher.

use tracing::{debug, info};

use crate::agents::prompts::CAREER_COUNSELOR_SYSTEM;
use crate::agents::reports::{AnalysisResult, CareerGuidance, SkillGaps};
use crate::agents::{generate_artifact, profile_json};
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::session::SessionState;

pub async fn counsel_career(state: &mut SessionState, llm: &dyn ChatModel) -> Result<(), AppError> {
    let no_gaps = SkillGaps::default();
    let skill_gaps = state.skill_gaps.as_ref().unwrap_or(&no_gaps);
    if skill_gaps.is_empty() {
        debug!("Career counseling without prior skill gaps");
    }

    let gaps_json = serde_json::to_string(skill_gaps)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize skill gaps: {e}")))?;

    let payload = format!(
        "Profile: {}\nSkill Gaps: {gaps_json}\nTarget Role: {}",
        profile_json(state.profile())?,
        state.target_role.as_deref().unwrap_or_default()
    );
    let artifact =
        generate_artifact::<CareerGuidance>(llm, CAREER_COUNSELOR_SYSTEM, payload).await?;

    if let Some(guidance) = artifact.report() {
        info!(
            "Career guidance: {} critical gaps, {} paths",
            guidance.skill_gap_analysis.critical_gaps.len(),
            guidance.career_paths.len()
        );
    }

    state.analysis_result = Some(AnalysisResult::CareerGuidance(artifact));
    Ok(())
}
