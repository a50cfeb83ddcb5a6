//! Profile Analyzer: section-by-section completeness, gaps and inconsistencies.

use tracing::{info, warn};

use crate::agents::prompts::PROFILE_ANALYSIS_SYSTEM;
use crate::agents::reports::{AnalysisResult, ProfileAnalysis};
use crate::agents::{generate_artifact, profile_json};
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::session::SessionState;

pub const NO_PROFILE_ERROR: &str = "No profile data available";

/// Writes a profile analysis into `analysis_result`.
///
/// Without a profile this records an `Unavailable` result and makes no model call.
pub async fn analyze_profile(state: &mut SessionState, llm: &dyn ChatModel) -> Result<(), AppError> {
    let Some(profile) = state.profile() else {
        warn!("Profile analysis skipped: no profile data in session");
        state.analysis_result = Some(AnalysisResult::Unavailable {
            error: NO_PROFILE_ERROR.to_string(),
        });
        return Ok(());
    };

    let payload = format!("LinkedIn Profile Data:\n{}", profile_json(Some(profile))?);
    let artifact = generate_artifact::<ProfileAnalysis>(llm, PROFILE_ANALYSIS_SYSTEM, payload).await?;

    if let Some(report) = artifact.report() {
        info!(
            "Profile analysed: score={:?}, {} recommendations",
            report.overall_score,
            report.recommendations.len()
        );
    }

    state.analysis_result = Some(AnalysisResult::Profile(artifact));
    Ok(())
}
