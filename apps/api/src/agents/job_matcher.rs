//! Job Matcher: synthesizes a job description for the target role and scores the profile.
//!
//! Besides the full report in `analysis_result`, the score and gaps are copied
//! into `job_match_score` / `skill_gaps` for the career counselor.

use serde_json::Value;
use tracing::info;

use crate::agents::prompts::{DEFAULT_JOB_TARGET_ROLE, JOB_MATCH_SYSTEM};
use crate::agents::reports::{AnalysisResult, JobMatchReport, SkillGaps};
use crate::agents::{generate_artifact, profile_json};
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::session::SessionState;

pub async fn match_job(state: &mut SessionState, llm: &dyn ChatModel) -> Result<(), AppError> {
    let target_role = state
        .target_role
        .as_deref()
        .unwrap_or(DEFAULT_JOB_TARGET_ROLE);

    let payload = format!(
        "Profile: {}\nTarget Role: {target_role}",
        profile_json(state.profile())?
    );
    let artifact = generate_artifact::<JobMatchReport>(llm, JOB_MATCH_SYSTEM, payload).await?;

    // Unparsed replies leave the previous score and gaps in place.
    if let Some(doc) = artifact.doc() {
        let score = read_match_score(doc.get("match_score"));
        let gaps = doc
            .get("gaps")
            .map(SkillGaps::from_value)
            .unwrap_or_default();
        info!("Job match score {score} for {target_role}");
        state.job_match_score = Some(score);
        state.skill_gaps = Some(gaps);
    }

    state.analysis_result = Some(AnalysisResult::JobMatch(artifact));
    Ok(())
}

/// Numbers as-is, numeric strings parsed; anything else scores 0.
fn read_match_score(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}
