//! Report shapes produced by the specialized agents.
//!
//! These are typed views over the document an agent kept; the document itself
//! is what gets stored and rendered. Every documented field is optional or
//! defaulted, and anything undocumented lands in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::agents::parser::{Artifact, ArtifactKind};

// ────────────────────────────────────────────────────────────────────────────
// Profile analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionReview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<f64>,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub inconsistencies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<SectionReview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<SectionReview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<SectionReview>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<SectionReview>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileAnalysis {
    /// 1 – 10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    pub section_analysis: SectionAnalysis,
    pub overall_gaps: Vec<String>,
    pub overall_inconsistencies: Vec<String>,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArtifactKind for ProfileAnalysis {
    const LABEL: &'static str = "profile analysis";
    const RAW_FIELD: &'static str = "analysis";
    const RAW_FLAG: &'static str = "raw_analysis";
}

// ────────────────────────────────────────────────────────────────────────────
// Content suggestions
// ────────────────────────────────────────────────────────────────────────────

/// Before/after text for one profile section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionRewrite {
    /// Echo of the source text; scraped sections are not always strings.
    pub original: Value,
    pub enhanced: String,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceRewrite {
    pub title: String,
    pub company: String,
    pub original: Value,
    pub enhanced: String,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSuggestions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<SectionRewrite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<SectionRewrite>,
    pub experience_items: Vec<ExperienceRewrite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_summary: Option<SectionRewrite>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArtifactKind for ContentSuggestions {
    const LABEL: &'static str = "content suggestions";
    const RAW_FIELD: &'static str = "suggestions";
    const RAW_FLAG: &'static str = "raw_content";
}

// ────────────────────────────────────────────────────────────────────────────
// Job match
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescription {
    pub title: String,
    pub industry_standard_description: String,
    pub required_skills: Vec<String>,
    pub required_experience: Vec<String>,
    pub preferred_qualifications: Vec<String>,
}

/// Per-dimension scores, each 0 – 100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchBreakdown {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_match: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_match: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_match: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_fit: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingElements {
    pub strong_matches: Vec<String>,
    pub partial_matches: Vec<String>,
}

/// Gaps as reported by the job matcher: a flat list, categorized, or any
/// other shape the model chose, kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillGaps {
    List(Vec<String>),
    Categorized(CategorizedGaps),
    Other(Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizedGaps {
    pub missing_skills: Vec<String>,
    pub missing_experience: Vec<String>,
    pub missing_qualifications: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SkillGaps {
    fn default() -> Self {
        SkillGaps::List(Vec::new())
    }
}

impl SkillGaps {
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_else(|_| SkillGaps::Other(value.clone()))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SkillGaps::Other(Value::Null) => true,
            SkillGaps::Other(Value::Array(items)) => items.is_empty(),
            SkillGaps::Other(Value::Object(map)) => map.is_empty(),
            SkillGaps::Other(Value::String(s)) => s.trim().is_empty(),
            SkillGaps::Other(_) => false,
            SkillGaps::List(items) => items.is_empty(),
            SkillGaps::Categorized(c) => {
                c.missing_skills.is_empty()
                    && c.missing_experience.is_empty()
                    && c.missing_qualifications.is_empty()
                    && c.extra.is_empty()
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobMatchReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<JobDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_breakdown: Option<MatchBreakdown>,
    pub matching_elements: MatchingElements,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gaps: Option<SkillGaps>,
    pub improvement_suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArtifactKind for JobMatchReport {
    const LABEL: &'static str = "job match";
    const RAW_FIELD: &'static str = "analysis";
    const RAW_FLAG: &'static str = "raw_analysis";
}

// ────────────────────────────────────────────────────────────────────────────
// Career guidance
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GapTiers {
    pub critical_gaps: Vec<String>,
    pub moderate_gaps: Vec<String>,
    pub nice_to_have: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub name: String,
    pub platform: String,
    pub duration: String,
    pub cost: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillResources {
    pub skill: String,
    pub resources: Vec<LearningResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerPath {
    pub path_name: String,
    pub description: String,
    pub steps: Vec<String>,
    pub timeline: String,
    pub required_skills: Vec<String>,
}

/// Skills to acquire in 0–3, 3–6 and 6–12 months.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionTimeline {
    pub short_term: Vec<String>,
    pub medium_term: Vec<String>,
    pub long_term: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerGuidance {
    pub skill_gap_analysis: GapTiers,
    pub learning_resources: Vec<SkillResources>,
    pub career_paths: Vec<CareerPath>,
    pub transferable_skills: Vec<String>,
    pub skill_acquisition_timeline: AcquisitionTimeline,
    pub networking_strategies: Vec<String>,
    pub industry_events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ArtifactKind for CareerGuidance {
    const LABEL: &'static str = "career guidance";
    const RAW_FIELD: &'static str = "guidance";
    const RAW_FLAG: &'static str = "raw_guidance";
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis slot
// ────────────────────────────────────────────────────────────────────────────

/// Whatever the most recent analysis-producing agent left in the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "report", rename_all = "snake_case")]
pub enum AnalysisResult {
    Profile(Artifact<ProfileAnalysis>),
    JobMatch(Artifact<JobMatchReport>),
    CareerGuidance(Artifact<CareerGuidance>),
    /// An agent could not run because its input was missing.
    Unavailable { error: String },
}

impl AnalysisResult {
    /// A parsed but empty document, which the router treats as no analysis.
    pub fn is_blank(&self) -> bool {
        match self {
            AnalysisResult::Profile(a) => a.is_empty_doc(),
            AnalysisResult::JobMatch(a) => a.is_empty_doc(),
            AnalysisResult::CareerGuidance(a) => a.is_empty_doc(),
            AnalysisResult::Unavailable { .. } => false,
        }
    }

    /// The mapping shown to the model and to API consumers.
    pub fn to_value(&self) -> Value {
        match self {
            AnalysisResult::Profile(a) => a.to_value(),
            AnalysisResult::JobMatch(a) => a.to_value(),
            AnalysisResult::CareerGuidance(a) => a.to_value(),
            AnalysisResult::Unavailable { error } => serde_json::json!({ "error": error }),
        }
    }
}
