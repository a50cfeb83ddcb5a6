//! Router: picks the agent for a turn from the latest message and session state.
//!
//! Pure and total: every state maps to exactly one `Behavior`.

use crate::agents::reports::AnalysisResult;
use crate::agents::Behavior;
use crate::session::SessionState;

/// Intents recognised in a user message, in routing priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Analyze,
    Rewrite,
    JobFit,
    CareerGrowth,
}

impl Intent {
    pub const PRIORITY: [Intent; 4] = [
        Intent::Analyze,
        Intent::Rewrite,
        Intent::JobFit,
        Intent::CareerGrowth,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::Analyze => &["analyze", "profile"],
            Intent::Rewrite => &["improve", "enhance", "rewrite"],
            Intent::JobFit => &["job", "match", "role", "apply"],
            Intent::CareerGrowth => &["skill", "learn", "career", "path"],
        }
    }

    /// Substring match against an already lower-cased message.
    pub fn matches(self, message: &str) -> bool {
        self.keywords().iter().any(|kw| message.contains(kw))
    }

    fn behavior(self) -> Behavior {
        match self {
            Intent::Analyze => Behavior::ProfileAnalyzer,
            Intent::Rewrite => Behavior::ContentGenerator,
            Intent::JobFit => Behavior::JobMatcher,
            Intent::CareerGrowth => Behavior::CareerCounselor,
        }
    }
}

/// Selects the agent for the current turn.
///
/// Analysis only runs while the session has no analysis result yet (an empty
/// parsed document counts as none); the other
/// intents fire on every keyword match.
pub fn route(state: &SessionState) -> Behavior {
    let Some(last) = state.last_message() else {
        return Behavior::Respond;
    };
    let message = last.content.to_lowercase();

    Intent::PRIORITY
        .into_iter()
        .filter(|intent| intent.matches(&message))
        .find(|intent| match intent {
            Intent::Analyze => state
                .analysis_result
                .as_ref()
                .map_or(true, AnalysisResult::is_blank),
            _ => true,
        })
        .map(Intent::behavior)
        .unwrap_or(Behavior::Respond)
}
