//! Assistant graph drives one conversational turn.
//!
//! Flow: load session → append user message → Router → agent → Respond →
//!       continuation check → persist.
//!
//! The topology allows Respond to loop back to Router, but `should_continue`
//! always ends the turn after one reply. State is saved only when the turn
//! reaches `Terminated`; a failed turn leaves the stored session untouched.

use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::agents::career_counselor::counsel_career;
use crate::agents::content_generator::generate_content;
use crate::agents::job_matcher::match_job;
use crate::agents::profile_analyzer::analyze_profile;
use crate::agents::responder::respond;
use crate::agents::router::route;
use crate::agents::Behavior;
use crate::errors::AppError;
use crate::llm_client::ChatModel;
use crate::session::{ChatMessage, HistoryEntry, ProfileData, SessionState, SessionStore};

/// Reply returned if a turn somehow ends without an assistant message.
pub const FALLBACK_REPLY: &str = "I'm sorry, I couldn't process that request.";

/// Input of one chat turn.
#[derive(Debug, Clone, Default)]
pub struct TurnRequest {
    pub session_id: String,
    pub message: String,
    pub profile_data: Option<ProfileData>,
    pub target_role: Option<String>,
}

/// Nodes of the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Router,
    Execute(Behavior),
    Respond,
    Terminated,
}

/// One assistant: a model plus the shared session store.
pub struct AssistantGraph {
    llm: Arc<dyn ChatModel>,
    store: Arc<dyn SessionStore>,
}

impl AssistantGraph {
    pub fn new(llm: Arc<dyn ChatModel>, store: Arc<dyn SessionStore>) -> Self {
        Self { llm, store }
    }

    /// Runs one turn and returns the assistant's reply.
    pub async fn chat(&self, request: TurnRequest) -> Result<String, AppError> {
        let span = info_span!(
            "turn",
            session_id = %request.session_id,
            turn_id = %Uuid::new_v4()
        );
        self.chat_inner(request).instrument(span).await
    }

    async fn chat_inner(&self, request: TurnRequest) -> Result<String, AppError> {
        let mut state = match self.store.load(&request.session_id).await? {
            Some(state) => state,
            None => {
                info!("Starting new session");
                SessionState::default()
            }
        };

        state.messages.push(ChatMessage::user(request.message));
        if let Some(profile) = request.profile_data {
            state.set_profile(profile);
        }
        if let Some(role) = request.target_role.as_deref() {
            state.set_target_role(role);
        }

        self.run_turn(&mut state).await?;

        state.updated_at = Some(chrono::Utc::now());
        self.store.save(&request.session_id, &state).await?;

        Ok(state
            .last_assistant_reply()
            .unwrap_or(FALLBACK_REPLY)
            .to_string())
    }

    /// Walks the graph from `Router` to `Terminated`.
    async fn run_turn(&self, state: &mut SessionState) -> Result<(), AppError> {
        let mut step = Step::Router;

        loop {
            step = match step {
                Step::Router => {
                    let behavior = route(state);
                    info!("Routed to {behavior}");
                    state.next_action = Some(behavior);
                    match state.next_action.take() {
                        Some(Behavior::Respond) | None => Step::Respond,
                        Some(behavior) => Step::Execute(behavior),
                    }
                }
                Step::Execute(behavior) => {
                    self.execute(behavior, state).await?;
                    Step::Respond
                }
                Step::Respond => {
                    respond(state, self.llm.as_ref()).await?;
                    if should_continue(state) {
                        Step::Router
                    } else {
                        Step::Terminated
                    }
                }
                Step::Terminated => break,
            };
            debug!("Next step: {step:?}");
        }

        Ok(())
    }

    async fn execute(&self, behavior: Behavior, state: &mut SessionState) -> Result<(), AppError> {
        let llm = self.llm.as_ref();
        match behavior {
            Behavior::ProfileAnalyzer => analyze_profile(state, llm).await,
            Behavior::ContentGenerator => generate_content(state, llm).await,
            Behavior::JobMatcher => match_job(state, llm).await,
            Behavior::CareerCounselor => counsel_career(state, llm).await,
            Behavior::Respond => Ok(()),
        }
    }
}

/// Ordered `{role, content}` history. Unknown sessions have none.
pub async fn load_history(
    store: &dyn SessionStore,
    session_id: &str,
) -> Result<Vec<HistoryEntry>, AppError> {
    Ok(store
        .load(session_id)
        .await?
        .map(|state| state.history())
        .unwrap_or_default())
}

/// Deletes a session and its history. Unknown ids are not an error.
pub async fn clear_session(store: &dyn SessionStore, session_id: &str) -> Result<(), AppError> {
    store.delete(session_id).await?;
    info!("Cleared session {session_id}");
    Ok(())
}

/// Continuation policy after a reply: every turn is a single hop.
fn should_continue(_state: &SessionState) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::parser::Artifact;
    use crate::agents::reports::{AnalysisResult, SkillGaps};
    use crate::session::{ChatRole, MemorySessionStore};
    use crate::test_support::{sample_profile, FailingModel, ScriptedModel, DEFAULT_REPLY};

    fn turn(session_id: &str, message: &str) -> TurnRequest {
        TurnRequest {
            session_id: session_id.to_string(),
            message: message.to_string(),
            ..TurnRequest::default()
        }
    }

    #[tokio::test]
    async fn test_n_turns_yield_interleaved_history() {
        let store = Arc::new(MemorySessionStore::new());
        let llm = ScriptedModel::new(["one", "two", "three"]);
        let graph = AssistantGraph::new(llm.clone(), store.clone());

        for message in ["hello", "thanks", "bye"] {
            graph.chat(turn("s1", message)).await.unwrap();
        }

        let history = load_history(store.as_ref(), "s1").await.unwrap();
        assert_eq!(history.len(), 6);
        let contents: Vec<_> = history.iter().map(|h| h.content.as_str()).collect();
        assert_eq!(contents, ["hello", "one", "thanks", "two", "bye", "three"]);
        for (i, entry) in history.iter().enumerate() {
            let expected = if i % 2 == 0 { ChatRole::User } else { ChatRole::Assistant };
            assert_eq!(entry.role, expected);
        }
        // Small talk routes straight to the responder: one call per turn.
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn test_reply_is_last_assistant_message() {
        let store = Arc::new(MemorySessionStore::new());
        let llm = ScriptedModel::new([r#"{"summary": "ok"}"#, "Your profile looks solid!"]);
        let graph = AssistantGraph::new(llm.clone(), store);

        let reply = graph
            .chat(TurnRequest {
                profile_data: Some(sample_profile()),
                ..turn("s1", "Please analyze my profile")
            })
            .await
            .unwrap();

        assert_eq!(reply, "Your profile looks solid!");
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn test_analysis_runs_once_per_session() {
        let store = Arc::new(MemorySessionStore::new());
        let llm = ScriptedModel::new(Vec::<String>::new());
        let graph = AssistantGraph::new(llm.clone(), store.clone());

        let with_profile = TurnRequest {
            profile_data: Some(sample_profile()),
            ..turn("s1", "analyze my profile")
        };
        graph.chat(with_profile).await.unwrap();
        assert_eq!(llm.call_count(), 2);

        graph.chat(turn("s1", "analyze my profile")).await.unwrap();
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn test_profile_sticks_across_turns() {
        let store = Arc::new(MemorySessionStore::new());
        let llm = ScriptedModel::new(Vec::<String>::new());
        let graph = AssistantGraph::new(llm.clone(), store);

        graph
            .chat(TurnRequest {
                profile_data: Some(sample_profile()),
                ..turn("s1", "hi")
            })
            .await
            .unwrap();
        graph.chat(turn("s1", "rewrite my about section")).await.unwrap();

        // call 0: reply to "hi", call 1: content generator, call 2: reply
        let payload = llm.user_payload(1);
        assert!(payload.starts_with("Profile Data: "));
        assert!(payload.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_job_match_results_are_persisted() {
        let store = Arc::new(MemorySessionStore::new());
        let llm = ScriptedModel::new([
            r#"{"match_score": 72, "gaps": ["SQL", "Leadership"]}"#,
            "You're a 72% match.",
        ]);
        let graph = AssistantGraph::new(llm.clone(), store.clone());

        graph
            .chat(TurnRequest {
                profile_data: Some(sample_profile()),
                target_role: Some("Data Engineer".to_string()),
                ..turn("s1", "How do I match this job?")
            })
            .await
            .unwrap();

        let state = store.load("s1").await.unwrap().unwrap();
        assert_eq!(state.job_match_score, Some(72.0));
        assert_eq!(
            state.skill_gaps,
            Some(SkillGaps::List(vec![
                "SQL".to_string(),
                "Leadership".to_string()
            ]))
        );
        assert_eq!(state.target_role.as_deref(), Some("Data Engineer"));
        assert!(state.next_action.is_none());
        assert!(llm.user_payload(0).ends_with("Target Role: Data Engineer"));
    }

    #[tokio::test]
    async fn test_counselor_sees_gaps_from_earlier_turn() {
        let store = Arc::new(MemorySessionStore::new());
        let llm = ScriptedModel::new([
            r#"{"match_score": 40, "gaps": ["SQL"]}"#,
            "reply one",
            "not json guidance",
            "reply two",
        ]);
        let graph = AssistantGraph::new(llm.clone(), store.clone());

        graph
            .chat(TurnRequest {
                profile_data: Some(sample_profile()),
                ..turn("s1", "check my job match")
            })
            .await
            .unwrap();
        graph.chat(turn("s1", "what should I learn?")).await.unwrap();

        assert!(llm.user_payload(2).contains("Skill Gaps: [\"SQL\"]"));
        let state = store.load("s1").await.unwrap().unwrap();
        assert_eq!(
            state.analysis_result,
            Some(AnalysisResult::CareerGuidance(Artifact::Unparsed {
                raw: "not json guidance".to_string()
            }))
        );
        assert_eq!(state.job_match_score, Some(40.0));
    }

    #[tokio::test]
    async fn test_failed_turn_persists_nothing() {
        let store = Arc::new(MemorySessionStore::new());
        let good = AssistantGraph::new(ScriptedModel::new(["first reply"]), store.clone());
        good.chat(turn("s1", "hello")).await.unwrap();

        let failing = Arc::new(FailingModel::default());
        let bad = AssistantGraph::new(failing.clone(), store.clone());
        let err = bad.chat(turn("s1", "hello again")).await.unwrap_err();

        assert!(matches!(err, AppError::Llm(_)));
        assert_eq!(failing.attempts.load(std::sync::atomic::Ordering::SeqCst), 1);
        let history = load_history(store.as_ref(), "s1").await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].content, "first reply");
    }

    #[tokio::test]
    async fn test_failed_first_turn_creates_no_session() {
        let store = Arc::new(MemorySessionStore::new());
        let bad = AssistantGraph::new(Arc::new(FailingModel::default()), store.clone());

        assert!(bad.chat(turn("fresh", "hello")).await.is_err());
        assert!(store.load("fresh").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_history_of_unknown_session_is_empty() {
        let store = MemorySessionStore::new();
        assert!(load_history(&store, "never-seen").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clear_session_removes_history() {
        let store = Arc::new(MemorySessionStore::new());
        let graph = AssistantGraph::new(ScriptedModel::new(Vec::<String>::new()), store.clone());
        clear_session(store.as_ref(), "never-seen").await.unwrap();

        let reply = graph.chat(turn("s1", "hello")).await.unwrap();
        assert_eq!(reply, DEFAULT_REPLY);
        clear_session(store.as_ref(), "s1").await.unwrap();
        assert!(load_history(store.as_ref(), "s1").await.unwrap().is_empty());
    }

    #[test]
    fn test_turns_never_loop_back() {
        assert!(!should_continue(&SessionState::default()));
    }
}
