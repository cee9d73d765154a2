use crate::answer_stream::text_fragments;
use crate::backend_client::{Backend, QueryError};
use crate::models::*;
use crate::session::SessionState;
use futures::StreamExt;
use std::sync::Arc;

pub const BACKEND_FALLBACK: &str = "Sorry, I couldn't process your question.";
pub const CONNECTION_FALLBACK: &str = "Unable to connect to the server.";
/// Appended to an answer that is still streaming.
pub const CURSOR: &str = "▌";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing collection name")]
    MissingCollectionName,
    #[error("empty question")]
    EmptyQuestion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Idle,
    Validating,
    AwaitingFirstByte,
    Streaming,
    Committed,
    Errored,
}

/// What the presentation layer is told while a question is being answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEvent {
    /// The question passed validation and is now in the transcript.
    Question(String),
    /// A fragment arrived; `answer` is everything received so far.
    Provisional { fragment: String, answer: String },
    /// The request failed. Reported before the fallback answer is committed.
    Failed(QueryError),
    /// The definitive assistant turn, as stored in the transcript.
    Committed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub phase: QueryPhase,
    pub answer: String,
    pub error: Option<QueryError>,
}

impl QueryError {
    pub fn fallback_answer(&self) -> &'static str {
        match self {
            QueryError::Backend { .. } => BACKEND_FALLBACK,
            QueryError::Connection { .. } => CONNECTION_FALLBACK,
        }
    }
}

pub struct QueryService {
    backend: Arc<dyn Backend>,
}

impl QueryService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Asks `question` against the session's collection and streams the answer
    /// into `on_event`. Once validation passes the transcript always gains the
    /// question and exactly one assistant turn, whatever happens on the wire.
    pub async fn ask<F>(
        &self,
        session: &mut SessionState,
        question: &str,
        mut on_event: F,
    ) -> Result<QueryOutcome, ValidationError>
    where
        F: FnMut(QueryEvent),
    {
        if question.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }

        log::debug!(
            "Session {}: {:?} -> {:?}",
            session.id(),
            QueryPhase::Idle,
            QueryPhase::Validating
        );
        let collection_name = session.collection_name().clone();
        if collection_name.is_empty() {
            log::warn!("Session {}: question rejected, no collection name", session.id());
            return Err(ValidationError::MissingCollectionName);
        }

        session.record(ChatMessage::user(question));
        on_event(QueryEvent::Question(question.to_string()));

        let result = self
            .stream_answer(session, collection_name.as_str(), question, &mut on_event)
            .await;

        let outcome = match result {
            Ok(answer) => QueryOutcome {
                phase: QueryPhase::Committed,
                answer,
                error: None,
            },
            Err(err) => {
                log::error!("Session {}: query failed: {:?}", session.id(), err);
                on_event(QueryEvent::Failed(err.clone()));
                QueryOutcome {
                    phase: QueryPhase::Errored,
                    answer: err.fallback_answer().to_string(),
                    error: Some(err),
                }
            }
        };

        session.record(ChatMessage::assistant(outcome.answer.clone()));
        on_event(QueryEvent::Committed(outcome.answer.clone()));
        log::debug!("Session {}: finished in {:?}", session.id(), outcome.phase);

        Ok(outcome)
    }

    async fn stream_answer<F>(
        &self,
        session: &SessionState,
        collection_name: &str,
        question: &str,
        on_event: &mut F,
    ) -> Result<String, QueryError>
    where
        F: FnMut(QueryEvent),
    {
        log::debug!("Session {}: -> {:?}", session.id(), QueryPhase::AwaitingFirstByte);
        let body = self.backend.query(collection_name, question).await?;

        log::debug!("Session {}: -> {:?}", session.id(), QueryPhase::Streaming);
        let mut fragments = text_fragments(body);
        let mut answer = String::new();

        while let Some(fragment) = fragments.next().await {
            let fragment = fragment?;
            answer.push_str(&fragment);
            on_event(QueryEvent::Provisional {
                fragment,
                answer: answer.clone(),
            });
        }

        Ok(answer)
    }
}
