pub mod intent;
pub mod persona;
pub mod prompt;
pub mod transcript;

use tracing::warn;

use crate::agent::persona::Persona;
use crate::agent::transcript::{Transcript, Turn};
use crate::llm::openai::CompletionClient;

/// One conversation: the persona, the completion client, and the transcript.
pub struct Session {
    persona: Persona,
    client: CompletionClient,
    transcript: Transcript,
}

impl Session {
    pub fn new(persona: Persona, client: CompletionClient) -> Self {
        Self {
            persona,
            client,
            transcript: Transcript::default(),
        }
    }

    /// Run one exchange: record the question, pick a suggested answer,
    /// compose the system prompt, and let the completion step produce the
    /// final reply. The suggestion is always advisory, even on an exact
    /// keyword match; the reply text comes from the model. Completion
    /// failures become a visible assistant turn instead of an error.
    pub async fn ask(&mut self, question: &str, api_key: &str) -> Turn {
        self.transcript.append(Turn::user(question));

        let suggestion = intent::suggest(&self.persona, question);
        let system_prompt = prompt::compose(&self.persona, &suggestion);

        let content = match self
            .client
            .complete(&system_prompt, question, api_key)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!("completion failed: {e}");
                format!("Sorry, I encountered an error: {e}")
            }
        };

        let reply = Turn::assistant(content);
        self.transcript.append(reply.clone());
        reply
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::agent::transcript::Role;
    use crate::testutil::stub_completion_server;

    #[tokio::test]
    async fn superpower_question_flows_through_the_whole_pipeline() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Turning complexity into clarity."}}]}"#;
        let (endpoint, _hits) = stub_completion_server("200 OK", body).await;
        let client = CompletionClient::with_endpoint(&endpoint);
        let mut session = Session::new(Persona::me(), client);

        let reply = session.ask("What's your #1 superpower?", "sk-test").await;
        assert_eq!(reply.content, "Turning complexity into clarity.");

        let turns = session.transcript().all();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "What's your #1 superpower?");
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, "Turning complexity into clarity.");
    }

    #[tokio::test]
    async fn rejected_completion_becomes_a_visible_error_turn() {
        let body = r#"{"error":{"message":"invalid key"}}"#;
        let (endpoint, _hits) = stub_completion_server("401 Unauthorized", body).await;
        let client = CompletionClient::with_endpoint(&endpoint);
        let mut session = Session::new(Persona::me(), client);

        let reply = session.ask("What's your #1 superpower?", "sk-bad").await;
        assert_eq!(reply.content, "Sorry, I encountered an error: invalid key");

        let turns = session.transcript().all();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn missing_credential_is_reported_without_touching_the_network() {
        let (endpoint, hits) = stub_completion_server("200 OK", "{}").await;
        let client = CompletionClient::with_endpoint(&endpoint);
        let mut session = Session::new(Persona::me(), client);

        let reply = session.ask("What's your #1 superpower?", "").await;
        assert_eq!(
            reply.content,
            "Sorry, I encountered an error: Please provide your OpenAI API key"
        );
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
