mod agent;
mod llm;
mod settings;
#[cfg(test)]
mod testutil;
mod ui;
mod voice;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::agent::persona::Persona;
use crate::agent::transcript::Turn;
use crate::agent::Session;
use crate::llm::openai::CompletionClient;
use crate::settings::SettingsStore;
use crate::voice::tts::Speaker;

const SETTINGS_DB_PATH: &str = "doppel.db";

/// Commands flowing from the UI to the agent loop.
#[derive(Debug)]
pub enum AgentCommand {
    /// Submit a question (typed or voice-transcribed).
    Ask(String),
    /// Cancel speech playback immediately.
    StopSpeaking,
}

/// Events flowing from the agent loop back to the render task.
#[derive(Debug)]
pub enum UiEvent {
    Reply(Turn),
    Status(String),
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(tracing::Level::INFO)
        .init();

    let settings = Arc::new(SettingsStore::new(SETTINGS_DB_PATH).await?);

    ui::print_banner();

    // Credential gate: no chat loop until a key is stored.
    if settings.api_key().await?.is_none() {
        ui::prompt_for_api_key(&settings).await?;
    }

    let (command_tx, command_rx) = mpsc::unbounded_channel::<AgentCommand>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<UiEvent>();

    let agent_settings = Arc::clone(&settings);
    tokio::spawn(async move {
        if let Err(e) = run_agent_loop(agent_settings, command_rx, event_tx).await {
            error!("agent loop error: {e}");
        }
    });

    ui::run(settings, command_tx, event_rx).await
}

/// Processes UI commands one at a time, so at most one completion request is
/// in flight and the transcript only grows from this task.
async fn run_agent_loop(
    settings: Arc<SettingsStore>,
    mut commands: mpsc::UnboundedReceiver<AgentCommand>,
    events: mpsc::UnboundedSender<UiEvent>,
) -> Result<()> {
    let persona = Persona::me();
    info!("{} is ready", persona.name);

    let client = CompletionClient::new();
    let mut session = Session::new(persona, client);

    let speaker = match Speaker::new() {
        Ok(speaker) => Some(speaker),
        Err(e) => {
            warn!("voice output unavailable: {e}");
            None
        }
    };

    while let Some(command) = commands.recv().await {
        match command {
            AgentCommand::StopSpeaking => {
                if let Some(speaker) = &speaker {
                    speaker.stop();
                }
            }
            AgentCommand::Ask(text) => {
                let question = text.trim();
                if question.is_empty() {
                    continue;
                }

                let _ = events.send(UiEvent::Status("Thinking...".into()));

                let api_key = settings.api_key().await?.unwrap_or_default();
                let reply = session.ask(question, &api_key).await;
                let _ = events.send(UiEvent::Reply(reply.clone()));

                if let Some(speaker) = &speaker {
                    if !speaker.is_speaking() {
                        if let Err(e) = speaker.speak(&reply.content) {
                            warn!("speech playback failed: {e}");
                        }
                    }
                }
            }
        }
    }

    info!(
        "conversation ended after {} turns",
        session.transcript().all().len()
    );
    Ok(())
}
