use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::warn;

use crate::agent::transcript::Role;
use crate::settings::SettingsStore;
use crate::voice::stt::{Recognizer, RECORD_SECONDS};
use crate::{AgentCommand, UiEvent};

const WHISPER_MODEL_PATH: &str = "models/ggml-base.en.bin";

const SAMPLE_QUESTIONS: &[&str] = &[
    "What should we know about your life story in a few sentences?",
    "What's your #1 superpower?",
    "What are the top 3 areas you'd like to grow in?",
    "What misconception do your coworkers have about you?",
];

pub fn print_banner() {
    println!("Doppel — ask me about my background, experience, and goals.");
    println!();
    println!("Sample questions:");
    for question in SAMPLE_QUESTIONS {
        println!("  - {question}");
    }
    println!();
    println!("Commands: /voice (toggle listening)  /stop (stop speaking)  /key (change API key)  /help  /quit");
    println!();
}

/// Read a credential from the terminal and persist it. Used at startup when
/// no credential is stored yet; the chat loop is not shown until this
/// succeeds.
pub async fn prompt_for_api_key(settings: &SettingsStore) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("Enter your OpenAI API key (stored locally):");
        match lines.next_line().await? {
            Some(line) => {
                let key = line.trim();
                if !key.is_empty() {
                    settings.save_api_key(key).await?;
                    println!("API key saved.");
                    return Ok(());
                }
            }
            None => anyhow::bail!("stdin closed before an API key was provided"),
        }
    }
}

/// Terminal REPL: forwards questions and control commands to the agent loop,
/// prints events coming back from it, and drives the voice recognizer.
pub async fn run(
    settings: Arc<SettingsStore>,
    commands: mpsc::UnboundedSender<AgentCommand>,
    mut events: mpsc::UnboundedReceiver<UiEvent>,
) -> Result<()> {
    // Render task: the transcript view.
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                UiEvent::Status(status) => println!("[{status}]"),
                UiEvent::Reply(turn) => match turn.role {
                    Role::Assistant => println!("doppel> {}", turn.content),
                    Role::User => println!("you> {}", turn.content),
                },
            }
        }
    });

    let recognizer = match Recognizer::new(WHISPER_MODEL_PATH) {
        Ok(recognizer) => Some(recognizer),
        Err(e) => {
            warn!("voice input unavailable: {e}");
            None
        }
    };

    // Recognized speech is echoed and then submitted like typed input.
    let (transcript_tx, mut transcript_rx) = mpsc::unbounded_channel::<String>();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let input = line.trim();
                match input {
                    "" => {}
                    "/quit" | "/exit" => break,
                    "/help" => print_banner(),
                    "/stop" => {
                        let _ = commands.send(AgentCommand::StopSpeaking);
                    }
                    "/key" => {
                        println!("Enter new API key:");
                        if let Some(line) = lines.next_line().await? {
                            let key = line.trim();
                            if key.is_empty() {
                                println!("API key unchanged.");
                            } else {
                                settings.save_api_key(key).await?;
                                println!("API key saved.");
                            }
                        }
                    }
                    "/voice" => match &recognizer {
                        None => println!("[voice input unavailable]"),
                        Some(recognizer) => {
                            if recognizer.is_listening() {
                                recognizer.stop();
                                println!("[stopped listening]");
                            } else if recognizer.start(transcript_tx.clone()) {
                                println!("[listening for {RECORD_SECONDS}s...]");
                            }
                        }
                    },
                    question => {
                        let _ = commands.send(AgentCommand::Ask(question.to_string()));
                    }
                }
            }
            Some(text) = transcript_rx.recv() => {
                println!("you (voice)> {text}");
                let _ = commands.send(AgentCommand::Ask(text));
            }
        }
    }

    Ok(())
}
