use std::process::{Child, Command};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

use crate::voice::SessionState;

const PLAYBACK_POLL: Duration = Duration::from_millis(100);

/// Text-to-speech session driver over the platform speech command. One
/// utterance at a time; `stop` kills playback immediately.
pub struct Speaker {
    state: SessionState,
    child: Arc<Mutex<Option<Child>>>,
}

impl Speaker {
    pub fn new() -> Result<Self> {
        Ok(Self {
            state: SessionState::default(),
            child: Arc::new(Mutex::new(None)),
        })
    }

    pub fn is_speaking(&self) -> bool {
        self.state.is_active()
    }

    /// Start speaking `text` and return immediately. A call while already
    /// speaking is a no-op; callers check `is_speaking` first.
    pub fn speak(&self, text: &str) -> Result<()> {
        if !self.state.try_begin() {
            return Ok(());
        }

        let child = match speech_command(text).spawn() {
            Ok(child) => child,
            Err(e) => {
                self.state.finish();
                return Err(e.into());
            }
        };
        *self.child.lock().unwrap() = Some(child);

        // Monitor thread: return to idle when playback ends, whether it ran
        // to completion or was killed by stop().
        let state = self.state.clone();
        let slot = Arc::clone(&self.child);
        thread::spawn(move || {
            loop {
                {
                    let mut guard = slot.lock().unwrap();
                    match guard.as_mut() {
                        None => break,
                        Some(child) => match child.try_wait() {
                            Ok(Some(_)) => {
                                guard.take();
                                break;
                            }
                            Ok(None) => {}
                            Err(e) => {
                                warn!("speech process wait failed: {e}");
                                guard.take();
                                break;
                            }
                        },
                    }
                }
                thread::sleep(PLAYBACK_POLL);
            }
            state.finish();
        });

        Ok(())
    }

    /// Cancel playback immediately. No-op when idle.
    pub fn stop(&self) {
        if !self.state.cancel() {
            return;
        }
        let mut guard = self.child.lock().unwrap();
        if let Some(child) = guard.as_mut() {
            if let Err(e) = child.kill() {
                warn!("failed to kill speech process: {e}");
            }
        }
    }
}

#[cfg(target_os = "macos")]
fn speech_command(text: &str) -> Command {
    let mut command = Command::new("say");
    command.arg(text);
    command
}

#[cfg(not(target_os = "macos"))]
fn speech_command(text: &str) -> Command {
    let mut command = Command::new("espeak");
    command.arg(text);
    command
}
