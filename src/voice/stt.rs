use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::voice::SessionState;

/// Capture window for one listening session.
pub const RECORD_SECONDS: u64 = 5;

const TARGET_SAMPLE_RATE: u32 = 16_000;
const CANCEL_POLL: Duration = Duration::from_millis(100);

/// Speech-to-text session driver: idle until `start`, records the default
/// input device for a fixed window, and delivers the transcript through the
/// caller's channel unless the session was cancelled first.
pub struct Recognizer {
    ctx: Arc<WhisperContext>,
    state: SessionState,
}

impl Recognizer {
    pub fn new(model_path: &str) -> Result<Self> {
        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .map_err(|e| {
                anyhow::anyhow!("Failed to load Whisper model from '{}': {}", model_path, e)
            })?;

        Ok(Self {
            ctx: Arc::new(ctx),
            state: SessionState::default(),
        })
    }

    pub fn is_listening(&self) -> bool {
        self.state.is_active()
    }

    /// Begin a listening session. Returns false if one is already running.
    /// Capture and transcription run on a worker thread; a non-empty
    /// transcript is sent through `transcripts` on natural end. Errors are
    /// logged and swallowed; the session just ends with no result.
    pub fn start(&self, transcripts: UnboundedSender<String>) -> bool {
        if !self.state.try_begin() {
            return false;
        }

        let ctx = Arc::clone(&self.ctx);
        let state = self.state.clone();
        thread::spawn(move || {
            match capture_and_transcribe(&ctx, &state) {
                Ok(Some(text)) if !text.is_empty() => {
                    let _ = transcripts.send(text);
                }
                Ok(_) => {}
                Err(e) => warn!("speech recognition failed: {e}"),
            }
            state.finish();
        });
        true
    }

    /// Cancel the running session without yielding a result. No-op when idle.
    pub fn stop(&self) {
        self.state.cancel();
    }
}

/// Record a fixed window from the default input device and run whisper over
/// it. Returns None when the session was cancelled mid-capture.
fn capture_and_transcribe(ctx: &WhisperContext, state: &SessionState) -> Result<Option<String>> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| anyhow::anyhow!("No input device"))?;
    let config = device.default_input_config()?;

    let sample_rate = config.sample_rate().0;
    let channels = config.channels();

    let recorded_samples = Arc::new(Mutex::new(Vec::new()));
    let samples_clone = Arc::clone(&recorded_samples);

    let err_fn = move |err: cpal::StreamError| {
        warn!("input stream error: {err}");
    };

    let stream = device.build_input_stream(
        &config.into(),
        move |data: &[f32], _: &_| {
            let mut guard = samples_clone.lock().unwrap();
            if channels == 2 {
                // Simple stereo to mono mix
                for chunk in data.chunks(2) {
                    if chunk.len() == 2 {
                        guard.push((chunk[0] + chunk[1]) / 2.0);
                    }
                }
            } else {
                guard.extend_from_slice(data);
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    // Sleep in short slices so stop() takes effect quickly.
    let deadline = Instant::now() + Duration::from_secs(RECORD_SECONDS);
    while Instant::now() < deadline {
        if state.is_cancelled() {
            return Ok(None);
        }
        thread::sleep(CANCEL_POLL);
    }

    drop(stream);

    if state.is_cancelled() {
        return Ok(None);
    }

    let raw_samples = {
        let guard = recorded_samples.lock().unwrap();
        guard.clone()
    };

    let samples = if sample_rate != TARGET_SAMPLE_RATE {
        resample(&raw_samples, sample_rate, TARGET_SAMPLE_RATE)
    } else {
        raw_samples
    };

    let mut whisper = ctx
        .create_state()
        .map_err(|e| anyhow::anyhow!("Failed to create whisper state: {}", e))?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    params.set_n_threads(4);
    params.set_language(Some("en"));
    params.set_print_special(false);
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    whisper
        .full(params, &samples)
        .map_err(|e| anyhow::anyhow!("Whisper inference failed: {}", e))?;

    let num_segments = whisper.full_n_segments().unwrap_or(0);
    let mut text = String::new();
    for i in 0..num_segments {
        if let Ok(segment) = whisper.full_get_segment_text(i) {
            text.push_str(&segment);
            text.push(' ');
        }
    }

    Ok(Some(text.trim().to_string()))
}

fn resample(input: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || input.is_empty() {
        return input.to_vec();
    }

    let ratio = from_rate as f32 / to_rate as f32;
    let output_len = (input.len() as f32 / ratio) as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_idx = i as f32 * ratio;
        let idx_floor = src_idx.floor() as usize;
        let idx_ceil = (idx_floor + 1).min(input.len() - 1);
        let t = src_idx - idx_floor as f32;

        // Linear interpolation
        let val = input[idx_floor] * (1.0 - t) + input[idx_ceil] * t;
        output.push(val);
    }
    output
}
