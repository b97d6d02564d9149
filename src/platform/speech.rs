//! Text-to-speech output
//!
//! `CommandSpeaker` hands utterances to an external TTS program one at a
//! time. Utterances queue up behind each other the way a browser's speech
//! queue does; nothing is interrupted.

use crate::platform::{PlatformError, PlatformResult};
use std::sync::Mutex;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Text plus the language tag it should be spoken in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    /// Language code of the selector the text belongs to, e.g. "de-DE"
    pub lang: String,
}

impl Utterance {
    pub fn new(text: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: lang.into(),
        }
    }
}

/// Speech output capability
pub trait SpeechSynthesizer: Send + Sync {
    /// Queue an utterance. Returns once queued, not once spoken.
    fn speak(&self, utterance: Utterance) -> PlatformResult<()>;
}

/// Speaks through an external program invoked as `<program> -v <voice> -- <text>`
#[derive(Debug)]
pub struct CommandSpeaker {
    program: String,
    queue: Mutex<Option<mpsc::UnboundedSender<Utterance>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl CommandSpeaker {
    /// Start the speech worker. Must be called inside a tokio runtime.
    pub fn spawn(program: impl Into<String>) -> Self {
        let program = program.into();
        let (tx, mut rx) = mpsc::unbounded_channel::<Utterance>();
        let worker_program = program.clone();

        let worker = tokio::spawn(async move {
            while let Some(utterance) = rx.recv().await {
                if let Err(e) = play(&worker_program, &utterance).await {
                    warn!(program = %worker_program, error = %e, "Speech output failed");
                }
            }
        });

        Self {
            program,
            queue: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Stop accepting utterances and wait until the queue has been spoken
    pub async fn finish(&self) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.take();
        }
        let worker = self.worker.lock().ok().and_then(|mut w| w.take());
        if let Some(worker) = worker {
            if let Err(e) = worker.await {
                warn!(error = %e, "Speech worker ended abnormally");
            }
        }
    }
}

impl SpeechSynthesizer for CommandSpeaker {
    fn speak(&self, utterance: Utterance) -> PlatformResult<()> {
        let queue = self
            .queue
            .lock()
            .map_err(|e| PlatformError::Io(e.to_string()))?;
        let tx = queue
            .as_ref()
            .ok_or_else(|| PlatformError::Unavailable("speech output finished".to_string()))?;
        tx.send(utterance)
            .map_err(|_| PlatformError::Unavailable("speech worker stopped".to_string()))
    }
}

/// Voice name for a language code: the primary subtag, lowercased
pub fn voice_for(lang: &str) -> String {
    lang.split(['-', '_'])
        .next()
        .unwrap_or(lang)
        .to_ascii_lowercase()
}

async fn play(program: &str, utterance: &Utterance) -> PlatformResult<()> {
    let voice = voice_for(&utterance.lang);
    debug!(program, voice = %voice, chars = utterance.text.chars().count(), "Speaking");

    let status = Command::new(program)
        .arg("-v")
        .arg(&voice)
        // field text may start with '-'; it must never be read as an option
        .arg("--")
        .arg(&utterance.text)
        .status()
        .await?;

    if !status.success() {
        return Err(PlatformError::Unavailable(format!(
            "{} exited with {}",
            program, status
        )));
    }
    Ok(())
}

/// Speech output that only records what it was asked to say
#[derive(Debug, Default)]
pub struct RecordingSpeaker {
    utterances: Mutex<Vec<Utterance>>,
    deny: bool,
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A speaker that refuses every utterance with `PermissionDenied`
    pub fn denied() -> Self {
        Self {
            utterances: Mutex::new(Vec::new()),
            deny: true,
        }
    }

    pub fn utterances(&self) -> Vec<Utterance> {
        self.utterances.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

impl SpeechSynthesizer for RecordingSpeaker {
    fn speak(&self, utterance: Utterance) -> PlatformResult<()> {
        if self.deny {
            return Err(PlatformError::PermissionDenied(
                "speech output not allowed".to_string(),
            ));
        }
        self.utterances
            .lock()
            .map_err(|e| PlatformError::Io(e.to_string()))?
            .push(utterance);
        Ok(())
    }
}
