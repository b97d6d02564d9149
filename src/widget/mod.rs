//! The translator widget
//!
//! Holds what a browser would keep in the DOM (two text fields, two language
//! selectors) and exposes one method per user event. Collaborators are
//! injected through [`WidgetControls`].
//!
//! ```ignore
//! let widget = Widget::new(WidgetControls::new(translator, clipboard, speech));
//! widget.type_source("Good morning");
//! let outcome = widget.translate_now().await;
//! println!("{}", widget.snapshot().target.value);
//! ```
//!
//! Translate requests are numbered. Starting a new one aborts the previous
//! spawned task, and a completion that is not the newest is dropped, so the
//! most recently *issued* request is the one rendered.

pub mod error;
pub mod state;


use crate::catalog::{DEFAULT_SOURCE, DEFAULT_TARGET, LanguageCatalog};
use crate::mt::{MachineTranslator, MtError, MtResult, TranslationRequest};
use crate::platform::{Clipboard, PlatformError, SpeechSynthesizer, Utterance};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

pub use error::{WidgetError, WidgetResult};
pub use state::{
    IconAction, IconBinding, LanguageOption, LanguageSelector, PLACEHOLDER_BUSY,
    PLACEHOLDER_IDLE, Side, TextField, WidgetSnapshot,
};

/// Everything the widget is wired to
pub struct WidgetControls {
    pub catalog: LanguageCatalog,
    pub translator: Arc<dyn MachineTranslator>,
    pub clipboard: Arc<dyn Clipboard>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    pub icons: Vec<IconBinding>,
}

impl WidgetControls {
    /// Built-in catalog and the four standard icons
    pub fn new(
        translator: Arc<dyn MachineTranslator>,
        clipboard: Arc<dyn Clipboard>,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            catalog: LanguageCatalog::builtin(),
            translator,
            clipboard,
            speech,
            icons: IconBinding::standard().to_vec(),
        }
    }

    pub fn with_catalog(mut self, catalog: LanguageCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_icons(mut self, icons: Vec<IconBinding>) -> Self {
        self.icons = icons;
        self
    }
}

impl std::fmt::Debug for WidgetControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetControls")
            .field("languages", &self.catalog.len())
            .field("translator", &self.translator.provider_name())
            .field("icons", &self.icons)
            .finish()
    }
}

/// How a translate activation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    /// Source text was blank; nothing was sent
    Skipped,
    /// The target field now holds this text
    Completed(String),
    /// A newer request was issued first; this result was dropped
    Superseded,
    /// The request failed; the message is shown inline
    Failed(MtError),
}

impl TranslateOutcome {
    pub fn into_result(self) -> WidgetResult<Option<String>> {
        match self {
            TranslateOutcome::Skipped => Ok(None),
            TranslateOutcome::Completed(text) => Ok(Some(text)),
            TranslateOutcome::Superseded => Err(WidgetError::Superseded),
            TranslateOutcome::Failed(e) => Err(WidgetError::Translation(e)),
        }
    }
}

/// How an icon activation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconOutcome {
    /// One of the fields was empty
    Ignored,
    Copied,
    Spoken,
    /// The platform refused; swallowed
    Denied,
}

/// A spawned translate request
#[derive(Debug)]
pub struct TranslateHandle {
    generation: u64,
    task: JoinHandle<TranslateOutcome>,
}

impl TranslateHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel the request. The widget returns to idle unless a newer
    /// request has been issued since.
    pub fn abort(&self) {
        self.task.abort();
    }

    /// Wait for the request. An aborted request reports `Superseded`.
    pub async fn wait(self) -> TranslateOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => TranslateOutcome::Superseded,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

#[derive(Debug)]
struct WidgetState {
    source: TextField,
    target: TextField,
    source_lang: LanguageSelector,
    target_lang: LanguageSelector,
    error: Option<String>,
    /// Number of the most recently issued translate request
    generation: u64,
    in_flight: Option<u64>,
    pending: Option<AbortHandle>,
}

/// Busy marker for one issued request. Dropping it unfinished (task aborted,
/// `translate_now` future dropped) puts the widget back to idle.
struct InFlight {
    widget: Widget,
    generation: u64,
    finished: bool,
}

impl InFlight {
    fn finish(mut self, result: MtResult<String>) -> TranslateOutcome {
        self.finished = true;
        self.widget.finish_translate(self.generation, result)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if !self.finished {
            self.widget.cancel_translate(self.generation);
        }
    }
}

struct Inner {
    state: Mutex<WidgetState>,
    translator: Arc<dyn MachineTranslator>,
    clipboard: Arc<dyn Clipboard>,
    speech: Arc<dyn SpeechSynthesizer>,
    icons: Vec<IconBinding>,
}

/// Cheap to clone; clones share state
#[derive(Clone)]
pub struct Widget {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("translator", &self.inner.translator.provider_name())
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

impl Widget {
    /// Build the widget and populate both selectors from the catalog
    pub fn new(controls: WidgetControls) -> Self {
        let state = WidgetState {
            source: TextField::default(),
            target: TextField::with_placeholder(PLACEHOLDER_IDLE),
            source_lang: LanguageSelector::populate(&controls.catalog, DEFAULT_SOURCE),
            target_lang: LanguageSelector::populate(&controls.catalog, DEFAULT_TARGET),
            error: None,
            generation: 0,
            in_flight: None,
            pending: None,
        };
        debug!(
            languages = controls.catalog.len(),
            provider = controls.translator.provider_name(),
            "Widget initialized"
        );
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                translator: controls.translator,
                clipboard: controls.clipboard,
                speech: controls.speech,
                icons: controls.icons,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, WidgetState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn snapshot(&self) -> WidgetSnapshot {
        let state = self.state();
        WidgetSnapshot {
            source: state.source.clone(),
            target: state.target.clone(),
            source_lang: state.source_lang.selected().to_string(),
            target_lang: state.target_lang.selected().to_string(),
            error: state.error.clone(),
            busy: state.in_flight.is_some(),
        }
    }

    pub fn selector(&self, side: Side) -> LanguageSelector {
        let state = self.state();
        match side {
            Side::Source => state.source_lang.clone(),
            Side::Target => state.target_lang.clone(),
        }
    }

    pub fn icons(&self) -> &[IconBinding] {
        &self.inner.icons
    }

    pub fn provider_name(&self) -> &str {
        self.inner.translator.provider_name()
    }

    // ========== Text fields ==========

    /// Replace the source value without a key event; the target is untouched
    pub fn set_source_text(&self, text: &str) {
        self.state().source.value = text.to_string();
    }

    pub fn set_target_text(&self, text: &str) {
        self.state().target.value = text.to_string();
    }

    /// Key released in the source field: an empty source clears the target
    pub fn key_up(&self) {
        let mut state = self.state();
        if state.source.value.is_empty() {
            state.target.value.clear();
        }
    }

    /// Set the source value as typing would, including the key release
    pub fn type_source(&self, text: &str) {
        self.set_source_text(text);
        self.key_up();
    }

    // ========== Selectors ==========

    pub fn select_language(&self, side: Side, code: &str) -> WidgetResult<()> {
        let mut state = self.state();
        match side {
            Side::Source => state.source_lang.select(code),
            Side::Target => state.target_lang.select(code),
        }
    }

    /// Swap both text values and both selected languages
    pub fn exchange(&self) {
        let mut state = self.state();
        let WidgetState {
            source,
            target,
            source_lang,
            target_lang,
            ..
        } = &mut *state;
        std::mem::swap(&mut source.value, &mut target.value);
        source_lang.swap_selection(target_lang);
        debug!(
            source_lang = source_lang.selected(),
            target_lang = target_lang.selected(),
            "Exchanged"
        );
    }

    // ========== Translate ==========

    fn begin_translate(&self) -> Option<(InFlight, TranslationRequest)> {
        let (generation, request, previous) = {
            let mut state = self.state();
            let request = TranslationRequest::new(
                &state.source.value,
                state.source_lang.selected(),
                state.target_lang.selected(),
            )?;

            let previous = state.pending.take();
            state.generation += 1;
            state.in_flight = Some(state.generation);
            state.error = None;
            state.target.placeholder = PLACEHOLDER_BUSY.to_string();
            (state.generation, request, previous)
        };
        if let Some(previous) = previous {
            previous.abort();
        }

        info!(generation, langpair = %request.langpair(), "Translate requested");
        let in_flight = InFlight {
            widget: self.clone(),
            generation,
            finished: false,
        };
        Some((in_flight, request))
    }

    /// A request went away without finishing (aborted or dropped)
    fn cancel_translate(&self, generation: u64) {
        let mut state = self.state();
        if state.generation != generation || state.in_flight != Some(generation) {
            return;
        }
        state.in_flight = None;
        state.pending = None;
        state.target.placeholder = PLACEHOLDER_IDLE.to_string();
        debug!(generation, "Translate cancelled");
    }

    fn finish_translate(&self, generation: u64, result: MtResult<String>) -> TranslateOutcome {
        let mut state = self.state();
        if generation != state.generation {
            debug!(generation, latest = state.generation, "Dropping stale translation");
            return TranslateOutcome::Superseded;
        }
        state.in_flight = None;
        state.pending = None;
        state.target.placeholder = PLACEHOLDER_IDLE.to_string();

        match result {
            Ok(text) => {
                state.target.value = text.clone();
                TranslateOutcome::Completed(text)
            }
            Err(e) if !e.is_reportable() => {
                warn!(error = %e, "Unreadable translation response, rendering empty result");
                state.target.value.clear();
                TranslateOutcome::Completed(String::new())
            }
            Err(e) => {
                warn!(error = %e, "Translation failed");
                state.error = Some(e.to_string());
                TranslateOutcome::Failed(e)
            }
        }
    }

    async fn run_request(&self, request: &TranslationRequest) -> MtResult<String> {
        self.inner
            .translator
            .translate(&request.text, &request.source_lang, &request.target_lang)
            .await
    }

    /// Translate on the current task and wait for the result.
    ///
    /// Still numbered like spawned requests: if a newer translate is issued
    /// while this one waits, this one returns `Superseded`.
    pub async fn translate_now(&self) -> TranslateOutcome {
        let Some((in_flight, request)) = self.begin_translate() else {
            return TranslateOutcome::Skipped;
        };
        let result = self.run_request(&request).await;
        in_flight.finish(result)
    }

    /// Start a translate request in the background.
    ///
    /// Returns `None` (and sends nothing) when the trimmed source is empty.
    /// Must be called inside a tokio runtime.
    pub fn translate(&self) -> Option<TranslateHandle> {
        let (in_flight, request) = self.begin_translate()?;
        let generation = in_flight.generation;
        let task = tokio::spawn(async move {
            let result = in_flight.widget.run_request(&request).await;
            in_flight.finish(result)
        });

        let mut state = self.state();
        if state.generation == generation && state.in_flight == Some(generation) {
            state.pending = Some(task.abort_handle());
        }
        Some(TranslateHandle { generation, task })
    }

    // ========== Icons ==========

    /// Activate the icon registered at `index` in [`WidgetControls::icons`]
    pub fn activate_icon(&self, index: usize) -> WidgetResult<IconOutcome> {
        let binding = self
            .inner
            .icons
            .get(index)
            .copied()
            .ok_or(WidgetError::UnboundIcon(index))?;
        self.activate(binding)
    }

    /// Copy or speak one side. Ignored unless both fields have text.
    pub fn activate(&self, binding: IconBinding) -> WidgetResult<IconOutcome> {
        let (text, lang) = {
            let state = self.state();
            if state.source.value.is_empty() || state.target.value.is_empty() {
                return Ok(IconOutcome::Ignored);
            }
            match binding.side {
                Side::Source => (
                    state.source.value.clone(),
                    state.source_lang.selected().to_string(),
                ),
                Side::Target => (
                    state.target.value.clone(),
                    state.target_lang.selected().to_string(),
                ),
            }
        };

        let (result, done) = match binding.action {
            IconAction::Copy => (self.inner.clipboard.write_text(&text), IconOutcome::Copied),
            IconAction::Speak => (
                self.inner.speech.speak(Utterance::new(text, lang)),
                IconOutcome::Spoken,
            ),
        };

        match result {
            Ok(()) => Ok(done),
            Err(PlatformError::PermissionDenied(msg)) => {
                debug!(
                    side = binding.side.label(),
                    action = ?binding.action,
                    %msg,
                    "Platform denied access"
                );
                Ok(IconOutcome::Denied)
            }
            Err(e) => Err(e.into()),
        }
    }
}
