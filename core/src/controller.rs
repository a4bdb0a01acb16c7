use crate::clipboard::ClipboardSource;
use crate::error::{ClipboardError, DeckError, ErrorReporter, ErrorSeverity, GenerationError};
use crate::generation::Generator;
use crate::input_file::read_input_file;
use crate::viewer::SlideViewer;
use deck_common::{Deck, InputKind, Language, SessionInput};
use std::path::Path;
use tracing::{debug, info, warn};

/// Snapshot of the input taken when a generation starts. `id` must be handed
/// back to [`AppState::finish_submit`] with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationJob {
    pub id: u64,
    pub input: SessionInput,
}

impl GenerationJob {
    pub async fn run(self, generator: Generator) -> Result<Deck, GenerationError> {
        generator.generate_for(&self.input).await
    }
}

/// The single state record behind the UI. Front ends mutate it only through
/// these methods.
///
/// At most one backend call runs at a time. A job abandoned by `reset` or
/// `close_deck` keeps its slot until its result comes back, and that result
/// is dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    defaults: SessionInput,
    input: SessionInput,
    processing: bool,
    error: Option<DeckError>,
    viewer: Option<SlideViewer>,
    in_flight: Option<u64>,
    next_job_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_defaults(SessionInput::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose initial (and reset) input is `defaults`.
    pub fn with_defaults(defaults: SessionInput) -> Self {
        Self {
            input: defaults.clone(),
            defaults,
            processing: false,
            error: None,
            viewer: None,
            in_flight: None,
            next_job_id: 1,
        }
    }

    pub fn input(&self) -> &SessionInput {
        &self.input
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// An abandoned job is still running; new submits wait for it.
    pub fn is_draining(&self) -> bool {
        self.in_flight.is_some() && !self.processing
    }

    pub fn error(&self) -> Option<&DeckError> {
        self.error.as_ref()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ErrorReporter::format_user_error)
    }

    pub fn error_severity(&self) -> Option<ErrorSeverity> {
        self.error.as_ref().map(ErrorReporter::get_severity)
    }

    pub fn viewer(&self) -> Option<&SlideViewer> {
        self.viewer.as_ref()
    }

    pub fn viewer_mut(&mut self) -> Option<&mut SlideViewer> {
        self.viewer.as_mut()
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.viewer.as_ref().map(SlideViewer::deck)
    }

    fn set_error(&mut self, error: DeckError) {
        warn!("{error}");
        self.error = Some(error);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input.text = text.into();
        self.error = None;
    }

    pub fn push_char(&mut self, c: char) {
        self.input.text.push(c);
        self.error = None;
    }

    pub fn push_str(&mut self, s: &str) {
        self.input.text.push_str(s);
        self.error = None;
    }

    pub fn pop_char(&mut self) {
        self.input.text.pop();
        self.error = None;
    }

    pub fn set_language(&mut self, language: Language) {
        self.input.language = language;
        self.error = None;
    }

    pub fn cycle_language(&mut self) {
        self.set_language(self.input.language.next());
    }

    pub fn set_input_kind(&mut self, kind: InputKind) {
        self.input.input_kind = kind;
        self.error = None;
    }

    pub fn toggle_input_kind(&mut self) {
        self.set_input_kind(self.input.input_kind.toggled());
    }

    /// Leaves any error in place.
    pub fn toggle_extended_reasoning(&mut self) {
        self.input.extended_reasoning = !self.input.extended_reasoning;
    }

    /// Replace the input with the clipboard contents. On failure the input
    /// is left untouched and the error slot explains why.
    pub async fn paste_from_clipboard<C>(&mut self, source: &C)
    where
        C: ClipboardSource + Sync + ?Sized,
    {
        match source.read_text().await {
            Ok(text) if text.is_empty() => self.set_error(ClipboardError::Empty.into()),
            Ok(text) => {
                debug!(chars = text.chars().count(), "pasted from clipboard");
                self.set_text(text);
            }
            Err(e) => {
                if let ClipboardError::NotSupported { reason } | ClipboardError::NotAllowed { reason } = &e {
                    debug!(%reason, "clipboard read failed");
                }
                self.set_error(e.into());
            }
        }
    }

    /// Load a `.txt` file into the input. Other types only set a notice or
    /// an error.
    pub async fn load_file(&mut self, path: &Path) {
        match read_input_file(path).await {
            Ok(text) => self.set_text(text),
            Err(e) => self.set_error(e.into()),
        }
    }

    /// Validate and mark the state as processing. The caller runs the
    /// returned job and hands its result to [`AppState::finish_submit`].
    pub fn begin_submit(&mut self) -> Result<GenerationJob, DeckError> {
        if let Some(id) = self.in_flight {
            debug!(job_id = id, "submit ignored: generation already in flight");
            return Err(DeckError::Busy);
        }
        if self.input.is_blank() {
            self.set_error(DeckError::Validation);
            return Err(DeckError::Validation);
        }
        let id = self.next_job_id;
        self.next_job_id += 1;
        self.in_flight = Some(id);
        self.processing = true;
        self.error = None;
        info!(
            job_id = id,
            language = %self.input.language,
            input_kind = %self.input.input_kind,
            extended_reasoning = self.input.extended_reasoning,
            "submit"
        );
        Ok(GenerationJob {
            id,
            input: self.input.clone(),
        })
    }

    /// Store the outcome of the job `job_id` started by
    /// [`AppState::begin_submit`]. Results of unknown or abandoned jobs are
    /// dropped.
    pub fn finish_submit(&mut self, job_id: u64, result: Result<Deck, GenerationError>) {
        if self.in_flight != Some(job_id) {
            debug!(job_id, "dropping generation result: job not in flight");
            return;
        }
        self.in_flight = None;
        if !self.processing {
            debug!(job_id, "dropping generation result: job was abandoned");
            return;
        }
        self.processing = false;
        match result {
            Ok(deck) => {
                self.error = None;
                self.viewer = Some(SlideViewer::new(deck));
            }
            Err(e) => {
                self.viewer = None;
                self.set_error(e.into());
            }
        }
    }

    /// Validate, generate and store the outcome in one call.
    pub async fn submit(&mut self, generator: &Generator) -> Result<(), DeckError> {
        let job = self.begin_submit()?;
        let id = job.id;
        let result = job.run(generator.clone()).await;
        self.finish_submit(id, result);
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    /// Back to the initial state, discarding input, deck and error. A
    /// running job is abandoned.
    pub fn reset(&mut self) {
        let in_flight = self.in_flight;
        let next_job_id = self.next_job_id;
        *self = Self::with_defaults(self.defaults.clone());
        self.in_flight = in_flight;
        self.next_job_id = next_job_id;
    }

    /// Drop the deck but keep the input for another attempt. A running job
    /// is abandoned.
    pub fn close_deck(&mut self) {
        self.viewer = None;
        self.error = None;
        self.processing = false;
    }
}
