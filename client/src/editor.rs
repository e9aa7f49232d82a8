//! Record editor state machine.
//!
//! One editor per resource page: closed, or open over a draft in create or
//! update mode. Submission validates locally first (no network call on
//! validation failure), refuses to start while a submit is already in
//! flight, and on success closes and tells the owning list to reload.

use crate::error::ApiError;

/// Per-field validation messages, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn into_result<P>(self, payload: P) -> Result<P, ValidationErrors> {
        if self.is_empty() {
            Ok(payload)
        } else {
            Err(self)
        }
    }
}

/// A form draft that can be validated into a submission payload.
pub trait Draft {
    type Payload;

    /// Fail fast with per-field messages; build the payload only when every
    /// required field is present.
    fn validate(&self) -> Result<Self::Payload, ValidationErrors>;
}

/// Create has no identity; update carries the key of the originally opened
/// record (codes are immutable, so it never comes from the draft).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Update { key: String },
}

#[derive(Debug)]
pub struct EditorSession<D> {
    pub draft: D,
    mode: EditMode,
    busy: bool,
    error: Option<String>,
}

impl<D> EditorSession<D> {
    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Last remote failure, kept until the next submit attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug)]
pub struct Editor<D> {
    session: Option<EditorSession<D>>,
}

/// A validated submission the caller sends through the gateway.
#[derive(Debug)]
pub struct Submission<P> {
    pub mode: EditMode,
    pub payload: P,
}

/// Why `begin_submit` refused to produce a submission.
#[derive(Debug)]
pub enum SubmitBlocked {
    Closed,
    /// A submit for this editor is already in flight.
    Busy,
    Invalid(ValidationErrors),
}

/// What the caller should do after `finish_submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Editor closed; reload the owning list.
    Saved,
    /// Editor stays open with the error surfaced.
    Failed,
}

impl<D: Draft> Editor<D> {
    pub fn closed() -> Self {
        Self { session: None }
    }

    pub fn open_create(&mut self, draft: D) {
        self.session = Some(EditorSession {
            draft,
            mode: EditMode::Create,
            busy: false,
            error: None,
        });
    }

    /// Open pre-populated from an existing record.
    pub fn open_update(&mut self, key: impl Into<String>, draft: D) {
        self.session = Some(EditorSession {
            draft,
            mode: EditMode::Update { key: key.into() },
            busy: false,
            error: None,
        });
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&EditorSession<D>> {
        self.session.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        self.session.as_mut().map(|s| &mut s.draft)
    }

    pub fn close(&mut self) {
        self.session = None;
    }

    /// Validate and mark the editor busy. The caller performs the network
    /// call and reports back through [`finish_submit`].
    ///
    /// [`finish_submit`]: Editor::finish_submit
    pub fn begin_submit(&mut self) -> Result<Submission<D::Payload>, SubmitBlocked> {
        let session = self.session.as_mut().ok_or(SubmitBlocked::Closed)?;
        if session.busy {
            return Err(SubmitBlocked::Busy);
        }
        match session.draft.validate() {
            Ok(payload) => {
                session.busy = true;
                session.error = None;
                Ok(Submission {
                    mode: session.mode.clone(),
                    payload,
                })
            }
            Err(errors) => Err(SubmitBlocked::Invalid(errors)),
        }
    }

    pub fn finish_submit(&mut self, result: Result<(), ApiError>) -> SubmitOutcome {
        match result {
            Ok(()) => {
                self.session = None;
                SubmitOutcome::Saved
            }
            Err(e) => {
                if let Some(session) = self.session.as_mut() {
                    session.busy = false;
                    session.error = Some(e.user_message());
                }
                SubmitOutcome::Failed
            }
        }
    }
}

impl<D: Draft> Default for Editor<D> {
    fn default() -> Self {
        Self::closed()
    }
}
