//! Friend Request Submission
//!
//! A restartable four-state machine (`Idle → Loading → Success | Error`)
//! around a single outbound call. The coordinator is the only writer of the
//! form fields and the submission state; the UI reads snapshots and the
//! loading glyph gates on the published state.

use crate::api::{FriendClient, FriendRequest, FriendResponse, Region};
use crate::errors::{ApiError, SubmissionError};
use crate::observability::telemetry::record_state_transition;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub const VALIDATION_MESSAGE: &str = "ERROR: CRITICAL DATA FIELDS MISSING. TRANSMISSION ABORTED.";
pub const LOADING_MESSAGE: &str = "TRANSMITTING REQUEST TO REMOTE SERVER...";
pub const GENERIC_FAILURE_MESSAGE: &str = "CONNECTION ERROR: FRIEND REQUEST TRANSMISSION FAILED.";
pub const FATAL_MESSAGE: &str = "FATAL ERROR: COMMUNICATION PROTOCOL FAILURE.";

/// Success text carrying the server-assigned request id
pub fn success_message(id: &str) -> String {
    format!("CONNECTION ESTABLISHED. FRIEND REQUEST ID:{id} TRANSMITTED SUCCESSFULLY.")
}

/// Where the submission currently stands. Exactly one variant is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Success {
        message: String,
    },
    Error {
        message: String,
    },
}

impl SubmissionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionState::Loading)
    }

    /// Text for the status panel; `None` while idle
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionState::Idle => None,
            SubmissionState::Loading => Some(LOADING_MESSAGE),
            SubmissionState::Success { message } | SubmissionState::Error { message } => {
                Some(message)
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Loading => "loading",
            SubmissionState::Success { .. } => "success",
            SubmissionState::Error { .. } => "error",
        }
    }
}

/// Form field names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Code,
    Server,
    Uid,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Code, Field::Server, Field::Uid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Code => "code",
            Field::Server => "server",
            Field::Uid => "uid",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(Field::Code),
            "server" => Ok(Field::Server),
            "uid" => Ok(Field::Uid),
            other => Err(format!("unknown form field: {other}")),
        }
    }
}

/// The three required form values, exactly as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub code: String,
    pub server: String,
    pub uid: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Code => &self.code,
            Field::Server => &self.server,
            Field::Uid => &self.uid,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Code => self.code = value,
            Field::Server => self.server = value,
            Field::Uid => self.uid = value,
        }
    }

    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| !self.get(*f).is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate the fields into an outbound request.
    ///
    /// A missing field or an unknown region is a validation failure.
    pub fn to_request(&self) -> Result<FriendRequest, SubmissionError> {
        if !self.is_complete() {
            return Err(SubmissionError::Validation);
        }
        let server = self
            .server
            .parse::<Region>()
            .map_err(|_| SubmissionError::Validation)?;
        Ok(FriendRequest {
            code: self.code.clone(),
            server,
            uid: self.uid.clone(),
        })
    }
}

/// Map the outcome of the outbound call to a request id or a failure.
///
/// A `success` reply without a usable id is treated as a protocol failure.
pub fn classify(result: Result<FriendResponse, ApiError>) -> Result<String, SubmissionError> {
    match result {
        Ok(response) if response.success => {
            response.id_text().ok_or(SubmissionError::Transport)
        }
        Ok(response) => Err(SubmissionError::Rejected(
            response
                .server_message()
                .unwrap_or(GENERIC_FAILURE_MESSAGE)
                .to_string(),
        )),
        Err(_) => Err(SubmissionError::Transport),
    }
}

/// What a call to [`SubmissionCoordinator::submit`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A request was already in flight; nothing changed
    Ignored,
    Succeeded { message: String },
    Failed(SubmissionError),
}

impl SubmitOutcome {
    pub fn into_result(self) -> Result<Option<String>, SubmissionError> {
        match self {
            SubmitOutcome::Ignored => Ok(None),
            SubmitOutcome::Succeeded { message } => Ok(Some(message)),
            SubmitOutcome::Failed(err) => Err(err),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    fields: FormFields,
    state: SubmissionState,
}

/// Owner of the form fields and the submission state.
///
/// Cheap to clone; clones share the same state. The lock is never held
/// across the outbound call.
#[derive(Clone)]
pub struct SubmissionCoordinator {
    client: Arc<dyn FriendClient>,
    inner: Arc<Mutex<Inner>>,
    publish: Arc<watch::Sender<SubmissionState>>,
}

impl fmt::Debug for SubmissionCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionCoordinator")
            .field("state", &self.state())
            .finish()
    }
}

impl SubmissionCoordinator {
    pub fn new(client: Arc<dyn FriendClient>) -> Self {
        let (tx, _rx) = watch::channel(SubmissionState::Idle);
        Self {
            client,
            inner: Arc::new(Mutex::new(Inner::default())),
            publish: Arc::new(tx),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn transition(&self, inner: &mut Inner, next: SubmissionState) {
        record_state_transition("submission", inner.state.label(), next.label());
        inner.state = next.clone();
        self.publish.send_replace(next);
    }

    /// Set a field. Allowed in every state, including while loading.
    pub fn update_field(&self, field: Field, value: impl Into<String>) {
        self.lock().fields.set(field, value.into());
    }

    pub fn fields(&self) -> FormFields {
        self.lock().fields.clone()
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state.clone()
    }

    /// Receiver for state changes; the loading glyph gates on this
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.publish.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.lock().state.is_loading()
    }

    /// Validate, send, and classify one friend request.
    ///
    /// A call made while another request is in flight returns
    /// [`SubmitOutcome::Ignored`] without touching any state.
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut inner = self.lock();
            if inner.state.is_loading() {
                debug!("Submit ignored: request already in flight");
                return SubmitOutcome::Ignored;
            }
            match inner.fields.to_request() {
                Ok(request) => {
                    self.transition(&mut inner, SubmissionState::Loading);
                    request
                }
                Err(err) => {
                    warn!("Friend request rejected locally: required fields missing or invalid");
                    self.transition(
                        &mut inner,
                        SubmissionState::Error {
                            message: err.to_string(),
                        },
                    );
                    return SubmitOutcome::Failed(err);
                }
            }
        };

        info!(server = %request.server, "Submitting friend request");
        let result = self.client.send_friend_request(&request).await;
        if let Err(e) = &result {
            warn!(error = %e, "Friend request transport failure");
        }

        let mut inner = self.lock();
        match classify(result) {
            Ok(id) => {
                let message = success_message(&id);
                inner.fields.clear();
                self.transition(
                    &mut inner,
                    SubmissionState::Success {
                        message: message.clone(),
                    },
                );
                info!(request_id = %id, "Friend request accepted");
                SubmitOutcome::Succeeded { message }
            }
            Err(err) => {
                warn!(reason = %err, "Friend request failed");
                self.transition(
                    &mut inner,
                    SubmissionState::Error {
                        message: err.to_string(),
                    },
                );
                SubmitOutcome::Failed(err)
            }
        }
    }
}
