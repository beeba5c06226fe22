//! Submission lifecycle for the create-cabin form.
//!
//! A submit moves the mutation from idle to pending, awaits the create call,
//! then settles through success or error back to idle. The component drives
//! the phases separately so no signal borrow is held across the await:
//! [`prepare_submission`], [`MutationState::begin`], the call, then
//! [`settle_create`].

use dioxus::prelude::ServerFnError;
use shared_types::{AppError, Cabin, CreateCabinRequest, CABINS_QUERY_KEY, CABIN_CREATED_MESSAGE};
use shared_ui::{ToastOptions, Toasts};
use std::collections::{BTreeMap, HashMap};

use super::cabin::{cabin_request, CabinField};
use super::state::FormState;

/// Where a mutation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Lifecycle of one form's create call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationState {
    status: MutationStatus,
    last_outcome: Option<MutationStatus>,
    last_error: Option<String>,
}

impl MutationState {
    pub fn status(&self) -> MutationStatus {
        self.status
    }

    /// Inputs and the submit control are disabled while this is true.
    pub fn is_pending(&self) -> bool {
        self.status == MutationStatus::Pending
    }

    /// Enter pending. Returns `false` if a call is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        self.status = MutationStatus::Pending;
        true
    }

    /// How the most recent call ended, if one has.
    pub fn last_outcome(&self) -> Option<MutationStatus> {
        self.last_outcome
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record how the call ended and return to idle.
    fn settle(&mut self, outcome: MutationStatus, error: Option<String>) {
        self.last_outcome = Some(outcome);
        self.last_error = error;
        self.status = MutationStatus::Idle;
    }
}

/// A failed create call as the user should see it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteError {
    pub message: String,
    /// Per-field messages keyed by request field name.
    pub field_errors: HashMap<String, String>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    /// Recover the server's `AppError` from a server function failure.
    ///
    /// Errors raised by the server carry a serialized `AppError`. Everything
    /// else is a transport failure, reported with its own text and without
    /// the label `ServerFnError` adds when displayed.
    pub fn from_server_fn_error(err: &ServerFnError) -> Self {
        match err {
            ServerFnError::ServerError { message, .. } => Self {
                message: AppError::user_message(message),
                field_errors: AppError::parse_field_errors(message),
            },
            ServerFnError::Request(e) => {
                let text = e.to_string();
                let detail = text.split_once(": ").map_or(text.as_str(), |(_, d)| d);
                Self::new(AppError::user_message(detail))
            }
            ServerFnError::StreamError(text) | ServerFnError::Deserialization(text) => {
                Self::new(AppError::user_message(text))
            }
            other => Self::new(AppError::user_message(&other.to_string())),
        }
    }
}

/// Sink for user-visible notifications.
pub trait Notifier {
    fn notify_success(&self, message: String);
    fn notify_error(&self, message: String);
}

impl Notifier for Toasts {
    fn notify_success(&self, message: String) {
        self.success(message, ToastOptions::new());
    }

    fn notify_error(&self, message: String) {
        self.error(message, ToastOptions::new());
    }
}

/// Marks a cached collection stale so its readers refetch.
pub trait Invalidate {
    fn invalidate(&self, key: &str);
}

/// The remote create-cabin operation.
#[allow(async_fn_in_trait)]
pub trait CreateCabinCall {
    async fn create_cabin(&self, req: CreateCabinRequest) -> Result<Cabin, RemoteError>;
}

/// Calls the `create_cabin` server function.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerCabins;

impl CreateCabinCall for ServerCabins {
    async fn create_cabin(&self, req: CreateCabinRequest) -> Result<Cabin, RemoteError> {
        server::api::create_cabin(req)
            .await
            .map_err(|e| RemoteError::from_server_fn_error(&e))
    }
}

/// Validate the form and build the request. `None` means the submit is
/// blocked; the form then holds an inline error for every failing field.
pub fn prepare_submission(form: &mut FormState<CabinField>) -> Option<CreateCabinRequest> {
    form.handle_submit(
        |values| cabin_request(&values),
        |errors: &BTreeMap<CabinField, String>| {
            tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Cabin form has errors");
        },
    )
    .flatten()
}

/// Apply the side effects of a finished create call.
///
/// Success notifies, invalidates the cabins listing and resets the draft.
/// Failure notifies with the server's message and keeps the draft, adding
/// any per-field messages the server sent.
pub fn settle_create(
    result: Result<Cabin, RemoteError>,
    form: &mut FormState<CabinField>,
    mutation: &mut MutationState,
    notifier: &impl Notifier,
    cache: &impl Invalidate,
) {
    match result {
        Ok(cabin) => {
            tracing::info!(cabin_id = cabin.id, "Cabin created");
            notifier.notify_success(CABIN_CREATED_MESSAGE.to_string());
            cache.invalidate(CABINS_QUERY_KEY);
            form.reset();
            mutation.settle(MutationStatus::Success, None);
        }
        Err(err) => {
            tracing::warn!(error = %err.message, "Creating cabin failed");
            for (name, message) in &err.field_errors {
                if let Some(field) = CabinField::from_request_field(name) {
                    form.set_error(field, message.clone());
                }
            }
            notifier.notify_error(err.message.clone());
            mutation.settle(MutationStatus::Error, Some(err.message));
        }
    }
}
