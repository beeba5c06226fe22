//! Headless form handling: field state, validation rules and the
//! create-cabin submission lifecycle. Nothing here renders; components bind
//! it to signals.

pub mod cabin;
pub mod mutation;
pub mod rules;
pub mod state;

pub use cabin::{cabin_request, new_cabin_form, CabinField};
pub use mutation::{
    prepare_submission, settle_create, CreateCabinCall, Invalidate, MutationState,
    MutationStatus, Notifier, RemoteError, ServerCabins,
};
pub use rules::Rule;
pub use state::{FieldValue, FormState, FormValues, SelectedFile};
