//! Registration wizard — the per-form state machine behind the multi-step
//! registration flows (LLP, Private Limited, Proprietorship, Public Limited).
//!
//! One controller instance per open form. Steps advance strictly linearly
//! and only after the current step validates; going back is always allowed.
//! Uploads and the final submission are the only async operations, and both
//! go through the [`crate::api::RegistryApi`] seam.

pub mod controller;
pub mod documents;
pub mod form;
pub mod step;
pub mod validation;

pub use controller::WizardController;
pub use documents::{
    DocumentSlot, DocumentStore, SlotState, UploadedFileRecord, slot_key, upload_category,
};
pub use form::{
    Address, Director, LlpForm, Partner, PersonDetails, Plan, PlcForm, Proprietor,
    ProprietorshipForm, PvtLtdForm, RegistrationForm, ServiceType,
};
pub use step::WizardStep;
pub use validation::{ValidationReport, validate_step};
