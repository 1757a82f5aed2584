//! External REST boundary — file uploads and registration submissions.
//!
//! The wizard talks to the backend through the [`RegistryApi`] trait so
//! tests can drive a full flow against a stub. [`HttpRegistryClient`] is the
//! real reqwest-backed implementation.

mod client;
mod types;

pub use client::{HttpRegistryClient, RegistryApi};
pub use types::{
    DocumentRef, FileUpload, SubmissionPayload, SubmissionReceipt, UploadedFile,
    SUBMISSION_STATUS,
};
