//! Wire types for the upload and submission endpoints.

use serde::{Deserialize, Serialize};

/// Status literal stamped on every submission: payment is treated as already
/// completed client-side (no gateway integration in this core).
pub const SUBMISSION_STATUS: &str = "PAYMENT_SUCCESSFUL";

/// A file picked by the user, ready to upload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Image uploads get a thumbnail preview in the UI.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Response of the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub original_name: String,
    pub file_url: String,
    pub id: String,
}

/// One entry in the flat documents list of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: String,
    pub filename: String,
    pub file_url: String,
}

/// The final submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionPayload {
    /// Client-generated id: `{SERVICE_PREFIX}-{epoch_millis}`.
    pub submission_id: String,
    pub plan: String,
    pub user_email: String,
    /// The full form-data tree, each party enriched with its document URLs.
    pub form_data: serde_json::Value,
    pub documents: Vec<DocumentRef>,
    pub status: String,
}

/// Server acknowledgement of a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
