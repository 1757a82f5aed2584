//! The backend client: a trait seam plus the reqwest implementation.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::wizard::form::ServiceType;

use super::types::{FileUpload, SubmissionPayload, SubmissionReceipt, UploadedFile};

/// What the wizard needs from the backend. No retries anywhere; recovery is
/// user-initiated by repeating the action.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Upload one file under a category tag. The returned `file_url` is only
    /// meaningful on success.
    async fn upload_file(
        &self,
        file: FileUpload,
        category: &str,
    ) -> Result<UploadedFile, ApiError>;

    /// Submit a completed registration to the service-specific endpoint.
    async fn submit_registration(
        &self,
        service: ServiceType,
        payload: SubmissionPayload,
    ) -> Result<SubmissionReceipt, ApiError>;
}

/// reqwest-backed client for the platform API.
pub struct HttpRegistryClient {
    config: ApiConfig,
    client: reqwest::Client,
}

impl HttpRegistryClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.auth_token {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    /// Map a non-2xx response into `Rejected`, reading the body as the
    /// server-provided message.
    async fn check(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().await.unwrap_or_default();
        warn!(endpoint, %status, "API request rejected");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message: if message.is_empty() {
                status.to_string()
            } else {
                message
            },
        })
    }
}

#[async_trait]
impl RegistryApi for HttpRegistryClient {
    async fn upload_file(
        &self,
        file: FileUpload,
        category: &str,
    ) -> Result<UploadedFile, ApiError> {
        let url = self.endpoint("files/upload");
        let file_name = file.file_name.clone();

        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| ApiError::RequestFailed {
                endpoint: url.clone(),
                reason: format!("invalid content type: {e}"),
            })?;
        let form = Form::new()
            .text("category", category.to_string())
            .part("file", part);

        let resp = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;

        let resp = Self::check(&url, resp).await?;
        let uploaded: UploadedFile = resp
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        info!(category, %file_name, id = %uploaded.id, "file uploaded");
        Ok(uploaded)
    }

    async fn submit_registration(
        &self,
        service: ServiceType,
        payload: SubmissionPayload,
    ) -> Result<SubmissionReceipt, ApiError> {
        let url = self.endpoint(&format!("registrations/{}", service.endpoint_path()));

        let resp = self
            .authorize(self.client.post(&url))
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: url.clone(),
                reason: e.to_string(),
            })?;

        let resp = Self::check(&url, resp).await?;
        let receipt: SubmissionReceipt = resp
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;

        info!(
            service = %service,
            submission_id = %receipt.submission_id,
            "registration submitted"
        );
        Ok(receipt)
    }
}
