/// Scoring client: the single point of entry for calls to the ATS scoring API.
///
/// The session talks to the API through the [`ScoreApi`] trait so tests can
/// substitute an in-memory fake. Origin and credentials mode come from
/// [`ClientConfig`]; nothing is read from globals.
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::errors::AnalyzerError;
use crate::models::{ErrorBody, ResultPayload, SlotName, UploadFile};

/// Both files of a submission, already validated as present.
#[derive(Debug, Clone)]
pub struct ScoreRequest {
    pub resume: UploadFile,
    pub jd: UploadFile,
}

/// Seam between the submission controller and the transport.
#[async_trait]
pub trait ScoreApi: Send + Sync {
    async fn score(&self, request: ScoreRequest) -> Result<ResultPayload, AnalyzerError>;
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

/// reqwest-backed client for `POST /api/score` and `GET /health`.
#[derive(Clone)]
pub struct ScoreClient {
    client: Client,
    config: ClientConfig,
}

impl ScoreClient {
    pub fn new(config: ClientConfig) -> Result<Self, AnalyzerError> {
        let mut builder = Client::builder().cookie_store(config.with_credentials);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub async fn health(&self) -> Result<HealthStatus, AnalyzerError> {
        let url = self.config.health_url();
        debug!("Checking health at {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(server_error(status.as_u16(), response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl ScoreApi for ScoreClient {
    async fn score(&self, request: ScoreRequest) -> Result<ResultPayload, AnalyzerError> {
        let url = self.config.score_url();
        let form = Form::new()
            .part(
                SlotName::Resume.field_name(),
                file_part(&request.resume)?,
            )
            .part(SlotName::Jd.field_name(), file_part(&request.jd)?);

        info!(
            resume = %request.resume.name,
            jd = %request.jd.name,
            "Submitting documents to {url}"
        );

        // reqwest sets `multipart/form-data; boundary=...` from the form.
        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let err = server_error(status.as_u16(), response).await;
            warn!("Scoring API returned {status}: {err}");
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))?;
        let payload: ResultPayload = serde_json::from_str(&body)
            .map_err(|e| AnalyzerError::MalformedResponse(e.to_string()))?;

        debug!(
            score = payload.score,
            matched = payload.matched_skills.len(),
            missing = payload.missing_skills.len(),
            "Scoring call succeeded"
        );

        Ok(payload)
    }
}

fn file_part(file: &UploadFile) -> Result<Part, AnalyzerError> {
    let part = Part::bytes(file.content.to_vec()).file_name(file.name.clone());
    match &file.mime {
        Some(mime) => Ok(part.mime_str(mime)?),
        None => Ok(part),
    }
}

/// Reads the optional `error` field out of a failed response.
async fn server_error(status: u16, response: reqwest::Response) -> AnalyzerError {
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error);
    AnalyzerError::Server { status, message }
}
