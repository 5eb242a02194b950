//! HTTP client for the SportsEdit backend.
//!
//! The backend exposes `POST /draft`, `POST /evaluate`, and `GET /health`.
//! Response decoding is kept as pure functions of (status, body) so the
//! contract can be tested without a socket.

use crate::model::{ClientConfig, DraftRequest, DraftResult, EvalRequest, EvalResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be completed at the transport level.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response; `detail` is the service-provided message when the
    /// body carried one, otherwise a generic fallback.
    #[error("{detail}")]
    Service { status: u16, detail: String },

    /// A 2xx response whose body does not decode into the expected shape.
    /// Detected eagerly so downstream metrics never see a half-formed payload.
    #[error("malformed response: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error body shape used by the backend for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

pub struct NewsroomClient {
    http: reqwest::Client,
    base_url: String,
}

impl NewsroomClient {
    pub fn new(cfg: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(cfg.user_agent.clone());
        if let Some(t) = cfg.request_timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Run a single draft for one game.
    pub async fn draft(&self, req: &DraftRequest) -> Result<DraftResult> {
        let resp = self
            .http
            .post(format!("{}/draft", self.base_url))
            .json(req)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        decode_response(status, &body)
    }

    /// Run a batch evaluation.
    pub async fn evaluate(&self, req: &EvalRequest) -> Result<EvalResult> {
        let resp = self
            .http
            .post(format!("{}/evaluate", self.base_url))
            .json(req)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let result: EvalResult = decode_response(status, &body)?;
        validate_eval(&result)?;
        Ok(result)
    }

    /// Probe `GET /health`; true when the backend answers 2xx.
    pub async fn health(&self) -> bool {
        match self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Decode a backend response. Non-2xx turns into `ApiError::Service` with
/// the body's `detail` when present; a 2xx body that fails to parse is
/// `ApiError::Malformed`.
pub(crate) fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .map(|e| e.detail)
            .unwrap_or_else(|_| format!("service error (HTTP {status})"));
        return Err(ApiError::Service { status, detail });
    }
    serde_json::from_str(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

/// The batch contract promises `total_runs == results.len()`; a payload that
/// breaks it is treated as malformed rather than trusted.
pub(crate) fn validate_eval(result: &EvalResult) -> Result<()> {
    if result.total_runs as usize != result.results.len() {
        return Err(ApiError::Malformed(format!(
            "total_runs is {} but results has {} entries",
            result.total_runs,
            result.results.len()
        )));
    }
    Ok(())
}
