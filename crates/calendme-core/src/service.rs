//! HTTP client for the backend parsing and export services.
//!
//! The services themselves live elsewhere; this module only knows their
//! request and response shapes. Calls are not retried and rely on reqwest's
//! default timeouts.

use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::error::ServiceError;
use crate::event::Event;
use crate::import::{ColumnMapping, ImportedRow, RawTable};
use crate::time::TimeOfDay;

pub const PARSE_NL_PATH: &str = "parse_nl";
pub const UPLOAD_PATH: &str = "upload";
pub const PROCESS_PATH: &str = "process";
pub const GENERATE_ICS_PATH: &str = "generate_ics";

/// Event fields extracted from a natural-language description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEvent {
    pub title: String,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub reminder: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    success: bool,
    event: Option<ParsedEvent>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UploadResponse {
    Table(RawTable),
    Failed { error: String },
}

#[derive(Debug, Deserialize)]
struct ProcessResponse {
    events: Vec<ImportedRow>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for the four backend endpoints under one base URL.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    base_url: Url,
    http_client: Client,
}

impl ServiceClient {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:5000`).
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, http_client: Client) -> Result<Self, ServiceError> {
        let mut base_url =
            Url::parse(base_url).map_err(|_| ServiceError::InvalidUrl(base_url.to_string()))?;
        // Url::join replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|_| ServiceError::InvalidUrl(format!("{}{path}", self.base_url)))
    }

    /// Ask the parsing service to turn `input` into event fields.
    pub async fn parse_natural_language(&self, input: &str) -> Result<ParsedEvent, ServiceError> {
        let url = self.endpoint(PARSE_NL_PATH)?;
        debug!(%url, "parsing natural language input");
        let resp = self
            .http_client
            .post(url)
            .json(&json!({ "input": input }))
            .send()
            .await
            .map_err(|e| transport(PARSE_NL_PATH, e))?;

        // This endpoint reports failures in the body, often with a 400.
        let status = resp.status().as_u16();
        let body: ParseResponse = decode(PARSE_NL_PATH, resp).await?;
        match body {
            ParseResponse {
                success: true,
                event: Some(event),
                ..
            } => Ok(event),
            ParseResponse { error, .. } => Err(ServiceError::Rejected {
                endpoint: PARSE_NL_PATH.into(),
                status,
                message: error.unwrap_or_else(|| "Failed to parse input".into()),
            }),
        }
    }

    /// Upload a spreadsheet or document and get its table rows back.
    pub async fn parse_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<RawTable, ServiceError> {
        let url = self.endpoint(UPLOAD_PATH)?;
        debug!(%url, filename, size = bytes.len(), "uploading file");
        let form = Form::new().part("file", Part::bytes(bytes).file_name(filename.to_string()));
        let resp = self
            .http_client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport(UPLOAD_PATH, e))?;
        let resp = check_status(UPLOAD_PATH, resp).await?;
        match decode(UPLOAD_PATH, resp).await? {
            UploadResponse::Table(table) => Ok(table),
            UploadResponse::Failed { error } => Err(ServiceError::Rejected {
                endpoint: UPLOAD_PATH.into(),
                status: 200,
                message: error,
            }),
        }
    }

    /// Apply a column mapping and row filter to uploaded rows.
    pub async fn process_rows(
        &self,
        raw_rows: &[Vec<String>],
        mapping: &ColumnMapping,
        filters: &str,
    ) -> Result<Vec<ImportedRow>, ServiceError> {
        let url = self.endpoint(PROCESS_PATH)?;
        debug!(%url, rows = raw_rows.len(), "processing rows");
        let resp = self
            .http_client
            .post(url)
            .json(&json!({
                "raw_rows": raw_rows,
                "mapping": mapping,
                "filters": filters,
            }))
            .send()
            .await
            .map_err(|e| transport(PROCESS_PATH, e))?;
        let resp = check_status(PROCESS_PATH, resp).await?;
        let body: ProcessResponse = decode(PROCESS_PATH, resp).await?;
        Ok(body.events)
    }

    /// Render `events` as an ICS calendar file.
    pub async fn generate_ics(&self, events: &[Event]) -> Result<Vec<u8>, ServiceError> {
        let url = self.endpoint(GENERATE_ICS_PATH)?;
        debug!(%url, count = events.len(), "generating ics");
        let resp = self
            .http_client
            .post(url)
            .json(&json!({ "events": events }))
            .send()
            .await
            .map_err(|e| transport(GENERATE_ICS_PATH, e))?;
        let resp = check_status(GENERATE_ICS_PATH, resp).await?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| transport(GENERATE_ICS_PATH, e))?;
        Ok(bytes.to_vec())
    }
}

fn transport(endpoint: &str, source: reqwest::Error) -> ServiceError {
    ServiceError::Transport {
        endpoint: endpoint.to_string(),
        source,
    }
}

/// Turn a non-2xx response into `Rejected`, preferring the body's `error`.
async fn check_status(endpoint: &str, resp: Response) -> Result<Response, ServiceError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text.trim().to_string()
            }
        });
    Err(ServiceError::Rejected {
        endpoint: endpoint.to_string(),
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(endpoint: &str, resp: Response) -> Result<T, ServiceError> {
    let text = resp.text().await.map_err(|e| transport(endpoint, e))?;
    serde_json::from_str(&text).map_err(|e| ServiceError::InvalidResponse {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}
