use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::{multipart, Client};
use serde_json::Value;
use tracing::info;

use crate::error::{ExtractError, Result};

pub const API_KEY_VAR: &str = "EXTRACTION_API_KEY";

/// Client for the external document-understanding service. One call per
/// document, no retries; a timeout guards against the call blocking forever.
pub struct ExtractionClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl ExtractionClient {
    pub fn from_env(endpoint: &str, timeout: Duration) -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            ExtractError::Service(format!("{API_KEY_VAR} environment variable must be set"))
        })?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExtractError::Service(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            api_key,
        })
    }

    /// Submit a document plus the extraction schema and persist the
    /// structured result as `<json_dir>/<project>_<timestamp>.json`.
    pub fn parse_document(
        &self,
        pdf_path: &Path,
        schema: &Value,
        json_dir: &Path,
        project: &str,
    ) -> Result<PathBuf> {
        let form = multipart::Form::new()
            .file("pdf", pdf_path)?
            .text("fields_schema", schema.to_string());

        info!("Submitting {} to {}", pdf_path.display(), self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .map_err(|e| ExtractError::Service(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExtractError::Service(format!(
                "service returned {status}: {body}"
            )));
        }

        let body: Value = response
            .json()
            .map_err(|e| ExtractError::Service(e.to_string()))?;
        // Some deployments wrap the result in a "data" envelope.
        let result = match body.get("data") {
            Some(data) if data.is_object() => data.clone(),
            _ => body,
        };

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let path = json_dir.join(format!("{project}_{timestamp}.json"));
        fs::write(&path, serde_json::to_vec_pretty(&result)?)?;
        info!("Structured result saved to {}", path.display());
        Ok(path)
    }
}

/// Find the most-recently-modified structured-result file for a project.
/// Re-runs leave several `<project>_*.json` files behind; the newest wins.
pub fn find_latest_result(json_dir: &Path, project: &str) -> Result<PathBuf> {
    let prefix = format!("{project}_");
    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(json_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !name.starts_with(&prefix) || !name.ends_with(".json") {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
            newest = Some((modified, entry.path()));
        }
    }

    newest
        .map(|(_, path)| path)
        .ok_or(ExtractError::ResultNotFound(prefix))
}

// ── Tests ──
