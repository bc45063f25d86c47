use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use crate::assets::AssetProcessor;
use crate::config::Config;
use crate::error::{ExtractError, Result};
use crate::model::ExtractionResult;
use crate::schema;
use crate::service::{self, ExtractionClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Processed,
    AlreadyProcessed,
}

/// Outcome record for one document.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub status: RunStatus,
    pub project: String,
    pub result_file: Option<PathBuf>,
    pub asset_dir: Option<PathBuf>,
    pub report_path: PathBuf,
}

/// Run one brochure end to end: service call, report persistence, asset
/// extraction. Idempotent per document, keyed on the report file.
pub fn process_document(config: &Config, pdf_path: &Path) -> Result<ProcessOutcome> {
    config.ensure_directories()?;

    if !pdf_path.exists() {
        return Err(ExtractError::InputNotFound(pdf_path.to_path_buf()));
    }

    let project = project_identifier(pdf_path);
    let report_path = config.results_dir.join(format!("{project}.md"));

    // Presence of the report is the idempotency marker: return whatever
    // result file the earlier run left, without calling the service again.
    if report_path.exists() {
        info!("[SKIP] Already processed: {project}");
        let result_file = service::find_latest_result(&config.json_dir, &project).ok();
        return Ok(ProcessOutcome {
            status: RunStatus::AlreadyProcessed,
            project,
            result_file,
            asset_dir: None,
            report_path,
        });
    }

    let client = ExtractionClient::from_env(&config.endpoint, config.timeout)?;
    client.parse_document(
        pdf_path,
        &schema::extraction_schema(),
        &config.json_dir,
        &project,
    )?;

    // The service may have left result files behind from earlier runs;
    // always consume the newest match.
    let result_file = service::find_latest_result(&config.json_dir, &project)?;
    finish(config, pdf_path, project, report_path, result_file)
}

/// Consume a structured-result file: persist the narrative report and, if an
/// extraction payload is present, run the asset processor against it.
fn finish(
    config: &Config,
    pdf_path: &Path,
    project: String,
    report_path: PathBuf,
    result_file: PathBuf,
) -> Result<ProcessOutcome> {
    let raw: Value = serde_json::from_str(&fs::read_to_string(&result_file)?)?;

    match raw.get("markdown").and_then(Value::as_str) {
        Some(markdown) => {
            fs::write(&report_path, markdown)?;
            info!("Report saved to {}", report_path.display());
        }
        None => warn!("No 'markdown' field in {}", result_file.display()),
    }

    let payload = raw.get("extraction").filter(|e| match e {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        _ => true,
    });
    let Some(payload) = payload else {
        return Err(ExtractError::MissingPayload(result_file));
    };

    let asset_dir = config.data_dir.join(&project);
    let result = ExtractionResult::new(payload.clone());
    AssetProcessor::new(pdf_path, &result, &asset_dir, config.render_dpi)?.process_all();

    info!("[DONE] Finished processing: {project}");
    Ok(ProcessOutcome {
        status: RunStatus::Processed,
        project,
        result_file: Some(result_file),
        asset_dir: Some(asset_dir),
        report_path,
    })
}

fn project_identifier(pdf_path: &Path) -> String {
    pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_config(root: &Path) -> Config {
        Config {
            results_dir: root.join("responses"),
            data_dir: root.join("data"),
            json_dir: root.join("json"),
            ..Config::default()
        }
    }

    #[test]
    fn missing_input_document_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        let err = process_document(&config, &root.path().join("nope.pdf")).unwrap_err();
        assert!(matches!(err, ExtractError::InputNotFound(_)));
    }

    #[test]
    fn existing_report_skips_the_service_call() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        config.ensure_directories().unwrap();

        let pdf = root.path().join("tower.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();
        fs::write(config.results_dir.join("tower.md"), "# Tower").unwrap();
        let old_result = config.json_dir.join("tower_20240101.json");
        fs::write(&old_result, b"{}").unwrap();

        // No EXTRACTION_API_KEY in the environment: a service call would
        // fail, so completing proves the skip path never builds the client.
        let outcome = process_document(&config, &pdf).unwrap();
        assert_eq!(outcome.status, RunStatus::AlreadyProcessed);
        assert_eq!(outcome.result_file.as_deref(), Some(old_result.as_path()));
        assert!(outcome.asset_dir.is_none());
    }

    #[test]
    fn skip_without_result_file_still_succeeds() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        config.ensure_directories().unwrap();

        let pdf = root.path().join("tower.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();
        fs::write(config.results_dir.join("tower.md"), "# Tower").unwrap();

        let outcome = process_document(&config, &pdf).unwrap();
        assert_eq!(outcome.status, RunStatus::AlreadyProcessed);
        assert!(outcome.result_file.is_none());
    }

    #[test]
    fn result_without_payload_is_fatal() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        config.ensure_directories().unwrap();

        let pdf = root.path().join("tower.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();
        let result_file = config.json_dir.join("tower_1.json");
        fs::write(
            &result_file,
            serde_json::to_vec(&json!({ "markdown": "# Tower", "extraction": {} })).unwrap(),
        )
        .unwrap();

        let report_path = config.results_dir.join("tower.md");
        let err = finish(&config, &pdf, "tower".into(), report_path.clone(), result_file)
            .unwrap_err();
        assert!(matches!(err, ExtractError::MissingPayload(_)));
        // The narrative report is still persisted before the failure.
        assert!(report_path.exists());
    }

    #[test]
    fn payload_without_regions_completes_and_emits_cleaned_json() {
        let root = tempfile::tempdir().unwrap();
        let config = test_config(root.path());
        config.ensure_directories().unwrap();

        let pdf = root.path().join("tower.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();
        let result_file = config.json_dir.join("tower_1.json");
        fs::write(
            &result_file,
            serde_json::to_vec(&json!({
                "markdown": "# Tower",
                "extraction": {
                    "projectName": "Tower One",
                    "amenities": ["Gymnasium"],
                    "masterplanImage": "Not Present",
                },
            }))
            .unwrap(),
        )
        .unwrap();

        let report_path = config.results_dir.join("tower.md");
        let outcome =
            finish(&config, &pdf, "tower".into(), report_path, result_file).unwrap();
        assert_eq!(outcome.status, RunStatus::Processed);

        let cleaned_path = outcome.asset_dir.unwrap().join("extracted_data.json");
        let cleaned: Value =
            serde_json::from_str(&fs::read_to_string(cleaned_path).unwrap()).unwrap();
        assert_eq!(cleaned["projectName"], "Tower One");
        assert!(cleaned.get("masterplanImage").is_none());
    }
}
