use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

pub const DEFAULT_ENDPOINT: &str = "https://api.va.landing.ai/v1/tools/agentic-document-analysis";

/// Run configuration. Directories are passed explicitly so two runs with
/// different layouts never share state.
#[derive(Debug, Clone)]
pub struct Config {
    /// Narrative report files (`<project>.md`); presence is the idempotency marker.
    pub results_dir: PathBuf,
    /// Per-project asset trees (`<project>/images/...`, `<project>/extracted_data.json`).
    pub data_dir: PathBuf,
    /// Structured result files saved by the service client (`<project>_<ts>.json`).
    pub json_dir: PathBuf,
    /// Extraction service endpoint.
    pub endpoint: String,
    /// Timeout applied to each service call.
    pub timeout: Duration,
    /// Rasterization resolution for page crops.
    pub render_dpi: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("responses"),
            data_dir: PathBuf::from("data"),
            json_dir: PathBuf::from("json"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(300),
            render_dpi: 300.0,
        }
    }
}

impl Config {
    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(&self.results_dir)?;
        fs::create_dir_all(&self.data_dir)?;
        fs::create_dir_all(&self.json_dir)?;
        Ok(())
    }
}
