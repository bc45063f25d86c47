use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("input document not found: {0}")]
    InputNotFound(PathBuf),
    #[error("invalid bounding box format: '{0}' (expected exactly four numbers)")]
    MalformedRegion(String),
    #[error("extraction service call failed: {0}")]
    Service(String),
    #[error("no extraction payload in result file: {0}")]
    MissingPayload(PathBuf),
    #[error("no result files matching prefix: {0}")]
    ResultNotFound(String),
    #[error("crop region is empty: '{0}'")]
    EmptyCrop(String),
    #[error("page {0} was not rasterized")]
    PageUnavailable(u16),
    #[error("pdf rendering failed: {0}")]
    Pdf(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<pdfium_render::prelude::PdfiumError> for ExtractError {
    fn from(value: pdfium_render::prelude::PdfiumError) -> Self {
        Self::Pdf(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
