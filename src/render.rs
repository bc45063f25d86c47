use std::collections::BTreeMap;
use std::path::Path;

use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::info;

use crate::error::Result;

/// Bind libpdfium from the working directory first, falling back to a
/// system-wide install.
fn create_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())?;
    Ok(Pdfium::new(bindings))
}

/// Rasterize exactly the given pages of a document, once each.
///
/// Page indices are zero-based. A page that fails to load or render fails the
/// whole call; the caller treats that as run-fatal.
pub fn rasterize_pages(
    pdf_path: &Path,
    pages: &[u16],
    dpi: f32,
) -> Result<BTreeMap<u16, DynamicImage>> {
    let mut rendered = BTreeMap::new();
    if pages.is_empty() {
        return Ok(rendered);
    }

    info!("Rasterizing {} page(s) at {} DPI", pages.len(), dpi);
    let pdfium = create_pdfium()?;
    let document = pdfium.load_pdf_from_file(pdf_path, None)?;
    let config = PdfRenderConfig::new().scale_page_by_factor(dpi / 72.0);

    for &index in pages {
        let page = document.pages().get(index)?;
        let bitmap = page.render_with_config(&config)?;
        rendered.insert(index, bitmap.as_image());
    }

    Ok(rendered)
}
