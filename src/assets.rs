use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use image::DynamicImage;
use regex::Regex;
use tracing::{error, info, warn};

use crate::error::{ExtractError, Result};
use crate::model::{ExtractionResult, ImageRegion};
use crate::render;

static NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-+]?\d*\.\d+|\d+").unwrap());
static UNSAFE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap());

/// Minimum resolution for amenity photographs; anything smaller is assumed
/// to be an icon or thumbnail rather than usable marketing imagery.
const HD_MIN: (u32, u32) = (1280, 720);

pub const CLEANED_JSON_NAME: &str = "extracted_data.json";

/// How an admitted crop is named inside its category directory.
#[derive(Clone, Copy)]
enum Naming {
    /// Fixed filename, silently overwritten on reprocessing.
    Fixed(&'static str),
    /// Name derived from the item, overwritten on collision.
    Stem,
    /// Name derived from the item, `_1`, `_2`, … appended until free.
    Suffixed,
}

/// Per-category write policy: one routine drives all five categories.
struct Category {
    dir: &'static str,
    naming: Naming,
    min_size: Option<(u32, u32)>,
}

const FLOORPLAN: Category = Category {
    dir: "floorplan",
    naming: Naming::Suffixed,
    min_size: None,
};
const AMENITIES: Category = Category {
    dir: "amenities",
    naming: Naming::Stem,
    min_size: Some(HD_MIN),
};
const MASTERPLAN: Category = Category {
    dir: "masterplan",
    naming: Naming::Fixed("masterplan.jpg"),
    min_size: None,
};
const LOCATION: Category = Category {
    dir: "location",
    naming: Naming::Fixed("location_map.jpg"),
    min_size: None,
};
const BUILDER: Category = Category {
    dir: "builder",
    naming: Naming::Fixed("logo.jpg"),
    min_size: None,
};

/// Replace anything outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_RE.replace_all(name, "_").into_owned()
}

/// Pull exactly four numeric tokens out of a loosely-formatted bbox string.
pub fn parse_bbox(raw: &str) -> Result<(f32, f32, f32, f32)> {
    let nums: Vec<f32> = NUM_RE
        .find_iter(raw)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();
    if nums.len() != 4 {
        return Err(ExtractError::MalformedRegion(raw.to_string()));
    }
    Ok((nums[0], nums[1], nums[2], nums[3]))
}

/// Minimal sorted set of page indices referenced by any usable page number.
/// Pages no region points at are never rasterized.
pub fn required_pages(result: &ExtractionResult) -> Vec<u16> {
    let mut pages = BTreeSet::new();
    for config in result.floorplan_configs() {
        pages.extend(config.region.page());
    }
    for amenity in result.amenity_images() {
        pages.extend(amenity.region.page());
    }
    for region in [
        result.masterplan(),
        result.location_map(),
        result.builder_logo(),
    ]
    .into_iter()
    .flatten()
    {
        pages.extend(region.page());
    }
    pages.into_iter().collect()
}

/// Scale fractional LTRB coordinates to pixels and crop. Deliberately no
/// clamping or ordering checks: a reversed or out-of-range box produces a
/// degenerate crop that fails at save time instead of being rejected here.
fn crop_region(page: &DynamicImage, raw_bbox: &str) -> Result<DynamicImage> {
    let (left, top, right, bottom) = parse_bbox(raw_bbox)?;
    let width = page.width() as f32;
    let height = page.height() as f32;
    let x = (left * width) as u32;
    let y = (top * height) as u32;
    let w = ((right - left) * width) as u32;
    let h = ((bottom - top) * height) as u32;
    Ok(page.crop_imm(x, y, w, h))
}

fn save_jpeg(img: &DynamicImage, path: &Path, raw_bbox: &str) -> Result<()> {
    if img.width() == 0 || img.height() == 0 {
        return Err(ExtractError::EmptyCrop(raw_bbox.to_string()));
    }
    img.to_rgb8().save(path)?;
    Ok(())
}

/// First path in `dir` for `stem` that does not collide with an existing
/// file: `<stem>.jpg`, then `<stem>_1.jpg`, `<stem>_2.jpg`, …
fn next_free_path(dir: &Path, stem: &str) -> PathBuf {
    let mut path = dir.join(sanitize_filename(&format!("{stem}.jpg")));
    let mut counter = 1;
    while path.exists() {
        path = dir.join(sanitize_filename(&format!("{stem}_{counter}.jpg")));
        counter += 1;
    }
    path
}

/// Crops every referenced image region out of the rasterized pages and
/// writes the per-category files plus the cleaned JSON. Owns the rendered
/// pages only for the duration of one run.
pub struct AssetProcessor<'a> {
    pdf_path: &'a Path,
    result: &'a ExtractionResult,
    output_dir: PathBuf,
    image_dir: PathBuf,
    render_dpi: f32,
}

impl<'a> AssetProcessor<'a> {
    pub fn new(
        pdf_path: &'a Path,
        result: &'a ExtractionResult,
        output_dir: &Path,
        render_dpi: f32,
    ) -> Result<Self> {
        let image_dir = output_dir.join("images");
        fs::create_dir_all(&image_dir)?;
        Ok(Self {
            pdf_path,
            result,
            output_dir: output_dir.to_path_buf(),
            image_dir,
            render_dpi,
        })
    }

    /// Single pass over every asset category. Per-item failures are logged
    /// and skipped; only page collection, rasterization, or the cleaned-JSON
    /// write are fatal for the run, and even then this returns normally.
    pub fn process_all(&self) {
        let name = self
            .pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        info!("[START] Processing brochure: {name}");
        match self.run() {
            Ok(()) => info!("[DONE] Completed processing: {name}"),
            Err(e) => error!("[FATAL] Brochure processing failed: {e}"),
        }
    }

    fn run(&self) -> Result<()> {
        let pages = required_pages(self.result);
        let rendered = render::rasterize_pages(self.pdf_path, &pages, self.render_dpi)?;

        self.extract_floorplans(&rendered);
        self.extract_amenities(&rendered);
        self.extract_masterplan(&rendered);
        self.extract_location_map(&rendered);
        self.extract_builder_logo(&rendered);
        self.save_cleaned_json()?;
        Ok(())
    }

    fn extract_floorplans(&self, pages: &BTreeMap<u16, DynamicImage>) {
        for config in self.result.floorplan_configs() {
            let stem = config.label().replace(' ', "").replace('+', "_");
            self.extract_one(pages, &config.region, &FLOORPLAN, &stem, "Floorplan");
        }
    }

    fn extract_amenities(&self, pages: &BTreeMap<u16, DynamicImage>) {
        for amenity in self.result.amenity_images() {
            let stem = amenity.label().replace('&', "and");
            let what = format!("Amenity '{}'", amenity.label());
            self.extract_one(pages, &amenity.region, &AMENITIES, &stem, &what);
        }
    }

    fn extract_masterplan(&self, pages: &BTreeMap<u16, DynamicImage>) {
        if let Some(region) = self.result.masterplan() {
            self.extract_one(pages, &region, &MASTERPLAN, "masterplan", "Masterplan");
        }
    }

    fn extract_location_map(&self, pages: &BTreeMap<u16, DynamicImage>) {
        if let Some(region) = self.result.location_map() {
            self.extract_one(pages, &region, &LOCATION, "location_map", "Location map");
        }
    }

    fn extract_builder_logo(&self, pages: &BTreeMap<u16, DynamicImage>) {
        if let Some(region) = self.result.builder_logo() {
            self.extract_one(pages, &region, &BUILDER, "logo", "Builder logo");
        }
    }

    /// Validate → crop → filter → write for one item. Every failure mode is
    /// contained here so one bad image never blocks the rest.
    fn extract_one(
        &self,
        pages: &BTreeMap<u16, DynamicImage>,
        region: &ImageRegion,
        category: &Category,
        stem: &str,
        what: &str,
    ) {
        let (Some(bbox), Some(page_no)) = (region.bbox(), region.page()) else {
            warn!("Skipping {what}: missing or invalid bbox/page");
            return;
        };

        match self.crop_and_write(pages, bbox, page_no, category, stem) {
            Ok(Some(path)) => {
                let name = path.file_name().unwrap_or_default().to_string_lossy();
                info!("{what} saved: {name}");
            }
            Ok(None) => info!("Skipped non-HD {what}: {stem}"),
            Err(e) => error!("Failed to extract {what}: {e}"),
        }
    }

    fn crop_and_write(
        &self,
        pages: &BTreeMap<u16, DynamicImage>,
        bbox: &str,
        page_no: u16,
        category: &Category,
        stem: &str,
    ) -> Result<Option<PathBuf>> {
        let page = pages
            .get(&page_no)
            .ok_or(ExtractError::PageUnavailable(page_no))?;
        let cropped = crop_region(page, bbox)?;

        if let Some((min_w, min_h)) = category.min_size {
            if cropped.width() < min_w || cropped.height() < min_h {
                return Ok(None);
            }
        }

        // Category directories are created lazily: an unused category never
        // leaves an empty directory behind.
        let dir = self.image_dir.join(category.dir);
        fs::create_dir_all(&dir)?;
        let path = match category.naming {
            Naming::Fixed(name) => dir.join(name),
            Naming::Stem => dir.join(sanitize_filename(&format!("{stem}.jpg"))),
            Naming::Suffixed => next_free_path(&dir, stem),
        };
        save_jpeg(&cropped, &path, bbox)?;
        Ok(Some(path))
    }

    fn save_cleaned_json(&self) -> Result<()> {
        let path = self.output_dir.join(CLEANED_JSON_NAME);
        fs::write(&path, serde_json::to_string_pretty(&self.result.cleaned())?)?;
        info!("Cleaned JSON saved to {}", path.display());
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use serde_json::json;

    fn page(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([180, 180, 180])))
    }

    fn processor<'a>(
        result: &'a ExtractionResult,
        output_dir: &Path,
    ) -> AssetProcessor<'a> {
        AssetProcessor::new(Path::new("brochure.pdf"), result, output_dir, 300.0).unwrap()
    }

    #[test]
    fn bbox_parses_exactly_four_tokens() {
        assert_eq!(
            parse_bbox("[0.1, 0.2, 0.8, 0.9]").unwrap(),
            (0.1, 0.2, 0.8, 0.9)
        );
        assert_eq!(
            parse_bbox("0.05 0.1 0.95 1").unwrap(),
            (0.05, 0.1, 0.95, 1.0)
        );
        assert!(matches!(
            parse_bbox("0.1, 0.2, 0.8"),
            Err(ExtractError::MalformedRegion(_))
        ));
        assert!(matches!(
            parse_bbox("0.1, 0.2, 0.8, 0.9, 1.0"),
            Err(ExtractError::MalformedRegion(_))
        ));
        assert!(matches!(
            parse_bbox("Not Present"),
            Err(ExtractError::MalformedRegion(_))
        ));
    }

    #[test]
    fn required_pages_deduplicates_and_sorts() {
        let result = ExtractionResult::new(json!({
            "floorplanConfigs": [
                { "boundingBoxLTRB": "0,0,1,1", "pageNumber": 5 },
                { "boundingBoxLTRB": "0,0,1,1", "pageNumber": 2 },
                { "boundingBoxLTRB": "0,0,1,1", "pageNumber": "oops" },
            ],
            "amenitiesImages": [
                { "amenityLabel": "Pool", "boundingBoxLTRB": "0,0,1,1", "pageNumber": "5" },
            ],
            "masterplanImage": { "boundingBoxLTRB": "0,0,1,1", "pageNumber": 7 },
            "locationMapImage": "Not Present",
            "builder": { "name": "Acme" },
        }));
        assert_eq!(required_pages(&result), vec![2, 5, 7]);
    }

    #[test]
    fn unusable_regions_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionResult::new(json!({
            "floorplanConfigs": [
                { "bhkType": "2 BHK", "pageNumber": 0 },
                { "bhkType": "3 BHK", "boundingBoxLTRB": "0,0,0.5,0.5" },
                { "bhkType": "4 BHK", "boundingBoxLTRB": "Not Present", "pageNumber": 0 },
                { "bhkType": "5 BHK", "boundingBoxLTRB": "0,0,0.5,0.5", "pageNumber": "" },
            ],
        }));
        let proc = processor(&result, dir.path());
        let mut pages = BTreeMap::new();
        pages.insert(0, page(100, 100));

        proc.extract_floorplans(&pages);
        assert!(!dir.path().join("images/floorplan").exists());
    }

    #[test]
    fn floorplan_collision_gets_numeric_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionResult::new(json!({
            "floorplanConfigs": [
                { "bhkType": "2 BHK", "boundingBoxLTRB": "0,0,0.5,0.5", "pageNumber": 0 },
                { "bhkType": "2 BHK", "boundingBoxLTRB": "0.5,0.5,1,1", "pageNumber": 0 },
            ],
        }));
        let proc = processor(&result, dir.path());
        let mut pages = BTreeMap::new();
        pages.insert(0, page(200, 200));

        proc.extract_floorplans(&pages);
        let floorplans = dir.path().join("images/floorplan");
        assert!(floorplans.join("2BHK.jpg").exists());
        assert!(floorplans.join("2BHK_1.jpg").exists());
    }

    #[test]
    fn floorplan_label_sanitizes_spaces_and_plus() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionResult::new(json!({
            "floorplanConfigs": [
                { "bhkType": "3 BHK + Study", "boundingBoxLTRB": "0,0,1,1", "pageNumber": 0 },
            ],
        }));
        let proc = processor(&result, dir.path());
        let mut pages = BTreeMap::new();
        pages.insert(0, page(64, 64));

        proc.extract_floorplans(&pages);
        assert!(dir.path().join("images/floorplan/3BHK_Study.jpg").exists());
    }

    #[test]
    fn hd_gate_admits_1280x720_and_rejects_one_pixel_less() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionResult::new(json!({
            "amenitiesImages": [
                { "amenityLabel": "Swimming Pool", "boundingBoxLTRB": "0,0,1,1", "pageNumber": 0 },
                { "amenityLabel": "Gym & Spa", "boundingBoxLTRB": "0,0,1,1", "pageNumber": 1 },
            ],
        }));
        let proc = processor(&result, dir.path());
        let mut pages = BTreeMap::new();
        pages.insert(0, page(1280, 720));
        pages.insert(1, page(1279, 720));

        proc.extract_amenities(&pages);
        let amenities = dir.path().join("images/amenities");
        assert!(amenities.join("Swimming_Pool.jpg").exists());
        assert!(!amenities.join("Gym_and_Spa.jpg").exists());
    }

    #[test]
    fn amenity_names_overwrite_rather_than_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionResult::new(json!({
            "amenitiesImages": [
                { "amenityLabel": "Swimming Pool", "boundingBoxLTRB": "0,0,1,1", "pageNumber": 0 },
                { "amenityLabel": "Swimming Pool", "boundingBoxLTRB": "0,0,1,1", "pageNumber": 0 },
            ],
        }));
        let proc = processor(&result, dir.path());
        let mut pages = BTreeMap::new();
        pages.insert(0, page(1280, 720));

        proc.extract_amenities(&pages);
        let amenities: Vec<_> = fs::read_dir(dir.path().join("images/amenities"))
            .unwrap()
            .collect();
        assert_eq!(amenities.len(), 1);
    }

    #[test]
    fn reversed_bbox_fails_at_save_and_run_continues() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionResult::new(json!({
            "floorplanConfigs": [
                { "bhkType": "2 BHK", "boundingBoxLTRB": "0.9, 0.9, 0.1, 0.1", "pageNumber": 0 },
                { "bhkType": "3 BHK", "boundingBoxLTRB": "0, 0, 0.5, 0.5", "pageNumber": 0 },
            ],
        }));
        let proc = processor(&result, dir.path());
        let mut pages = BTreeMap::new();
        pages.insert(0, page(100, 100));

        proc.extract_floorplans(&pages);
        let floorplans = dir.path().join("images/floorplan");
        assert!(!floorplans.join("2BHK.jpg").exists());
        assert!(floorplans.join("3BHK.jpg").exists());
    }

    #[test]
    fn fixed_name_categories_overwrite_on_reprocessing() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionResult::new(json!({
            "masterplanImage": { "boundingBoxLTRB": "0,0,1,1", "pageNumber": 0 },
        }));
        let proc = processor(&result, dir.path());
        let mut pages = BTreeMap::new();
        pages.insert(0, page(80, 80));

        proc.extract_masterplan(&pages);
        proc.extract_masterplan(&pages);
        let masterplans: Vec<_> = fs::read_dir(dir.path().join("images/masterplan"))
            .unwrap()
            .collect();
        assert_eq!(masterplans.len(), 1);
    }

    #[test]
    fn crop_maps_fractions_to_pixels() {
        let img = page(200, 100);
        let cropped = crop_region(&img, "0.25, 0.5, 0.75, 1.0").unwrap();
        assert_eq!((cropped.width(), cropped.height()), (100, 50));
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("Kids' Play/Area!.jpg"), "Kids__Play_Area_.jpg");
        assert_eq!(sanitize_filename("logo-v2.final.jpg"), "logo-v2.final.jpg");
    }

    #[test]
    fn cleaned_json_written_to_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionResult::new(json!({
            "projectName": "Green Acres",
            "masterplanImage": { "boundingBoxLTRB": "0,0,1,1", "pageNumber": 3 },
        }));
        let proc = processor(&result, dir.path());
        proc.save_cleaned_json().unwrap();

        let raw = fs::read_to_string(dir.path().join(CLEANED_JSON_NAME)).unwrap();
        let cleaned: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(cleaned["projectName"], "Green Acres");
        assert!(cleaned.get("masterplanImage").is_none());
    }
}
