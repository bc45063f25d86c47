use serde::Deserialize;
use serde_json::Value;

/// Sentinel the extraction service returns for fields it could not find.
/// Consumers must treat it exactly like an absent field.
pub const NOT_PRESENT: &str = "Not Present";

/// Keys that locate an image on a page. Stripped from the cleaned payload.
const REGION_KEYS: [&str; 3] = ["imageId", "boundingBoxLTRB", "pageNumber"];

/// Whole-array image fields dropped from the cleaned payload.
const IMAGE_FIELDS: [&str; 3] = ["amenitiesImages", "masterplanImage", "locationMapImage"];

/// Normalize an optional string field: absent, blank, and the `"Not Present"`
/// sentinel all collapse to `None`. Every optional-field accessor goes
/// through here so no category grows its own variant of the check.
pub fn present(value: Option<&str>) -> Option<&str> {
    let s = value?.trim();
    if s.is_empty() || s == NOT_PRESENT {
        None
    } else {
        Some(s)
    }
}

/// Bounding box + page reference as returned by the service. Both fields are
/// loosely typed: the bbox is a free-form numeric string and the page number
/// may arrive as an integer or a digit string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ImageRegion {
    #[serde(rename = "boundingBoxLTRB")]
    pub bounding_box: Option<Value>,
    #[serde(rename = "pageNumber")]
    pub page_number: Option<Value>,
}

impl ImageRegion {
    /// Raw bounding-box string, if present and not the sentinel.
    pub fn bbox(&self) -> Option<&str> {
        present(self.bounding_box.as_ref()?.as_str())
    }

    /// Zero-based page index, if it parses as a non-negative integer.
    pub fn page(&self) -> Option<u16> {
        match self.page_number.as_ref()? {
            Value::Number(n) => n.as_u64().and_then(|p| u16::try_from(p).ok()),
            Value::String(s) => {
                let s = s.trim();
                if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
                    s.parse().ok()
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// A region is usable only when both the bbox and the page are valid.
    pub fn is_usable(&self) -> bool {
        self.bbox().is_some() && self.page().is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FloorplanConfig {
    #[serde(rename = "bhkType")]
    pub bhk_type: Option<String>,
    #[serde(flatten)]
    pub region: ImageRegion,
}

impl FloorplanConfig {
    pub fn label(&self) -> &str {
        present(self.bhk_type.as_deref()).unwrap_or("Unit")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AmenityImage {
    #[serde(rename = "amenityLabel")]
    pub amenity_label: Option<String>,
    #[serde(flatten)]
    pub region: ImageRegion,
}

impl AmenityImage {
    pub fn label(&self) -> &str {
        present(self.amenity_label.as_deref()).unwrap_or("Amenity")
    }
}

/// Structured payload for one document. The raw JSON is kept as-is so the
/// cleaned copy retains every field the schema may grow; the typed views
/// above are deserialized on demand from the region-bearing parts.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    raw: Value,
}

impl ExtractionResult {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn floorplan_configs(&self) -> Vec<FloorplanConfig> {
        self.typed_array("floorplanConfigs")
    }

    pub fn amenity_images(&self) -> Vec<AmenityImage> {
        self.typed_array("amenitiesImages")
    }

    pub fn masterplan(&self) -> Option<ImageRegion> {
        self.region_at("masterplanImage")
    }

    pub fn location_map(&self) -> Option<ImageRegion> {
        self.region_at("locationMapImage")
    }

    pub fn builder_logo(&self) -> Option<ImageRegion> {
        self.region_at("builder")
    }

    fn typed_array<T: serde::de::DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.raw
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Region fields may hold an object, the sentinel string, or nothing.
    /// Only an object yields a region; everything else is absent.
    fn region_at(&self, key: &str) -> Option<ImageRegion> {
        let value = self.raw.get(key)?;
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Payload with all image-location fields stripped: the whole-array image
    /// fields go away entirely; floorplan configs and the builder object keep
    /// their descriptive fields but lose the region keys.
    pub fn cleaned(&self) -> Value {
        let mut cleaned = self.raw.clone();

        if let Some(map) = cleaned.as_object_mut() {
            for field in IMAGE_FIELDS {
                map.remove(field);
            }
        }

        if let Some(configs) = cleaned
            .get_mut("floorplanConfigs")
            .and_then(Value::as_array_mut)
        {
            for config in configs.iter_mut().filter_map(Value::as_object_mut) {
                for key in REGION_KEYS {
                    config.remove(key);
                }
            }
        }

        if let Some(builder) = cleaned.get_mut("builder").and_then(Value::as_object_mut) {
            for key in REGION_KEYS {
                builder.remove(key);
            }
        }

        cleaned
    }
}

// ── Tests ──
