use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Normalized `[x1, y1, x2, y2]` box, `0.0` at the top-left of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

pub const FULL_FRAME: BoundingBox = BoundingBox {
    x1: 0.0,
    y1: 0.0,
    x2: 1.0,
    y2: 1.0,
};

impl BoundingBox {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Anything other than four finite coordinates collapses to the full frame.
    pub fn from_coords(coords: &[f64]) -> Self {
        match *coords {
            [x1, y1, x2, y2] if coords.iter().all(|value| value.is_finite()) => {
                Self::new(x1, y1, x2, y2)
            }
            _ => FULL_FRAME,
        }
    }

    pub fn y_center(&self) -> f64 {
        (self.y1 + self.y2) / 2.0
    }

    pub fn x_center(&self) -> f64 {
        (self.x1 + self.x2) / 2.0
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        FULL_FRAME
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x1, self.y1, self.x2, self.y2].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
        let coords = raw
            .as_ref()
            .and_then(serde_json::Value::as_array)
            .and_then(|values| {
                values
                    .iter()
                    .map(serde_json::Value::as_f64)
                    .collect::<Option<Vec<f64>>>()
            });
        Ok(coords
            .map(|coords| BoundingBox::from_coords(&coords))
            .unwrap_or(FULL_FRAME))
    }
}

/// One damage region reported by the upstream vision model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageDetection {
    #[serde(alias = "type")]
    pub label: String,
    pub confidence: f64,
    #[serde(rename = "box", default)]
    pub bbox: BoundingBox,
}

impl DamageDetection {
    pub fn new(label: impl Into<String>, confidence: f64, bbox: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bbox,
        }
    }

    pub fn without_box(label: impl Into<String>, confidence: f64) -> Self {
        Self::new(label, confidence, FULL_FRAME)
    }
}

/// Keeps detections scoring strictly above `floor`, preserving order.
pub fn retain_confident(detections: &[DamageDetection], floor: f64) -> Vec<DamageDetection> {
    detections
        .iter()
        .filter(|detection| detection.confidence > floor)
        .cloned()
        .collect()
}
