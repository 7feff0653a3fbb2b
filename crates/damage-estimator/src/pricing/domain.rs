use serde::{Deserialize, Serialize};

pub const REPORT_CURRENCY: &str = "TL";
pub const REPORT_CONFIDENCE: f64 = 0.85;

pub const FALLBACK_PART_NAME: &str = "General bodywork";
pub const FALLBACK_DESCRIPTION: &str = "Minor defect / detailed inspection required";
pub const FALLBACK_COST: u32 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepairType {
    Replace,
    Paint,
    Correction,
    /// Reserved: no rule currently produces it.
    Repair,
    InspectionRequired,
}

impl RepairType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Replace => "Replace",
            Self::Paint => "Paint",
            Self::Correction => "Correction",
            Self::Repair => "Repair",
            Self::InspectionRequired => "Inspection Required",
        }
    }

    /// Surface work billed at a fraction of the replacement price.
    pub const fn is_surface_work(self) -> bool {
        matches!(self, Self::Paint | Self::Correction)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub part_name: String,
    pub damage_description: String,
    pub repair_type: RepairType,
    pub cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageReport {
    pub line_items: Vec<LineItem>,
    pub labor_cost: u64,
    pub total_cost: u64,
    pub currency: String,
    pub confidence: f64,
}

impl DamageReport {
    pub fn parts_subtotal(&self) -> u64 {
        self.line_items.iter().map(|item| u64::from(item.cost)).sum()
    }

    /// True when nothing resolved and the generic inspection item was emitted.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self.line_items.as_slice(),
            [item] if item.part_name == FALLBACK_PART_NAME
                && item.repair_type == RepairType::InspectionRequired
        )
    }

    pub fn line_item(&self, part_name: &str) -> Option<&LineItem> {
        self.line_items
            .iter()
            .find(|item| item.part_name == part_name)
    }
}
