use serde::{Deserialize, Serialize};

use crate::entities::{PlacedPart, SheetSize};
use crate::opt::strategy::StrategyKind;

/// Outcome of nesting a single (material type, thickness) group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NestingResult {
    pub sheet_size: SheetSize,
    pub material_type: String,
    pub thickness: f64,
    /// Strategy that produced this layout
    pub strategy: StrategyKind,
    /// Placed parts in order of placement
    pub parts: Vec<PlacedPart>,
    /// Efficiency in percent as reported by the strategy
    pub efficiency: f64,
    /// Used area divided by total area in percent, without any strategy adjustment
    pub raw_efficiency: f64,
    /// Sum of the areas of all placed parts
    pub used_area: f64,
    pub waste_area: f64,
    /// Sheet area multiplied by the number of sheets
    pub total_area: f64,
    pub sheet_count: usize,
    /// Instances which could not be placed on an empty sheet in any permitted orientation
    pub unplaced: Vec<UnplacedPart>,
    /// Total length of edge banding over all placed parts, in mm
    pub edge_banding_length: f64,
}

impl NestingResult {
    pub fn placed_count(&self) -> usize {
        self.parts.len()
    }

    pub fn all_placed(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Parts placed on the sheet with the given index
    pub fn parts_on_sheet(&self, sheet_index: usize) -> impl Iterator<Item = &PlacedPart> {
        self.parts
            .iter()
            .filter(move |p| p.sheet_index == sheet_index)
    }
}

/// An instance that did not fit on a fresh sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnplacedPart {
    pub instance_id: String,
    pub spec_id: String,
    pub length: f64,
    pub width: f64,
}

/// Diagnostics raised during a nesting run. None of them abort the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NestingWarning {
    /// The requested strategy name was not recognized, the default strategy was used instead
    #[serde(rename_all = "camelCase")]
    UnknownStrategy { requested: String, used: StrategyKind },
    /// A part exceeds the sheet in every permitted orientation
    #[serde(rename_all = "camelCase")]
    PartTooLargeForSheet {
        material_type: String,
        thickness: f64,
        spec_id: String,
        instance_id: String,
        length: f64,
        width: f64,
        sheet_size: SheetSize,
    },
    /// The sheet has a non-positive or non-finite dimension, nothing was nested
    #[serde(rename_all = "camelCase")]
    InvalidSheetSize { sheet_size: SheetSize },
    /// A part has a non-positive or non-finite dimension and was skipped
    #[serde(rename_all = "camelCase")]
    InvalidPartDimensions {
        spec_id: String,
        length: f64,
        width: f64,
    },
}

/// Everything produced by a single call to the optimizer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NestingOutput {
    /// One result per (material type, thickness) group, in order of first appearance
    pub results: Vec<NestingResult>,
    pub warnings: Vec<NestingWarning>,
}

impl NestingOutput {
    pub fn total_sheet_count(&self) -> usize {
        self.results.iter().map(|r| r.sheet_count).sum()
    }

    pub fn unplaced_count(&self) -> usize {
        self.results.iter().map(|r| r.unplaced.len()).sum()
    }
}
