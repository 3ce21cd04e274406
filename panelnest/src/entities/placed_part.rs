use serde::{Deserialize, Serialize};

use crate::entities::{EdgeBanding, Grain, PartInstance};
use crate::geometry::{Orientation, Rect};

/// A [`PartInstance`] that has been placed on a sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPart {
    pub instance_id: String,
    /// Id of the [`PartSpec`](crate::entities::PartSpec) the instance was expanded from
    pub spec_id: String,
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 0-based index of the sheet within its material group
    pub sheet_index: usize,
    /// Top-left corner, sheet-local
    pub x: f64,
    pub y: f64,
    /// Extent along the length of the sheet, after rotation
    pub length: f64,
    /// Extent along the width of the sheet, after rotation
    pub width: f64,
    pub rotation: Orientation,
    /// Grain requirement of the original specification
    pub grain: Grain,
    /// The orientation does not honor `grain`, it was chosen deliberately to obtain a fit
    pub grain_violated: bool,
    pub edge_banding: EdgeBanding,
}

impl PlacedPart {
    pub fn new(
        instance: &PartInstance,
        sheet_index: usize,
        x: f64,
        y: f64,
        rotation: Orientation,
        grain_violated: bool,
    ) -> Self {
        let spec = instance.spec;
        let (length, width) = rotation.apply(spec.length, spec.width);
        PlacedPart {
            instance_id: instance.instance_id(),
            spec_id: spec.id.clone(),
            item_id: spec.item_id.clone(),
            name: spec.name.clone(),
            sheet_index,
            x,
            y,
            length,
            width,
            rotation,
            grain: spec.grain,
            grain_violated,
            edge_banding: spec.edge_banding,
        }
    }

    /// Footprint of the part on its sheet
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.length, self.width)
    }

    /// Area of the part, independent of its rotation
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Dimensions of the part as specified, before rotation
    pub fn original_dimensions(&self) -> (f64, f64) {
        self.rotation.apply(self.length, self.width)
    }
}
