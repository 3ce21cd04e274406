use serde::{Deserialize, Serialize};

/// Direction in which the texture of a part has to run, relative to the long axis of the sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grain {
    /// The length of the part must follow the length of the sheet
    Length,
    /// The width of the part must follow the length of the sheet
    Width,
    /// No requirement, the part may be placed in either orientation
    #[default]
    None,
}

/// Which edges of a part receive edge banding.
/// The two length edges run along the part's length, the two width edges along its width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgeBanding {
    pub length_1: bool,
    pub length_2: bool,
    pub width_1: bool,
    pub width_2: bool,
}

impl EdgeBanding {
    /// Total length of banding tape needed for a single part of `length` x `width`.
    pub fn banded_length(&self, length: f64, width: f64) -> f64 {
        let n_length_edges = self.length_1 as u8 + self.length_2 as u8;
        let n_width_edges = self.width_1 as u8 + self.width_2 as u8;
        n_length_edges as f64 * length + n_width_edges as f64 * width
    }
}

/// Entry of a cutting list: a rectangular panel to be produced `quantity` times.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartSpec {
    /// Unique identifier of the part specification
    pub id: String,
    /// Identifier of the cutting list item (e.g. the cabinet) this part belongs to
    pub item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub material_type: String,
    /// Thickness of the material in mm
    pub thickness: f64,
    /// Dimension along the grain-length axis of the part, in mm
    pub length: f64,
    /// Dimension perpendicular to the length, in mm
    pub width: f64,
    #[serde(default)]
    pub grain: Grain,
    #[serde(default)]
    pub edge_banding: EdgeBanding,
    #[serde(default = "default_quantity")]
    pub quantity: usize,
}

fn default_quantity() -> usize {
    1
}

impl PartSpec {
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Both dimensions are finite and strictly positive.
    pub fn has_valid_dimensions(&self) -> bool {
        self.length.is_finite() && self.width.is_finite() && self.length > 0.0 && self.width > 0.0
    }

    /// Expands the specification into one [`PartInstance`] per unit of quantity.
    pub fn instances(&self) -> impl Iterator<Item = PartInstance<'_>> {
        (1..=self.quantity).map(move |ordinal| PartInstance {
            spec: self,
            ordinal,
        })
    }
}

/// A single physical copy of a [`PartSpec`].
#[derive(Clone, Copy, Debug)]
pub struct PartInstance<'a> {
    pub spec: &'a PartSpec,
    /// 1-based index of this copy among the copies of its specification
    pub ordinal: usize,
}

impl PartInstance<'_> {
    pub fn instance_id(&self) -> String {
        format!("{}#{}", self.spec.id, self.ordinal)
    }

    pub fn length(&self) -> f64 {
        self.spec.length
    }

    pub fn width(&self) -> f64 {
        self.spec.width
    }

    pub fn grain(&self) -> Grain {
        self.spec.grain
    }

    pub fn area(&self) -> f64 {
        self.spec.area()
    }
}
