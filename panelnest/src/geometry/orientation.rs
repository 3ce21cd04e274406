use serde::{Deserialize, Serialize};

/// Orientation of a part on a sheet.
/// A [`Orientation::Rotated`] part has been turned 90 degrees: its length runs along the width of the sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Orientation {
    Normal,
    Rotated,
}

impl Orientation {
    pub fn is_rotated(self) -> bool {
        self == Orientation::Rotated
    }

    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Normal => 0,
            Orientation::Rotated => 90,
        }
    }

    /// Returns the footprint (extent along the sheet length, extent along the sheet width)
    /// of a part with the given dimensions in this orientation.
    pub fn apply(self, length: f64, width: f64) -> (f64, f64) {
        match self {
            Orientation::Normal => (length, width),
            Orientation::Rotated => (width, length),
        }
    }
}

impl From<Orientation> for u16 {
    fn from(o: Orientation) -> u16 {
        o.degrees()
    }
}

impl TryFrom<u16> for Orientation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Orientation::Normal),
            90 => Ok(Orientation::Rotated),
            d => Err(format!("unsupported rotation: {d} degrees, expected 0 or 90")),
        }
    }
}
