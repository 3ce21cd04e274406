use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Dimensions of a stock sheet in mm. The length is the axis the grain of the sheet runs along.
/// Deserialization goes through [`SheetSize::try_new`], degenerate sizes are rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExtSheetSize")]
pub struct SheetSize {
    pub length: f64,
    pub width: f64,
}

/// Unvalidated external representation of a [`SheetSize`]
#[derive(Deserialize)]
struct ExtSheetSize {
    length: f64,
    width: f64,
}

impl TryFrom<ExtSheetSize> for SheetSize {
    type Error = anyhow::Error;

    fn try_from(ext: ExtSheetSize) -> Result<Self> {
        SheetSize::try_new(ext.length, ext.width)
    }
}

impl SheetSize {
    /// Standard 2440 x 1220 mm board
    pub const STANDARD: SheetSize = SheetSize {
        length: 2440.0,
        width: 1220.0,
    };

    pub fn try_new(length: f64, width: f64) -> Result<Self> {
        ensure!(
            length.is_finite() && width.is_finite() && length > 0.0 && width > 0.0,
            "invalid sheet size, length: {length}, width: {width}"
        );
        Ok(SheetSize { length, width })
    }

    /// Both dimensions are finite and strictly positive.
    /// Only fails for sizes built without [`SheetSize::try_new`].
    pub fn is_valid(&self) -> bool {
        SheetSize::try_new(self.length, self.width).is_ok()
    }

    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// The full extent of the sheet in sheet-local coordinates
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.length, self.width)
    }
}

impl Default for SheetSize {
    fn default() -> Self {
        SheetSize::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::SheetSize;

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(SheetSize::try_new(2440.0, 0.0).is_err());
        assert!(SheetSize::try_new(-1.0, 1220.0).is_err());
        assert!(SheetSize::try_new(f64::NAN, 1220.0).is_err());
        assert_eq!(
            SheetSize::try_new(2440.0, 1220.0).unwrap(),
            SheetSize::default()
        );
    }

    #[test]
    fn deserialization_rejects_degenerate_sizes() {
        let sheet: SheetSize = serde_json::from_str(r#"{"length": 2800, "width": 2070}"#).unwrap();
        assert_eq!(sheet, SheetSize::try_new(2800.0, 2070.0).unwrap());

        let err = serde_json::from_str::<SheetSize>(r#"{"length": 2440, "width": 0}"#).unwrap_err();
        assert!(err.to_string().contains("invalid sheet size"));
        assert!(serde_json::from_str::<SheetSize>(r#"{"length": -1, "width": 1220}"#).is_err());
        assert!(!SheetSize { length: 2440.0, width: 0.0 }.is_valid());
    }
}
