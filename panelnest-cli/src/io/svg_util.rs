use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Context, ensure};
use panelnest::geometry::Rect;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::path::Data;
use svg::node::element::{Line, Path, Pattern, Rectangle};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
#[serde(default)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    pub theme: SvgThemes,
    ///Draw hatched lines in the direction of the grain on every part that has one
    pub draw_grain: bool,
    ///Fill parts placed against their grain with the highlight color
    pub highlight_grain_violations: bool,
    ///Draw the edges of every part that receive edge banding in a heavier stroke
    pub draw_edge_banding: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgThemes::default(),
            draw_grain: true,
            highlight_grain_violations: true,
            draw_edge_banding: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SvgThemes {
    #[default]
    EarthTones,
    Gray,
}

impl SvgThemes {
    pub fn theme(&self) -> SvgLayoutTheme {
        match self {
            SvgThemes::EarthTones => SvgLayoutTheme::EARTH_TONES,
            SvgThemes::Gray => SvgLayoutTheme::GRAY,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f64,
    pub sheet_fill: Color,
    pub part_fill: Color,
    pub grain_stroke: Color,
    pub violation_highlight_color: Color,
    pub banding_stroke: Color,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::EARTH_TONES
    }
}

impl SvgLayoutTheme {
    pub const EARTH_TONES: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        sheet_fill: Color(0xCC, 0x82, 0x4A),
        part_fill: Color(0xFF, 0xC8, 0x79),
        grain_stroke: Color(0x8B, 0x5A, 0x2B),
        violation_highlight_color: Color(0xFF, 0x00, 0x00), // RED
        banding_stroke: Color(0x2D, 0x2D, 0x2D),
    };

    pub const GRAY: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.5,
        sheet_fill: Color(0xD3, 0xD3, 0xD3),
        part_fill: Color(0x7A, 0x7A, 0x7A),
        grain_stroke: Color(0x3C, 0x3C, 0x3C),
        violation_highlight_color: Color(0xD0, 0x00, 0x00),
        banding_stroke: Color(0x00, 0x00, 0x00),
    };
}

pub fn change_brightness(color: Color, fraction: f64) -> Color {
    let Color(r, g, b) = color;

    let r = (r as f64 * fraction) as u8;
    let g = (g as f64 * fraction) as u8;
    let b = (b as f64 * fraction) as u8;
    Color(r, g, b)
}

pub fn blend_colors(color_1: Color, color_2: Color) -> Color {
    //blend color_1 and color_2
    let Color(r_1, g_1, b_1) = color_1;
    let Color(r_2, g_2, b_2) = color_2;

    let r = ((r_1 as f64 * 0.5) + (r_2 as f64 * 0.5)) as u8;
    let g = ((g_1 as f64 * 0.5) + (g_2 as f64 * 0.5)) as u8;
    let b = ((b_1 as f64 * 0.5) + (b_2 as f64 * 0.5)) as u8;

    Color(r, g, b)
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        ensure!(
            hex.len() == 6 && hex.is_ascii(),
            "invalid color: {s:?}, expected #RRGGBB"
        );
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).with_context(|| format!("invalid color: {s:?}"))
        };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub fn rect_data(rect: &Rect) -> Data {
    Data::new()
        .move_to((rect.x, rect.y))
        .line_to((rect.x_max(), rect.y))
        .line_to((rect.x_max(), rect.y_max()))
        .line_to((rect.x, rect.y_max()))
        .close()
}

pub fn edge_data(start: (f64, f64), end: (f64, f64)) -> Data {
    Data::new().move_to(start).line_to(end)
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

/// Pattern of parallel lines, `horizontal` lines follow the x-axis of the sheet
pub fn grain_pattern(
    id: &str,
    background: Color,
    line_color: Color,
    distance: f64,
    width: f64,
    horizontal: bool,
) -> Pattern {
    let rotation = match horizontal {
        true => 90,
        false => 0,
    };
    Pattern::new()
        .set("id", id)
        .set("width", distance)
        .set("height", distance)
        .set("patternTransform", format!("rotate({rotation} 0 0)"))
        .set("patternUnits", "userSpaceOnUse")
        .add(
            Rectangle::new()
                .set("width", distance)
                .set("height", distance)
                .set("fill", format!("{background}")),
        )
        .add(
            Line::new()
                .set("x1", 0)
                .set("y1", 0)
                .set("x2", 0)
                .set("y2", distance)
                .set("style", format!("stroke:{line_color}; stroke-width:{width}")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parses_and_displays() {
        let color: Color = "#cc824a".parse().unwrap();
        assert_eq!(color, Color(0xCC, 0x82, 0x4A));
        assert_eq!(color.to_string(), "#CC824A");
        assert!("#12345".parse::<Color>().is_err());
        assert!("#GG0000".parse::<Color>().is_err());
    }

    #[test]
    fn blending_averages_channels() {
        let blended = blend_colors(Color(0xFF, 0x00, 0x80), Color(0x00, 0xFF, 0x80));
        assert_eq!(blended, Color(0x7F, 0x7F, 0x80));
        assert_eq!(change_brightness(Color(0x80, 0x40, 0x20), 0.5), Color(0x40, 0x20, 0x10));
    }
}
