use panelnest::NestConfig;
use serde::{Deserialize, Serialize};

use crate::io::svg_util::SvgDrawOptions;

/// Configuration of a command line run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Sheet size, material filter, strategy and seed, passed on to the optimizer
    #[serde(flatten)]
    pub nest: NestConfig,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelnest::entities::SheetSize;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: CliConfig = serde_json::from_str(r#"{ "strategy": "adaptive" }"#).unwrap();
        assert_eq!(config.nest.strategy, "adaptive");
        assert_eq!(config.nest.sheet_size, SheetSize::STANDARD);
        assert_eq!(config.nest.prng_seed, Some(0));
        assert_eq!(config.svg_draw_options, SvgDrawOptions::default());
    }

    #[test]
    fn parses_full_config() {
        let json = r##"{
            "sheet_size": { "length": 2800, "width": 2070 },
            "material_filter": "oak",
            "strategy": "random-fit",
            "prng_seed": null,
            "svg_draw_options": { "theme": "gray", "highlight_grain_violations": false }
        }"##;
        let config: CliConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.nest.sheet_size.length, 2800.0);
        assert_eq!(config.nest.material_filter.as_deref(), Some("oak"));
        assert_eq!(config.nest.prng_seed, None);
        assert!(!config.svg_draw_options.highlight_grain_violations);
        assert!(config.svg_draw_options.draw_grain);
    }

    #[test]
    fn rejects_degenerate_sheet_size() {
        let json = r#"{ "sheet_size": { "length": 2440, "width": 0 } }"#;
        let err = serde_json::from_str::<CliConfig>(json).unwrap_err();
        assert!(err.to_string().contains("invalid sheet size"));
    }
}
