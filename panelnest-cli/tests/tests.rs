#[cfg(test)]
mod tests {
    use std::path::Path;

    use panelnest::NestingOptimizer;
    use panelnest::entities::NestingWarning;
    use panelnest::opt::strategy::StrategyKind;
    use panelnest::util::assertions;
    use panelnest_cli::config::CliConfig;
    use panelnest_cli::io;
    use panelnest_cli::io::layout_to_svg::sheet_to_svg;
    use panelnest_cli::io::output::NestingOutputFile;
    use test_case::test_case;

    fn init_logger() {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .is_test(true)
            .try_init();
    }

    #[test_case("assets/mixed_grain.json"; "mixed_grain")]
    #[test_case("assets/kitchen.json"; "kitchen")]
    #[test_case("assets/wardrobe.json"; "wardrobe")]
    fn test_instance(instance_path: &str) {
        init_logger();
        let instance = io::read_instance(Path::new(instance_path)).unwrap();
        let config: CliConfig = io::read_json(Path::new("assets/config.json")).unwrap();

        for strategy in StrategyKind::ALL {
            let mut nest_config = config.nest.clone();
            nest_config.strategy = strategy.name().to_string();

            let output = NestingOptimizer::from_config(nest_config).optimize(&instance.parts);
            for result in &output.results {
                assert!(assertions::result_is_consistent(result));
                for sheet_idx in 0..result.sheet_count {
                    let svg = sheet_to_svg(result, sheet_idx, config.svg_draw_options);
                    assert!(svg.to_string().contains(&format!("sheet_{sheet_idx}")));
                }
            }
        }
    }

    #[test]
    fn wardrobe_reports_oversized_panel() {
        let instance = io::read_instance(Path::new("assets/wardrobe.json")).unwrap();
        let output = NestingOptimizer::from_config(CliConfig::default().nest).optimize(&instance.parts);

        let chipboard = &output.results[0];
        assert_eq!(chipboard.material_type, "chipboard");
        assert_eq!(chipboard.unplaced.len(), 1);
        assert_eq!(chipboard.unplaced[0].instance_id, "mirror-panel#1");
        assert!(matches!(
            &output.warnings[..],
            [NestingWarning::PartTooLargeForSheet { spec_id, .. }] if spec_id == "mirror-panel"
        ));
    }

    #[test]
    fn output_file_contains_instance_and_results() {
        let instance = io::read_instance(Path::new("assets/mixed_grain.json")).unwrap();
        let config = CliConfig::default();
        let output = NestingOptimizer::from_config(config.nest.clone()).optimize(&instance.parts);

        let file = NestingOutputFile {
            instance,
            config,
            run_time_sec: 0.0,
            output,
        };
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["name"], "mixed_grain");
        assert_eq!(json["parts"].as_array().unwrap().len(), 2);
        assert_eq!(json["config"]["strategy"], "rectangle");
        assert_eq!(json["results"][0]["sheetCount"], 1);
        assert_eq!(json["results"][0]["strategy"], "rectangle");
        assert!(json["warnings"].as_array().unwrap().is_empty());

        let parsed: NestingOutputFile = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.output, file.output);
    }
}
