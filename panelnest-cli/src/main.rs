use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use panelnest::NestingOptimizer;
use panelnest_cli::config::CliConfig;
use panelnest_cli::io::cli::Cli;
use panelnest_cli::io::layout_to_svg::sheet_to_svg;
use panelnest_cli::io::output::NestingOutputFile;
use panelnest_cli::{EPOCH, io};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let mut config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            CliConfig::default()
        }
        Some(config_file) => io::read_json(&config_file).context("incorrect config file format")?,
    };
    if let Some(strategy) = args.strategy {
        config.nest.strategy = strategy;
    }

    info!("[MAIN] Successfully parsed config: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid file name")?
        .to_owned();

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    let instance = io::read_instance(&args.input_file)?;
    info!(
        "[MAIN] Read instance {:?} with {} part specification(s)",
        instance.name,
        instance.parts.len()
    );

    let output = NestingOptimizer::from_config(config.nest.clone()).optimize(&instance.parts);

    info!(
        "[MAIN] Nested onto {} sheet(s) in total, {} instance(s) unplaced, {} warning(s)",
        output.total_sheet_count(),
        output.unplaced_count(),
        output.warnings.len()
    );

    if !args.no_svg {
        for (group_idx, result) in output.results.iter().enumerate() {
            for sheet_idx in 0..result.sheet_count {
                let svg_path = args
                    .solution_folder
                    .join(format!("sol_{input_stem}_{group_idx}_{sheet_idx}.svg"));
                let svg = sheet_to_svg(result, sheet_idx, config.svg_draw_options);

                io::write_svg(&svg, Path::new(&svg_path))?;
            }
        }
    }

    {
        let output_file = NestingOutputFile {
            instance,
            config,
            run_time_sec: EPOCH.elapsed().as_secs_f64(),
            output,
        };

        let solution_path = args.solution_folder.join(format!("sol_{input_stem}.json"));

        io::write_json(&output_file, Path::new(&solution_path))?;
    }

    Ok(())
}
