use std::fs;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};

use spatia_cli::config::SpatialConfig;
use spatia_cli::io;
use spatia_cli::io::cli::Cli;
use spatia_cli::io::svg_export::shapes_to_svg;
use spatia_cli::relate::RelationRun;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config: SpatialConfig = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            SpatialConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("[MAIN] Successfully parsed SpatialConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|s| s.to_str())
        .context("input file has no valid name")?;

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!(
                "could not create output folder: {}",
                args.output_folder.display()
            )
        })?;
    }

    let ext_instance = io::read_json_instance(args.input_file.as_path())?;
    let run = RelationRun::new(&ext_instance, &config)?;

    for (relation, count) in run.histogram() {
        info!("[MAIN] {relation:?}: {count}");
    }

    {
        let output = run.output(ext_instance, config);
        let output_path = args
            .output_folder
            .join(format!("{input_file_stem}_relations.json"));
        io::write_json(&output, &output_path)?;
    }

    if let Some(svg_draw_options) = config.svg_draw_options {
        let svg_path = args.output_folder.join(format!("{input_file_stem}.svg"));
        let svg = shapes_to_svg(&run.instance.shapes, &run.ctx, svg_draw_options);
        io::write_svg(&svg, &svg_path)?;
    }

    Ok(())
}
