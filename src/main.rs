mod color;
mod config;
mod errors;
mod gui;
mod image_io;
mod image_utils;
mod output;
mod pipeline;
mod region;

use std::path::PathBuf;
use std::time::Instant;
use clap::Parser;
use rayon::prelude::*;

use color::parse_hex_color;
use config::Config;
use errors::{CamPaintError, Result};
use image_io::{get_image_files_in_dir, load_image};
use pipeline::process_image;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(author, version, about = "CamPaintR - Color Region Finder and Painter")]
struct Args {
    /// Path to input file or directory
    #[clap(short, long)]
    input: Option<String>,

    /// Path to output directory
    #[clap(short, long)]
    output: Option<String>,

    /// Path to configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: String,

    /// Target color as hex, e.g. "#1e90ff" (overwrites config)
    #[clap(short, long)]
    target: Option<String>,

    /// Enable debug mode (save region bounding-box overlays)
    #[clap(short, long)]
    debug: bool,

    /// Launch the interactive GUI
    #[clap(long)]
    gui: bool,
}

/// Main function
fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::from_file(&args.config)?;

    // Override config with command-line arguments
    if let Some(input) = args.input.clone() {
        config.input_path = input;
    }

    if let Some(output) = args.output.clone() {
        config.output_base_dir = output;
    }

    if let Some(target) = args.target.as_deref() {
        let color = parse_hex_color(target)?;
        config.target_color_rgb = Some([color[0], color[1], color[2]]);
    }

    // Check if GUI mode is enabled
    if args.gui {
        // For GUI mode, we need a single input file
        let input_path = PathBuf::from(&config.input_path);

        if input_path.is_file() {
            println!("Launching GUI mode with image: {}", input_path.display());
            return gui::run_gui(input_path, config);
        } else {
            return Err(CamPaintError::Config(
                "GUI mode requires a single input file, not a directory".to_string(),
            ));
        }
    }

    // Validate configuration
    config.validate()?;

    // Start timing
    let start_time = Instant::now();

    // Process input
    let input_path = PathBuf::from(&config.input_path);

    if input_path.is_file() {
        // Process single file
        println!("Processing single file: {}", input_path.display());
        let input_image = load_image(&input_path)?;
        process_image(input_image, &config, args.debug)?;
    } else if input_path.is_dir() {
        // Process all image files in directory
        println!("Processing directory: {}", input_path.display());
        let image_files = get_image_files_in_dir(&input_path)?;

        println!("Found {} image files", image_files.len());

        if config.use_parallel {
            // Process files in parallel
            image_files.par_iter()
                .map(|path| {
                    println!("Processing: {}", path.display());
                    match load_image(path) {
                        Ok(input_image) => process_image(input_image, &config, args.debug),
                        Err(e) => {
                            eprintln!("Error loading {}: {}", path.display(), e);
                            Err(e)
                        }
                    }
                })
                .collect::<Vec<_>>();
        } else {
            // Process files sequentially
            for path in &image_files {
                println!("Processing: {}", path.display());
                let input_image = load_image(path)?;
                process_image(input_image, &config, args.debug)?;
            }
        }
    } else {
        return Err(CamPaintError::InvalidPath(input_path));
    }

    // Report elapsed time
    let elapsed = start_time.elapsed();
    println!("Processing completed in {:.2} seconds", elapsed.as_secs_f64());

    Ok(())
}
