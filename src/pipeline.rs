// Per-image processing: find regions, recolor, paint the largest region, report.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::errors::{CamPaintError, Result};
use crate::image_io::{save_image, InputImage};
use crate::image_utils::{blank_canvas, paint_region, resize_image};
use crate::region::RegionFinder;

/// Background of the saved painting
const PAINTING_BACKGROUND: [u8; 3] = [255, 255, 255];
/// Bounding boxes in the debug overlay
const DEBUG_BOX_COLOR: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Resolve the batch target color, which must be configured up front
/// (the GUI picks one interactively instead)
fn batch_target_color(config: &Config) -> Result<Rgba<u8>> {
    match config.target_color_rgb {
        Some([r, g, b]) => Ok(Rgba([r, g, b, 255])),
        None => Err(CamPaintError::Config(
            "target_color_rgb must be set for batch processing (or pass --target)".to_string(),
        )),
    }
}

/// Process a single image: grow regions around the configured target
/// color, save the recolored view and the painted largest region, and
/// write the per-region CSV report.
pub fn process_image(input_image: InputImage, config: &Config, debug: bool) -> Result<()> {
    let InputImage { image, path: _, filename } = input_image;

    let target_color = batch_target_color(config)?;

    // Step 1: Resize if configured
    let processed_image = if let Some(dimensions) = config.resize_dimensions {
        resize_image(&image, dimensions)
    } else {
        image
    };
    let (width, height) = processed_image.dimensions();

    // Step 2: Grow regions around the target color
    let mut finder = RegionFinder::with_thresholds(config.max_color_diff, config.min_region_size);
    finder.set_image(processed_image);
    finder.find_regions(target_color);
    println!(
        "{}: {} regions larger than {} pixels",
        filename,
        finder.regions().len(),
        config.min_region_size
    );

    // Step 3: Recolor the regions and save the visualization
    let mut rng = match config.recolor_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    finder.recolor_image(&mut rng);

    let output_base = Path::new(&config.output_base_dir);
    if let Some(recolored) = finder.recolored_image() {
        let recolored_path = output_base.join("recolored").join(format!("{}.png", filename));
        save_image(recolored, &recolored_path)?;
    }

    // Step 4: Paint the largest region onto a blank canvas (the brush stroke)
    match finder.largest_region() {
        Some(largest) => {
            println!(
                "  largest region: {} pixels, centroid ({:.1}, {:.1})",
                largest.len(),
                largest.centroid().0,
                largest.centroid().1
            );
            let mut painting = blank_canvas(width, height, PAINTING_BACKGROUND);
            paint_region(&mut painting, largest, config.paint_color_rgb);
            let painting_path = output_base.join("painting").join(format!("{}.png", filename));
            save_image(&painting, &painting_path)?;
        }
        None => {
            println!("  no regions to paint for {}", filename);
        }
    }

    // Step 5: Per-region report
    crate::output::write_regions_csv(finder.regions(), output_base, &filename)?;

    // Step 6: Debug overlay with each region's bounding box
    if debug {
        if let Some(image) = finder.image() {
            let overlay = draw_region_boxes(image, &finder);
            let debug_path = output_base.join("debug").join(format!("{}_regions.png", filename));
            save_image(&overlay, &debug_path)?;
        }
    }

    Ok(())
}

/// Copy the source image and outline every region's bounding box
fn draw_region_boxes(image: &RgbaImage, finder: &RegionFinder) -> RgbaImage {
    let mut overlay = image.clone();
    for region in finder.regions() {
        let (min_x, min_y, max_x, max_y) = region.bounding_box();
        let rect = Rect::at(min_x as i32, min_y as i32)
            .of_size(max_x - min_x + 1, max_y - min_y + 1);
        draw_hollow_rect_mut(&mut overlay, rect, DEBUG_BOX_COLOR);
    }
    overlay
}
