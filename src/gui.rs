// Interactive window: click a pixel to choose the target color, then flip
// between the source image, the recolored regions, and the painting built
// from the largest region.

use image::RgbaImage;
use minifb::{Key, Window, WindowOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::errors::{CamPaintError, Result};
use crate::image_io::{load_image, save_image};
use crate::image_utils::{blank_canvas, fill_buffer, paint_region, resize_image};
use crate::region::RegionFinder;

const PAINTING_BACKGROUND: [u8; 3] = [255, 255, 255];

/// What the window is currently showing
#[derive(Clone, Copy, PartialEq, Eq)]
enum DisplayMode {
    Source,
    Recolored,
    Painting,
}

/// GUI application state
struct GuiState {
    config: Config,
    finder: RegionFinder,
    source_image: RgbaImage,
    painting: RgbaImage,
    display_mode: DisplayMode,
    buffer: Vec<u32>,
    rng: StdRng,
    mouse_down: bool,
}

impl GuiState {
    fn new(image: RgbaImage, config: Config) -> Self {
        let (width, height) = image.dimensions();
        let rng = match config.recolor_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut finder = RegionFinder::with_thresholds(config.max_color_diff, config.min_region_size);
        finder.set_image(image.clone());

        Self {
            painting: blank_canvas(width, height, PAINTING_BACKGROUND),
            buffer: vec![0; (width * height) as usize],
            source_image: image,
            display_mode: DisplayMode::Source,
            mouse_down: false,
            config,
            finder,
            rng,
        }
    }

    /// Pick the clicked pixel as the new target color and re-run the
    /// finder, updating the recolored view and stamping the largest
    /// region onto the painting (the brush stroke).
    fn pick_target(&mut self, x: u32, y: u32) {
        let target = *self.source_image.get_pixel(x, y);

        self.finder.find_regions(target);
        self.finder.recolor_image(&mut self.rng);

        match self.finder.largest_region() {
            Some(largest) => {
                println!(
                    "target ({}, {}, {}): {} regions, largest {} pixels",
                    target[0],
                    target[1],
                    target[2],
                    self.finder.regions().len(),
                    largest.len()
                );
            }
            None => {
                println!(
                    "target ({}, {}, {}): no regions larger than {} pixels",
                    target[0], target[1], target[2], self.config.min_region_size
                );
            }
        }

        if let Some(largest) = self.finder.largest_region() {
            paint_region(&mut self.painting, largest, self.config.paint_color_rgb);
        }
    }

    fn clear_painting(&mut self) {
        let (width, height) = self.source_image.dimensions();
        self.painting = blank_canvas(width, height, PAINTING_BACKGROUND);
        println!("painting cleared");
    }

    fn save_recolored(&self, output_dir: &Path) -> Result<()> {
        let recolored = self.finder.recolored_image().ok_or(CamPaintError::NoRecoloredImage)?;
        let path = output_dir.join("recolored.png");
        save_image(recolored, &path)?;
        println!("saved recolored image to {}", path.display());
        Ok(())
    }

    fn save_painting(&self, output_dir: &Path) -> Result<()> {
        let path = output_dir.join("painting.png");
        save_image(&self.painting, &path)?;
        println!("saved painting to {}", path.display());
        Ok(())
    }

    /// Redraw the framebuffer for the current display mode
    fn update_buffer(&mut self) {
        let shown = match self.display_mode {
            DisplayMode::Source => &self.source_image,
            // Until a target is picked there is nothing recolored to show
            DisplayMode::Recolored => self.finder.recolored_image().unwrap_or(&self.source_image),
            DisplayMode::Painting => &self.painting,
        };
        fill_buffer(&mut self.buffer, shown);
    }
}

/// Open the interactive window for a single image.
///
/// Keys: W source view, R recolored view, P painting view, C clear the
/// painting, O save the recolored image, S save the painting, Escape quit.
/// A left click picks the target color under the cursor.
pub fn run_gui(image_path: PathBuf, config: Config) -> Result<()> {
    println!("Starting GUI with image: {}", image_path.display());

    let input_image = load_image(&image_path)?;

    // Prefer the GUI-specific resize when configured
    let display_image = if let Some(dimensions) = config.gui_resize_dimensions {
        resize_image(&input_image.image, dimensions)
    } else if let Some(dimensions) = config.resize_dimensions {
        resize_image(&input_image.image, dimensions)
    } else {
        input_image.image
    };

    let (width, height) = display_image.dimensions();
    println!("Image loaded: {}x{}", width, height);

    let mut window = Window::new(
        "CamPaintR - click a color to track",
        width as usize,
        height as usize,
        WindowOptions {
            resize: false,
            scale: minifb::Scale::X1,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| CamPaintError::Other(format!("Failed to create window: {}", e)))?;

    window.limit_update_rate(Some(Duration::from_millis(50))); // 20 FPS

    let mut state = GuiState::new(display_image, config);
    let output_dir = PathBuf::from(&state.config.output_base_dir);

    println!("Entering main loop");
    while window.is_open() && !window.is_key_down(Key::Escape) {
        // Mouse press picks the target color (edge-triggered)
        let mouse_down_now = window.get_mouse_down(minifb::MouseButton::Left);
        if mouse_down_now && !state.mouse_down {
            if let Some((mx, my)) = window.get_mouse_pos(minifb::MouseMode::Discard) {
                let x = (mx as u32).min(width - 1);
                let y = (my as u32).min(height - 1);
                state.pick_target(x, y);
            }
        }
        state.mouse_down = mouse_down_now;

        // Display mode switches
        if window.is_key_pressed(Key::W, minifb::KeyRepeat::No) {
            state.display_mode = DisplayMode::Source;
        }
        if window.is_key_pressed(Key::R, minifb::KeyRepeat::No) {
            state.display_mode = DisplayMode::Recolored;
        }
        if window.is_key_pressed(Key::P, minifb::KeyRepeat::No) {
            state.display_mode = DisplayMode::Painting;
        }

        // Commands
        if window.is_key_pressed(Key::C, minifb::KeyRepeat::No) {
            state.clear_painting();
        }
        if window.is_key_pressed(Key::O, minifb::KeyRepeat::No) {
            if let Err(e) = state.save_recolored(&output_dir) {
                eprintln!("Error saving recolored image: {}", e);
            }
        }
        if window.is_key_pressed(Key::S, minifb::KeyRepeat::No) {
            if let Err(e) = state.save_painting(&output_dir) {
                eprintln!("Error saving painting: {}", e);
            }
        }

        state.update_buffer();
        window
            .update_with_buffer(&state.buffer, width as usize, height as usize)
            .map_err(|e| CamPaintError::Other(format!("Failed to update window: {}", e)))?;
    }
    println!("GUI closed normally");

    Ok(())
}
