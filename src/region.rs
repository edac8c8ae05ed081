// Region growing: finds and holds regions of color-similar pixels in an image.

use image::{Rgba, RgbaImage};
use rand::Rng;

use crate::color::{colors_match, random_region_color, MAX_COLOR_DIFF};

/// Constants
pub const MIN_REGION: usize = 50; // How many points a region must exceed to be worth keeping

/// A maximal set of 8-connected pixels whose colors are all similar to
/// one target color. Points are stored in the order the traversal
/// reached them; the order carries no meaning beyond reproducibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    points: Vec<(u32, u32)>,
}

impl Region {
    /// Number of pixels in the region
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Member coordinates in traversal order
    #[inline]
    pub fn points(&self) -> &[(u32, u32)] {
        &self.points
    }

    /// Mean point of the region
    pub fn centroid(&self) -> (f64, f64) {
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        for &(x, y) in &self.points {
            sum_x += x as f64;
            sum_y += y as f64;
        }
        let n = self.points.len().max(1) as f64;
        (sum_x / n, sum_y / n)
    }

    /// Axis-aligned bounds as (min_x, min_y, max_x, max_y)
    pub fn bounding_box(&self) -> (u32, u32, u32, u32) {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0;
        let mut max_y = 0;
        for &(x, y) in &self.points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        (min_x, min_y, max_x, max_y)
    }
}

/// Region growing engine. Holds the current source image, the regions
/// found by the last `find_regions` call, and the recolored view.
///
/// All state is owned by the instance; one finder must not be shared
/// across threads during a call (each call owns its marker grid
/// exclusively, and the region set is replaced wholesale).
pub struct RegionFinder {
    image: Option<RgbaImage>,
    recolored_image: Option<RgbaImage>,
    regions: Vec<Region>,
    max_color_diff: i32,
    min_region_size: usize,
}

impl Default for RegionFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionFinder {
    /// Create a finder with the default tolerance and minimum region size
    pub fn new() -> Self {
        Self::with_thresholds(MAX_COLOR_DIFF, MIN_REGION)
    }

    /// Create a finder with explicit thresholds
    pub fn with_thresholds(max_color_diff: i32, min_region_size: usize) -> Self {
        RegionFinder {
            image: None,
            recolored_image: None,
            regions: Vec::new(),
            max_color_diff,
            min_region_size,
        }
    }

    /// Set the image in which to find regions
    pub fn set_image(&mut self, image: RgbaImage) {
        self.image = Some(image);
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn recolored_image(&self) -> Option<&RgbaImage> {
        self.recolored_image.as_ref()
    }

    /// Regions found by the last `find_regions` call, in scan order
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Find all regions of pixels similar to the target color.
    ///
    /// Scans the grid column by column; every unvisited matching pixel
    /// seeds a flood fill over the 8-neighborhood, and the resulting
    /// component is kept iff it is strictly larger than the minimum
    /// region size. The previous region set is replaced. Without an
    /// image this is a no-op that leaves the region set empty.
    pub fn find_regions(&mut self, target_color: Rgba<u8>) {
        self.regions = Vec::new();

        // Can only run if there's an image to loop over
        let image = match &self.image {
            Some(image) => image,
            None => return,
        };

        let (width, height) = image.dimensions();

        // Marker grid, indexed y * width + x. Marks are monotonic: once
        // a pixel is visited it stays visited for the rest of the call.
        let mut visited = vec![false; (width * height) as usize];
        // Pixels waiting to be pulled into the current region
        let mut to_visit: Vec<(u32, u32)> = Vec::new();

        for x in 0..width {
            for y in 0..height {
                let index = (y * width + x) as usize;
                if visited[index] || !colors_match(target_color, *image.get_pixel(x, y), self.max_color_diff) {
                    continue;
                }

                // Start a new region from this seed
                let mut new_region = Vec::new();
                visited[index] = true;
                to_visit.push((x, y));

                while let Some((px, py)) = to_visit.pop() {
                    new_region.push((px, py));

                    // Examine the 8 neighbors, clamped to the image bounds
                    let y_start = py.saturating_sub(1);
                    let y_end = (py + 1).min(height - 1);
                    let x_start = px.saturating_sub(1);
                    let x_end = (px + 1).min(width - 1);

                    for ny in y_start..=y_end {
                        for nx in x_start..=x_end {
                            let neighbor_index = (ny * width + nx) as usize;
                            if !visited[neighbor_index]
                                && colors_match(target_color, *image.get_pixel(nx, ny), self.max_color_diff)
                            {
                                visited[neighbor_index] = true;
                                to_visit.push((nx, ny));
                            }
                        }
                    }
                }

                // Only keep the region if it's big enough; discarded
                // pixels stay marked so they are never counted twice.
                if new_region.len() > self.min_region_size {
                    self.regions.push(Region { points: new_region });
                }
            }
        }
    }

    /// Returns the largest region detected, if any region has been
    /// detected. Ties go to the region encountered first in scan order.
    pub fn largest_region(&self) -> Option<&Region> {
        let mut largest: Option<&Region> = None;
        for region in &self.regions {
            match largest {
                Some(max) if region.len() <= max.len() => {}
                _ => largest = Some(region),
            }
        }
        largest
    }

    /// Sets the recolored image to be a copy of the source image, but
    /// with each region overwritten by one uniform random color, so we
    /// can see where the regions are. Without an image this is a no-op.
    pub fn recolor_image<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let image = match &self.image {
            Some(image) => image,
            None => return,
        };

        // First copy the original, then recolor the regions in it
        let mut recolored = image.clone();
        for region in &self.regions {
            let color = random_region_color(rng);
            for &(x, y) in region.points() {
                recolored.put_pixel(x, y, color);
            }
        }

        self.recolored_image = Some(recolored);
    }
}
