use std::fs;
use std::path::Path;
use csv::Writer;

use crate::errors::{CamPaintError, Result};
use crate::region::Region;

/// Write one row per detected region, in scan order
pub fn write_regions_csv<P: AsRef<Path>>(
    regions: &[Region],
    output_dir: P,
    filename: &str,
) -> Result<()> {
    let output_path = output_dir.as_ref().join("regions").join(format!("{}.csv", filename));

    // Create directory if it doesn't exist
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(CamPaintError::Io)?;
    }

    let mut writer = Writer::from_path(&output_path)
        .map_err(CamPaintError::CsvOutput)?;

    writer.write_record([
        "Region_Index",
        "Size",
        "Centroid_X",
        "Centroid_Y",
        "BBox_Min_X",
        "BBox_Min_Y",
        "BBox_Max_X",
        "BBox_Max_Y",
    ]).map_err(CamPaintError::CsvOutput)?;

    for (index, region) in regions.iter().enumerate() {
        let (centroid_x, centroid_y) = region.centroid();
        let (min_x, min_y, max_x, max_y) = region.bounding_box();

        writer.write_record([
            index.to_string(),
            region.len().to_string(),
            format!("{:.2}", centroid_x),
            format!("{:.2}", centroid_y),
            min_x.to_string(),
            min_y.to_string(),
            max_x.to_string(),
            max_y.to_string(),
        ]).map_err(CamPaintError::CsvOutput)?;
    }

    writer.flush().map_err(|e| CamPaintError::CsvOutput(csv::Error::from(e)))?;

    Ok(())
}
