use std::fs;
use std::path::Path;
use csv::Writer;

use crate::errors::Result;
use crate::shape_analysis::LabelStats;

/// Write one row per label with its size, position and extent
pub fn write_label_summary_csv<P: AsRef<Path>>(stats: &[LabelStats], path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = Writer::from_path(path)?;

    writer.write_record([
        "Label",
        "Seed_Index",
        "Area",
        "Centroid_Row",
        "Centroid_Col",
        "Equivalent_Diameter",
        "Min_Row",
        "Min_Col",
        "Max_Row",
        "Max_Col",
    ])?;

    for s in stats {
        writer.write_record(&[
            s.label.to_string(),
            s.seed_index().to_string(),
            s.area.to_string(),
            format!("{:.6}", s.centroid.0),
            format!("{:.6}", s.centroid.1),
            format!("{:.6}", s.equivalent_diameter),
            s.bbox.min_row.to_string(),
            s.bbox.min_col.to_string(),
            s.bbox.max_row.to_string(),
            s.bbox.max_col.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(())
}
