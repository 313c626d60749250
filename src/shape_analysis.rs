// src/shape_analysis.rs - Geometric summaries of components and labeled regions

use std::collections::BTreeMap;
use std::f64::consts::PI;

use crate::components::{BoundingBox, Component};
use crate::labeling::LabelCanvas;

/// Centroid and size of a component, as used for disk fitting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSummary {
    /// (row, col)
    pub centroid: (f64, f64),
    pub equivalent_diameter: f64,
}

/// Diameter of the circle whose area equals `area` pixels
pub fn equivalent_diameter(area: u32) -> f64 {
    2.0 * (area as f64 / PI).sqrt()
}

pub fn summarize(component: &Component) -> ShapeSummary {
    ShapeSummary {
        centroid: component.centroid,
        equivalent_diameter: equivalent_diameter(component.area),
    }
}

/// Measurements of one label on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStats {
    pub label: u32,
    pub area: u32,
    pub centroid: (f64, f64),
    pub equivalent_diameter: f64,
    pub bbox: BoundingBox,
}

impl LabelStats {
    /// Index of the seed that owns this label
    pub fn seed_index(&self) -> usize {
        self.label as usize - 1
    }
}

/// Measure every non-zero label currently on the canvas, in label order.
///
/// Labels are not necessarily connected once later disks overwrite parts of
/// earlier ones, so this measures pixel sets per label, not components.
pub fn label_statistics(canvas: &LabelCanvas) -> Vec<LabelStats> {
    struct Sums {
        area: u32,
        row_sum: f64,
        col_sum: f64,
        bbox: BoundingBox,
    }

    let mut sums: BTreeMap<u32, Sums> = BTreeMap::new();
    for (row, col, label) in canvas.iter_labels() {
        if label == 0 {
            continue;
        }
        let entry = sums.entry(label).or_insert(Sums {
            area: 0,
            row_sum: 0.0,
            col_sum: 0.0,
            bbox: BoundingBox {
                min_row: row,
                min_col: col,
                max_row: row + 1,
                max_col: col + 1,
            },
        });
        entry.area += 1;
        entry.row_sum += row as f64;
        entry.col_sum += col as f64;
        entry.bbox.min_row = entry.bbox.min_row.min(row);
        entry.bbox.min_col = entry.bbox.min_col.min(col);
        entry.bbox.max_row = entry.bbox.max_row.max(row + 1);
        entry.bbox.max_col = entry.bbox.max_col.max(col + 1);
    }

    sums.into_iter()
        .map(|(label, s)| LabelStats {
            label,
            area: s.area,
            centroid: (s.row_sum / s.area as f64, s.col_sum / s.area as f64),
            equivalent_diameter: equivalent_diameter(s.area),
            bbox: s.bbox,
        })
        .collect()
}
