use std::path::Path;
use serde::Deserialize;

use crate::errors::{CoinLabelError, Result};

/// A user click, in floating-point image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Seed {
    pub row: f64,
    pub col: f64,
}

impl Seed {
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }
}

/// Append-only sequence of seeds; a seed is identified by its index
#[derive(Debug, Clone, Default)]
pub struct SeedList {
    seeds: Vec<Seed>,
}

impl SeedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a seed and return its index
    pub fn push(&mut self, seed: Seed) -> usize {
        self.seeds.push(seed);
        self.seeds.len() - 1
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Seed> {
        self.seeds.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Seed)> + '_ {
        self.seeds.iter().copied().enumerate()
    }
}

impl FromIterator<Seed> for SeedList {
    fn from_iter<I: IntoIterator<Item = Seed>>(iter: I) -> Self {
        Self {
            seeds: iter.into_iter().collect(),
        }
    }
}

/// Read seeds from a CSV file with a `row,col` header.
///
/// Extra columns are ignored; rows appear in the list in file order.
pub fn read_seeds_csv<P: AsRef<Path>>(path: P) -> Result<SeedList> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(CoinLabelError::InvalidPath(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut seeds = SeedList::new();
    for record in reader.deserialize::<Seed>() {
        seeds.push(record?);
    }

    log::debug!("Read {} seeds from {}", seeds.len(), path.display());
    Ok(seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_push_assigns_ascending_indices() {
        let mut seeds = SeedList::new();
        assert_eq!(seeds.push(Seed::new(1.0, 2.0)), 0);
        assert_eq!(seeds.push(Seed::new(3.5, 4.5)), 1);
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds.get(1), Some(Seed::new(3.5, 4.5)));
        assert_eq!(seeds.get(2), None);
    }

    #[test]
    fn test_read_seeds_csv() {
        let dir = std::env::temp_dir().join(format!("coin_label_seeds_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("coins.csv");
        fs::write(&path, "row, col, note\n10.4, 20.6, first\n\n-1,-1,outside\n").unwrap();

        let seeds = read_seeds_csv(&path).unwrap();
        let collected: Vec<_> = seeds.iter().collect();
        assert_eq!(
            collected,
            vec![(0, Seed::new(10.4, 20.6)), (1, Seed::new(-1.0, -1.0))]
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_read_seeds_csv_missing_file() {
        let result = read_seeds_csv("/nonexistent/seeds.csv");
        assert!(matches!(result, Err(CoinLabelError::InvalidPath(_))));
    }
}
