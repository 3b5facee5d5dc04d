//! Filter blob loading.
//!
//! A filter file is split at a fixed byte offset into two regions, each a raw
//! array of little-endian `i32` words. The offset and per-region hash counts
//! come from [`FilterLayout`] so nothing here is a module-level constant.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::bloom::FilterPart;
use super::{Classifier, CombinedFilter};
use crate::config::FilterLayout;

#[derive(Debug, Error)]
pub enum FilterLoadError {
    #[error("filter file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("filter file {path} is too small: {len} bytes, split offset needs {need}")]
    TooSmall { path: PathBuf, len: u64, need: u64 },

    #[error("filter file {path}: {region} region of {len} bytes is not a whole number of 32-bit words")]
    Misaligned {
        path: PathBuf,
        region: &'static str,
        len: usize,
    },
}

/// Loads one named filter from `path` according to `layout`.
pub fn load_filter(
    path: &Path,
    name: &str,
    layout: &FilterLayout,
) -> Result<CombinedFilter, FilterLoadError> {
    let data = fs::read(path).map_err(|source| FilterLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if data.len() < layout.split_offset {
        return Err(FilterLoadError::TooSmall {
            path: path.to_path_buf(),
            len: data.len() as u64,
            need: layout.split_offset as u64,
        });
    }
    let (first, second) = data.split_at(layout.split_offset);
    let part1 = words_le(first).ok_or_else(|| FilterLoadError::Misaligned {
        path: path.to_path_buf(),
        region: "first",
        len: first.len(),
    })?;
    let part2 = words_le(second).ok_or_else(|| FilterLoadError::Misaligned {
        path: path.to_path_buf(),
        region: "second",
        len: second.len(),
    })?;
    tracing::debug!(
        "loaded filter {} from {}: {} + {} words",
        name,
        path.display(),
        part1.len(),
        part2.len()
    );
    Ok(CombinedFilter::new(
        name,
        vec![
            FilterPart::new(part1, layout.part1_hash_count),
            FilterPart::new(part2, layout.part2_hash_count),
        ],
    ))
}

/// Loads both named reputation sets (`transphobic.dat`, `t-friendly.dat`)
/// from `data_dir`.
pub fn load_classifier(
    data_dir: &Path,
    layout: &FilterLayout,
) -> Result<Classifier, FilterLoadError> {
    let transphobic = load_filter(&data_dir.join("transphobic.dat"), "transphobic", layout)?;
    let t_friendly = load_filter(&data_dir.join("t-friendly.dat"), "t-friendly", layout)?;
    Ok(Classifier::new(transphobic, t_friendly))
}

/// Reinterprets bytes as little-endian `i32` words. `None` when the length is
/// not a multiple of 4; byte order never depends on the host.
fn words_le(bytes: &[u8]) -> Option<Vec<i32>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}
