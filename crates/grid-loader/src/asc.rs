//! ESRI ASCII grid reader.
//!
//! ```text
//! ncols        4
//! nrows        3
//! xllcorner    8.50
//! yllcorner    47.30
//! cellsize     0.01
//! NODATA_value -9999
//! 10 20 30 40
//! ...
//! ```
//!
//! Header keys are case-insensitive. Values follow as whitespace-separated
//! numbers, row-major, northernmost row first.

use overlay_common::{GridDescriptor, GridValues, OverlayError, OverlayResult};
use std::path::Path;

/// ESRI default sentinel when the header has no `nodata_value` line.
pub const DEFAULT_NODATA: f64 = -9999.0;

/// Parsed `.asc` header, always in lower-left-corner form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AscHeader {
    pub ncols: usize,
    pub nrows: usize,
    pub xllcorner: f64,
    pub yllcorner: f64,
    pub cellsize: f64,
    pub nodata_value: f64,
}

impl AscHeader {
    /// Grid geometry described by this header.
    pub fn descriptor(&self) -> OverlayResult<GridDescriptor> {
        GridDescriptor::new(
            self.ncols,
            self.nrows,
            self.xllcorner,
            self.yllcorner,
            self.cellsize,
            self.nodata_value,
        )
    }
}

/// Parse only the header of an `.asc` document.
pub fn parse_header(text: &str) -> OverlayResult<AscHeader> {
    read_header(text).map(|(header, _)| header)
}

/// Parse a complete `.asc` document into a validated grid.
pub fn parse_asc(text: &str) -> OverlayResult<GridValues> {
    let (header, data_start) = read_header(text)?;
    let descriptor = header.descriptor()?;

    // Every value takes at least one digit and one separator, so the body
    // length bounds the count regardless of what the header claims.
    let mut values = Vec::with_capacity(descriptor.len().min(text.len() / 2 + 1));
    for (idx, line) in text.lines().enumerate().skip(data_start) {
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| {
                OverlayError::parse(idx + 1, format!("expected a number, found '{}'", token))
            })?;
            values.push(value);
        }
    }

    tracing::debug!(
        columns = descriptor.columns,
        rows = descriptor.rows,
        cell_size = descriptor.cell_size,
        values = values.len(),
        "parsed ascii grid"
    );

    GridValues::new(descriptor, values)
}

/// Read and parse an `.asc` file.
pub fn load_asc(path: impl AsRef<Path>) -> OverlayResult<GridValues> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let grid = parse_asc(&text)?;
    tracing::info!(
        path = %path.display(),
        columns = grid.descriptor().columns,
        rows = grid.descriptor().rows,
        "loaded grid"
    );
    Ok(grid)
}

#[derive(Default)]
struct RawHeader {
    ncols: Option<f64>,
    nrows: Option<f64>,
    x: Option<(f64, bool)>,
    y: Option<(f64, bool)>,
    cellsize: Option<f64>,
    nodata: Option<f64>,
}

/// Returns the header and the index of the first data line.
fn read_header(text: &str) -> OverlayResult<(AscHeader, usize)> {
    let mut raw = RawHeader::default();
    let mut data_start = 0;

    for (idx, line) in text.lines().enumerate() {
        let mut parts = line.split_whitespace();
        let Some(key) = parts.next() else {
            data_start = idx + 1;
            continue;
        };
        // The body starts at the first numeric token. `nan` and `inf` parse
        // as numbers, so a data row led by one of them is not a header key.
        if key.parse::<f64>().is_ok() {
            break;
        }
        data_start = idx + 1;

        let line_no = idx + 1;
        let value = match (parts.next(), parts.next()) {
            (Some(v), None) => v.parse::<f64>().map_err(|_| {
                OverlayError::parse(line_no, format!("invalid value '{}' for {}", v, key))
            })?,
            _ => {
                return Err(OverlayError::parse(
                    line_no,
                    format!("header line must be 'key value', got '{}'", line.trim()),
                ))
            }
        };

        match key.to_ascii_lowercase().as_str() {
            "ncols" => raw.ncols = Some(value),
            "nrows" => raw.nrows = Some(value),
            "xllcorner" => raw.x = Some((value, false)),
            "xllcenter" => raw.x = Some((value, true)),
            "yllcorner" => raw.y = Some((value, false)),
            "yllcenter" => raw.y = Some((value, true)),
            "cellsize" => raw.cellsize = Some(value),
            "nodata_value" => raw.nodata = Some(value),
            other => {
                return Err(OverlayError::parse(
                    line_no,
                    format!("unknown header key '{}'", other),
                ))
            }
        }
    }

    let ncols = count(raw.ncols, "ncols")?;
    let nrows = count(raw.nrows, "nrows")?;
    let cellsize = raw.cellsize.ok_or_else(|| missing("cellsize"))?;
    let (x, x_center) = raw.x.ok_or_else(|| missing("xllcorner"))?;
    let (y, y_center) = raw.y.ok_or_else(|| missing("yllcorner"))?;

    // Center registration names the middle of the lower-left cell.
    let half = cellsize / 2.0;
    let header = AscHeader {
        ncols,
        nrows,
        xllcorner: if x_center { x - half } else { x },
        yllcorner: if y_center { y - half } else { y },
        cellsize,
        nodata_value: raw.nodata.unwrap_or(DEFAULT_NODATA),
    };

    Ok((header, data_start))
}

fn missing(key: &str) -> OverlayError {
    OverlayError::InvalidGrid(format!("missing header key '{}'", key))
}

fn count(value: Option<f64>, key: &str) -> OverlayResult<usize> {
    let value = value.ok_or_else(|| missing(key))?;
    if value.fract() != 0.0 || value < 1.0 || value > u32::MAX as f64 {
        return Err(OverlayError::InvalidGrid(format!(
            "{} must be a positive integer, got {}",
            key, value
        )));
    }
    Ok(value as usize)
}
