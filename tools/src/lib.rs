//! Inspection and rendering tools for the pusher map decoder.
//!
//! This crate turns decoded maps into human-readable output:
//!
//! - Load and size-check the executable image
//! - Per-map reports with offsets, sizes and the rendered grid
//! - One-line summaries and JSON output
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what the decoder found.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use maps::{decode_all, BlobLayout, Map, MapError, Position, StreamSpan};
use serde::Serialize;

/// Separator printed between maps in text reports.
pub const RULE: &str = "*************************************";

/// Reads the executable image at `path` and checks its size against `layout`.
pub fn load_blob(path: &Path, layout: &BlobLayout) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    check_blob(&bytes, layout).with_context(|| format!("validate image {}", path.display()))?;
    Ok(bytes)
}

/// Checks that `bytes` has exactly the size the layout expects.
pub fn check_blob(bytes: &[u8], layout: &BlobLayout) -> Result<()> {
    ensure!(
        bytes.len() == layout.blob_len,
        "image is {} bytes, expected {}",
        bytes.len(),
        layout.blob_len
    );
    Ok(())
}

/// Everything printed about one decoded map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapReport {
    /// 1-based maze number.
    pub number: usize,
    /// Bytes occupied by the packed map in the image.
    pub span: StreamSpan,
    /// Offset within the data segment.
    pub ds_offset: usize,
    /// Offset relative to the packed data base, as stored in the table.
    pub table_offset: usize,
    /// Grid width.
    pub size_x: u8,
    /// Grid height.
    pub size_y: u8,
    /// Player start position.
    pub player: Position,
    /// Whether loose barrels and free slots match up.
    pub balanced: bool,
    /// Rendered grid rows, player included.
    pub rows: Vec<String>,
}

impl MapReport {
    #[must_use]
    pub fn new(map: &Map, layout: &BlobLayout) -> Self {
        let span = map.span();
        Self {
            number: map.index() + 1,
            span,
            ds_offset: span.start.saturating_sub(layout.segment_base),
            table_offset: span.start.saturating_sub(layout.data_base()),
            size_x: map.size_x(),
            size_y: map.size_y(),
            player: map.player(),
            balanced: map.barrel_balance().is_balanced(),
            rows: (0..map.size_y()).filter_map(|y| map.render_row(y)).collect(),
        }
    }
}

/// A map the decoder rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapFailure {
    /// 1-based maze number.
    pub number: usize,
    /// Absolute offset where decoding failed.
    pub offset: usize,
    /// Reason the map was rejected.
    pub error: String,
}

impl From<&MapError> for MapFailure {
    fn from(err: &MapError) -> Self {
        Self {
            number: err.map_index + 1,
            offset: err.offset,
            error: err.kind.to_string(),
        }
    }
}

/// Result of decoding one table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MapEntry {
    /// The map decoded cleanly.
    Decoded(MapReport),
    /// The decoder rejected the map.
    Rejected(MapFailure),
}

/// Decodes every map in `bytes`.
///
/// With `keep_going` a rejected map becomes a [`MapEntry::Rejected`] entry;
/// otherwise the first rejected map aborts the run.
pub fn decode_entries(bytes: &[u8], layout: &BlobLayout, keep_going: bool) -> Result<Vec<MapEntry>> {
    let mut entries = Vec::with_capacity(layout.map_count);
    for result in decode_all(bytes, layout) {
        match result {
            Ok(map) => entries.push(MapEntry::Decoded(MapReport::new(&map, layout))),
            Err(err) if keep_going => entries.push(MapEntry::Rejected(MapFailure::from(&err))),
            Err(err) => {
                let number = err.map_index + 1;
                return Err(err).with_context(|| format!("decode maze {number}"));
            }
        }
    }
    Ok(entries)
}

impl fmt::Display for MapReport {
    /// The detailed text report: header lines, a blank line, then the grid.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Maze: {}", self.number)?;
        writeln!(
            f,
            "File offset: {:04X}, DS:{:04X}, table offset: {:04X}",
            self.span.start, self.ds_offset, self.table_offset
        )?;
        writeln!(f, "Size X: {}", self.size_x)?;
        writeln!(f, "Size Y: {}", self.size_y)?;
        writeln!(f, "End: {:04X}", self.span.last())?;
        writeln!(f, "Length: {}", self.span.len())?;
        writeln!(f)?;
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Formats a one-line summary of a decoded or rejected map.
#[must_use]
pub fn format_summary(entry: &MapEntry) -> String {
    match entry {
        MapEntry::Decoded(report) => format!(
            "{:>2}  {:04X}  {:>2}x{:<2}  player ({:>2}, {:>2})  {:>3} bytes{}",
            report.number,
            report.span.start,
            report.size_x,
            report.size_y,
            report.player.x,
            report.player.y,
            report.span.len(),
            if report.balanced { "" } else { "  unbalanced" }
        ),
        MapEntry::Rejected(failure) => format!(
            "{:>2}  {:04X}  rejected: {}",
            failure.number, failure.offset, failure.error
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two 2x1 maps: `@X` and a map whose player stands on a barrel.
    fn sample_blob() -> (BlobLayout, Vec<u8>) {
        let layout = BlobLayout::for_testing();
        let mut blob = vec![0u8; layout.blob_len];
        let table = layout.table_base();
        blob[table..table + 8].copy_from_slice(&[0, 0, 5, 0, 0, 0, 0, 0]);
        let base = layout.data_base();
        // counter 0, empty; counter 0, wall
        blob[base..base + 5].copy_from_slice(&[2, 1, 0b0000_0100, 0, 0]);
        // counter 0, barrel; counter 0, empty
        blob[base + 5..base + 10].copy_from_slice(&[2, 1, 0b0100_0000, 0, 0]);
        (layout, blob)
    }

    #[test]
    fn check_blob_size() {
        let layout = BlobLayout::for_testing();
        assert!(check_blob(&vec![0; layout.blob_len], &layout).is_ok());
        let err = check_blob(&[0; 10], &layout).unwrap_err();
        assert!(err.to_string().contains("expected 256"));
    }

    #[test]
    fn report_lines() {
        let (layout, blob) = sample_blob();
        let map = maps::decode_map(&blob, &layout, 0).unwrap();
        let report = MapReport::new(&map, &layout);
        assert_eq!(report.number, 1);
        assert_eq!(report.rows, ["@X"]);
        let text = report.to_string();
        assert!(text.starts_with("Maze: 1\n"));
        assert!(text.contains("File offset: 0018, DS:0008, table offset: 0000"));
        assert!(text.contains("End: 001C\nLength: 5\n"));
        assert!(text.ends_with("\n@X\n"));
    }

    #[test]
    fn keep_going_records_rejections() {
        let (layout, blob) = sample_blob();
        let entries = decode_entries(&blob, &layout, true).unwrap();
        assert_eq!(entries.len(), 4);
        assert!(matches!(entries[0], MapEntry::Decoded(_)));
        match &entries[1] {
            MapEntry::Rejected(failure) => {
                assert_eq!(failure.number, 2);
                assert!(failure.error.contains("barrel"));
            }
            MapEntry::Decoded(_) => panic!("maze 2 should be rejected"),
        }
        assert!(format_summary(&entries[1]).contains("rejected"));
    }

    #[test]
    fn first_rejection_aborts() {
        let (layout, blob) = sample_blob();
        let err = decode_entries(&blob, &layout, false).unwrap_err();
        assert!(err.to_string().contains("decode maze 2"));
    }

    #[test]
    fn summary_line() {
        let (layout, blob) = sample_blob();
        let entries = decode_entries(&blob, &layout, true).unwrap();
        let line = format_summary(&entries[0]);
        assert!(line.contains("2x1"));
        assert!(line.contains("5 bytes"));
    }

    #[test]
    fn entries_serialize_with_status() {
        let (layout, blob) = sample_blob();
        let entries = decode_entries(&blob, &layout, true).unwrap();
        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[0]["status"], "decoded");
        assert_eq!(json[0]["rows"][0], "@X");
        assert_eq!(json[0]["player"]["x"], 0);
        assert_eq!(json[1]["status"], "rejected");
    }
}
