// Module for reading PSL alignment records into read intervals
use crate::error::{Result, TrackError};
use crate::feature::{Interval, SubFeature, SubFeatureKind};
use anyhow::Context;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

// PSL column indices (0-based)
const COL_QNAME: usize = 9;
const COL_TNAME: usize = 13;
const COL_TSTART: usize = 15;
const COL_TEND: usize = 16;
const COL_BLOCK_SIZES: usize = 18;
const COL_TSTARTS: usize = 20;

const PSL_COLUMNS: usize = 21;
// PSLX appends query and target sequences
const PSLX_COLUMNS: usize = 23;

pub struct PslFile {
    path: PathBuf,
    contents: String,
}

impl PslFile {
    /// Open a PSL file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to open PSL file: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    /// Parse every record in the file
    pub fn read_all_records(&self) -> anyhow::Result<Vec<Interval>> {
        let reads = parse_alignment_records(self.contents.lines())
            .with_context(|| format!("Malformed PSL file: {}", self.path.display()))?;
        debug!("{}: {} alignment records", self.path.display(), reads.len());
        Ok(reads)
    }
}

/// Parse tab-separated PSL lines into intervals with one `Block` sub-feature per
/// aligned block. The first malformed line aborts the parse.
pub fn parse_alignment_records<I, S>(lines: I) -> Result<Vec<Interval>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(idx, line)| parse_alignment_line(idx + 1, line.as_ref()))
        .collect()
}

fn parse_alignment_line(line_no: usize, line: &str) -> Result<Interval> {
    let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
    if fields.len() != PSL_COLUMNS && fields.len() != PSLX_COLUMNS {
        return Err(TrackError::parse(
            line_no,
            "column count",
            format!("expected {PSL_COLUMNS} or {PSLX_COLUMNS} columns, found {}", fields.len()),
        ));
    }

    let chromosome = fields[COL_TNAME];
    let start = parse_coord(line_no, COL_TSTART, fields[COL_TSTART])?;
    let end = parse_coord(line_no, COL_TEND, fields[COL_TEND])?;
    if start > end {
        return Err(TrackError::parse(
            line_no,
            format!("column {COL_TEND}"),
            format!("end {end} precedes start {start}"),
        ));
    }

    let widths = parse_list(line_no, COL_BLOCK_SIZES, fields[COL_BLOCK_SIZES])?;
    let starts = parse_list(line_no, COL_TSTARTS, fields[COL_TSTARTS])?;
    if widths.len() != starts.len() {
        return Err(TrackError::parse(
            line_no,
            format!("column {COL_TSTARTS}"),
            format!("{} block starts for {} block sizes", starts.len(), widths.len()),
        ));
    }

    let read = Interval::new(chromosome, start, end).with_name(fields[COL_QNAME]);
    let blocks: Vec<SubFeature> = starts
        .into_iter()
        .zip(widths)
        .map(|(offset, width)| SubFeature::new(offset, width, SubFeatureKind::Block))
        .collect();

    if let Some(stray) = blocks.iter().find(|b| !read.contains_sub_feature(b)) {
        return Err(TrackError::parse(
            line_no,
            format!("column {COL_TSTARTS}"),
            format!(
                "block [{}, {}) lies outside alignment [{start}, {end}]",
                stray.offset,
                stray.end()
            ),
        ));
    }

    Ok(read.with_sub_features(blocks))
}

fn parse_coord(line_no: usize, col: usize, token: &str) -> Result<i64> {
    token.trim().parse::<i64>().map_err(|_| {
        TrackError::parse(line_no, format!("column {col}"), format!("not an integer: {token:?}"))
    })
}

/// Comma-separated integers; the empty token after a trailing comma is dropped.
fn parse_list(line_no: usize, col: usize, field: &str) -> Result<Vec<i64>> {
    let mut tokens: Vec<&str> = field.split(',').collect();
    if tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
        .into_iter()
        .map(|t| parse_coord(line_no, col, t))
        .collect()
}
