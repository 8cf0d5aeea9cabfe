// Module for reading GTF annotation records into transcript intervals
use crate::error::{Result, TrackError};
use crate::feature::{Interval, SubFeature, SubFeatureKind};
use anyhow::Context;
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

const COL_SEQNAME: usize = 0;
const COL_FEATURE: usize = 2;
const COL_START: usize = 3;
const COL_END: usize = 4;
const COL_ATTRIBUTES: usize = 8;

const GTF_COLUMNS: usize = 9;

/// One exon or CDS line before grouping
#[derive(Debug, Clone)]
struct GtfRecord {
    chromosome: String,
    start: i64,
    end: i64,
    kind: SubFeatureKind,
}

pub struct GtfFile {
    path: PathBuf,
    contents: String,
}

impl GtfFile {
    /// Open a GTF file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to open GTF file: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            contents,
        })
    }

    /// Parse and group every transcript in the file
    pub fn read_all_transcripts(&self) -> anyhow::Result<Vec<Interval>> {
        let transcripts = parse_annotation_records(self.contents.lines())
            .with_context(|| format!("Malformed GTF file: {}", self.path.display()))?;
        debug!("{}: {} transcripts", self.path.display(), transcripts.len());
        Ok(transcripts)
    }
}

/// Parse GTF lines and group `exon`/`CDS` records into one interval per
/// transcript, in first-seen order.
pub fn parse_annotation_records<I, S>(lines: I) -> Result<Vec<Interval>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut transcripts: IndexMap<String, Vec<GtfRecord>> = IndexMap::new();

    for (idx, line) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        let line = line.as_ref();
        if line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.trim_end_matches(['\r', '\n']).split('\t').collect();
        if fields.len() != GTF_COLUMNS {
            return Err(TrackError::parse(
                line_no,
                "column count",
                format!("expected {GTF_COLUMNS} columns, found {}", fields.len()),
            ));
        }

        let Some(kind) = SubFeatureKind::from_gtf_type(fields[COL_FEATURE]) else {
            continue;
        };

        let start = parse_coord(line_no, COL_START, fields[COL_START])?;
        let end = parse_coord(line_no, COL_END, fields[COL_END])?;
        if start > end {
            return Err(TrackError::parse(
                line_no,
                format!("column {COL_END}"),
                format!("end {end} precedes start {start}"),
            ));
        }

        let transcript_id = transcript_id(fields[COL_ATTRIBUTES]).ok_or_else(|| {
            TrackError::parse(
                line_no,
                format!("column {COL_ATTRIBUTES}"),
                "no transcript_id attribute",
            )
        })?;

        transcripts
            .entry(transcript_id.to_string())
            .or_default()
            .push(GtfRecord {
                chromosome: fields[COL_SEQNAME].to_string(),
                start,
                end,
                kind,
            });
    }

    transcripts
        .into_iter()
        .map(|(id, members)| collapse_transcript(id, members))
        .collect()
}

/// Span the members and keep each one as a sub-feature.
fn collapse_transcript(id: String, members: Vec<GtfRecord>) -> Result<Interval> {
    // Groups are only created on push, so there is always a first member
    let chromosome = members[0].chromosome.clone();
    if let Some(stray) = members.iter().find(|m| m.chromosome != chromosome) {
        return Err(TrackError::DataInconsistency {
            transcript: id,
            first: chromosome,
            other: stray.chromosome.clone(),
        });
    }

    let start = members.iter().map(|m| m.start).min().unwrap_or_default();
    let end = members.iter().map(|m| m.end).max().unwrap_or_default();
    let sub_features = members
        .iter()
        .map(|m| SubFeature::new(m.start, m.end - m.start, m.kind))
        .collect();

    Ok(Interval::new(chromosome, start, end)
        .with_name(id)
        .with_sub_features(sub_features))
}

/// Value of the `transcript_id "<value>"` attribute
fn transcript_id(attributes: &str) -> Option<&str> {
    attributes.split(';').find_map(|attr| {
        let value = attr.trim().strip_prefix("transcript_id")?;
        let value = value.trim_start().strip_prefix('"')?;
        let close = value.find('"')?;
        Some(&value[..close])
    })
}

fn parse_coord(line_no: usize, col: usize, token: &str) -> Result<i64> {
    token.trim().parse::<i64>().map_err(|_| {
        TrackError::parse(line_no, format!("column {col}"), format!("not an integer: {token:?}"))
    })
}
