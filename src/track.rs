// Read and transcript tracks: parse, restrict to a window, pack into lanes
use crate::error::Result;
use crate::feature::Interval;
use crate::gtf_reader::GtfFile;
use crate::lanes::LaneConfig;
use crate::layout::{layout, LayoutResult};
use crate::psl_reader::PslFile;
use crate::region::{filter_to_region, Region};
use log::info;
use std::path::{Path, PathBuf};

/// Per-variant layout and glyph constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackStyle {
    /// How far below the window start every lane begins
    pub floor_offset: i64,
    /// Height of the line spanning the whole feature
    pub body_thickness: f64,
    /// Height of blocks/exons
    pub block_thickness: f64,
    /// Lift of the body line above the lane baseline
    pub body_offset: f64,
    /// Draw exons and CDS at their own height and thickness
    pub kind_geometry: bool,
}

impl TrackStyle {
    /// Gapped reads: lanes start at the window edge, all blocks alike
    pub fn reads() -> Self {
        Self {
            floor_offset: 0,
            body_thickness: 0.1,
            block_thickness: 0.5,
            body_offset: 0.2,
            kind_geometry: false,
        }
    }

    /// Transcripts: lanes start well before the window so transcripts
    /// reaching in from the left still get placed
    pub fn transcripts() -> Self {
        Self {
            floor_offset: 100_000,
            body_thickness: 0.1,
            block_thickness: 0.24,
            body_offset: 0.19,
            kind_geometry: true,
        }
    }

    pub fn with_floor_offset(mut self, floor_offset: i64) -> Self {
        self.floor_offset = floor_offset;
        self
    }
}

/// Input file for one track
#[derive(Debug, Clone)]
pub enum TrackSource {
    /// PSL alignments
    Reads(PathBuf),
    /// GTF annotation
    Transcripts(PathBuf),
}

impl TrackSource {
    pub fn path(&self) -> &Path {
        match self {
            TrackSource::Reads(path) | TrackSource::Transcripts(path) => path,
        }
    }

    /// Track name shown in output: the file stem
    pub fn name(&self) -> String {
        self.path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path().display().to_string())
    }

    pub fn read_intervals(&self) -> anyhow::Result<Vec<Interval>> {
        match self {
            TrackSource::Reads(path) => PslFile::open(path)?.read_all_records(),
            TrackSource::Transcripts(path) => GtfFile::open(path)?.read_all_transcripts(),
        }
    }
}

pub struct Track {
    pub name: String,
    pub style: TrackStyle,
    pub layout: LayoutResult,
}

impl Track {
    /// Restrict `intervals` to `region` and assign lanes
    pub fn build(
        name: impl Into<String>,
        intervals: Vec<Interval>,
        region: &Region,
        style: TrackStyle,
        max_lanes: Option<usize>,
    ) -> Result<Self> {
        let name = name.into();
        let visible = filter_to_region(intervals, region);

        let config = LaneConfig {
            floor_offset: style.floor_offset,
            max_lanes,
        };
        let layout = layout(visible, region.start, config)?;
        info!(
            "{name}: {} features in {} lanes over {region}",
            layout.len(),
            layout.lane_count()
        );

        Ok(Self {
            name,
            style,
            layout,
        })
    }

    /// Load a track file and lay it out
    pub fn from_source(
        source: &TrackSource,
        region: &Region,
        style: TrackStyle,
        max_lanes: Option<usize>,
    ) -> anyhow::Result<Self> {
        let intervals = source.read_intervals()?;
        let track = Self::build(source.name(), intervals, region, style, max_lanes)?;
        Ok(track)
    }
}
