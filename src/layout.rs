// Lane layout handed to the renderer: placed intervals plus their glyph geometry
use crate::error::Result;
use crate::feature::{Interval, SubFeatureKind};
use crate::lanes::{assign_lanes, LaneConfig};
use crate::track::TrackStyle;
use std::io::Write;

// Vertical placement of transcript parts relative to the lane, in lane units
const EXON_LIFT: f64 = 0.12;
const CDS_LIFT: f64 = -0.01;
const CDS_THICKNESS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedInterval {
    pub interval: Interval,
    /// 1-based lane
    pub lane: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutResult {
    assignments: Vec<PlacedInterval>,
    lane_count: usize,
}

/// Which part of a feature a glyph draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphKind {
    /// Thin line spanning the whole interval
    Body,
    Part(SubFeatureKind),
}

/// Rectangle in data coordinates: x in bp, y in lane units
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub lane: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub kind: GlyphKind,
}

/// Assign lanes to `intervals` and pair each with its lane, keeping input order.
pub fn layout(intervals: Vec<Interval>, region_start: i64, config: LaneConfig) -> Result<LayoutResult> {
    let assignment = assign_lanes(&intervals, region_start, config)?;
    let lane_count = assignment.lane_count();
    let assignments = intervals
        .into_iter()
        .zip(assignment.lanes().iter().copied())
        .map(|(interval, lane)| PlacedInterval { interval, lane })
        .collect();

    Ok(LayoutResult {
        assignments,
        lane_count,
    })
}

impl LayoutResult {
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedInterval> {
        self.assignments.iter()
    }

    /// Members of one lane, in input order
    pub fn lane(&self, lane: usize) -> impl Iterator<Item = &Interval> {
        self.assignments
            .iter()
            .filter(move |p| p.lane == lane)
            .map(|p| &p.interval)
    }

    /// Shapes for the renderer: one body per interval followed by one glyph
    /// per sub-feature.
    pub fn glyphs(&self, style: &TrackStyle) -> Vec<Glyph> {
        let mut glyphs = Vec::new();
        for placed in &self.assignments {
            let lane = placed.lane as f64;
            let interval = &placed.interval;

            glyphs.push(Glyph {
                lane: placed.lane,
                x: interval.start as f64,
                y: lane + style.body_offset,
                width: interval.len() as f64,
                height: style.body_thickness,
                kind: GlyphKind::Body,
            });

            for sub in &interval.sub_features {
                let (y, height) = match sub.kind {
                    SubFeatureKind::Exon if style.kind_geometry => (lane + EXON_LIFT, style.block_thickness),
                    SubFeatureKind::Cds if style.kind_geometry => (lane + CDS_LIFT, CDS_THICKNESS),
                    _ => (lane, style.block_thickness),
                };
                glyphs.push(Glyph {
                    lane: placed.lane,
                    x: sub.offset as f64,
                    y,
                    width: sub.width as f64,
                    height,
                    kind: GlyphKind::Part(sub.kind),
                });
            }
        }
        glyphs
    }
}

impl<'a> IntoIterator for &'a LayoutResult {
    type Item = &'a PlacedInterval;
    type IntoIter = std::slice::Iter<'a, PlacedInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.assignments.iter()
    }
}

pub const TSV_HEADER: &str = "track\tlane\tchromosome\tstart\tend\tname\tsub_features";
pub const GLYPH_TSV_HEADER: &str = "track\tlane\tkind\tx\ty\twidth\theight";

/// One row per placed interval; sub-features as `kind:offset:width`.
pub fn write_tsv<W: Write>(track: &str, layout: &LayoutResult, out: &mut W) -> std::io::Result<()> {
    for placed in layout {
        let interval = &placed.interval;
        let parts: Vec<String> = interval
            .sub_features
            .iter()
            .map(|s| format!("{}:{}:{}", s.kind, s.offset, s.width))
            .collect();
        let parts = if parts.is_empty() { ".".to_string() } else { parts.join(",") };

        writeln!(
            out,
            "{track}\t{}\t{}\t{}\t{}\t{}\t{parts}",
            placed.lane,
            interval.chromosome,
            interval.start,
            interval.end,
            interval.name.as_deref().unwrap_or("."),
        )?;
    }
    Ok(())
}

/// One row per glyph, coordinates rounded to three decimals.
pub fn write_glyph_tsv<W: Write>(
    track: &str,
    layout: &LayoutResult,
    style: &TrackStyle,
    out: &mut W,
) -> std::io::Result<()> {
    for glyph in layout.glyphs(style) {
        let kind = match glyph.kind {
            GlyphKind::Body => "body",
            GlyphKind::Part(kind) => kind.as_str(),
        };
        writeln!(
            out,
            "{track}\t{}\t{kind}\t{:.0}\t{:.3}\t{:.0}\t{:.3}",
            glyph.lane,
            glyph.x,
            glyph.y,
            glyph.width,
            glyph.height,
        )?;
    }
    Ok(())
}
