// Genomic feature model shared by the alignment and annotation tracks
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubFeatureKind {
    /// Aligned block of a gapped read
    Block,
    Exon,
    Cds,
}

impl SubFeatureKind {
    /// Map a GTF feature-type column to a kind. Other types are not drawn.
    pub fn from_gtf_type(feature_type: &str) -> Option<Self> {
        match feature_type {
            "exon" => Some(SubFeatureKind::Exon),
            "CDS" => Some(SubFeatureKind::Cds),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubFeatureKind::Block => "block",
            SubFeatureKind::Exon => "exon",
            SubFeatureKind::Cds => "CDS",
        }
    }
}

impl fmt::Display for SubFeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nested segment of an interval. `offset` is an absolute genomic coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubFeature {
    pub offset: i64,
    pub width: i64,
    pub kind: SubFeatureKind,
}

impl SubFeature {
    pub fn new(offset: i64, width: i64, kind: SubFeatureKind) -> Self {
        Self { offset, width, kind }
    }

    pub fn end(&self) -> i64 {
        self.offset + self.width
    }
}

/// A read or transcript: one span plus its blocks/exons.
///
/// Readers uphold `start <= end` and keep every sub-feature inside
/// `[start, end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub chromosome: String,
    pub start: i64,
    pub end: i64,
    /// Query name for reads, transcript id for transcripts
    pub name: Option<String>,
    pub sub_features: Vec<SubFeature>,
}

impl Interval {
    pub fn new(chromosome: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
            name: None,
            sub_features: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_sub_features(mut self, sub_features: Vec<SubFeature>) -> Self {
        self.sub_features = sub_features;
        self
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Half-open `[start, end)` intersection
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether a sub-feature stays within `[start, end]`
    pub fn contains_sub_feature(&self, sub: &SubFeature) -> bool {
        sub.offset >= self.start && sub.end() <= self.end
    }
}
