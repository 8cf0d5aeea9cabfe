// Genomic window selection for track views
use crate::error::{Result, TrackError};
use crate::feature::Interval;
use log::debug;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub chromosome: String,
    /// Lower window bound
    pub start: i64,
    /// Upper window bound
    pub end: i64,
}

impl Region {
    pub fn new(chromosome: impl Into<String>, start: i64, end: i64) -> Result<Self> {
        if start > end {
            return Err(TrackError::InvalidRegion(format!(
                "start {start} is past end {end}"
            )));
        }
        Ok(Self {
            chromosome: chromosome.into(),
            start,
            end,
        })
    }

    /// Check if an interval should be drawn in this window.
    ///
    /// Either endpoint must fall strictly inside `(start, end)`. An interval
    /// spanning the whole window has neither endpoint inside and is dropped.
    pub fn matches(&self, interval: &Interval) -> bool {
        interval.chromosome == self.chromosome
            && (self.strictly_inside(interval.start) || self.strictly_inside(interval.end))
    }

    fn strictly_inside(&self, coord: i64) -> bool {
        self.start < coord && coord < self.end
    }
}

impl FromStr for Region {
    type Err = TrackError;

    /// Parse `chr:start-end`; thousands separators are allowed.
    fn from_str(s: &str) -> Result<Self> {
        let (chromosome, range) = s
            .rsplit_once(':')
            .ok_or_else(|| TrackError::InvalidRegion(format!("expected chr:start-end, got: {s}")))?;

        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| TrackError::InvalidRegion(format!("expected chr:start-end, got: {s}")))?;

        if chromosome.is_empty() {
            return Err(TrackError::InvalidRegion(format!("missing chromosome in: {s}")));
        }

        Region::new(chromosome, parse_position(start)?, parse_position(end)?)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

fn parse_position(token: &str) -> Result<i64> {
    let cleaned: String = token.trim().chars().filter(|&c| c != ',').collect();
    cleaned
        .parse()
        .map_err(|_| TrackError::InvalidRegion(format!("not a position: {token:?}")))
}

/// Keep the intervals that fall in `region`, preserving input order.
pub fn filter_to_region(intervals: Vec<Interval>, region: &Region) -> Vec<Interval> {
    let total = intervals.len();
    let kept: Vec<Interval> = intervals
        .into_iter()
        .filter(|interval| region.matches(interval))
        .collect();
    debug!("{region}: kept {} of {total} intervals", kept.len());
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Region {
        Region::new("chr7", 1000, 2000).unwrap()
    }

    #[test]
    fn test_parse_region() {
        let region: Region = "chr7:45,232,945-45,240,000".parse().unwrap();
        assert_eq!(region, Region::new("chr7", 45232945, 45240000).unwrap());
        assert_eq!(region.to_string(), "chr7:45232945-45240000");
    }

    #[test]
    fn test_parse_region_errors() {
        assert!("chr7".parse::<Region>().is_err());
        assert!("chr7:100".parse::<Region>().is_err());
        assert!(":1-2".parse::<Region>().is_err());
        assert!("chr7:a-2".parse::<Region>().is_err());
        assert!("chr7:500-100".parse::<Region>().is_err());
    }

    #[test]
    fn test_endpoint_inside_window() {
        let region = window();
        assert!(region.matches(&Interval::new("chr7", 1500, 1600)));
        assert!(region.matches(&Interval::new("chr7", 500, 1500)));
        assert!(region.matches(&Interval::new("chr7", 1500, 2500)));
    }

    #[test]
    fn test_wrong_chromosome() {
        assert!(!window().matches(&Interval::new("chr8", 1500, 1600)));
    }

    #[test]
    fn test_spanning_interval_is_dropped() {
        assert!(!window().matches(&Interval::new("chr7", 500, 2500)));
    }

    #[test]
    fn test_endpoints_on_window_edge_are_outside() {
        let region = window();
        assert!(!region.matches(&Interval::new("chr7", 500, 1000)));
        assert!(!region.matches(&Interval::new("chr7", 2000, 2500)));
        assert!(!region.matches(&Interval::new("chr7", 1000, 2000)));
        assert!(region.matches(&Interval::new("chr7", 1000, 1999)));
    }

    #[test]
    fn test_filter_preserves_order() {
        let intervals = vec![
            Interval::new("chr7", 1800, 1900).with_name("c"),
            Interval::new("chr7", 500, 2500).with_name("span"),
            Interval::new("chr7", 1100, 1200).with_name("a"),
            Interval::new("chr1", 1100, 1200).with_name("other"),
            Interval::new("chr7", 1400, 1500).with_name("b"),
        ];
        let kept = filter_to_region(intervals, &window());
        let names: Vec<_> = kept.iter().map(|i| i.name.as_deref().unwrap()).collect();
        assert_eq!(names, ["c", "a", "b"]);
    }
}
