// Lane layout for genome browser tracks
pub mod error;
pub mod feature;
pub mod gtf_reader;
pub mod lanes;
pub mod layout;
pub mod psl_reader;
pub mod region;
pub mod track;

pub use error::{Result, TrackError};
pub use feature::{Interval, SubFeature, SubFeatureKind};
pub use lanes::{assign_lanes, LaneAssignment, LaneConfig};
pub use layout::{layout, LayoutResult, PlacedInterval};
pub use region::{filter_to_region, Region};
pub use track::{Track, TrackSource, TrackStyle};
