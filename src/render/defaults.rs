//! Tape standard constants (all in inches, FIPS-26 / ANSI X3.18 / Flexowriter)

use crate::errors::ConfigError;
use crate::types::Length as Inches;

/// Distance from the top tape edge to the feed hole center.
pub const FEED_CENTER_FROM_EDGE: Inches = Inches::inches(0.392);
pub const PITCH: Inches = Inches::inches(0.1);
pub const LANE_SPACING: Inches = Inches::inches(0.1);
pub const CODE_HOLE_DIAMETER: Inches = Inches::inches(0.072);
pub const FEED_HOLE_DIAMETER: Inches = Inches::inches(0.046);
pub const TAPE_WIDTH: Inches = Inches::inches(1.0);
pub const FOLD_MARKER_WIDTH: Inches = Inches::inches(0.02);
/// Frames between accordion folds of fan-fold tape.
pub const FOLD_PERIOD: usize = 85;

// Fill colors. Cosmetic only.
pub const TAPE_FILL: &str = "#abc";
pub const FOLD_FILL: &str = "#789";
pub const CODE_FILL: &str = "#012";
pub const FEED_FILL: &str = "#071727";
/// Border drawn around a horizontal tape.
pub const TAPE_STROKE: &str = "black";
pub const TAPE_BORDER_WIDTH: Inches = Inches::inches(0.01);

/// Physical description of a punched tape.
///
/// Lanes are numbered from the top (horizontal) edge; lane `feed_lane`
/// carries the sprocket hole and every other lane carries one data bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapeConstants {
    pub lane_count: usize,
    pub feed_lane: usize,
    /// Along-tape spacing between frame centers
    pub pitch: Inches,
    /// Cross-tape spacing between lane centers
    pub lane_spacing: Inches,
    pub code_hole_diameter: Inches,
    pub feed_hole_diameter: Inches,
    /// Full cross-tape width
    pub tape_width: Inches,
    /// Distance from the top edge to the feed hole center
    pub feed_center: Inches,
    pub fold_period: usize,
    pub fold_marker_width: Inches,
}

impl TapeConstants {
    /// One-inch, eight-level tape with the feed hole between bits 2 and 3.
    pub const FLEXOWRITER: TapeConstants = TapeConstants {
        lane_count: 9,
        feed_lane: 3,
        pitch: PITCH,
        lane_spacing: LANE_SPACING,
        code_hole_diameter: CODE_HOLE_DIAMETER,
        feed_hole_diameter: FEED_HOLE_DIAMETER,
        tape_width: TAPE_WIDTH,
        feed_center: FEED_CENTER_FROM_EDGE,
        fold_period: FOLD_PERIOD,
        fold_marker_width: FOLD_MARKER_WIDTH,
    };

    /// Center of lane 0, measured from the top edge.
    pub fn top_lane_offset(&self) -> Inches {
        self.feed_center - self.lane_spacing * self.feed_lane as f64
    }

    /// Highest lane index.
    pub fn last_lane(&self) -> usize {
        self.lane_count - 1
    }

    /// Number of lanes carrying data bits.
    pub fn data_lanes(&self) -> usize {
        self.lane_count - 1
    }

    pub fn feed_radius(&self) -> Inches {
        self.feed_hole_diameter.half()
    }

    pub fn code_radius(&self) -> Inches {
        self.code_hole_diameter.half()
    }

    /// Check that the constants describe a tape the geometry model can drive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lane_count < 3 || self.feed_lane == 0 || self.feed_lane >= self.lane_count - 1 {
            return Err(ConfigError::FeedLaneOnEdge {
                feed_lane: self.feed_lane,
                lane_count: self.lane_count,
            });
        }
        if self.data_lanes() > u8::BITS as usize {
            return Err(ConfigError::TooManyLanes {
                data_lanes: self.data_lanes(),
            });
        }
        if self.fold_period == 0 {
            return Err(ConfigError::ZeroFoldPeriod);
        }

        let positive = [
            ("pitch", self.pitch),
            ("lane spacing", self.lane_spacing),
            ("code hole diameter", self.code_hole_diameter),
            ("feed hole diameter", self.feed_hole_diameter),
            ("tape width", self.tape_width),
            ("fold marker width", self.fold_marker_width),
        ];
        for (field, value) in positive {
            Inches::try_positive(value.raw())
                .map_err(|reason| ConfigError::InvalidDimension { field, reason })?;
        }
        Inches::try_new(self.feed_center.raw()).map_err(|reason| ConfigError::InvalidDimension {
            field: "feed hole center",
            reason,
        })?;
        Ok(())
    }
}

impl Default for TapeConstants {
    fn default() -> Self {
        Self::FLEXOWRITER
    }
}
