//! Tape projections: abstract (frame, lane) positions to page coordinates
//!
//! The horizontal projection runs the tape left to right with lane 0 at the
//! top. The vertical projection is the same tape swapped onto the other axis
//! and mirrored so the most significant lane lands on the left:
//!
//! ```text
//! vertical(frame, lane) == swap_and_mirror(horizontal(frame, lane))
//! ```
//!
//! where `swap_and_mirror(x, y) = (2c - y, x)` and `c` is the center line of
//! the lane band. All coordinates are inches, y pointing down.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use super::defaults::{TAPE_BORDER_WIDTH, TapeConstants};
use super::fold::FoldPolicy;
use super::slice::{FrameRange, Padding, medium_length};
use crate::types::Length as Inches;

/// Axis-aligned rectangle in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectIn {
    pub origin: DVec2,
    pub size: DVec2,
}

impl RectIn {
    pub fn new(origin: DVec2, size: DVec2) -> Self {
        Self { origin, size }
    }
}

/// Which way the tape runs across the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Left to right, lane 0 on top
    #[default]
    Horizontal,
    /// Top to bottom, lane 8 on the left
    Vertical,
}

impl Orientation {
    /// Leader/trailer padding used when none is given.
    pub fn default_padding(self) -> Padding {
        match self {
            Orientation::Horizontal => Padding::new(Inches(0.25), Inches(0.25)),
            Orientation::Vertical => Padding::NONE,
        }
    }

    /// Whether fold markers are drawn unless overridden.
    pub fn default_fold_policy(self) -> FoldPolicy {
        match self {
            Orientation::Horizontal => FoldPolicy::Periodic,
            Orientation::Vertical => FoldPolicy::Off,
        }
    }

    /// Stroke width of the border around the tape background, if any.
    pub fn border_width(self) -> Option<Inches> {
        match self {
            Orientation::Horizontal => Some(TAPE_BORDER_WIDTH),
            Orientation::Vertical => None,
        }
    }
}

/// Everything a projection needs besides the orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub tape: TapeConstants,
    pub padding: Padding,
    pub range: FrameRange,
}

impl Layout {
    pub fn new(tape: TapeConstants, padding: Padding, range: FrameRange) -> Self {
        Self {
            tape,
            padding,
            range,
        }
    }

    /// Distance along the tape to the center of absolute `frame`.
    pub fn along(&self, frame: usize) -> Inches {
        let offset = frame as f64 - self.range.start() as f64 + 0.5;
        self.padding.start + self.tape.pitch * offset
    }

    /// Distance along the tape to the leading edge of slice offset `offset`.
    pub fn boundary(&self, offset: usize) -> Inches {
        self.padding.start + self.tape.pitch * offset as f64
    }

    /// Distance across the tape (from the lane-0 edge) to the center of `lane`.
    pub fn across(&self, lane: usize) -> Inches {
        self.tape.top_lane_offset() + self.tape.lane_spacing * lane as f64
    }

    /// Total tape length along the data axis.
    pub fn length(&self) -> Inches {
        medium_length(self.padding, self.range.frame_count(), self.tape.pitch)
    }

    /// Center line of the lane band, the mirror axis between orientations.
    pub fn lane_band_center(&self) -> Inches {
        self.tape.top_lane_offset() + self.tape.lane_spacing * (self.tape.last_lane() as f64 / 2.0)
    }

    /// Nearest (frame, lane) to an along/across position, if it lies within
    /// half a pitch and half a lane spacing of that hole center.
    fn nearest(&self, along: f64, across: f64) -> Option<(usize, usize)> {
        let pitch = self.tape.pitch.raw();
        let spacing = self.tape.lane_spacing.raw();

        let frame_pos = (along - self.padding.start.raw()) / pitch - 0.5;
        let lane_pos = (across - self.tape.top_lane_offset().raw()) / spacing;
        let frame_offset = frame_pos.round();
        let lane = lane_pos.round();

        let within = |pos: f64, snapped: f64| (pos - snapped).abs() < 0.5;
        if !within(frame_pos, frame_offset) || !within(lane_pos, lane) {
            return None;
        }
        if frame_offset < 0.0 || lane < 0.0 {
            return None;
        }

        let frame = self.range.start() + frame_offset as usize;
        let lane = lane as usize;
        (self.range.contains(frame) && lane < self.tape.lane_count).then_some((frame, lane))
    }
}

/// Coordinate mapping for one tape orientation.
#[enum_dispatch]
pub trait Projection {
    fn layout(&self) -> &Layout;

    fn orientation(&self) -> Orientation;

    /// Center of the hole at absolute `frame` and `lane`.
    fn hole_center(&self, frame: usize, lane: usize) -> DVec2;

    /// Overall drawing size (width, height).
    fn size(&self) -> DVec2;

    /// Fold marker centered on the leading boundary of slice offset `offset`,
    /// spanning the full tape width.
    fn fold_marker(&self, offset: usize) -> RectIn;

    /// Inverse of [`hole_center`](Projection::hole_center): the (frame, lane)
    /// whose hole center is nearest `point`, if `point` is on the grid.
    fn locate(&self, point: DVec2) -> Option<(usize, usize)>;

    /// Length of the tape along its data axis.
    fn length(&self) -> Inches {
        self.layout().length()
    }
}

/// Tape running left to right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    pub layout: Layout,
}

impl Projection for Horizontal {
    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn orientation(&self) -> Orientation {
        Orientation::Horizontal
    }

    fn hole_center(&self, frame: usize, lane: usize) -> DVec2 {
        dvec2(self.layout.along(frame).raw(), self.layout.across(lane).raw())
    }

    fn size(&self) -> DVec2 {
        dvec2(self.layout.length().raw(), self.layout.tape.tape_width.raw())
    }

    fn fold_marker(&self, offset: usize) -> RectIn {
        let width = self.layout.tape.fold_marker_width;
        let x = self.layout.boundary(offset) - width.half();
        RectIn::new(
            dvec2(x.raw(), 0.0),
            dvec2(width.raw(), self.layout.tape.tape_width.raw()),
        )
    }

    fn locate(&self, point: DVec2) -> Option<(usize, usize)> {
        self.layout.nearest(point.x, point.y)
    }
}

/// Tape running top to bottom, most significant lane on the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertical {
    pub layout: Layout,
}

impl Vertical {
    /// Lane index after mirroring: lane 8 becomes column 0.
    fn column(&self, lane: usize) -> usize {
        self.layout.tape.last_lane() - lane
    }
}

impl Projection for Vertical {
    fn layout(&self) -> &Layout {
        &self.layout
    }

    fn orientation(&self) -> Orientation {
        Orientation::Vertical
    }

    fn hole_center(&self, frame: usize, lane: usize) -> DVec2 {
        dvec2(
            self.layout.across(self.column(lane)).raw(),
            self.layout.along(frame).raw(),
        )
    }

    fn size(&self) -> DVec2 {
        dvec2(self.layout.tape.tape_width.raw(), self.layout.length().raw())
    }

    fn fold_marker(&self, offset: usize) -> RectIn {
        let height = self.layout.tape.fold_marker_width;
        let y = self.layout.boundary(offset) - height.half();
        RectIn::new(
            dvec2(0.0, y.raw()),
            dvec2(self.layout.tape.tape_width.raw(), height.raw()),
        )
    }

    fn locate(&self, point: DVec2) -> Option<(usize, usize)> {
        let (frame, column) = self.layout.nearest(point.y, point.x)?;
        Some((frame, self.column(column)))
    }
}

/// The projection selected for a render.
#[enum_dispatch(Projection)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapeProjection {
    Horizontal(Horizontal),
    Vertical(Vertical),
}

impl TapeProjection {
    pub fn new(orientation: Orientation, layout: Layout) -> Self {
        match orientation {
            Orientation::Horizontal => Horizontal { layout }.into(),
            Orientation::Vertical => Vertical { layout }.into(),
        }
    }
}

/// Carry a horizontal-projection point onto the vertical projection:
/// swap the axes, then mirror across the lane band center line `axis`.
pub fn swap_and_mirror(point: DVec2, axis: Inches) -> DVec2 {
    dvec2(2.0 * axis.raw() - point.y, point.x)
}
