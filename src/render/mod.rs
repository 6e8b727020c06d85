//! Paper tape rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Tape standard constants and fills
//! - `geometry`: Which holes a byte punches, independent of orientation
//! - `slice`: Byte range selection and tape length
//! - `projection`: Horizontal and vertical (frame, lane) → (x, y) mappings
//! - `fold`: Fold marker policy
//! - `svg`: SVG generation
//!
//! Data flows bytes → [`FrameRange`] → [`hole_kind`] per lane →
//! [`Projection`] → [`Drawing`] → [`Svg`](svg::Svg).

pub mod defaults;
pub mod fold;
pub mod geometry;
pub mod projection;
pub mod slice;
pub mod svg;

pub use defaults::TapeConstants;
pub use fold::FoldPolicy;
pub use geometry::{Hole, HoleKind, hole_kind};
pub use projection::{Layout, Orientation, Projection, RectIn, TapeProjection};
pub use slice::{FrameRange, Padding};

use glam::{DVec2, dvec2};

use crate::errors::RenderError;
use crate::types::Length as Inches;

/// Everything that varies between renders of the same input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub tape: TapeConstants,
    pub orientation: Orientation,
    /// `None` uses the orientation's default padding
    pub padding: Option<Padding>,
    /// First byte to draw; negative values clamp to 0
    pub start_byte: i64,
    /// Last byte to draw (inclusive); `None` means end of input
    pub end_byte: Option<i64>,
    /// `None` uses the orientation's default fold policy
    pub fold_markers: Option<bool>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tape: TapeConstants::FLEXOWRITER,
            orientation: Orientation::Horizontal,
            padding: None,
            start_byte: 0,
            end_byte: None,
            fold_markers: None,
        }
    }
}

impl RenderOptions {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ..Self::default()
        }
    }

    pub fn effective_padding(&self) -> Padding {
        self.padding
            .unwrap_or_else(|| self.orientation.default_padding())
    }

    pub fn fold_policy(&self) -> FoldPolicy {
        self.fold_markers
            .map(FoldPolicy::from_enabled)
            .unwrap_or_else(|| self.orientation.default_fold_policy())
    }
}

/// One punched hole placed on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleMark {
    pub hole: Hole,
    pub center: DVec2,
    pub radius: Inches,
}

/// A rendered tape: background, fold markers and holes, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    /// Overall (width, height) in inches
    pub size: DVec2,
    pub background: RectIn,
    /// Stroke width of the background border, `None` for no border
    pub border: Option<Inches>,
    pub folds: Vec<RectIn>,
    pub holes: Vec<HoleMark>,
    pub projection: TapeProjection,
}

impl Drawing {
    pub fn range(&self) -> FrameRange {
        self.projection.layout().range
    }

    pub fn to_svg(&self) -> svg::Svg {
        svg::generate_svg(self)
    }
}

/// Lay out the selected bytes of `data` as a tape drawing.
///
/// Returns [`RenderError::Nothing`] for an empty input or an inverted byte
/// range; callers treat that as a no-op rather than a failure.
pub fn render(data: &[u8], options: &RenderOptions) -> Result<Drawing, RenderError> {
    let tape = options.tape;
    tape.validate()?;

    let range = FrameRange::select(data.len(), options.start_byte, options.end_byte)?;
    let layout = Layout::new(tape, options.effective_padding(), range);
    let projection = TapeProjection::new(options.orientation, layout);

    crate::log::debug!(
        orientation = ?options.orientation,
        start = range.start(),
        end = range.end(),
        frames = range.frame_count(),
        length = projection.length().raw(),
        "render tape"
    );

    let size = projection.size();
    let background = RectIn::new(dvec2(0.0, 0.0), size);

    let folds: Vec<RectIn> = options
        .fold_policy()
        .offsets(range.frame_count(), tape.fold_period)
        .map(|offset| projection.fold_marker(offset))
        .collect();

    let mut holes = Vec::with_capacity(range.frame_count() * tape.lane_count);
    for (frame, byte) in range.frames(data) {
        for hole in geometry::frame_holes(frame, byte, &tape) {
            let radius = match hole.kind {
                HoleKind::Feed => tape.feed_radius(),
                HoleKind::Data | HoleKind::Absent => tape.code_radius(),
            };
            holes.push(HoleMark {
                hole,
                center: projection.hole_center(hole.frame, hole.lane),
                radius,
            });
        }
    }

    crate::log::trace!(holes = holes.len(), folds = folds.len(), "drawing built");

    Ok(Drawing {
        size,
        background,
        border: options.orientation.border_width(),
        folds,
        holes,
        projection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NothingToRender;

    fn lanes_at(drawing: &Drawing, frame: usize) -> Vec<usize> {
        drawing
            .holes
            .iter()
            .filter(|m| m.hole.frame == frame)
            .map(|m| m.hole.lane)
            .collect()
    }

    #[test]
    fn one_circle_per_punched_position() {
        let data = [0x00, 0xFF, 0x0F];
        let drawing = render(&data, &RenderOptions::default()).unwrap();
        assert_eq!(drawing.holes.len(), 1 + 9 + 5);
        assert_eq!(lanes_at(&drawing, 0), vec![3]);
        assert_eq!(lanes_at(&drawing, 1), (0..9).collect::<Vec<_>>());
        assert_eq!(lanes_at(&drawing, 2), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn radius_follows_hole_kind() {
        let drawing = render(&[0x01], &RenderOptions::default()).unwrap();
        for mark in &drawing.holes {
            let expected = match mark.hole.kind {
                HoleKind::Feed => 0.023,
                _ => 0.036,
            };
            assert!((mark.radius.raw() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn horizontal_size_includes_padding() {
        let data = vec![0u8; 12];
        let drawing = render(&data, &RenderOptions::default()).unwrap();
        assert_eq!(drawing.size, dvec2(0.25 + 0.1 * 12.0 + 0.25, 1.0));
        assert_eq!(drawing.background.size, drawing.size);
    }

    #[test]
    fn vertical_size_defaults_to_no_padding() {
        let data = vec![0u8; 12];
        let drawing = render(&data, &RenderOptions::new(Orientation::Vertical)).unwrap();
        assert_eq!(drawing.size, dvec2(1.0, 0.0 + 0.1 * 12.0 + 0.0));
    }

    #[test]
    fn explicit_padding_overrides_default() {
        let options = RenderOptions {
            padding: Some(Padding::new(Inches(1.0), Inches(2.0))),
            ..RenderOptions::new(Orientation::Vertical)
        };
        let drawing = render(&[1, 2, 3], &options).unwrap();
        assert_eq!(drawing.size.y, 1.0 + 0.1 * 3.0 + 2.0);
    }

    #[test]
    fn folds_only_on_horizontal_by_default() {
        let data = vec![0xAAu8; 200];
        let horizontal = render(&data, &RenderOptions::default()).unwrap();
        let xs: Vec<f64> = horizontal.folds.iter().map(|r| r.origin.x).collect();
        assert_eq!(xs.len(), 3);
        for (x, offset) in xs.iter().zip([0.0, 85.0, 170.0]) {
            assert!((x - (0.25 + offset * 0.1 - 0.01)).abs() < 1e-9);
        }

        let vertical = render(&data, &RenderOptions::new(Orientation::Vertical)).unwrap();
        assert!(vertical.folds.is_empty());
    }

    #[test]
    fn only_horizontal_tape_has_a_border() {
        let horizontal = render(&[1], &RenderOptions::default()).unwrap();
        assert_eq!(horizontal.border, Some(Inches(0.01)));
        let vertical = render(&[1], &RenderOptions::new(Orientation::Vertical)).unwrap();
        assert_eq!(vertical.border, None);
    }

    #[test]
    fn folds_can_be_forced_on_vertical() {
        let data = vec![0u8; 100];
        let options = RenderOptions {
            fold_markers: Some(true),
            ..RenderOptions::new(Orientation::Vertical)
        };
        let drawing = render(&data, &options).unwrap();
        assert_eq!(drawing.folds.len(), 2);
        assert_eq!(drawing.folds[1].size, dvec2(1.0, 0.02));
    }

    #[test]
    fn folds_count_from_slice_start() {
        let data = vec![0u8; 300];
        let options = RenderOptions {
            start_byte: 50,
            end_byte: Some(149),
            ..RenderOptions::default()
        };
        let drawing = render(&data, &options).unwrap();
        assert_eq!(drawing.folds.len(), 2);
        assert!((drawing.folds[0].origin.x - 0.24).abs() < 1e-9);
        assert_eq!(drawing.range().frame_count(), 100);
    }

    #[test]
    fn slice_selects_frames() {
        let data = [0x00, 0x01, 0x02, 0x03];
        let options = RenderOptions {
            start_byte: 1,
            end_byte: Some(2),
            ..RenderOptions::default()
        };
        let drawing = render(&data, &options).unwrap();
        let frames: Vec<usize> = drawing.holes.iter().map(|m| m.hole.frame).collect();
        assert!(frames.iter().all(|f| (1..=2).contains(f)));
        // First drawn frame sits half a pitch after the padding
        let first = drawing.holes.iter().find(|m| m.hole.frame == 1).unwrap();
        assert!((first.center.x - 0.30).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_not_drawn() {
        assert!(matches!(
            render(&[], &RenderOptions::default()),
            Err(RenderError::Nothing(NothingToRender::EmptyInput))
        ));
    }

    #[test]
    fn inverted_range_is_not_drawn() {
        let options = RenderOptions {
            start_byte: 5,
            end_byte: Some(2),
            ..RenderOptions::default()
        };
        assert!(matches!(
            render(&[0u8; 10], &options),
            Err(RenderError::Nothing(NothingToRender::InvertedRange { start: 5, end: 2 }))
        ));
    }

    #[test]
    fn invalid_tape_is_rejected() {
        let options = RenderOptions {
            tape: TapeConstants {
                feed_lane: 0,
                ..TapeConstants::FLEXOWRITER
            },
            ..RenderOptions::default()
        };
        assert!(matches!(
            render(&[1], &options),
            Err(RenderError::Config(_))
        ));
    }
}
