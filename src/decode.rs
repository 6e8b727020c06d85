//! Recover bytes from a drawn hole pattern
//!
//! The inverse of rendering: each circle is classified by radius, placed
//! back on the (frame, lane) grid with [`Projection::locate`], and the
//! code lanes of every frame are folded back into a byte with
//! [`byte_from_lanes`].

use glam::DVec2;

use crate::errors::DecodeError;
use crate::render::geometry::{HoleKind, bit_for_lane, byte_from_lanes};
use crate::render::{Drawing, Projection, TapeProjection};

/// Slack when matching a radius, enough to absorb 3-decimal rounding.
pub const RADIUS_TOLERANCE: f64 = 0.0015;

/// Classify a circle radius as a feed or code hole.
pub fn classify_radius(radius: f64, projection: &TapeProjection) -> Result<HoleKind, DecodeError> {
    let tape = &projection.layout().tape;
    let feed = (radius - tape.feed_radius().raw()).abs();
    let code = (radius - tape.code_radius().raw()).abs();

    if feed <= RADIUS_TOLERANCE && feed <= code {
        Ok(HoleKind::Feed)
    } else if code <= RADIUS_TOLERANCE {
        Ok(HoleKind::Data)
    } else {
        Err(DecodeError::UnknownRadius { radius })
    }
}

/// Rebuild the bytes of every frame in the projection's range from a set of
/// circles given as (center, radius).
pub fn decode_circles(
    circles: impl IntoIterator<Item = (DVec2, f64)>,
    projection: &TapeProjection,
) -> Result<Vec<u8>, DecodeError> {
    let layout = projection.layout();
    let range = layout.range;
    let feed_lane = layout.tape.feed_lane;

    let mut code_lanes = vec![Vec::new(); range.frame_count()];
    let mut fed = vec![false; range.frame_count()];

    for (center, radius) in circles {
        let kind = classify_radius(radius, projection)?;
        let (frame, lane) = projection.locate(center).ok_or(DecodeError::OffGrid {
            x: center.x,
            y: center.y,
        })?;
        let offset = range.offset_of(frame);

        match (kind, bit_for_lane(lane, feed_lane)) {
            (HoleKind::Feed, None) => fed[offset] = true,
            (HoleKind::Feed, Some(_)) => return Err(DecodeError::FeedOnDataLane { frame, lane }),
            (_, None) => return Err(DecodeError::CodeOnFeedLane { frame }),
            (_, Some(_)) => code_lanes[offset].push(lane),
        }
    }

    if let Some(offset) = fed.iter().position(|f| !f) {
        return Err(DecodeError::MissingFeed {
            frame: range.start() + offset,
        });
    }

    let bytes: Vec<u8> = code_lanes
        .into_iter()
        .map(|lanes| byte_from_lanes(lanes, feed_lane))
        .collect();

    crate::log::debug!(frames = bytes.len(), "decoded tape");
    Ok(bytes)
}

/// Rebuild the drawn bytes from a drawing's hole positions and radii.
pub fn decode(drawing: &Drawing) -> Result<Vec<u8>, DecodeError> {
    decode_circles(
        drawing.holes.iter().map(|mark| (mark.center, mark.radius.raw())),
        &drawing.projection,
    )
}
