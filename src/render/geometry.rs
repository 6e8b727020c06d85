//! Hole-pattern geometry model
//!
//! Maps a byte and a lane index to the kind of hole punched there. This is
//! independent of how the tape is laid out on the page: both projections
//! call [`hole_kind`] and nothing else decides whether a hole exists.

use super::defaults::TapeConstants;

/// What is punched at one (frame, lane) position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoleKind {
    /// Sprocket hole, punched in every frame regardless of data
    Feed,
    /// Code hole for a set data bit
    Data,
    /// Unpunched position
    Absent,
}

impl HoleKind {
    pub fn is_punched(self) -> bool {
        !matches!(self, HoleKind::Absent)
    }
}

/// Data bit carried by `lane`, or `None` for the feed lane.
///
/// Lanes above the feed lane are shifted down by one so that bit numbering
/// skips it: with the feed hole at lane 3, lane 4 carries bit 3.
#[inline]
pub fn bit_for_lane(lane: usize, feed_lane: usize) -> Option<u32> {
    use std::cmp::Ordering;

    match lane.cmp(&feed_lane) {
        Ordering::Less => Some(lane as u32),
        Ordering::Equal => None,
        Ordering::Greater => Some((lane - 1) as u32),
    }
}

/// Kind of hole punched for `byte` at `lane`.
pub fn hole_kind(byte: u8, lane: usize, feed_lane: usize) -> HoleKind {
    match bit_for_lane(lane, feed_lane) {
        None => HoleKind::Feed,
        Some(bit) if bit < u8::BITS && (byte >> bit) & 1 == 1 => HoleKind::Data,
        Some(_) => HoleKind::Absent,
    }
}

/// One punched position. Derived on demand, never stored with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hole {
    /// Absolute byte index into the input
    pub frame: usize,
    pub lane: usize,
    pub kind: HoleKind,
}

/// All punched holes for `byte` at absolute index `frame`, lane 0 first.
pub fn frame_holes(frame: usize, byte: u8, tape: &TapeConstants) -> impl Iterator<Item = Hole> {
    let feed_lane = tape.feed_lane;
    (0..tape.lane_count).filter_map(move |lane| {
        let kind = hole_kind(byte, lane, feed_lane);
        kind.is_punched().then_some(Hole { frame, lane, kind })
    })
}

/// Rebuild a byte from the set of lanes punched as code holes.
pub fn byte_from_lanes(lanes: impl IntoIterator<Item = usize>, feed_lane: usize) -> u8 {
    lanes
        .into_iter()
        .filter_map(|lane| bit_for_lane(lane, feed_lane))
        .filter(|bit| *bit < u8::BITS)
        .fold(0u8, |acc, bit| acc | (1 << bit))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: usize = 3;

    fn punched_lanes(byte: u8) -> Vec<usize> {
        frame_holes(0, byte, &TapeConstants::FLEXOWRITER)
            .map(|h| h.lane)
            .collect()
    }

    #[test]
    fn feed_lane_always_punched() {
        for feed_lane in 1..8 {
            for byte in 0..=u8::MAX {
                assert_eq!(hole_kind(byte, feed_lane, feed_lane), HoleKind::Feed);
            }
        }
    }

    #[test]
    fn data_lanes_follow_bits() {
        for byte in 0..=u8::MAX {
            for lane in (0..9).filter(|l| *l != FEED) {
                let bit = if lane < FEED { lane } else { lane - 1 };
                let expected = if byte & (1 << bit) != 0 {
                    HoleKind::Data
                } else {
                    HoleKind::Absent
                };
                assert_eq!(hole_kind(byte, lane, FEED), expected, "byte {byte:#04x} lane {lane}");
            }
        }
    }

    #[test]
    fn blank_frame_has_only_feed_hole() {
        assert_eq!(punched_lanes(0x00), vec![3]);
    }

    #[test]
    fn full_frame_punches_every_lane() {
        assert_eq!(punched_lanes(0xFF), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn bit_three_skips_feed_lane() {
        assert_eq!(punched_lanes(0x0F), vec![0, 1, 2, 3, 4]);
        assert_eq!(punched_lanes(0x08), vec![3, 4]);
    }

    #[test]
    fn msb_is_lane_eight() {
        assert_eq!(punched_lanes(0x80), vec![3, 8]);
    }

    #[test]
    fn every_bit_has_one_data_lane() {
        let bits: Vec<_> = (0..9).filter_map(|lane| bit_for_lane(lane, FEED)).collect();
        assert_eq!(bits, (0..8).collect::<Vec<_>>());
        assert_eq!(bit_for_lane(FEED, FEED), None);
    }

    #[test]
    fn byte_rebuilds_from_code_lanes() {
        for byte in 0..=u8::MAX {
            let lanes = frame_holes(7, byte, &TapeConstants::FLEXOWRITER)
                .filter(|h| h.kind == HoleKind::Data)
                .map(|h| h.lane);
            assert_eq!(byte_from_lanes(lanes, FEED), byte);
        }
    }

    #[test]
    fn holes_carry_absolute_frame() {
        assert!(frame_holes(42, 0x55, &TapeConstants::FLEXOWRITER).all(|h| h.frame == 42));
    }
}
