//! Text listing of a tape's hole pattern, one frame per line
//!
//! Frames are shown as seen with the most significant edge on the left:
//!
//! ```text
//! 0 ○○○○ · ○○
//! ```

use std::fmt::Write as _;

use crate::render::geometry::{HoleKind, hole_kind};
use crate::render::{FrameRange, TapeConstants};

pub const PUNCHED: char = '○';
pub const BLANK: char = ' ';
pub const FEED: char = '·';

/// Hole pattern of one byte, highest lane first.
pub fn frame_pattern(byte: u8, tape: &TapeConstants) -> String {
    (0..tape.lane_count)
        .rev()
        .map(|lane| match hole_kind(byte, lane, tape.feed_lane) {
            HoleKind::Feed => FEED,
            HoleKind::Data => PUNCHED,
            HoleKind::Absent => BLANK,
        })
        .collect()
}

/// One `"<index> <pattern>"` line per frame in `range`.
pub fn listing(data: &[u8], range: FrameRange, tape: &TapeConstants) -> String {
    let mut out = String::new();
    for (frame, byte) in range.frames(data) {
        let _ = writeln!(out, "{} {}", frame, frame_pattern(byte, tape));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TAPE: TapeConstants = TapeConstants::FLEXOWRITER;

    #[test]
    fn feed_hole_splits_five_and_three() {
        assert_eq!(frame_pattern(0x00, &TAPE), "     ·   ");
        assert_eq!(frame_pattern(0xFF, &TAPE), "○○○○○·○○○");
        assert_eq!(frame_pattern(0x80, &TAPE), "○    ·   ");
        assert_eq!(frame_pattern(0x01, &TAPE), "     ·  ○");
        assert_eq!(frame_pattern(0x0F, &TAPE), "    ○·○○○");
    }

    #[test]
    fn lines_carry_absolute_index() {
        let data = [0x00, 0x01, 0x80];
        let range = FrameRange::new(1, 2).unwrap();
        assert_eq!(listing(&data, range, &TAPE), "1      ·  ○\n2 ○    ·   \n");
    }
}
