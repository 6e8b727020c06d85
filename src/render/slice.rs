//! Byte range selection and medium length arithmetic

use crate::errors::NothingToRender;
use crate::types::Length as Inches;

/// Inclusive range of byte indices to punch. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRange {
    start: usize,
    end: usize,
}

impl FrameRange {
    /// Clamp a requested byte range to an input of `total_len` bytes.
    ///
    /// A negative start is clamped to 0. A missing or past-the-end `end` means
    /// the last byte. An empty input or a start past the end yields
    /// [`NothingToRender`].
    pub fn select(
        total_len: usize,
        requested_start: i64,
        requested_end: Option<i64>,
    ) -> Result<FrameRange, NothingToRender> {
        if total_len == 0 {
            return Err(NothingToRender::EmptyInput);
        }

        let last = (total_len - 1) as i64;
        if requested_start < 0 {
            crate::log::warn!(requested_start, "negative start byte clamped to 0");
        }
        let start = requested_start.max(0);
        let end = match requested_end {
            Some(end) if end < last => end,
            Some(end) if end > last => {
                crate::log::warn!(end, last, "end byte past end of input");
                last
            }
            _ => last,
        };
        if start > end {
            return Err(NothingToRender::InvertedRange { start, end });
        }

        Ok(FrameRange {
            start: start as usize,
            end: end as usize,
        })
    }

    /// A range over `start..=end`, for callers that already hold valid indices.
    pub fn new(start: usize, end: usize) -> Option<FrameRange> {
        (start <= end).then_some(FrameRange { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn frame_count(&self) -> usize {
        self.end - self.start + 1
    }

    /// Position of absolute `frame` within the range.
    pub fn offset_of(&self, frame: usize) -> usize {
        frame - self.start
    }

    pub fn contains(&self, frame: usize) -> bool {
        (self.start..=self.end).contains(&frame)
    }

    /// The selected bytes of `data`, or `None` if `data` is too short to
    /// hold the range.
    pub fn slice<'a>(&self, data: &'a [u8]) -> Option<&'a [u8]> {
        data.get(self.start..=self.end)
    }

    /// Absolute frame indices paired with their bytes. Yields nothing if
    /// `data` is too short to hold the range.
    pub fn frames<'a>(&self, data: &'a [u8]) -> impl Iterator<Item = (usize, u8)> + 'a {
        let start = self.start;
        self.slice(data)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(move |(i, byte)| (start + i, *byte))
    }
}

/// Blank tape before the first and after the last punched frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub start: Inches,
    pub end: Inches,
}

impl Padding {
    pub const NONE: Padding = Padding {
        start: Inches::ZERO,
        end: Inches::ZERO,
    };

    pub const fn new(start: Inches, end: Inches) -> Padding {
        Padding { start, end }
    }
}

/// Total tape length along the data axis.
pub fn medium_length(padding: Padding, frame_count: usize, pitch: Inches) -> Inches {
    padding.start + pitch * frame_count as f64 + padding.end
}
