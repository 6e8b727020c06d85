//! Title and trailer blocks on tape images
//!
//! Tape images usually start and end with blank (0x00) leader. A title
//! block (e.g. letters punched as hole art) can be spliced into that leader,
//! and extracted again from a tape whose title ends at the first byte with
//! the high bit set.

use crate::errors::SpliceError;

/// A title extracted from the start of a tape image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleStrip<'a> {
    /// Bytes before the first byte with the MSB set
    pub title: &'a [u8],
    /// The byte that ended the title, `None` if the image ran out first
    pub terminator: Option<u8>,
}

/// Split off the leading bytes whose most significant bit is clear.
pub fn strip_title(data: &[u8]) -> TitleStrip<'_> {
    match data.iter().position(|b| b & 0x80 != 0) {
        Some(end) => TitleStrip {
            title: &data[..end],
            terminator: Some(data[end]),
        },
        None => TitleStrip {
            title: data,
            terminator: None,
        },
    }
}

/// Overlay `title` onto the start and/or `trailer` onto the end of `tape`.
///
/// The regions being replaced must be all null bytes.
pub fn splice(tape: &[u8], title: Option<&[u8]>, trailer: Option<&[u8]>) -> Result<Vec<u8>, SpliceError> {
    if title.is_none() && trailer.is_none() {
        return Err(SpliceError::NothingToSplice);
    }
    for (block, data) in [("title", title), ("trailer", trailer)] {
        if data.is_some_and(<[u8]>::is_empty) {
            return Err(SpliceError::EmptyBlock { block });
        }
    }

    let title = title.unwrap_or_default();
    let trailer = trailer.unwrap_or_default();
    let blocks = title.len() + trailer.len();
    if blocks > tape.len() {
        return Err(SpliceError::BlocksTooLong {
            blocks,
            tape: tape.len(),
        });
    }

    let trailer_start = tape.len() - trailer.len();
    if tape[..title.len()].iter().any(|b| *b != 0) {
        return Err(SpliceError::RegionNotNull {
            region: format!("the first {} bytes", title.len()),
        });
    }
    if tape[trailer_start..].iter().any(|b| *b != 0) {
        return Err(SpliceError::RegionNotNull {
            region: format!("the last {} bytes", trailer.len()),
        });
    }

    crate::log::debug!(
        title = title.len(),
        trailer = trailer.len(),
        tape = tape.len(),
        "splicing title blocks"
    );

    let mut out = Vec::with_capacity(tape.len());
    out.extend_from_slice(title);
    out.extend_from_slice(&tape[title.len()..trailer_start]);
    out.extend_from_slice(trailer);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_ends_at_first_msb_byte() {
        let data = [0x10, 0x7F, 0x00, 0x80, 0x01];
        let strip = strip_title(&data);
        assert_eq!(strip.title, &[0x10, 0x7F, 0x00]);
        assert_eq!(strip.terminator, Some(0x80));
    }

    #[test]
    fn title_without_terminator_is_whole_image() {
        let data = [0x01, 0x02];
        let strip = strip_title(&data);
        assert_eq!(strip.title, &data);
        assert_eq!(strip.terminator, None);
        assert_eq!(strip_title(&[0xC0]).title, &[] as &[u8]);
    }

    #[test]
    fn splices_title_and_trailer() {
        let tape = [0, 0, 0, 7, 8, 0, 0];
        let out = splice(&tape, Some(&[1, 2][..]), Some(&[9][..])).unwrap();
        assert_eq!(out, vec![1, 2, 0, 7, 8, 0, 9]);
        assert_eq!(out.len(), tape.len());
    }

    #[test]
    fn splices_title_only() {
        let tape = [0, 0, 5];
        assert_eq!(splice(&tape, Some(&[3][..]), None).unwrap(), vec![3, 0, 5]);
    }

    #[test]
    fn blocks_may_cover_the_whole_tape() {
        let tape = [0, 0, 0];
        assert_eq!(
            splice(&tape, Some(&[1, 2][..]), Some(&[3][..])).unwrap(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn refuses_to_overwrite_data() {
        let tape = [0, 4, 0, 0];
        assert_eq!(
            splice(&tape, Some(&[1, 1][..]), None),
            Err(SpliceError::RegionNotNull {
                region: "the first 2 bytes".into()
            })
        );
        let tape = [0, 0, 0, 4];
        assert_eq!(
            splice(&tape, None, Some(&[1][..])),
            Err(SpliceError::RegionNotNull {
                region: "the last 1 bytes".into()
            })
        );
    }

    #[test]
    fn rejects_bad_blocks() {
        assert_eq!(splice(&[0; 4], None, None), Err(SpliceError::NothingToSplice));
        assert_eq!(
            splice(&[0; 4], Some(&[][..]), None),
            Err(SpliceError::EmptyBlock { block: "title" })
        );
        assert_eq!(
            splice(&[0; 2], Some(&[1, 2][..]), Some(&[3][..])),
            Err(SpliceError::BlocksTooLong { blocks: 3, tape: 2 })
        );
    }
}
