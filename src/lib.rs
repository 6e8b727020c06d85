//! Render binary files as 1-inch paper tape hole patterns in SVG.
//!
//! Each input byte becomes one frame of eight-level tape (Flexowriter /
//! FIPS-26 / ANSI X3.18): a feed hole in lane 3 and one code hole per set
//! bit in the remaining eight lanes. The tape can be drawn running
//! horizontally or vertically; both describe the same physical object.
//!
//! ```
//! use punchtape::{Orientation, RenderOptions};
//!
//! let svg = punchtape::render_svg(b"HI", &RenderOptions::new(Orientation::Vertical)).unwrap();
//! assert!(svg.starts_with("<svg"));
//! // 'H' punches two code holes, 'I' three, plus a feed hole each
//! assert_eq!(svg.matches("<circle").count(), 3 + 4);
//! ```

pub mod decode;
pub mod errors;
pub mod listing;
pub mod log;
pub mod render;
pub mod title;
pub mod types;

pub use errors::{ConfigError, DecodeError, NothingToRender, RenderError, SpliceError};
pub use render::{
    Drawing, FrameRange, Orientation, Padding, Projection, RenderOptions, TapeConstants,
    TapeProjection, render,
};
pub use types::Length;

/// Render the selected bytes of `data` to an SVG document.
pub fn render_svg(data: &[u8], options: &RenderOptions) -> Result<String, RenderError> {
    let drawing = render(data, options)?;
    Ok(drawing.to_svg().to_string())
}
