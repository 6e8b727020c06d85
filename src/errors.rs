//! Error types with rich diagnostics using miette
//!
//! Only I/O failures are fatal for the `render` command. An empty file or
//! an inverted byte range is reported as a warning-level
//! [`NothingToRender`] and the process still exits successfully.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::types::NumericError;

// ============================================================================
// Configuration Errors
// ============================================================================

/// A [`TapeConstants`](crate::render::defaults::TapeConstants) value that
/// does not describe a usable tape.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("feed lane {feed_lane} must lie strictly inside lanes 0..{lane_count}")]
    #[diagnostic(
        code(punchtape::config::feed_lane),
        help("the feed hole sits between data lanes, never on an edge")
    )]
    FeedLaneOnEdge { feed_lane: usize, lane_count: usize },

    #[error("{data_lanes} data lanes cannot be fed from one byte per frame")]
    #[diagnostic(
        code(punchtape::config::lane_count),
        help("a tape carries at most 8 data lanes plus the feed lane")
    )]
    TooManyLanes { data_lanes: usize },

    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(punchtape::config::dimension))]
    InvalidDimension {
        field: &'static str,
        reason: NumericError,
    },

    #[error("fold period must be at least one frame")]
    #[diagnostic(code(punchtape::config::fold_period))]
    ZeroFoldPeriod,
}

// ============================================================================
// Empty Renders
// ============================================================================

/// Reasons a render produced no drawing. These are warnings, not failures.
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NothingToRender {
    #[error("No data in file; nothing to render.")]
    #[diagnostic(code(punchtape::render::empty_input), severity(Warning))]
    EmptyInput,

    #[error("start-byte ({start}) > end-byte ({end}). No bytes will be drawn.")]
    #[diagnostic(code(punchtape::render::inverted_range), severity(Warning))]
    InvertedRange { start: i64, end: i64 },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that occur while laying out a drawing
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Nothing(#[from] NothingToRender),
}

impl RenderError {
    /// Whether the render failed, as opposed to having nothing to draw.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RenderError::Nothing(_))
    }
}

// ============================================================================
// Decode Errors
// ============================================================================

/// Errors recovering bytes from a drawing's hole set
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("hole at ({x:.3}, {y:.3}) is not on the lane grid")]
    #[diagnostic(code(punchtape::decode::off_grid))]
    OffGrid { x: f64, y: f64 },

    #[error("frame {frame} has no feed hole")]
    #[diagnostic(
        code(punchtape::decode::missing_feed),
        help("every frame of a punched tape carries a feed hole")
    )]
    MissingFeed { frame: usize },

    #[error("frame {frame} has a code hole on the feed lane")]
    #[diagnostic(code(punchtape::decode::code_on_feed_lane))]
    CodeOnFeedLane { frame: usize },

    #[error("frame {frame} has a feed-sized hole on data lane {lane}")]
    #[diagnostic(code(punchtape::decode::feed_on_data_lane))]
    FeedOnDataLane { frame: usize, lane: usize },

    #[error("hole with radius {radius:.3} matches neither the feed nor the code hole")]
    #[diagnostic(code(punchtape::decode::unknown_radius))]
    UnknownRadius { radius: f64 },
}

// ============================================================================
// Title Splice Errors
// ============================================================================

/// Errors overlaying a title or trailer block onto a tape image
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum SpliceError {
    #[error("provide at least a title or a trailer block")]
    #[diagnostic(code(punchtape::splice::nothing_to_splice))]
    NothingToSplice,

    #[error("the {block} block is empty; nothing to write")]
    #[diagnostic(code(punchtape::splice::empty_block))]
    EmptyBlock { block: &'static str },

    #[error("title + trailer length ({blocks} bytes) exceeds the tape image ({tape} bytes)")]
    #[diagnostic(code(punchtape::splice::too_long))]
    BlocksTooLong { blocks: usize, tape: usize },

    #[error("{region} of the tape is not all null bytes; refusing to overwrite it")]
    #[diagnostic(
        code(punchtape::splice::region_not_null),
        help("only blank leader or trailer (0x00 frames) may be replaced")
    )]
    RegionNotNull { region: String },
}

// ============================================================================
// CLI Errors
// ============================================================================

/// Fatal errors surfaced by the `punchtape` binary
#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("unable to read {}", .path.display())]
    #[diagnostic(code(punchtape::io::read))]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write {}", .path.display())]
    #[diagnostic(code(punchtape::io::write))]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("--tape-out must be different from --tape-in to avoid data loss")]
    #[diagnostic(code(punchtape::io::same_path))]
    SamePath,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Splice(#[from] SpliceError),
}
