//! punchtape CLI: render, list and edit paper tape images.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use miette::Report;
use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use punchtape::errors::CliError;
use punchtape::{
    FrameRange, Length, NothingToRender, Orientation, Padding, RenderError, RenderOptions,
    TapeConstants, listing, title,
};

#[derive(Parser)]
#[command(name = "punchtape")]
#[command(about = "Render binary files as 1-inch paper tape hole patterns (FIPS-26 / Flexowriter)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a binary file as a paper tape hole pattern in SVG.
    Render(RenderArgs),

    /// Print the hole pattern of each frame as text.
    Dump(DumpArgs),

    /// Copy the leading title of a tape image, up to the first byte with the MSB set.
    StripTitle {
        /// Tape image to read.
        input_file: PathBuf,
        /// File to write the title into.
        output_file: PathBuf,
    },

    /// Replace null-filled header/trailer regions of a tape image with binary blocks.
    Splice(SpliceArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliOrientation {
    /// Tape runs left to right
    Horizontal,
    /// Tape runs top to bottom
    Vertical,
}

impl From<CliOrientation> for Orientation {
    fn from(value: CliOrientation) -> Self {
        match value {
            CliOrientation::Horizontal => Orientation::Horizontal,
            CliOrientation::Vertical => Orientation::Vertical,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct ByteRangeArgs {
    /// Zero-based index of the first byte to draw (inclusive).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    start_byte: i64,

    /// Zero-based index of the last byte to draw (inclusive). Defaults to the end of the file.
    #[arg(long, allow_negative_numbers = true)]
    end_byte: Option<i64>,
}

#[derive(Debug, Clone, Args)]
struct RenderArgs {
    /// Path to the binary file to read.
    input_file: PathBuf,

    /// Direction the tape runs on the page.
    #[arg(long, value_enum, default_value_t = CliOrientation::Horizontal)]
    orientation: CliOrientation,

    /// Padding at the start of the tape, in inches [default: 0.25 horizontal, 0 vertical].
    #[arg(long)]
    start_padding: Option<Length>,

    /// Padding at the end of the tape, in inches [default: 0.25 horizontal, 0 vertical].
    #[arg(long)]
    end_padding: Option<Length>,

    /// SVG file to write output into.
    #[arg(long, short = 'o', default_value = "output.svg")]
    output_file: PathBuf,

    #[command(flatten)]
    range: ByteRangeArgs,

    /// Draw fold markers every 85 frames (default for horizontal tape).
    #[arg(long, conflicts_with = "no_fold_markers")]
    fold_markers: bool,

    /// Never draw fold markers.
    #[arg(long)]
    no_fold_markers: bool,
}

impl RenderArgs {
    fn to_options(&self) -> RenderOptions {
        let orientation = Orientation::from(self.orientation);
        let default = orientation.default_padding();
        let padding = Padding::new(
            self.start_padding.unwrap_or(default.start),
            self.end_padding.unwrap_or(default.end),
        );
        let fold_markers = match (self.fold_markers, self.no_fold_markers) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        RenderOptions {
            tape: TapeConstants::FLEXOWRITER,
            orientation,
            padding: Some(padding),
            start_byte: self.range.start_byte,
            end_byte: self.range.end_byte,
            fold_markers,
        }
    }
}

#[derive(Debug, Clone, Args)]
struct DumpArgs {
    /// Path to the binary file to read.
    input_file: PathBuf,

    #[command(flatten)]
    range: ByteRangeArgs,
}

#[derive(Debug, Clone, Args)]
struct SpliceArgs {
    /// Binary file to write at the start of the image.
    #[arg(long)]
    title: Option<PathBuf>,

    /// Binary file to write at the end of the image.
    #[arg(long)]
    trailer: Option<PathBuf>,

    /// Path to the source tape image.
    #[arg(long)]
    tape_in: PathBuf,

    /// Destination path for the modified image.
    #[arg(long)]
    tape_out: PathBuf,
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => run_render(&args)?,
        Commands::Dump(args) => run_dump(&args)?,
        Commands::StripTitle {
            input_file,
            output_file,
        } => run_strip_title(&input_file, &output_file)?,
        Commands::Splice(args) => run_splice(&args)?,
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Write through a temp file in the destination directory, then rename it
/// over `path`. A failed write leaves no file behind.
fn write_output(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), CliError> {
    let write_error = |source: std::io::Error| CliError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    // Temp files are created owner-only; outputs are ordinary files
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(write_error)?;
    }
    file.write_all(contents.as_ref()).map_err(write_error)?;
    file.persist(path).map_err(|err| write_error(err.error))?;
    Ok(())
}

/// Empty inputs and inverted ranges are reported but are not failures.
fn report_nothing(reason: NothingToRender) {
    eprintln!("{:?}", Report::new(reason));
}

fn run_render(args: &RenderArgs) -> Result<(), CliError> {
    let data = read_input(&args.input_file)?;
    let options = args.to_options();

    let drawing = match punchtape::render(&data, &options) {
        Ok(drawing) => drawing,
        Err(RenderError::Nothing(reason)) => {
            report_nothing(reason);
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let range = drawing.range();
    punchtape::log::debug!(
        input = %args.input_file.display(),
        holes = drawing.holes.len(),
        "writing drawing"
    );
    write_output(&args.output_file, drawing.to_svg().to_string())?;

    println!("SVG paper tape written to {}", args.output_file.display());
    println!(
        "Bytes drawn: {} through {} (inclusive).",
        range.start(),
        range.end()
    );
    Ok(())
}

fn run_dump(args: &DumpArgs) -> Result<(), CliError> {
    let data = read_input(&args.input_file)?;
    let range = match FrameRange::select(data.len(), args.range.start_byte, args.range.end_byte) {
        Ok(range) => range,
        Err(reason) => {
            report_nothing(reason);
            return Ok(());
        }
    };
    print!("{}", listing::listing(&data, range, &TapeConstants::FLEXOWRITER));
    Ok(())
}

fn run_strip_title(input: &Path, output: &Path) -> Result<(), CliError> {
    let data = read_input(input)?;
    let strip = title::strip_title(&data);
    write_output(output, strip.title)?;

    match strip.terminator {
        Some(byte) => println!("MSB set byte encountered: {byte:#04x}. Stopping copy."),
        None => println!("End of file reached without finding MSB set."),
    }
    println!("Title of {} bytes written to {}", strip.title.len(), output.display());
    Ok(())
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::path::absolute(a), std::path::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn run_splice(args: &SpliceArgs) -> Result<(), CliError> {
    if same_file(&args.tape_in, &args.tape_out) {
        return Err(CliError::SamePath);
    }

    let title_block = args.title.as_deref().map(read_input).transpose()?;
    let trailer_block = args.trailer.as_deref().map(read_input).transpose()?;
    let tape = read_input(&args.tape_in)?;

    let spliced = title::splice(&tape, title_block.as_deref(), trailer_block.as_deref())?;
    write_output(&args.tape_out, spliced)?;

    println!("Successfully wrote {}", args.tape_out.display());
    Ok(())
}
