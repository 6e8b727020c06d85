use datatest_stable::Utf8Path;
use glam::{DVec2, dvec2};
use punchtape::decode::decode_circles;
use punchtape::render::projection::swap_and_mirror;
use punchtape::{Orientation, Padding, Projection, RenderOptions, TapeConstants, render};
use regex_lite::Regex;

/// Hole coordinates in the SVG are rounded to 3 decimals
const COORD_TOLERANCE: f64 = 0.0011;

/// A `<circle>` parsed back out of rendered SVG
#[derive(Debug, Clone, Copy)]
struct ParsedCircle {
    center: DVec2,
    r: f64,
}

fn parse_circles(svg: &str) -> Vec<ParsedCircle> {
    let re = Regex::new(r#"<circle cx="([-\d.]+)" cy="([-\d.]+)" r="([\d.]+)""#).unwrap();
    re.captures_iter(svg)
        .map(|caps| ParsedCircle {
            center: dvec2(caps[1].parse().unwrap(), caps[2].parse().unwrap()),
            r: caps[3].parse().unwrap(),
        })
        .collect()
}

fn parse_root_size(svg: &str) -> DVec2 {
    let re = Regex::new(r#"<svg [^>]*width="([\d.]+)in" height="([\d.]+)in" viewBox="0 0 ([\d.]+) ([\d.]+)""#)
        .unwrap();
    let caps = re.captures(svg).expect("svg root element");
    assert_eq!(caps[1], caps[3], "width matches viewBox");
    assert_eq!(caps[2], caps[4], "height matches viewBox");
    dvec2(caps[1].parse().unwrap(), caps[2].parse().unwrap())
}

fn count_fold_markers(svg: &str) -> usize {
    svg.matches(r##"fill="#789""##).count()
}

fn options(orientation: Orientation) -> RenderOptions {
    RenderOptions {
        padding: Some(Padding::NONE),
        ..RenderOptions::new(orientation)
    }
}

/// Render the fixture both ways, decode each drawing back from its SVG
/// text, and check the two orientations are the same tape.
fn tape_round_trip(path: &Utf8Path) -> datatest_stable::Result<()> {
    let data = std::fs::read(path)?;
    let tape = TapeConstants::FLEXOWRITER;
    tracing::debug!(%path, bytes = data.len(), "fixture");

    let mut circles_by_orientation = Vec::new();
    let mut axis = None;
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        let options = options(orientation);
        let drawing = render(&data, &options)?;
        let svg = drawing.to_svg().to_string();

        axis.get_or_insert(drawing.projection.layout().lane_band_center());
        let circles = parse_circles(&svg);
        let expected_holes: usize = data
            .iter()
            .map(|b| 1 + b.count_ones() as usize)
            .sum();
        assert_eq!(circles.len(), expected_holes, "{path} {orientation:?}");

        let decoded = decode_circles(
            circles.iter().map(|c| (c.center, c.r)),
            &drawing.projection,
        )?;
        assert_eq!(decoded, data, "{path} {orientation:?} did not decode");

        // The root size is written at full precision
        let size = parse_root_size(&svg);
        assert_eq!(size, drawing.size, "{path} {orientation:?}");
        let length = tape.pitch.raw() * data.len() as f64;
        match orientation {
            Orientation::Horizontal => assert_eq!(size.x, length),
            Orientation::Vertical => assert_eq!(size.y, length),
        }

        circles_by_orientation.push(circles);
    }

    // Rotating the horizontal tape about the lane band center gives the vertical one
    let axis = axis.expect("horizontal drawing rendered");
    assert!((axis.raw() - 0.492).abs() < 1e-9);
    let horizontal = &circles_by_orientation[0];
    let vertical = &circles_by_orientation[1];
    for (h, v) in horizontal.iter().zip(vertical) {
        let mirrored = swap_and_mirror(h.center, axis);
        assert!(
            (mirrored - v.center).abs().max_element() < 2.0 * COORD_TOLERANCE,
            "{path}: {:?} mirrors to {:?}, vertical has {:?}",
            h.center,
            mirrored,
            v.center
        );
        assert_eq!(h.r, v.r);
    }

    Ok(())
}

/// Fold markers on a padded horizontal tape, one per started period.
fn fold_markers(path: &Utf8Path) -> datatest_stable::Result<()> {
    let data = std::fs::read(path)?;
    let period = TapeConstants::FLEXOWRITER.fold_period;

    let horizontal = punchtape::render_svg(&data, &RenderOptions::default())?;
    assert_eq!(count_fold_markers(&horizontal), data.len().div_ceil(period), "{path}");

    let vertical = punchtape::render_svg(&data, &RenderOptions::new(Orientation::Vertical))?;
    assert_eq!(count_fold_markers(&vertical), 0, "{path}");

    let first = punchtape::render(&data, &RenderOptions::default())?;
    let layout = first.projection.layout();
    assert_eq!(layout.padding.start.raw(), 0.25);
    Ok(())
}

datatest_stable::harness! {
    { test = tape_round_trip, root = "tests/tapes", pattern = r"\.bin$" },
    { test = fold_markers, root = "tests/tapes", pattern = r"\.bin$" },
}
