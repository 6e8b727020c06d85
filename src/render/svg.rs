//! SVG generation
//!
//! A small typed element tree (`Svg` → `SvgNode`) covering the elements a
//! tape drawing uses, serialized through `quick-xml` with one element per
//! line. One user unit is one inch: the root carries `width`/`height` in
//! inches and a matching `viewBox`.
//!
//! Attribute values are stored preformatted. Hole and fold marker
//! coordinates use [`fmt_num`]; the overall size is written at full
//! precision so the document length is exactly the tape length.

use std::fmt;

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use super::defaults::{CODE_FILL, FEED_FILL, FOLD_FILL, TAPE_FILL, TAPE_STROKE};
use super::geometry::HoleKind;
use super::projection::RectIn;
use super::{Drawing, HoleMark};
use crate::types::Length as Inches;

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Decimal places kept for coordinates (0.001in is well below print resolution).
pub const COORD_DECIMALS: usize = 3;

const INDENT: usize = 2;

/// Root SVG element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Svg {
    pub xmlns: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub view_box: Option<String>,
    pub children: Vec<SvgNode>,
}

/// Any SVG node a tape drawing emits
#[derive(Debug, Clone, PartialEq)]
pub enum SvgNode {
    Rect(Rect),
    Circle(Circle),
}

/// SVG rect element (`<rect>`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: Option<String>,
    pub y: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<String>,
}

/// SVG circle element (`<circle>`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circle {
    pub cx: Option<String>,
    pub cy: Option<String>,
    pub r: Option<String>,
    pub fill: Option<String>,
}

impl Rect {
    fn fold_marker(rect: RectIn) -> Self {
        Rect {
            x: Some(fmt_num(rect.origin.x)),
            y: Some(fmt_num(rect.origin.y)),
            width: Some(fmt_num(rect.size.x)),
            height: Some(fmt_num(rect.size.y)),
            fill: Some(FOLD_FILL.to_string()),
            ..Default::default()
        }
    }

    fn background(rect: RectIn, border: Option<Inches>) -> Self {
        Rect {
            x: Some(rect.origin.x.to_string()),
            y: Some(rect.origin.y.to_string()),
            width: Some(rect.size.x.to_string()),
            height: Some(rect.size.y.to_string()),
            fill: Some(TAPE_FILL.to_string()),
            stroke: border.map(|_| TAPE_STROKE.to_string()),
            stroke_width: border.map(|w| w.raw().to_string()),
        }
    }

    fn start(&self) -> BytesStart<'_> {
        element(
            "rect",
            &[
                ("x", &self.x),
                ("y", &self.y),
                ("width", &self.width),
                ("height", &self.height),
                ("fill", &self.fill),
                ("stroke", &self.stroke),
                ("stroke-width", &self.stroke_width),
            ],
        )
    }
}

impl Circle {
    fn from_hole(mark: &HoleMark) -> Self {
        let fill = match mark.hole.kind {
            HoleKind::Feed => FEED_FILL,
            HoleKind::Data | HoleKind::Absent => CODE_FILL,
        };
        Circle {
            cx: Some(fmt_num(mark.center.x)),
            cy: Some(fmt_num(mark.center.y)),
            r: Some(fmt_num(mark.radius.raw())),
            fill: Some(fill.to_string()),
        }
    }

    fn start(&self) -> BytesStart<'_> {
        element(
            "circle",
            &[
                ("cx", &self.cx),
                ("cy", &self.cy),
                ("r", &self.r),
                ("fill", &self.fill),
            ],
        )
    }
}

impl SvgNode {
    fn start(&self) -> BytesStart<'_> {
        match self {
            SvgNode::Rect(r) => r.start(),
            SvgNode::Circle(c) => c.start(),
        }
    }
}

/// Build the SVG element tree for a drawing.
pub fn generate_svg(drawing: &Drawing) -> Svg {
    let size = drawing.size;
    let mut children = Vec::with_capacity(1 + drawing.folds.len() + drawing.holes.len());

    children.push(SvgNode::Rect(Rect::background(
        drawing.background,
        drawing.border,
    )));
    children.extend(
        drawing
            .folds
            .iter()
            .map(|fold| SvgNode::Rect(Rect::fold_marker(*fold))),
    );
    children.extend(
        drawing
            .holes
            .iter()
            .map(|mark| SvgNode::Circle(Circle::from_hole(mark))),
    );

    Svg {
        xmlns: Some(SVG_NS.to_string()),
        width: Some(Inches(size.x).to_string()),
        height: Some(Inches(size.y).to_string()),
        view_box: Some(format!("0 0 {} {}", size.x, size.y)),
        children,
    }
}

/// Format a coordinate with [`COORD_DECIMALS`] places, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    let s = format!("{:.prec$}", value, prec = COORD_DECIMALS);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

/// Start tag carrying the attributes that are set, in order.
fn element<'a>(name: &'a str, attrs: &[(&str, &'a Option<String>)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attrs {
        if let Some(value) = value {
            start.push_attribute((*key, value.as_str()));
        }
    }
    start
}

impl Svg {
    /// Serialize as an XML document, one child element per indented line.
    pub fn to_xml(&self) -> Result<String, quick_xml::Error> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);

        let root = element(
            "svg",
            &[
                ("xmlns", &self.xmlns),
                ("width", &self.width),
                ("height", &self.height),
                ("viewBox", &self.view_box),
            ],
        );
        writer.write_event(Event::Start(root))?;
        for child in &self.children {
            writer.write_event(Event::Empty(child.start()))?;
        }
        writer.write_event(Event::End(BytesEnd::new("svg")))?;

        // Every attribute went in as &str, so the buffer is UTF-8
        let mut xml = String::from_utf8_lossy(&writer.into_inner()).into_owned();
        xml.push('\n');
        Ok(xml)
    }
}

impl fmt::Display for Svg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let xml = self.to_xml().map_err(|_| fmt::Error)?;
        f.write_str(&xml)
    }
}
