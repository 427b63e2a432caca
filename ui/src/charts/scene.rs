//! Renderer-agnostic scene graph produced by every chart.

use std::fmt::Write as _;

use crate::core::category::{FactorKind, Loneliness};

/// Fill and stroke of a shape. Unset fields are left to the stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paint {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub opacity: Option<f64>,
    pub fill_opacity: Option<f64>,
    pub stroke_opacity: Option<f64>,
}

impl Paint {
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn stroke(color: impl Into<String>, width: f64) -> Self {
        Self {
            fill: Some("none".into()),
            stroke: Some(color.into()),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(color.into());
        self.stroke_width = Some(width);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }

    pub fn with_stroke_opacity(mut self, opacity: f64) -> Self {
        self.stroke_opacity = Some(opacity);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    Start,
    Middle,
    End,
}

impl Anchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// What a pointer over a shape refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HitTarget {
    LonelinessBar(Loneliness),
    FactorRow { kind: FactorKind, value: String },
    SankeyNode(String),
    ScatterPoint(String),
    InfoIcon(FactorKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group {
        x: f64,
        y: f64,
        class: Option<&'static str>,
        children: Vec<Node>,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        paint: Paint,
        hit: Option<HitTarget>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        paint: Paint,
        hit: Option<HitTarget>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        paint: Paint,
    },
    Path {
        d: String,
        paint: Paint,
        hit: Option<HitTarget>,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        anchor: Anchor,
        size: Option<f64>,
        class: Option<&'static str>,
        paint: Paint,
    },
    /// Linear gradient in user space, referenced as `url(#id)`.
    Gradient {
        id: &'static str,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stops: Vec<(f64, String)>,
    },
}

impl Node {
    pub fn group(x: f64, y: f64, children: Vec<Node>) -> Self {
        Node::Group {
            x,
            y,
            class: None,
            children,
        }
    }

    pub fn text(x: f64, y: f64, content: impl Into<String>, anchor: Anchor) -> Self {
        Node::Text {
            x,
            y,
            content: content.into(),
            anchor,
            size: None,
            class: None,
            paint: Paint::default(),
        }
    }

    pub fn hit(&self) -> Option<&HitTarget> {
        match self {
            Node::Rect { hit, .. } | Node::Circle { hit, .. } | Node::Path { hit, .. } => {
                hit.as_ref()
            }
            _ => None,
        }
    }

    /// Depth-first walk over this node and its descendants.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        if let Node::Group { children, .. } = self {
            for child in children {
                child.walk(visit);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TooltipLine {
    Heading(String),
    Title(String),
    Spacer,
    /// Colour square, percentage and label, as in the sankey breakdown.
    Swatch {
        color: String,
        value: String,
        label: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tooltip {
    /// Accent modifier class, e.g. `orange`.
    pub tone: Option<&'static str>,
    pub lines: Vec<TooltipLine>,
}

impl Tooltip {
    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.lines.push(TooltipLine::Heading(text.into()));
        self
    }

    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.lines.push(TooltipLine::Title(text.into()));
        self
    }

    pub fn spacer(mut self) -> Self {
        self.lines.push(TooltipLine::Spacer);
        self
    }

    pub fn swatch(
        mut self,
        color: impl Into<String>,
        value: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.lines.push(TooltipLine::Swatch {
            color: color.into(),
            value: value.into(),
            label: label.into(),
        });
        self
    }

    pub fn toned(mut self, tone: &'static str) -> Self {
        self.tone = Some(tone);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn empty(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        for node in &self.nodes {
            node.walk(visit);
        }
    }

    /// Every hit target in paint order.
    pub fn hit_targets(&self) -> Vec<&HitTarget> {
        let mut targets = Vec::new();
        self.walk(&mut |node| {
            if let Some(hit) = node.hit() {
                targets.push(hit);
            }
        });
        targets
    }

    /// Standalone SVG document for this scene.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{w}' height='{h}' viewBox='0 0 {w} {h}'>",
            w = num(self.width),
            h = num(self.height),
        );
        for node in &self.nodes {
            write_node(&mut out, node);
        }
        out.push_str("</svg>");
        out
    }
}

/// Compact number formatting for SVG attributes.
pub fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".into();
    }
    crate::core::format::format_number(value, 2)
}

fn write_paint(out: &mut String, paint: &Paint) {
    if let Some(fill) = &paint.fill {
        let _ = write!(out, " fill='{}'", escape(fill));
    }
    if let Some(stroke) = &paint.stroke {
        let _ = write!(out, " stroke='{}'", escape(stroke));
    }
    if let Some(width) = paint.stroke_width {
        let _ = write!(out, " stroke-width='{}'", num(width));
    }
    if let Some(opacity) = paint.opacity {
        let _ = write!(out, " opacity='{}'", num(opacity));
    }
    if let Some(opacity) = paint.fill_opacity {
        let _ = write!(out, " fill-opacity='{}'", num(opacity));
    }
    if let Some(opacity) = paint.stroke_opacity {
        let _ = write!(out, " stroke-opacity='{}'", num(opacity));
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Group {
            x,
            y,
            class,
            children,
        } => {
            let _ = write!(out, "<g transform='translate({},{})'", num(*x), num(*y));
            if let Some(class) = class {
                let _ = write!(out, " class='{class}'");
            }
            out.push('>');
            for child in children {
                write_node(out, child);
            }
            out.push_str("</g>");
        }
        Node::Rect {
            x,
            y,
            width,
            height,
            rx,
            paint,
            ..
        } => {
            let _ = write!(
                out,
                "<rect x='{}' y='{}' width='{}' height='{}'",
                num(*x),
                num(*y),
                num(width.max(0.0)),
                num(height.max(0.0))
            );
            if *rx > 0.0 {
                let _ = write!(out, " rx='{}'", num(*rx));
            }
            write_paint(out, paint);
            out.push_str("/>");
        }
        Node::Circle { cx, cy, r, paint, .. } => {
            let _ = write!(out, "<circle cx='{}' cy='{}' r='{}'", num(*cx), num(*cy), num(*r));
            write_paint(out, paint);
            out.push_str("/>");
        }
        Node::Line {
            x1,
            y1,
            x2,
            y2,
            paint,
        } => {
            let _ = write!(
                out,
                "<line x1='{}' y1='{}' x2='{}' y2='{}'",
                num(*x1),
                num(*y1),
                num(*x2),
                num(*y2)
            );
            write_paint(out, paint);
            out.push_str("/>");
        }
        Node::Path { d, paint, .. } => {
            let _ = write!(out, "<path d='{d}'");
            write_paint(out, paint);
            out.push_str("/>");
        }
        Node::Text {
            x,
            y,
            content,
            anchor,
            size,
            class,
            paint,
        } => {
            let _ = write!(
                out,
                "<text x='{}' y='{}' text-anchor='{}'",
                num(*x),
                num(*y),
                anchor.as_str()
            );
            if let Some(size) = size {
                let _ = write!(out, " font-size='{}'", num(*size));
            }
            if let Some(class) = class {
                let _ = write!(out, " class='{class}'");
            }
            write_paint(out, paint);
            let _ = write!(out, ">{}</text>", escape(content));
        }
        Node::Gradient {
            id,
            x1,
            y1,
            x2,
            y2,
            stops,
        } => {
            let _ = write!(
                out,
                "<defs><linearGradient id='{id}' gradientUnits='userSpaceOnUse' x1='{}' y1='{}' x2='{}' y2='{}'>",
                num(*x1),
                num(*y1),
                num(*x2),
                num(*y2)
            );
            for (offset, color) in stops {
                let _ = write!(
                    out,
                    "<stop offset='{}%' stop-color='{}'/>",
                    num(offset * 100.0),
                    escape(color)
                );
            }
            out.push_str("</linearGradient></defs>");
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
}
