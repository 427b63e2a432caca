//! Chart views. Each chart turns a dataset plus the current selection into a
//! [`Scene`]; the [`svg`] module draws scenes with Dioxus.

pub mod bar;
pub mod dot;
pub mod sankey;
pub mod scale;
pub mod scatter;
pub mod scene;
pub mod stacked;
pub mod svg;

pub use bar::BarChart;
pub use dot::DotChart;
pub use sankey::SankeyChart;
pub use scatter::{ScatterAlign, ScatterAttribute, ScatterChart};
pub use scene::{Anchor, HitTarget, Node, Paint, Scene, Tooltip, TooltipLine};
pub use stacked::StackedBarChart;
pub use svg::ChartCanvas;

use crate::core::record::Dataset;
use crate::core::selection::SelectionState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Container geometry shared by every chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    pub tooltip_padding: f64,
}

impl ChartConfig {
    pub const fn new(width: f64, height: f64, margin: Margin) -> Self {
        Self {
            width,
            height,
            margin,
            tooltip_padding: 15.0,
        }
    }

    /// Drawing area inside the margins, never negative.
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }
}

pub trait ChartView {
    type Record;

    /// Re-derive everything from `data` and return the new scene. An empty
    /// dataset yields an empty scene.
    fn consume(&mut self, data: &Dataset<Self::Record>, selection: &SelectionState) -> &Scene;

    fn scene(&self) -> &Scene;

    fn config(&self) -> &ChartConfig;

    /// New container size. Recomputes from the last consumed data.
    fn resize(&mut self, width: f64, height: f64) -> &Scene;

    fn tooltip(&self, target: &HitTarget) -> Option<Tooltip>;

    /// Pointer entered (`Some`) or left (`None`) a hit target.
    fn hover(&mut self, _target: Option<&HitTarget>) -> &Scene {
        self.scene()
    }
}

/// Gridlines and labels of a horizontal value axis drawn at `y`.
pub(crate) fn x_axis_ticks(
    scale: &scale::LinearScale,
    ticks: &[f64],
    y: f64,
    grid_to: f64,
    label: impl Fn(f64) -> String,
) -> Vec<Node> {
    ticks
        .iter()
        .flat_map(|&tick| {
            let x = scale.scale(tick);
            [
                Node::Line {
                    x1: x,
                    y1: y,
                    x2: x,
                    y2: grid_to,
                    paint: Paint::stroke("var(--grid)", 1.0),
                },
                Node::Text {
                    x,
                    y: y - 10.0,
                    content: label(tick),
                    anchor: Anchor::Middle,
                    size: None,
                    class: Some("tick"),
                    paint: Paint::default(),
                },
            ]
        })
        .collect()
}

/// Gridlines and labels of a vertical value axis drawn at `x`.
pub(crate) fn y_axis_ticks(
    scale: &scale::LinearScale,
    ticks: &[f64],
    x: f64,
    grid_to: f64,
    padding: f64,
    label: impl Fn(f64) -> String,
) -> Vec<Node> {
    ticks
        .iter()
        .flat_map(|&tick| {
            let y = scale.scale(tick);
            [
                Node::Line {
                    x1: x,
                    y1: y,
                    x2: grid_to,
                    y2: y,
                    paint: Paint::stroke("var(--grid)", 1.0),
                },
                Node::Text {
                    x: x - padding,
                    y: y + 4.0,
                    content: label(tick),
                    anchor: Anchor::End,
                    size: None,
                    class: Some("tick"),
                    paint: Paint::default(),
                },
            ]
        })
        .collect()
}
