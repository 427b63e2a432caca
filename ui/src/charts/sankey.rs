//! Two-column sankey: loneliness distress (left) flowing into COVID
//! isolation situations (right).

use super::scene::{Anchor, HitTarget, Node, Paint, Scene, Tooltip};
use super::{ChartConfig, ChartView, Margin};
use crate::core::aggregate::{sankey_flows, Flows};
use crate::core::category::{sankey_caption, AgreementLevel};
use crate::core::format::{format_count, format_percent};
use crate::core::ordering::{self, CanonicalOrdering, COVID_SITUATIONS, NOT_APPLICABLE};
use crate::core::record::{Dataset, WellbeingResponse};
use crate::core::selection::SelectionState;
use crate::t;

pub const DEFAULT_CONFIG: ChartConfig =
    ChartConfig::new(1280.0, 800.0, Margin::new(45.0, 170.0, 45.0, 170.0));

pub const NODE_WIDTH: f64 = 15.0;
pub const NODE_PADDING: f64 = 10.0;
const MAX_WIDTH_RATIO: f64 = 0.65;
const MAX_HEIGHT_RATIO: f64 = 0.62;

const COVID_PALETTE: [&str; 4] = ["#FFFFFF", "#C2C2C2", "#6F6F6F", "#3D3D3D"];
const NOT_APPLICABLE_FILL: &str = "#5e5e5d";
const UNKNOWN_FILL: &str = "yellow";

const LINK_OPACITY: f64 = 0.6;
const LINK_OPACITY_CONNECTED: f64 = 1.0;
const LINK_OPACITY_OTHER: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: String,
    pub side: Side,
    pub value: usize,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLink {
    pub source: String,
    pub target: String,
    pub value: usize,
    pub width: f64,
    /// Centre of the band where it leaves the source node.
    pub y0: f64,
    /// Centre of the band where it enters the target node.
    pub y1: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SankeyLayout {
    pub nodes: Vec<LayoutNode>,
    pub links: Vec<LayoutLink>,
}

impl SankeyLayout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Stack both node columns inside the extent `(x0, y0, x1, y1)`.
    pub fn compute(flows: &Flows, extent: (f64, f64, f64, f64)) -> Self {
        let (ex0, ey0, ex1, ey1) = extent;
        if flows.links.is_empty() {
            return Self::default();
        }

        let value_of = |id: &str, side: Side| -> usize {
            flows
                .links
                .iter()
                .filter(|link| match side {
                    Side::Source => link.source == id,
                    Side::Target => link.target == id,
                })
                .map(|link| link.value)
                .sum()
        };
        let sources: Vec<(String, usize)> = flows
            .sources
            .iter()
            .map(|id| (id.clone(), value_of(id, Side::Source)))
            .collect();
        let targets: Vec<(String, usize)> = flows
            .targets
            .iter()
            .map(|id| (id.clone(), value_of(id, Side::Target)))
            .collect();

        let available = ey1 - ey0;
        let ky = [&sources, &targets]
            .iter()
            .filter_map(|column| {
                let total: usize = column.iter().map(|(_, v)| v).sum();
                (total > 0).then(|| {
                    (available - (column.len() as f64 - 1.0) * NODE_PADDING) / total as f64
                })
            })
            .fold(f64::INFINITY, f64::min)
            .max(0.0);
        let ky = if ky.is_finite() { ky } else { 0.0 };

        let mut nodes = Vec::with_capacity(sources.len() + targets.len());
        for (column, side, x0) in [
            (&sources, Side::Source, ex0),
            (&targets, Side::Target, ex1 - NODE_WIDTH),
        ] {
            let mut y = ey0;
            let start = nodes.len();
            for (id, value) in column.iter() {
                let height = *value as f64 * ky;
                nodes.push(LayoutNode {
                    id: id.clone(),
                    side,
                    value: *value,
                    x0,
                    x1: x0 + NODE_WIDTH,
                    y0: y,
                    y1: y + height,
                });
                y += height + NODE_PADDING;
            }
            // Spread leftover space evenly between the nodes.
            let placed = &mut nodes[start..];
            if let Some(last) = placed.last() {
                let slack = ((ey1 - last.y1) / (placed.len() as f64 + 1.0)).max(0.0);
                for (i, node) in placed.iter_mut().enumerate() {
                    let shift = slack * (i as f64 + 1.0);
                    node.y0 += shift;
                    node.y1 += shift;
                }
            }
        }

        let mut source_offsets = vec![0.0; nodes.len()];
        let mut target_offsets = vec![0.0; nodes.len()];
        let index_of =
            |id: &str, side: Side| nodes.iter().position(|n| n.id == id && n.side == side);

        // Links are ordered source-major, target-minor; both orders follow
        // node position, so bands never cross inside a node.
        let mut links = Vec::with_capacity(flows.links.len());
        for link in &flows.links {
            let (Some(s), Some(t)) = (
                index_of(&link.source, Side::Source),
                index_of(&link.target, Side::Target),
            ) else {
                continue;
            };
            let width = link.value as f64 * ky;
            let y0 = nodes[s].y0 + source_offsets[s] + width / 2.0;
            source_offsets[s] += width;
            links.push((t, LayoutLink {
                source: link.source.clone(),
                target: link.target.clone(),
                value: link.value,
                width,
                y0,
                y1: 0.0,
            }));
        }

        // Target side: incoming bands stacked in source order.
        let mut order: Vec<usize> = (0..links.len()).collect();
        order.sort_by(|&a, &b| {
            let sa = index_of(&links[a].1.source, Side::Source);
            let sb = index_of(&links[b].1.source, Side::Source);
            sa.cmp(&sb)
        });
        for i in order {
            let (t, link) = &mut links[i];
            link.y1 = nodes[*t].y0 + target_offsets[*t] + link.width / 2.0;
            target_offsets[*t] += link.width;
        }

        Self {
            nodes,
            links: links.into_iter().map(|(_, link)| link).collect(),
        }
    }
}

/// Node colour. Unknown attributes are logged and drawn yellow.
pub fn attribute_color(attribute: &str) -> &'static str {
    if let Some(index) = COVID_SITUATIONS.iter().position(|s| *s == attribute) {
        return COVID_PALETTE[index];
    }
    if attribute == NOT_APPLICABLE {
        return NOT_APPLICABLE_FILL;
    }
    if let Some(level) = AgreementLevel::from_label(attribute) {
        return level.color();
    }
    tracing::error!(attribute, "attribute has no colour; drawing it yellow");
    UNKNOWN_FILL
}

fn link_path(source_x: f64, y0: f64, target_x: f64, y1: f64) -> String {
    let mid = (source_x + target_x) / 2.0;
    let n = super::scene::num;
    format!(
        "M{},{}C{},{},{},{},{},{}",
        n(source_x),
        n(y0),
        n(mid),
        n(y0),
        n(mid),
        n(y1),
        n(target_x),
        n(y1)
    )
}

#[derive(Debug, Clone)]
pub struct SankeyChart {
    config: ChartConfig,
    ordering: CanonicalOrdering,
    flows: Flows,
    layout: SankeyLayout,
    highlighted: Option<String>,
    scene: Scene,
}

impl Default for SankeyChart {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG)
    }
}

impl SankeyChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            ordering: ordering::sankey_attributes(),
            flows: Flows::default(),
            layout: SankeyLayout::default(),
            highlighted: None,
            scene: Scene::empty(config.width, config.height),
        }
    }

    pub fn flows(&self) -> &Flows {
        &self.flows
    }

    pub fn layout(&self) -> &SankeyLayout {
        &self.layout
    }

    fn extent(&self) -> (f64, f64, f64, f64) {
        let config = &self.config;
        let x0 = config.margin.left;
        let y0 = config.margin.top;
        let x1 = config.inner_width().min(MAX_WIDTH_RATIO * config.width);
        let y1 = config.inner_height().min(MAX_HEIGHT_RATIO * config.height);
        (x0, y0, x1.max(x0 + 2.0 * NODE_WIDTH), y1.max(y0))
    }

    fn update(&mut self) {
        self.layout = SankeyLayout::compute(&self.flows, self.extent());
        self.scene = self.render();
    }

    fn link_opacity(&self, link: &LayoutLink) -> f64 {
        match &self.highlighted {
            None => LINK_OPACITY,
            Some(id) if link.source == *id || link.target == *id => LINK_OPACITY_CONNECTED,
            Some(_) => LINK_OPACITY_OTHER,
        }
    }

    fn render(&self) -> Scene {
        let config = &self.config;
        let mut scene = Scene::empty(config.width, config.height);
        if self.layout.nodes.is_empty() {
            return scene;
        }

        let half = config.inner_width() / 2.0;
        let mut children = Vec::new();

        for link in &self.layout.links {
            let (Some(source), Some(target)) = (
                self.layout.nodes.iter().find(|n| n.side == Side::Source && n.id == link.source),
                self.layout.nodes.iter().find(|n| n.side == Side::Target && n.id == link.target),
            ) else {
                continue;
            };
            children.push(Node::Path {
                d: link_path(source.x1, link.y0, target.x0, link.y1),
                paint: Paint::stroke(attribute_color(&link.source), link.width.max(1.0))
                    .with_stroke_opacity(self.link_opacity(link)),
                hit: None,
            });
        }

        for node in &self.layout.nodes {
            let color = attribute_color(&node.id);
            children.push(Node::Rect {
                x: node.x0,
                y: node.y0,
                width: node.x1 - node.x0,
                height: node.y1 - node.y0,
                rx: 0.0,
                paint: Paint::fill(color).with_stroke(color, 1.0),
                hit: Some(HitTarget::SankeyNode(node.id.clone())),
            });
            let left = node.x0 < half;
            children.push(Node::Text {
                x: if left { node.x1 - 40.0 } else { node.x0 + 40.0 },
                y: (node.y0 + node.y1) / 2.0 + 4.0,
                content: sankey_caption(&node.id).to_string(),
                anchor: if left { Anchor::End } else { Anchor::Start },
                size: None,
                class: Some("node-label"),
                paint: Paint::fill("grey"),
            });
        }

        scene.nodes.push(Node::group(config.margin.left, config.margin.top, children));

        let (_, _, x1, _) = self.extent();
        scene.nodes.push(Node::Text {
            x: x1 + config.margin.left + 20.0,
            y: config.margin.top - 10.0,
            content: t!("chart-isolation"),
            anchor: Anchor::Start,
            size: None,
            class: Some("isolation-text"),
            paint: Paint::fill("white"),
        });
        scene.nodes.push(Node::Text {
            x: config.margin.left + 35.0,
            y: config.margin.top - 10.0,
            content: t!("chart-loneliness"),
            anchor: Anchor::Start,
            size: None,
            class: Some("loneliness-text"),
            paint: Paint::fill("white"),
        });
        scene
    }
}

impl ChartView for SankeyChart {
    type Record = WellbeingResponse;

    fn consume(
        &mut self,
        data: &Dataset<WellbeingResponse>,
        _selection: &SelectionState,
    ) -> &Scene {
        self.flows = sankey_flows(data.iter(), &self.ordering);
        self.highlighted = None;
        self.update();
        &self.scene
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn resize(&mut self, width: f64, height: f64) -> &Scene {
        self.config.width = width;
        self.config.height = height;
        self.update();
        &self.scene
    }

    fn tooltip(&self, target: &HitTarget) -> Option<Tooltip> {
        let HitTarget::SankeyNode(id) = target else {
            return None;
        };
        let node = self.layout.nodes.iter().find(|node| &node.id == id)?;
        if node.value == 0 {
            return None;
        }

        let outgoing: Vec<_> = self
            .layout
            .links
            .iter()
            .filter(|link| link.source == *id)
            .map(|link| (link.target.as_str(), link.value))
            .collect();
        let mut shares = if outgoing.is_empty() {
            self.layout
                .links
                .iter()
                .filter(|link| link.target == *id)
                .map(|link| (link.source.as_str(), link.value))
                .collect()
        } else {
            outgoing
        };
        shares.sort_by_key(|(attribute, _)| self.ordering.rank(attribute).unwrap_or(i32::MAX));

        let mut tooltip = Tooltip::default().heading(format!(
            "{} {} {}",
            format_count(node.value as f64),
            t!("tooltip-said"),
            sankey_caption(id)
        ));
        for (attribute, value) in shares {
            let pct = value as f64 / node.value as f64 * 100.0;
            tooltip = tooltip.swatch(
                attribute_color(attribute),
                format_percent(Some(pct)),
                sankey_caption(attribute),
            );
        }
        Some(tooltip)
    }

    fn hover(&mut self, target: Option<&HitTarget>) -> &Scene {
        let highlighted = match target {
            Some(HitTarget::SankeyNode(id)) => Some(id.clone()),
            _ => None,
        };
        if highlighted != self.highlighted {
            self.highlighted = highlighted;
            self.scene = self.render();
        }
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::TooltipLine;

    fn response(distress: &str, covid: &str) -> WellbeingResponse {
        WellbeingResponse {
            extravert: String::new(),
            introvert: String::new(),
            covid: covid.into(),
            isolation: String::new(),
            stress: String::new(),
            distress: distress.into(),
            inside: String::new(),
            trust: None,
        }
    }

    fn sample() -> Dataset<WellbeingResponse> {
        Dataset::new(vec![
            response("Agree", "Isolated"),
            response("Agree", "Isolated"),
            response("Agree", "Life carries on as usual"),
            response("Strongly disagree", "Isolated"),
            response("Strongly disagree", "1"),
        ])
    }

    fn chart() -> SankeyChart {
        let mut chart = SankeyChart::default();
        chart.consume(&sample(), &SelectionState::initial());
        chart
    }

    #[test]
    fn node_totals_match_filtered_responses() {
        let chart = chart();
        let layout = chart.layout();
        let total = |side: Side| -> usize {
            layout
                .nodes
                .iter()
                .filter(|n| n.side == side)
                .map(|n| n.value)
                .sum()
        };
        let sources = total(Side::Source);
        let targets = total(Side::Target);
        assert_eq!(sources, 4);
        assert_eq!(targets, 4);
    }

    #[test]
    fn nodes_stay_inside_the_extent_in_attribute_order() {
        let chart = chart();
        let (_, y0, _, y1) = chart.extent();
        let layout = chart.layout();

        for node in &layout.nodes {
            assert!(node.y0 >= y0 - 1e-9 && node.y1 <= y1 + 1e-9, "{node:?}");
            assert_eq!(node.x1 - node.x0, NODE_WIDTH);
        }
        let sources: Vec<_> = layout.nodes.iter().filter(|n| n.side == Side::Source).collect();
        assert_eq!(sources[0].id, "Strongly disagree");
        assert!(sources[0].y1 < sources[1].y0);
    }

    #[test]
    fn tooltip_lists_link_shares_in_attribute_order() {
        crate::i18n::init();
        let chart = chart();
        let tooltip = chart.tooltip(&HitTarget::SankeyNode("Agree".into())).unwrap();
        assert_eq!(tooltip.lines[0], TooltipLine::Heading("3 said Very lonely".into()));
        assert_eq!(
            tooltip.lines[1..],
            [
                TooltipLine::Swatch {
                    color: "#FFFFFF".into(),
                    value: "33.3%".into(),
                    label: "Life carries on as usual".into()
                },
                TooltipLine::Swatch {
                    color: "#6F6F6F".into(),
                    value: "66.7%".into(),
                    label: "Isolated".into()
                },
            ]
        );
    }

    #[test]
    fn target_tooltip_uses_incoming_links() {
        crate::i18n::init();
        let chart = chart();
        let tooltip = chart.tooltip(&HitTarget::SankeyNode("Isolated".into())).unwrap();
        assert_eq!(tooltip.lines[0], TooltipLine::Heading("3 said Isolated".into()));
        assert!(matches!(
            &tooltip.lines[1],
            TooltipLine::Swatch { label, .. } if label == "Not lonely at all"
        ));
    }

    #[test]
    fn hover_highlights_connected_links() {
        let mut chart = chart();
        chart.hover(Some(&HitTarget::SankeyNode("Strongly disagree".into())));

        let mut opacities = Vec::new();
        chart.scene().walk(&mut |node| {
            if let Node::Path { paint, .. } = node {
                opacities.push(paint.stroke_opacity);
            }
        });
        assert_eq!(opacities.iter().filter(|o| **o == Some(1.0)).count(), 1);
        assert_eq!(opacities.iter().filter(|o| **o == Some(0.5)).count(), 2);

        chart.hover(None);
        let mut reset = true;
        chart.scene().walk(&mut |node| {
            if let Node::Path { paint, .. } = node {
                reset &= paint.stroke_opacity == Some(0.6);
            }
        });
        assert!(reset);
    }

    #[test]
    fn unknown_attribute_is_yellow() {
        assert_eq!(attribute_color("Maybe"), "yellow");
        assert_eq!(attribute_color(NOT_APPLICABLE), "#5e5e5d");
        assert_eq!(attribute_color("Isolated"), "#6F6F6F");
    }

    #[test]
    fn empty_dataset_renders_nothing() {
        let mut chart = SankeyChart::default();
        assert!(chart.consume(&Dataset::empty(), &SelectionState::initial()).is_empty());
        assert!(chart.tooltip(&HitTarget::SankeyNode("Agree".into())).is_none());
    }
}
