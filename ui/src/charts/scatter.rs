//! Isolation share per answer of a wellbeing question, one point per answer.

use super::scale::{BandScale, ColorRamp, LinearScale, Rgb};
use super::scene::{Anchor, HitTarget, Node, Paint, Scene, Tooltip};
use super::{ChartConfig, ChartView, Margin};
use crate::core::aggregate::{isolation_average, isolation_shares, DomainShare};
use crate::core::category::{AgreementLevel, Mood};
use crate::core::format::{format_count, format_tick_percent, format_trust_tick};
use crate::core::ordering::{self, CanonicalOrdering, INDOORS_DOMAIN, STRESS_DOMAIN};
use crate::core::record::{Dataset, WellbeingResponse};
use crate::core::selection::SelectionState;
use crate::t;

const CONTAINER_WIDTH: f64 = 1280.0;
const CONTAINER_HEIGHT: f64 = 800.0;
const FULL_MARGIN: Margin = Margin::new(60.0, 300.0, 250.0, 300.0);

const TICK_PADDING_X: f64 = 15.0;
const TICK_PADDING_Y: f64 = 20.0;
const TRUST_LABEL_FILL: &str = "#A9A9A9";
const GRADIENT_ID: &str = "line-gradient";

/// Question plotted on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScatterAttribute {
    Inside,
    Stress,
    Trust,
    Introvert,
    Extravert,
}

impl ScatterAttribute {
    /// Choices offered by the isolation page selector.
    pub const SELECTABLE: [ScatterAttribute; 3] = [
        ScatterAttribute::Inside,
        ScatterAttribute::Stress,
        ScatterAttribute::Trust,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ScatterAttribute::Inside => "inside",
            ScatterAttribute::Stress => "stress",
            ScatterAttribute::Trust => "trust",
            ScatterAttribute::Introvert => "introvert",
            ScatterAttribute::Extravert => "extravert",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        [
            ScatterAttribute::Inside,
            ScatterAttribute::Stress,
            ScatterAttribute::Trust,
            ScatterAttribute::Introvert,
            ScatterAttribute::Extravert,
        ]
        .into_iter()
        .find(|attribute| attribute.key() == key)
    }

    pub fn label(self) -> &'static str {
        match self {
            ScatterAttribute::Inside => "Time Spent Indoors",
            ScatterAttribute::Stress => "Feeling Stressed or Nervous",
            ScatterAttribute::Trust => "Being Trusting of Others",
            ScatterAttribute::Introvert => "Introvert",
            ScatterAttribute::Extravert => "Extravert",
        }
    }

    pub fn domain(self) -> CanonicalOrdering {
        match self {
            ScatterAttribute::Inside => ordering::indoors_domain(),
            ScatterAttribute::Stress => ordering::stress_domain(),
            ScatterAttribute::Trust => ordering::trust_domain(),
            ScatterAttribute::Introvert | ScatterAttribute::Extravert => ordering::agreement(),
        }
    }

    /// Domain value a response falls into, if any.
    pub fn domain_value(self, response: &WellbeingResponse) -> Option<String> {
        match self {
            // Answers to "I spend most of my time inside" on the agreement scale.
            ScatterAttribute::Inside => AgreementLevel::from_label(&response.inside)
                .map(|level| INDOORS_DOMAIN[level as usize].to_string()),
            ScatterAttribute::Stress => stress_level(&response.stress).map(str::to_string),
            ScatterAttribute::Trust => response.trust.map(|score| score.to_string()),
            ScatterAttribute::Introvert => non_empty(&response.introvert),
            ScatterAttribute::Extravert => non_empty(&response.extravert),
        }
    }

    fn tick_label(self, value: &str) -> String {
        match (self, value.parse::<f64>()) {
            (ScatterAttribute::Trust, Ok(score)) => format_trust_tick(score),
            _ => value.to_string(),
        }
    }
}

fn stress_level(answer: &str) -> Option<&'static str> {
    let index = ["Very often", "Fairly often", "Sometimes", "Almost never", "Never"]
        .iter()
        .position(|a| *a == answer)?;
    Some(STRESS_DOMAIN[index])
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScatterAlign {
    #[default]
    Full,
    Left,
    Right,
}

impl ScatterAlign {
    fn margin(self) -> Margin {
        match self {
            ScatterAlign::Full => FULL_MARGIN,
            ScatterAlign::Left => Margin {
                right: 70.0,
                left: 200.0,
                ..FULL_MARGIN
            },
            ScatterAlign::Right => Margin {
                right: 150.0,
                left: 120.0,
                ..FULL_MARGIN
            },
        }
    }
}

fn point_ramp() -> ColorRamp {
    ColorRamp::new([
        (0.3, Rgb(0xFB, 0xD2, 0x4E)),
        (0.5, Rgb(0xFE, 0xF3, 0xC7)),
        (0.7, Rgb(0xBD, 0xDA, 0xFA)),
        (0.9, Rgb(0x40, 0x9A, 0xF0)),
    ])
}

fn tick_ramp() -> ColorRamp {
    ColorRamp::new([
        (0.0, Rgb(0x40, 0x9A, 0xF0)),
        (33.0, Rgb(0xBD, 0xDA, 0xFA)),
        (66.0, Rgb(0xFE, 0xF3, 0xC7)),
        (100.0, Rgb(0xFB, 0xD2, 0x4E)),
    ])
}

#[derive(Debug, Clone)]
pub struct ScatterChart {
    attribute: ScatterAttribute,
    align: ScatterAlign,
    relative_width: f64,
    config: ChartConfig,
    data: Dataset<WellbeingResponse>,
    shares: Vec<DomainShare>,
    average: Option<f64>,
    scene: Scene,
}

impl Default for ScatterChart {
    fn default() -> Self {
        Self::new(ScatterAttribute::Inside, ScatterAlign::Full, 1.0)
    }
}

impl ScatterChart {
    /// `relative_width` is the share of the container this chart occupies.
    pub fn new(attribute: ScatterAttribute, align: ScatterAlign, relative_width: f64) -> Self {
        let config = ChartConfig::new(
            CONTAINER_WIDTH * relative_width,
            CONTAINER_HEIGHT,
            align.margin(),
        );
        let mut chart = Self {
            attribute,
            align,
            relative_width,
            config,
            data: Dataset::empty(),
            shares: Vec::new(),
            average: None,
            scene: Scene::empty(config.width, config.height),
        };
        chart.fit_margins();
        chart
    }

    pub fn attribute(&self) -> ScatterAttribute {
        self.attribute
    }

    pub fn set_attribute(&mut self, attribute: ScatterAttribute) -> &Scene {
        self.attribute = attribute;
        self.update();
        &self.scene
    }

    pub fn shares(&self) -> &[DomainShare] {
        &self.shares
    }

    /// Isolated share over the whole dataset.
    pub fn average(&self) -> Option<f64> {
        self.average
    }

    fn is_full(&self) -> bool {
        self.relative_width >= 1.0
    }

    fn fit_margins(&mut self) {
        if self.align != ScatterAlign::Full {
            self.config.margin.top = self.config.height * 0.15;
            self.config.margin.bottom = self.config.height * 0.2;
        }
    }

    fn update(&mut self) {
        let attribute = self.attribute;
        self.shares = isolation_shares(
            self.data.iter(),
            |response: &WellbeingResponse| attribute.domain_value(response),
            &attribute.domain(),
        );
        self.average = isolation_average(self.data.iter());
        self.scene = self.render();
    }

    fn render(&self) -> Scene {
        let config = &self.config;
        let mut scene = Scene::empty(config.width, config.height);
        if self.data.is_empty() {
            return scene;
        }

        let width = config.inner_width();
        let height = config.inner_height();
        let x = BandScale::new(self.shares.iter().map(|share| share.label.clone()), (0.0, width));
        let y = LinearScale::new((0.0, 100.0), (height, 0.0));
        let trust = self.attribute == ScatterAttribute::Trust;

        let mut children = vec![Node::Gradient {
            id: GRADIENT_ID,
            x1: width,
            y1: height,
            x2: 0.0,
            y2: 0.0,
            stops: vec![
                (0.15, "var(--linearGradientFirst)".into()),
                (0.45, "var(--linearGradientSecond)".into()),
                (0.8, "var(--linearGradientThird)".into()),
                (1.0, "var(--linearGradientFourth)".into()),
            ],
        }];

        for share in &self.shares {
            let Some(center) = x.center(&share.label) else {
                continue;
            };
            // The trust midpoint tick reaches up to its category label.
            let top = if trust && share.label == "5" { -70.0 } else { 0.0 };
            children.push(Node::Line {
                x1: center,
                y1: height,
                x2: center,
                y2: top,
                paint: Paint::stroke("var(--grid)", 1.0),
            });
            children.push(Node::Text {
                x: center,
                y: -TICK_PADDING_X,
                content: self.attribute.tick_label(&share.label),
                anchor: Anchor::Middle,
                size: None,
                class: Some("tick"),
                paint: Paint::default(),
            });
        }

        let ticks = tick_ramp();
        for tick in y.ticks(10) {
            let ty = y.scale(tick);
            children.push(Node::Line {
                x1: 0.0,
                y1: ty,
                x2: width,
                y2: ty,
                paint: Paint::stroke("var(--grid)", 1.0),
            });
            let fill = ticks.color(tick).map(Rgb::to_hex).unwrap_or_default();
            children.push(Node::Text {
                x: -TICK_PADDING_Y,
                y: ty + 4.0,
                content: format_tick_percent(tick),
                anchor: Anchor::End,
                size: None,
                class: Some("tick"),
                paint: Paint::fill(fill),
            });
        }

        if self.align != ScatterAlign::Right {
            children.push(mood_marker(-96.0, -20.0, Mood::Lonely));
            children.push(mood_marker(-96.0, height - 20.0, Mood::Happy));
        }

        if trust {
            for (score, label) in [(0, "Distrustful"), (5, "Trusting")] {
                let start = x.position(&score.to_string());
                let end = x.position(&(score + 5).to_string());
                let (Some(start), Some(end)) = (start, end) else {
                    continue;
                };
                children.push(Node::Text {
                    x: (start + end) / 2.0 + 50.0,
                    y: -40.0,
                    content: label.into(),
                    anchor: Anchor::Middle,
                    size: None,
                    class: Some("trust-label"),
                    paint: Paint::fill(TRUST_LABEL_FILL),
                });
            }
        }

        if let Some(average) = self.average {
            let ay = y.scale(average * 100.0);
            children.push(Node::Line {
                x1: 0.0,
                y1: ay,
                x2: width,
                y2: ay,
                paint: Paint::stroke(format!("url(#{GRADIENT_ID})"), 2.0),
            });
        }

        let (radius, glyph_offset) = if self.is_full() { (20.0, 21.25) } else { (15.0, 13.0) };
        let ramp = point_ramp();
        for share in &self.shares {
            let Some(fraction) = share.share() else {
                tracing::debug!(
                    value = %share.label,
                    "no responses for this answer; skipping point"
                );
                continue;
            };
            let Some(cx) = x.center(&share.label) else {
                continue;
            };
            let cy = y.scale(fraction * 100.0);
            let fill = ramp.color(fraction).map(Rgb::to_hex).unwrap_or_default();
            children.push(Node::Circle {
                cx,
                cy,
                r: radius,
                paint: Paint::fill(fill),
                hit: Some(HitTarget::ScatterPoint(share.label.clone())),
            });
            children.push(Node::Text {
                x: cx,
                y: cy + glyph_offset * 0.4,
                content: Mood::for_share(fraction * 100.0).glyph().to_string(),
                anchor: Anchor::Middle,
                size: Some(glyph_offset * 1.2),
                class: Some("point"),
                paint: Paint::default(),
            });
        }

        scene.nodes.push(Node::group(config.margin.left, config.margin.top, children));
        scene
    }
}

fn mood_marker(x: f64, y: f64, mood: Mood) -> Node {
    Node::Text {
        x,
        y: y + 20.0,
        content: mood.glyph().to_string(),
        anchor: Anchor::Middle,
        size: Some(24.0),
        class: Some("axis-mood"),
        paint: Paint::default(),
    }
}

impl ChartView for ScatterChart {
    type Record = WellbeingResponse;

    fn consume(
        &mut self,
        data: &Dataset<WellbeingResponse>,
        _selection: &SelectionState,
    ) -> &Scene {
        self.data = data.clone();
        self.update();
        &self.scene
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// `width` is the full container; the chart takes its relative share.
    fn resize(&mut self, width: f64, height: f64) -> &Scene {
        self.config.width = width * self.relative_width;
        self.config.height = height;
        self.fit_margins();
        self.update();
        &self.scene
    }

    fn tooltip(&self, target: &HitTarget) -> Option<Tooltip> {
        let HitTarget::ScatterPoint(label) = target else {
            return None;
        };
        let share = self.shares.iter().find(|share| &share.label == label)?;
        Some(
            Tooltip::default()
                .heading(t!("tooltip-category-heading"))
                .title(format!("🗂 {}", self.attribute.tick_label(&share.label)))
                .spacer()
                .heading(t!("tooltip-people-heading"))
                .title(format!(
                    "👋 {} {}",
                    format_count(share.total as f64),
                    t!("tooltip-people")
                )),
        )
    }
}
