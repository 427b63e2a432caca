//! Unit chart of distress over loneliness: one column of dots per answer.

use super::scene::{Anchor, HitTarget, Node, Paint, Scene, Tooltip};
use super::{ChartConfig, ChartView, Margin};
use crate::core::aggregate::{group_by, Reduction};
use crate::core::category::AgreementLevel;
use crate::core::ordering::{self, NOT_APPLICABLE};
use crate::core::record::{Dataset, WellbeingResponse};
use crate::core::selection::SelectionState;
use crate::t;

pub const DEFAULT_CONFIG: ChartConfig =
    ChartConfig::new(1000.0, 600.0, Margin::new(80.0, 100.0, 100.0, 100.0));

/// Dots shared out across all columns.
pub const TOTAL_DOTS: usize = 326;
pub const DOT_RADIUS: f64 = 7.5;
const DOTS_PER_ROW: usize = 5;
const COLUMNS: f64 = 6.0;
const LEGEND_FILL: &str = "#0A60BD";

#[derive(Debug, Clone, PartialEq)]
pub struct DotColumn {
    pub level: AgreementLevel,
    pub count: usize,
    pub dots: usize,
}

#[derive(Debug, Clone)]
pub struct DotChart {
    config: ChartConfig,
    data: Dataset<WellbeingResponse>,
    columns: Vec<DotColumn>,
    total: usize,
    scene: Scene,
}

impl Default for DotChart {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG)
    }
}

impl DotChart {
    pub fn new(config: ChartConfig) -> Self {
        let mut chart = Self {
            config,
            data: Dataset::empty(),
            columns: Vec::new(),
            total: 0,
            scene: Scene::empty(config.width, config.height),
        };
        chart.fit_margins();
        chart
    }

    pub fn columns(&self) -> &[DotColumn] {
        &self.columns
    }

    /// People represented by one dot.
    pub fn people_per_dot(&self) -> usize {
        self.total.div_ceil(TOTAL_DOTS)
    }

    fn fit_margins(&mut self) {
        self.config.margin.top = self.config.height * 0.1;
        self.config.margin.bottom = self.config.height * 0.2;
    }

    fn update(&mut self) {
        let answered: Vec<&WellbeingResponse> = self
            .data
            .iter()
            .filter(|response| response.distress != NOT_APPLICABLE)
            .collect();
        self.total = answered.len();

        let counts = group_by(
            answered.iter().copied(),
            |response: &WellbeingResponse| response.distress.as_str(),
            Reduction::Count,
            &ordering::distress(),
        );

        let total = self.total;
        self.columns = counts
            .groups
            .iter()
            .filter_map(|group| {
                let Some(level) = AgreementLevel::from_label(&group.key) else {
                    tracing::error!(value = %group.key, "invalid distress value; dropping column");
                    return None;
                };
                let count = group.value.unwrap_or(0.0) as usize;
                let dots = (count as f64 / total as f64 * TOTAL_DOTS as f64).ceil() as usize;
                Some(DotColumn { level, count, dots })
            })
            .collect();

        self.scene = self.render();
    }

    fn render(&self) -> Scene {
        let config = &self.config;
        let mut scene = Scene::empty(config.width, config.height);
        if self.columns.is_empty() {
            return scene;
        }

        let column_width = config.inner_width() / COLUMNS;
        let dot_spacing = (column_width - 15.0) / DOTS_PER_ROW as f64;
        let mut children = Vec::new();

        for (index, column) in self.columns.iter().enumerate() {
            let color = column.level.color();
            let mut cells = vec![
                Node::Text {
                    x: 5.0,
                    y: 0.0,
                    content: column.level.label().to_string(),
                    anchor: Anchor::Start,
                    size: None,
                    class: Some("label"),
                    paint: Paint::default(),
                },
                Node::Rect {
                    x: 0.0,
                    y: 10.0,
                    width: column_width,
                    height: 32.0,
                    rx: 0.0,
                    paint: Paint::fill(color),
                    hit: None,
                },
                Node::Text {
                    x: 5.0,
                    y: 60.0,
                    content: format!("Total: {}", column.count),
                    anchor: Anchor::Start,
                    size: None,
                    class: Some("label"),
                    paint: Paint::default(),
                },
                faded_line(0.0),
            ];
            cells.extend((0..column.dots).map(|i| Node::Circle {
                cx: ((i % DOTS_PER_ROW) + 1) as f64 * dot_spacing - 5.0,
                cy: 80.0 + (i / DOTS_PER_ROW) as f64 * DOT_RADIUS * 3.0,
                r: DOT_RADIUS,
                paint: Paint::fill(color),
                hit: None,
            }));

            children.push(Node::Group {
                x: column_width * index as f64,
                y: 0.0,
                class: Some("dots-group"),
                children: cells,
            });
        }

        children.push(faded_line(column_width * COLUMNS));
        children.push(Node::Group {
            x: 0.0,
            y: -config.margin.top / 2.0,
            class: Some("per-circle"),
            children: vec![
                Node::Circle {
                    cx: 0.0,
                    cy: -3.0,
                    r: DOT_RADIUS,
                    paint: Paint::fill(LEGEND_FILL),
                    hit: None,
                },
                Node::Text {
                    x: 10.0,
                    y: 0.0,
                    content: format!(
                        "= x{} {}",
                        self.people_per_dot(),
                        t!("tooltip-people")
                    ),
                    anchor: Anchor::Start,
                    size: None,
                    class: Some("label"),
                    paint: Paint::default(),
                },
            ],
        });

        scene.nodes.push(Node::group(config.margin.left, config.margin.top, children));
        scene
    }
}

fn faded_line(x: f64) -> Node {
    Node::Line {
        x1: x,
        y1: 10.0,
        x2: x,
        y2: 450.0,
        paint: Paint::stroke("white", 1.0).with_stroke_opacity(0.3),
    }
}

impl ChartView for DotChart {
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

    fn resize(&mut self, width: f64, height: f64) -> &Scene {
        self.config.width = width;
        self.config.height = height;
        self.fit_margins();
        self.update();
        &self.scene
    }

    fn tooltip(&self, _target: &HitTarget) -> Option<Tooltip> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(distress: &str) -> WellbeingResponse {
        WellbeingResponse {
            extravert: String::new(),
            introvert: String::new(),
            covid: "Isolated".into(),
            isolation: "Never".into(),
            stress: "Never".into(),
            distress: distress.into(),
            inside: String::new(),
            trust: None,
        }
    }

    fn dataset(answers: &[(&str, usize)]) -> Dataset<WellbeingResponse> {
        Dataset::new(
            answers
                .iter()
                .flat_map(|(answer, n)| std::iter::repeat_with(move || response(answer)).take(*n))
                .collect(),
        )
    }

    #[test]
    fn columns_follow_distress_order_and_skip_not_applicable() {
        let data = dataset(&[
            ("Disagree", 3),
            (NOT_APPLICABLE, 10),
            ("Strongly agree", 1),
            ("Agree", 2),
        ]);
        let mut chart = DotChart::default();
        chart.consume(&data, &SelectionState::initial());

        let levels: Vec<_> = chart.columns().iter().map(|c| c.level).collect();
        assert_eq!(
            levels,
            [
                AgreementLevel::StronglyAgree,
                AgreementLevel::Agree,
                AgreementLevel::Disagree
            ]
        );
        let counts: Vec<_> = chart.columns().iter().map(|c| c.count).collect();
        assert_eq!(counts, [1, 2, 3]);
    }

    #[test]
    fn dots_are_rounded_up_shares_of_the_pool() {
        let data = dataset(&[("Agree", 1), ("Disagree", 2)]);
        let mut chart = DotChart::default();
        chart.consume(&data, &SelectionState::initial());

        // 1/3 * 326 = 108.67 and 2/3 * 326 = 217.33
        let dots: Vec<_> = chart.columns().iter().map(|c| c.dots).collect();
        assert_eq!(dots, [109, 218]);
        assert_eq!(chart.people_per_dot(), 1);

        let mut circles = 0;
        chart.scene().walk(&mut |node| {
            if matches!(node, Node::Circle { r, .. } if *r == DOT_RADIUS) {
                circles += 1;
            }
        });
        // plus the legend dot
        assert_eq!(circles, 109 + 218 + 1);
    }

    #[test]
    fn empty_or_all_not_applicable_renders_nothing() {
        let mut chart = DotChart::default();
        assert!(chart.consume(&Dataset::empty(), &SelectionState::initial()).is_empty());
        let data = dataset(&[(NOT_APPLICABLE, 4)]);
        assert!(chart.consume(&data, &SelectionState::initial()).is_empty());
    }

    #[test]
    fn resize_rescales_margins() {
        let mut chart = DotChart::default();
        chart.resize(1200.0, 800.0);
        assert_eq!(chart.config().margin.top, 80.0);
        assert_eq!(chart.config().margin.bottom, 160.0);
    }
}
