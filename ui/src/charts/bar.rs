//! Overview bar chart: number of people per loneliness category.
//!
//! Clicking a bar toggles its category in the shared selection; inactive
//! categories are drawn grey.

use super::scale::{BandScale, LinearScale};
use super::scene::{Anchor, HitTarget, Node, Paint, Scene, Tooltip};
use super::{y_axis_ticks, ChartConfig, ChartView, Margin};
use crate::core::aggregate::{group_by, Aggregation, Reduction};
use crate::core::category::{Loneliness, INACTIVE_FILL};
use crate::core::format::format_count;
use crate::core::ordering;
use crate::core::record::{Dataset, SurveyRow};
use crate::core::selection::{CategorySelection, SelectionState};
use crate::t;

pub const DEFAULT_CONFIG: ChartConfig =
    ChartConfig::new(1150.0, 180.0, Margin::new(50.0, 20.0, 20.0, 60.0));

const MARKER_RADIUS: f64 = 20.0;
const MARKER_OFFSET: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct BarChart {
    config: ChartConfig,
    data: Dataset<SurveyRow>,
    selection: CategorySelection<Loneliness>,
    aggregation: Option<Aggregation>,
    scene: Scene,
}

impl Default for BarChart {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG)
    }
}

impl BarChart {
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            data: Dataset::empty(),
            selection: CategorySelection::new(Loneliness::ALL),
            aggregation: None,
            scene: Scene::empty(config.width, config.height),
        }
    }

    pub fn aggregation(&self) -> Option<&Aggregation> {
        self.aggregation.as_ref()
    }

    fn update(&mut self) {
        let aggregation = group_by(
            self.data.iter(),
            |row: &SurveyRow| row.loneliness.as_str(),
            Reduction::Sum(SurveyRow::weight),
            &ordering::loneliness(),
        );
        self.scene = self.render(&aggregation);
        self.aggregation = Some(aggregation);
    }

    fn render(&self, aggregation: &Aggregation) -> Scene {
        let config = &self.config;
        let mut scene = Scene::empty(config.width, config.height);
        if aggregation.groups.is_empty() {
            return scene;
        }

        let width = config.inner_width();
        let height = config.inner_height();
        let x = BandScale::new(
            aggregation.groups.iter().map(|g| g.key.clone()),
            (width / 4.0 - 15.0, 3.0 * width / 4.0 - 15.0),
        )
        .padding_inner(0.2);
        let y = LinearScale::new((0.0, aggregation.max_value().unwrap_or(0.0)), (height, 0.0));

        let mut children = y_axis_ticks(&y, &y.ticks(5), 0.0, width, 10.0, format_count);

        for group in &aggregation.groups {
            let Some(level) = Loneliness::from_label(&group.key) else {
                tracing::warn!(key = %group.key, "skipping bar without a loneliness category");
                continue;
            };
            let Some(value) = group.value else {
                tracing::debug!(key = %group.key, "skipping bar without a defined total");
                continue;
            };
            let Some(left) = x.position(&group.key) else {
                continue;
            };

            let active = self.selection.is_active(&level);
            let fill = if active { level.color() } else { INACTIVE_FILL };
            let center = left + x.bandwidth() / 2.0;
            let top = y.scale(value);
            let hit = Some(HitTarget::LonelinessBar(level));

            children.push(Node::Group {
                x: 0.0,
                y: 0.0,
                class: Some(if active { "bar-group" } else { "bar-group inactive" }),
                children: vec![
                    Node::Rect {
                        x: left,
                        y: top,
                        width: x.bandwidth(),
                        height: height - top,
                        rx: 5.0,
                        paint: Paint::fill(fill),
                        hit: hit.clone(),
                    },
                    Node::Circle {
                        cx: center,
                        cy: top - MARKER_OFFSET,
                        r: MARKER_RADIUS,
                        paint: Paint::fill(fill),
                        hit,
                    },
                    Node::Text {
                        x: center,
                        y: top - MARKER_OFFSET + 8.0,
                        content: level.mood().glyph().to_string(),
                        anchor: Anchor::Middle,
                        size: Some(22.0),
                        class: Some("glyph"),
                        paint: Paint::default().with_opacity(if active { 1.0 } else { 0.5 }),
                    },
                    Node::Text {
                        x: center,
                        y: height + 20.0,
                        content: group.key.clone(),
                        anchor: Anchor::Middle,
                        size: None,
                        class: Some("tick"),
                        paint: Paint::default(),
                    },
                ],
            });
        }

        scene.nodes.push(Node::group(config.margin.left, config.margin.top, children));
        scene.nodes.push(Node::Text {
            x: 0.0,
            y: 12.0,
            content: t!("chart-loneliness-categories"),
            anchor: Anchor::Start,
            size: None,
            class: Some("axis-title"),
            paint: Paint::fill("white"),
        });
        scene
    }
}

impl ChartView for BarChart {
    type Record = SurveyRow;

    fn consume(&mut self, data: &Dataset<SurveyRow>, selection: &SelectionState) -> &Scene {
        self.data = data.clone();
        self.selection = selection.category.clone();
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
        let HitTarget::LonelinessBar(level) = target else {
            return None;
        };
        let value = self.aggregation.as_ref()?.get(level.label())?.value?;
        Some(
            Tooltip::default()
                .toned(level.tone())
                .heading(t!("tooltip-people-heading"))
                .title(format!("👋 {} {}", format_count(value), t!("tooltip-people")))
                .spacer()
                .heading(t!("tooltip-feeling-heading"))
                .title(format!("{} {}", level.heart(), level.short_label())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::TooltipLine;

    fn row(loneliness: Loneliness, amount: Option<i64>) -> SurveyRow {
        SurveyRow {
            id: String::new(),
            gender: "All".into(),
            category: "work".into(),
            value: "Retired".into(),
            loneliness: loneliness.label().into(),
            amount,
            status: String::new(),
        }
    }

    fn bar_rects(scene: &Scene) -> Vec<(f64, String)> {
        let mut out = Vec::new();
        scene.walk(&mut |node| {
            if let Node::Rect {
                height,
                paint,
                hit: Some(HitTarget::LonelinessBar(_)),
                ..
            } = node
            {
                out.push((*height, paint.fill.clone().unwrap_or_default()));
            }
        });
        out
    }

    #[test]
    fn empty_dataset_renders_nothing() {
        let mut chart = BarChart::default();
        let scene = chart.consume(&Dataset::empty(), &SelectionState::initial());
        assert!(scene.is_empty());
        assert!(chart.tooltip(&HitTarget::LonelinessBar(Loneliness::Sometimes)).is_none());
    }

    #[test]
    fn bars_follow_canonical_order_and_selection() {
        let data = Dataset::new(vec![
            row(Loneliness::RarelyOrNever, Some(300)),
            row(Loneliness::AlwaysOrOften, Some(100)),
            row(Loneliness::Sometimes, Some(150)),
            row(Loneliness::Sometimes, Some(50)),
        ]);
        let mut selection = SelectionState::initial();
        selection.category.toggle(&Loneliness::Sometimes);

        let mut chart = BarChart::default();
        let scene = chart.consume(&data, &selection).clone();
        let bars = bar_rects(&scene);

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].1, Loneliness::AlwaysOrOften.color());
        assert_eq!(bars[1].1, INACTIVE_FILL);
        assert_eq!(bars[2].1, Loneliness::RarelyOrNever.color());
        // tallest bar spans the whole inner height
        assert!((bars[2].0 - DEFAULT_CONFIG.inner_height()).abs() < 1e-9);

        let totals: Vec<_> = chart
            .aggregation()
            .unwrap()
            .groups
            .iter()
            .map(|g| g.value)
            .collect();
        assert_eq!(totals, [Some(100.0), Some(200.0), Some(300.0)]);
    }

    #[test]
    fn unknown_loneliness_label_is_skipped() {
        let mut odd = row(Loneliness::Sometimes, Some(500));
        odd.loneliness = "Unknown".into();
        let data = Dataset::new(vec![
            row(Loneliness::AlwaysOrOften, Some(100)),
            odd,
            row(Loneliness::RarelyOrNever, Some(300)),
        ]);

        let mut chart = BarChart::default();
        let scene = chart.consume(&data, &SelectionState::initial()).clone();
        let aggregation = chart.aggregation().unwrap();
        assert_eq!(aggregation.unranked, ["Unknown"]);
        assert_eq!(aggregation.groups.last().map(|g| g.key.as_str()), Some("Unknown"));

        let bars = bar_rects(&scene);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].1, Loneliness::AlwaysOrOften.color());
        assert_eq!(bars[1].1, Loneliness::RarelyOrNever.color());

        let mut labels = Vec::new();
        scene.walk(&mut |node| {
            if let Node::Text { content, class: Some("tick"), .. } = node {
                labels.push(content.clone());
            }
        });
        assert!(!labels.iter().any(|label| label == "Unknown"));
        assert!(chart
            .tooltip(&HitTarget::LonelinessBar(Loneliness::RarelyOrNever))
            .is_some());
    }

    #[test]
    fn tooltip_reports_people_and_category() {
        crate::i18n::init();
        let data = Dataset::new(vec![row(Loneliness::RarelyOrNever, Some(42))]);
        let mut chart = BarChart::default();
        chart.consume(&data, &SelectionState::initial());

        let tooltip = chart
            .tooltip(&HitTarget::LonelinessBar(Loneliness::RarelyOrNever))
            .unwrap();
        assert_eq!(tooltip.tone, Some("orange"));
        assert!(tooltip.lines.contains(&TooltipLine::Title("👋 42 people".into())));
        assert!(tooltip
            .lines
            .contains(&TooltipLine::Title("💛 Rarely or never lonely".into())));
    }

    #[test]
    fn resize_recomputes_from_last_data() {
        let data = Dataset::new(vec![row(Loneliness::Sometimes, Some(10))]);
        let mut chart = BarChart::default();
        chart.consume(&data, &SelectionState::initial());
        let first = chart.resize(800.0, 300.0).clone();
        let second = chart.resize(800.0, 300.0).clone();
        assert_eq!(first, second);
        assert_eq!(first.width, 800.0);
    }
}
