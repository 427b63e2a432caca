//! 100% stacked bars: loneliness breakdown per value of one sociological factor.

use super::scale::{BandScale, LinearScale};
use super::scene::{Anchor, HitTarget, Node, Paint, Scene, Tooltip};
use super::{x_axis_ticks, ChartConfig, ChartView, Margin};
use crate::core::aggregate::{cross_tabulate, stack, CrossTab, Reduction};
use crate::core::category::{factor_tick_label, FactorKind, Loneliness};
use crate::core::format::{capitalize, format_percent, format_tick_percent};
use crate::core::ordering;
use crate::core::record::{Dataset, SurveyRow};
use crate::core::selection::{FactorSelection, SelectionState};
use crate::t;

pub const DEFAULT_CONFIG: ChartConfig =
    ChartConfig::new(600.0, 500.0, Margin::new(60.0, 50.0, 30.0, 100.0));

/// Height of the whole factor column on the bidirectional page.
pub const PANEL_COLUMN_HEIGHT: f64 = 520.0;

/// Order of the loneliness lines in a row tooltip.
const TOOLTIP_ORDER: [Loneliness; 3] = [
    Loneliness::RarelyOrNever,
    Loneliness::Sometimes,
    Loneliness::AlwaysOrOften,
];

#[derive(Debug, Clone, PartialEq)]
pub struct PercentageRow {
    pub value: String,
    /// Indexed like [`CrossTab::columns`].
    pub percentages: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct StackedBarChart {
    kind: FactorKind,
    config: ChartConfig,
    data: Dataset<SurveyRow>,
    selection: FactorSelection<String>,
    table: Option<CrossTab>,
    rows: Vec<PercentageRow>,
    scene: Scene,
}

impl StackedBarChart {
    pub fn new(kind: FactorKind, config: ChartConfig) -> Self {
        Self {
            kind,
            config,
            data: Dataset::empty(),
            selection: FactorSelection::Unset,
            table: None,
            rows: Vec::new(),
            scene: Scene::empty(config.width, config.height),
        }
    }

    /// Panel sized for its slot in the factor column.
    pub fn for_panel(kind: FactorKind, width: f64) -> Self {
        let mut config = DEFAULT_CONFIG;
        config.width = width;
        config.height = kind.height_share() * PANEL_COLUMN_HEIGHT;
        Self::new(kind, config)
    }

    pub fn kind(&self) -> FactorKind {
        self.kind
    }

    pub fn rows(&self) -> &[PercentageRow] {
        &self.rows
    }

    pub fn columns(&self) -> &[String] {
        self.table
            .as_ref()
            .map(|table| table.columns.as_slice())
            .unwrap_or_default()
    }

    fn update(&mut self) {
        let table = cross_tabulate(
            self.data.iter(),
            |row: &SurveyRow| row.value.as_str(),
            |row: &SurveyRow| row.loneliness.as_str(),
            Reduction::Sum(SurveyRow::weight),
            &self.kind.ordering(),
            &ordering::loneliness(),
        );
        self.rows = table
            .rows
            .iter()
            .map(|row| PercentageRow {
                value: row.key.clone(),
                percentages: row.percentages(),
            })
            .collect();
        self.table = Some(table);
        self.scene = self.render();
    }

    fn render(&self) -> Scene {
        let config = &self.config;
        let mut scene = Scene::empty(config.width, config.height);
        let Some(table) = &self.table else {
            return scene;
        };
        if self.rows.is_empty() {
            return scene;
        }

        let width = config.inner_width();
        let height = config.inner_height();
        let x = LinearScale::new((0.0, 100.0), (0.0, width));
        let y = BandScale::new(self.rows.iter().map(|row| row.value.clone()), (0.0, height))
            .padding(0.2);

        let column_colors: Vec<Option<&'static str>> = table
            .columns
            .iter()
            .map(|column| Loneliness::from_label(column).map(Loneliness::color))
            .collect();

        let mut children = x_axis_ticks(&x, &x.ticks(10), 0.0, height, format_tick_percent);

        for row in &self.rows {
            let Some(top) = y.position(&row.value) else {
                continue;
            };
            let selected = self.selection.is_selected(&row.value);

            for segment in stack(&row.percentages) {
                let Some(color) = column_colors[segment.column] else {
                    let column = &table.columns[segment.column];
                    tracing::debug!(column = %column, "no colour for column");
                    continue;
                };
                children.push(Node::Rect {
                    x: x.scale(segment.start),
                    y: top,
                    width: x.scale(segment.start + segment.width()) - x.scale(segment.start),
                    height: y.bandwidth(),
                    rx: 0.0,
                    paint: Paint::fill(color)
                        .with_stroke("#fff", 3.0)
                        .with_stroke_opacity(if selected { 1.0 } else { 0.0 }),
                    hit: None,
                });
            }

            children.push(Node::Text {
                x: -10.0,
                y: top + y.bandwidth() / 2.0 + 4.0,
                content: factor_tick_label(&row.value).to_string(),
                anchor: Anchor::End,
                size: None,
                class: Some("tick"),
                paint: Paint::fill("#fff"),
            });
        }

        // Full-width transparent rows on top catch hover and clicks.
        for row in &self.rows {
            let Some(top) = y.position(&row.value) else {
                continue;
            };
            children.push(Node::Rect {
                x: 0.0,
                y: top,
                width,
                height: y.bandwidth(),
                rx: 0.0,
                paint: Paint::fill("#000").with_fill_opacity(0.0),
                hit: Some(HitTarget::FactorRow {
                    kind: self.kind,
                    value: row.value.clone(),
                }),
            });
        }

        scene.nodes.push(Node::group(config.margin.left, config.margin.top, children));
        scene.nodes.push(Node::Text {
            x: 100.0,
            y: 22.0,
            content: capitalize(self.kind.category()),
            anchor: Anchor::End,
            size: None,
            class: Some("axis-title"),
            paint: Paint::fill("white"),
        });

        if self.kind == FactorKind::Gender {
            scene.nodes.push(Node::Circle {
                cx: 118.0,
                cy: 13.0,
                r: 8.0,
                paint: Paint::stroke("white", 1.5).with_fill_opacity(0.0),
                hit: Some(HitTarget::InfoIcon(self.kind)),
            });
            scene.nodes.push(Node::Text {
                x: 118.0,
                y: 17.0,
                content: "i".into(),
                anchor: Anchor::Middle,
                size: Some(11.0),
                class: Some("tooltip-icon"),
                paint: Paint::fill("white"),
            });
        }

        scene
    }
}

impl ChartView for StackedBarChart {
    type Record = SurveyRow;

    fn consume(&mut self, data: &Dataset<SurveyRow>, selection: &SelectionState) -> &Scene {
        self.data = data.clone();
        self.selection = selection.factor.clone();
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
        match target {
            HitTarget::FactorRow { kind, value } if *kind == self.kind => {
                let row = self.rows.iter().find(|row| &row.value == value)?;
                let columns = self.columns();
                let mut tooltip = Tooltip::default()
                    .heading(t!("tooltip-category-heading"))
                    .title(format!("👋 {value}"))
                    .spacer()
                    .heading(t!("tooltip-feeling-heading"));
                for level in TOOLTIP_ORDER {
                    let pct = columns
                        .iter()
                        .position(|column| column == level.label())
                        .and_then(|index| row.percentages[index]);
                    if pct.is_some() {
                        tooltip = tooltip.title(format!(
                            "{} {} {}",
                            level.heart(),
                            format_percent(pct),
                            level.short_label()
                        ));
                    }
                }
                Some(tooltip)
            }
            HitTarget::InfoIcon(FactorKind::Gender) if self.kind == FactorKind::Gender => Some(
                Tooltip::default()
                    .heading(t!("tooltip-gender-heading"))
                    .title(format!("🚨 {}", t!("tooltip-gender-accuracy")))
                    .title(format!("🌈 {}", t!("tooltip-gender-source"))),
            ),
            _ => None,
        }
    }
}
