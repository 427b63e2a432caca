//! Chart pages of the story. Each page owns its chart views in signals and
//! re-renders their scenes on data arrival, resize, hover and clicks.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use super::tooltip::TooltipPanel;
use crate::charts::stacked::PANEL_COLUMN_HEIGHT;
use crate::charts::{
    BarChart, ChartCanvas, ChartView, DotChart, HitTarget, SankeyChart, ScatterAlign,
    ScatterAttribute, ScatterChart, StackedBarChart, Tooltip,
};
use crate::core::category::FactorKind;
use crate::core::coordinator::{Dimension, FactorData, SelectionCoordinator};
use crate::core::record::{Dataset, SurveyRow, WellbeingResponse};
use crate::core::selection::SelectionState;
use crate::t;

const PANEL_WIDTH: f64 = 600.0;
const LEFT_PANELS: [FactorKind; 2] = [FactorKind::Gender, FactorKind::Education];
const RIGHT_PANELS: [FactorKind; 3] = [
    FactorKind::Urbanization,
    FactorKind::Immigration,
    FactorKind::Work,
];

fn resize_to<C: ChartView + 'static>(mut chart: Signal<C>, evt: Event<ResizeData>) {
    let Ok(size) = evt.get_content_box_size() else {
        return;
    };
    if size.width > 0.0 && size.height > 0.0 {
        chart.write().resize(size.width, size.height);
    }
}

fn hover_chart<C: ChartView + 'static>(
    mut chart: Signal<C>,
    mut tooltip: Signal<Option<Tooltip>>,
    target: Option<HitTarget>,
) {
    let detail = target.as_ref().and_then(|target| chart.read().tooltip(target));
    chart.write().hover(target.as_ref());
    tooltip.set(detail);
}

#[component]
fn LoadFailed() -> Element {
    rsx! {
        p { class: "page__notice", {t!("load-failed")} }
    }
}

#[component]
pub fn DotChartPage(data: Option<Dataset<WellbeingResponse>>) -> Element {
    let mut chart = use_signal(DotChart::default);
    use_effect(use_reactive((&data,), move |(data,)| {
        if let Some(data) = data {
            chart.write().consume(&data, &SelectionState::initial());
        }
    }));
    let scene = chart.read().scene().clone();

    rsx! {
        section { class: "page page-dot",
            h2 { class: "page__heading",
                {t!("dot-page-heading")}
                " "
                span { class: "accent accent--yellow", {t!("dot-page-highlight")} }
                "?"
            }
            if data.is_some() {
                div { class: "page__chart", onresize: move |evt| resize_to(chart, evt),
                    ChartCanvas { scene }
                }
            } else {
                LoadFailed {}
            }
        }
    }
}

#[component]
pub fn SankeyPage(data: Option<Dataset<WellbeingResponse>>) -> Element {
    let mut chart = use_signal(SankeyChart::default);
    let tooltip = use_signal(|| None::<Tooltip>);
    let mut pointer = use_signal(|| (0.0, 0.0));
    use_effect(use_reactive((&data,), move |(data,)| {
        if let Some(data) = data {
            chart.write().consume(&data, &SelectionState::initial());
        }
    }));
    let scene = chart.read().scene().clone();
    let padding = chart.read().config().tooltip_padding;
    let (x, y) = pointer();

    rsx! {
        section {
            class: "page page-sankey",
            onmousemove: move |evt| {
                let at = evt.client_coordinates();
                pointer.set((at.x, at.y));
            },
            h2 { class: "page__heading", {t!("sankey-page-heading")} }
            if data.is_some() {
                div { class: "page__chart", onresize: move |evt| resize_to(chart, evt),
                    ChartCanvas {
                        scene,
                        on_hover: move |target: Option<HitTarget>| {
                            hover_chart(chart, tooltip, target)
                        },
                    }
                }
            } else {
                LoadFailed {}
            }
            TooltipPanel { tooltip: tooltip(), x, y, padding }
        }
    }
}

#[component]
pub fn ScatterPlotPage(data: Option<Dataset<WellbeingResponse>>) -> Element {
    let mut chart =
        use_signal(|| ScatterChart::new(ScatterAttribute::Inside, ScatterAlign::Full, 1.0));
    let tooltip = use_signal(|| None::<Tooltip>);
    let mut pointer = use_signal(|| (0.0, 0.0));
    use_effect(use_reactive((&data,), move |(data,)| {
        if let Some(data) = data {
            chart.write().consume(&data, &SelectionState::initial());
        }
    }));
    let scene = chart.read().scene().clone();
    let selected = chart.read().attribute().key();
    let padding = chart.read().config().tooltip_padding;
    let (x, y) = pointer();

    rsx! {
        section {
            class: "page page-scatter",
            onmousemove: move |evt| {
                let at = evt.client_coordinates();
                pointer.set((at.x, at.y));
            },
            h2 { class: "page__heading",
                {t!("scatter-page-heading")}
                " "
                select {
                    class: "attribute-select",
                    value: "{selected}",
                    oninput: move |evt| {
                        match ScatterAttribute::from_key(&evt.value()) {
                            Some(attribute) => {
                                chart.write().set_attribute(attribute);
                            }
                            None => {
                                tracing::warn!(value = %evt.value(), "unknown scatter attribute")
                            }
                        }
                    },
                    for attribute in ScatterAttribute::SELECTABLE {
                        option {
                            key: "{attribute.key()}",
                            value: attribute.key(),
                            {attribute.label()}
                        }
                    }
                }
            }
            div { class: "page__average-label", {t!("scatter-average-label")} }
            div { class: "page__y-label", {t!("scatter-page-y-label")} }
            if data.is_some() {
                div { class: "page__chart", onresize: move |evt| resize_to(chart, evt),
                    ChartCanvas {
                        scene,
                        on_hover: move |target: Option<HitTarget>| {
                            hover_chart(chart, tooltip, target)
                        },
                    }
                }
            } else {
                LoadFailed {}
            }
            TooltipPanel { tooltip: tooltip(), x, y, padding }
        }
    }
}

#[component]
pub fn ScatterPersonalityPage(data: Option<Dataset<WellbeingResponse>>) -> Element {
    let mut left =
        use_signal(|| ScatterChart::new(ScatterAttribute::Introvert, ScatterAlign::Left, 0.5));
    let mut right =
        use_signal(|| ScatterChart::new(ScatterAttribute::Extravert, ScatterAlign::Right, 0.5));
    let tooltip = use_signal(|| None::<Tooltip>);
    let mut pointer = use_signal(|| (0.0, 0.0));
    use_effect(use_reactive((&data,), move |(data,)| {
        if let Some(data) = data {
            let state = SelectionState::initial();
            left.write().consume(&data, &state);
            right.write().consume(&data, &state);
        }
    }));
    let left_scene = left.read().scene().clone();
    let right_scene = right.read().scene().clone();
    let padding = left.read().config().tooltip_padding;
    let (x, y) = pointer();

    rsx! {
        section {
            class: "page page-personality",
            onmousemove: move |evt| {
                let at = evt.client_coordinates();
                pointer.set((at.x, at.y));
            },
            div { class: "page__split-heading",
                h2 { class: "page__heading",
                    {t!("scatter-page-heading")}
                    " "
                    span { class: "accent accent--blue", {t!("personality-introversion")} }
                }
                h2 { class: "page__heading",
                    {t!("scatter-page-heading")}
                    " "
                    span { class: "accent accent--orange", {t!("personality-extraversion")} }
                }
            }
            if data.is_some() {
                div {
                    class: "page__split",
                    // Each chart takes half of the shared container.
                    onresize: move |evt| {
                        let Ok(size) = evt.get_content_box_size() else {
                            return;
                        };
                        if size.width > 0.0 && size.height > 0.0 {
                            left.write().resize(size.width, size.height);
                            right.write().resize(size.width, size.height);
                        }
                    },
                    ChartCanvas {
                        scene: left_scene,
                        on_hover: move |target: Option<HitTarget>| {
                            hover_chart(left, tooltip, target)
                        },
                    }
                    ChartCanvas {
                        scene: right_scene,
                        on_hover: move |target: Option<HitTarget>| {
                            hover_chart(right, tooltip, target)
                        },
                    }
                }
                div { class: "page__y-label", {t!("personality-y-label")} }
            } else {
                LoadFailed {}
            }
            TooltipPanel { tooltip: tooltip(), x, y, padding }
        }
    }
}

fn refresh_overview(data: Signal<FactorData>, mut bar: Signal<BarChart>, state: &SelectionState) {
    let rows = data.read().overview_rows(&state.factor);
    bar.write().consume(&rows, state);
}

fn refresh_panels(
    data: Signal<FactorData>,
    mut panels: Signal<Vec<StackedBarChart>>,
    state: &SelectionState,
) {
    let data = data.read();
    for chart in panels.write().iter_mut() {
        let rows = data.panel_rows(chart.kind(), &state.category);
        chart.consume(&rows, state);
    }
}

/// Overview bar chart cross-filtered with the factor panels: clicking a bar
/// filters the panels, clicking a panel row filters the overview.
#[component]
pub fn BidirectionalPage(rows: Option<Dataset<SurveyRow>>) -> Element {
    let factor_data = use_signal(FactorData::default);
    let mut bar = use_signal(BarChart::default);
    let panels = use_signal(|| {
        FactorKind::ALL
            .into_iter()
            .map(|kind| StackedBarChart::for_panel(kind, PANEL_WIDTH))
            .collect::<Vec<_>>()
    });
    let mut tooltip = use_signal(|| None::<Tooltip>);
    let mut pointer = use_signal(|| (0.0, 0.0));

    let coordinator = use_hook(|| {
        let mut coordinator = SelectionCoordinator::new(SelectionState::initial());
        coordinator.subscribe(&[Dimension::Category, Dimension::Factor], move |state| {
            refresh_overview(factor_data, bar, state)
        });
        coordinator.subscribe(&[Dimension::Category, Dimension::Factor], move |state| {
            refresh_panels(factor_data, panels, state)
        });
        Rc::new(RefCell::new(coordinator))
    });

    let on_load = coordinator.clone();
    use_effect(use_reactive((&rows,), move |(rows,)| {
        let Some(rows) = rows else {
            return;
        };
        let mut data = factor_data;
        data.set(FactorData::from_rows(&rows));
        let state = on_load.borrow().state().clone();
        refresh_overview(factor_data, bar, &state);
        refresh_panels(factor_data, panels, &state);
    }));

    let on_bar_select = coordinator.clone();
    let on_panel_select = coordinator;

    let bar_scene = bar.read().scene().clone();
    let panel_scenes: Vec<(FactorKind, _)> = panels
        .read()
        .iter()
        .map(|chart| (chart.kind(), chart.scene().clone()))
        .collect();
    let column_height = PANEL_COLUMN_HEIGHT;
    let padding = bar.read().config().tooltip_padding;
    let (x, y) = pointer();

    let panel_column = move |kinds: &[FactorKind]| {
        let on_select = on_panel_select.clone();
        let scenes: Vec<_> = panel_scenes
            .iter()
            .filter(|(kind, _)| kinds.contains(kind))
            .cloned()
            .collect();
        rsx! {
            for (kind, scene) in scenes {
                ChartCanvas {
                    key: "{kind.category()}",
                    class: "chart chart--panel",
                    scene,
                    on_select: {
                        let coordinator = on_select.clone();
                        move |target: HitTarget| {
                            if let HitTarget::FactorRow { value, .. } = target {
                                coordinator.borrow_mut().select_factor(value);
                            }
                        }
                    },
                    on_hover: move |target: Option<HitTarget>| {
                        let detail = target.as_ref().and_then(|target| {
                            panels.read().iter().find_map(|chart| chart.tooltip(target))
                        });
                        tooltip.set(detail);
                    },
                }
            }
        }
    };
    let left_column = panel_column(&LEFT_PANELS);
    let right_column = panel_column(&RIGHT_PANELS);

    rsx! {
        section {
            class: "page page-bidirectional",
            onmousemove: move |evt| {
                let at = evt.client_coordinates();
                pointer.set((at.x, at.y));
            },
            p { class: "page__hint", {t!("bidirectional-page-hint")} }
            if rows.is_some() {
                div {
                    class: "page__chart",
                    onresize: move |evt| {
                        let Ok(size) = evt.get_content_box_size() else {
                            return;
                        };
                        if size.width > 0.0 {
                            let height = bar.read().config().height;
                            bar.write().resize(size.width, height);
                        }
                    },
                    ChartCanvas {
                        class: "chart chart--overview",
                        scene: bar_scene,
                        on_select: move |target: HitTarget| {
                            if let HitTarget::LonelinessBar(level) = target {
                                on_bar_select.borrow_mut().toggle_category(level);
                            }
                        },
                        on_hover: move |target: Option<HitTarget>| {
                            let detail = target
                                .as_ref()
                                .and_then(|target| bar.read().tooltip(target));
                            tooltip.set(detail);
                        },
                    }
                }
                div { class: "factor-columns", style: "height: {column_height}px;",
                    div { class: "factor-columns__left", {left_column} }
                    div { class: "factor-columns__right", {right_column} }
                }
            } else {
                LoadFailed {}
            }
            TooltipPanel { tooltip: tooltip(), x, y, padding }
        }
    }
}
