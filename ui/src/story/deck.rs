use dioxus::prelude::*;

use super::pages::{
    BidirectionalPage, DotChartPage, SankeyPage, ScatterPersonalityPage, ScatterPlotPage,
};
use super::slides::{IntroKind, IntroSlide, LastSlide, TitleSlide};
use super::{Deck, DeckAction, Slide};
use crate::core::dataset::{load_bundle, StoryData};
use crate::t;

/// Full-screen slide deck. Only the active slide is mounted, so chart pages
/// rebuild their scenes each time they come into view.
///
/// `start` is the slide to show; changing it moves the deck. Every move made
/// inside the deck (keys, arrows, dots) is reported through `on_navigate` so
/// the platform can keep its route in sync.
#[component]
pub fn StoryDeck(start: usize, on_navigate: Option<EventHandler<usize>>) -> Element {
    let mut deck = use_signal(|| Deck::at(Slide::COUNT, start));
    let bundle = use_resource(|| async move { load_bundle() });

    use_effect(use_reactive((&start,), move |(start,)| {
        if deck.peek().index() != start {
            deck.write().goto(start);
        }
    }));

    let move_to = move |moved: bool| {
        if moved {
            let index = deck.peek().index();
            tracing::debug!(index, "deck moved");
            if let Some(handler) = on_navigate.as_ref() {
                handler.call(index);
            }
        }
    };

    let current = deck();
    let slide = Slide::at(current.index()).unwrap_or(Slide::Title);
    let data = bundle.read().clone();

    let body = match data {
        None => rsx! {
            p { class: "page__notice", {t!("loading")} }
        },
        Some(data) => render_slide(slide, data),
    };

    rsx! {
        div {
            class: "deck",
            class: if slide.is_chart() { "deck--chart" },
            tabindex: 0,
            onmounted: move |evt| async move {
                if let Err(err) = evt.set_focus(true).await {
                    tracing::debug!("deck focus failed: {err:?}");
                }
            },
            onkeydown: move |evt| {
                if let Some(action) = DeckAction::from_key(&evt.key().to_string()) {
                    evt.prevent_default();
                    let moved = deck.write().apply(action);
                    move_to(moved);
                }
            },

            div { class: "deck__slide", {body} }

            ul { class: "deck__dots",
                for index in 0..current.len() {
                    li {
                        key: "{index}",
                        class: if index == current.index() { "dot active" } else { "dot" },
                        title: goto_label(index),
                        onclick: move |_| {
                            let moved = deck.write().goto(index);
                            move_to(moved);
                        },
                    }
                }
            }

            div { class: "deck__arrows",
                button {
                    r#type: "button",
                    class: "deck__arrow deck__arrow--prev",
                    disabled: current.is_first(),
                    aria_label: t!("deck-prev"),
                    onclick: move |_| {
                        let moved = deck.write().prev();
                        move_to(moved);
                    },
                    "‹"
                }
                button {
                    r#type: "button",
                    class: "deck__arrow deck__arrow--next",
                    disabled: current.is_last(),
                    aria_label: t!("deck-next"),
                    onclick: move |_| {
                        let moved = deck.write().next();
                        move_to(moved);
                    },
                    "›"
                }
            }
        }
    }
}

/// Tooltip of a deck dot; slides are numbered from one.
fn goto_label(index: usize) -> String {
    let position: u64 = index as u64 + 1;
    t!("deck-goto", index = position)
}

fn render_slide(slide: Slide, data: StoryData) -> Element {
    let StoryData { survey, wellbeing } = data;
    match slide {
        Slide::Title => rsx! { TitleSlide {} },
        Slide::DotIntro => rsx! { IntroSlide { kind: IntroKind::Distress } },
        Slide::DotChart => rsx! { DotChartPage { data: wellbeing } },
        Slide::Sankey => rsx! { SankeyPage { data: wellbeing } },
        Slide::ScatterIntro => rsx! { IntroSlide { kind: IntroKind::Correlations } },
        Slide::ScatterPersonality => rsx! { ScatterPersonalityPage { data: wellbeing } },
        Slide::ScatterIsolation => rsx! { ScatterPlotPage { data: wellbeing } },
        Slide::BidirectionalIntro => rsx! { IntroSlide { kind: IntroKind::Factors } },
        Slide::Bidirectional => rsx! { BidirectionalPage { rows: survey } },
        Slide::Closing => rsx! { LastSlide {} },
    }
}
