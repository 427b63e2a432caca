//! Text-only slides between the charts.

use dioxus::prelude::*;

use crate::t;

const SURVEY_SOURCE: &str = "https://osf.io/5ktgm";
const STATCAN_SOURCE: &str = "https://www150.statcan.gc.ca/t1/tbl1/en/tv.action?pid=4510004901";

#[component]
pub fn TitleSlide() -> Element {
    rsx! {
        section { class: "slide slide-title",
            h1 { class: "slide-title__heading", {t!("title-heading")} }
            p { class: "slide-title__tagline", {t!("title-tagline")} }
            div { class: "highlight-box",
                p {
                    {t!("title-sources")}
                    " "
                    a { href: SURVEY_SOURCE, target: "_blank", {t!("title-source-link")} }
                    " "
                    {t!("title-source-and")}
                    " "
                    a { href: STATCAN_SOURCE, target: "_blank", {t!("title-source-link")} }
                    "."
                }
                div { class: "highlight-box__tip",
                    strong { {t!("title-tip-heading")} }
                    " "
                    {t!("title-tip")}
                }
            }
        }
    }
}

/// Which chapter an [`IntroSlide`] opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntroKind {
    Distress,
    Correlations,
    Factors,
}

#[component]
pub fn IntroSlide(kind: IntroKind) -> Element {
    let (heading, phrases, tail, body, highlights) = match kind {
        IntroKind::Distress => (
            t!("dot-intro-heading"),
            vec![t!("dot-intro-phrase-1"), t!("dot-intro-phrase-2")],
            None,
            t!("dot-intro-body"),
            vec![t!("dot-intro-highlight-1"), t!("dot-intro-highlight-2")],
        ),
        IntroKind::Correlations => (
            t!("scatter-intro-heading"),
            vec![
                t!("scatter-intro-phrase-1"),
                t!("scatter-intro-phrase-2"),
                t!("scatter-intro-phrase-3"),
                t!("scatter-intro-phrase-4"),
            ],
            Some(t!("scatter-intro-tail")),
            t!("scatter-intro-body"),
            vec![t!("scatter-intro-highlight-1"), t!("scatter-intro-highlight-2")],
        ),
        IntroKind::Factors => (
            t!("bidirectional-intro-heading"),
            vec![
                t!("bidirectional-intro-phrase-1"),
                t!("bidirectional-intro-phrase-2"),
                t!("bidirectional-intro-phrase-3"),
                t!("bidirectional-intro-phrase-4"),
            ],
            None,
            t!("bidirectional-intro-body"),
            Vec::new(),
        ),
    };
    let count = phrases.len();

    rsx! {
        section { class: "slide slide-intro",
            h2 { class: "slide-intro__heading", "{heading}" }
            // Phrases cycle through a CSS animation, one visible at a time.
            div { class: "rotating-words", style: "--count: {count};",
                for (i, phrase) in phrases.into_iter().enumerate() {
                    span {
                        key: "{i}",
                        class: "rotating-words__item",
                        style: "--i: {i};",
                        "{phrase}"
                    }
                }
            }
            if let Some(tail) = tail {
                h2 { class: "slide-intro__heading", "{tail}" }
            }
            p { class: "slide-intro__body", "{body}" }
            if !highlights.is_empty() {
                div { class: "slide-intro__highlights",
                    for (i, text) in highlights.into_iter().enumerate() {
                        div {
                            key: "{i}",
                            class: "highlight-box",
                            class: if i == 0 { "highlight-box--blue" },
                            class: if i > 0 { "highlight-box--yellow" },
                            "{text}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn LastSlide() -> Element {
    rsx! {
        section { class: "slide slide-last",
            h2 { class: "slide-last__heading", {t!("closing-heading")} }
            p { class: "slide-last__sources",
                a { href: SURVEY_SOURCE, target: "_blank", "COVIDiSTRESS Global Survey" }
                " · "
                a { href: STATCAN_SOURCE, target: "_blank", "Statistics Canada 45-10-0049-01" }
            }
        }
    }
}
