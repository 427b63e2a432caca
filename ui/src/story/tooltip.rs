use dioxus::prelude::*;

use crate::charts::{Tooltip, TooltipLine};

/// Floating detail panel next to the pointer. Renders nothing without a
/// tooltip.
#[component]
pub fn TooltipPanel(tooltip: Option<Tooltip>, x: f64, y: f64, padding: f64) -> Element {
    let Some(tooltip) = tooltip else {
        return rsx! {};
    };
    let tone = tooltip.tone.unwrap_or("default");
    let left = x + padding;
    let top = y + padding;

    rsx! {
        div {
            class: "tooltip tooltip--{tone}",
            style: "left: {left}px; top: {top}px;",
            for (i, line) in tooltip.lines.into_iter().enumerate() {
                match line {
                    TooltipLine::Heading(text) => rsx! {
                        div { key: "{i}", class: "tooltip-heading", "{text}" }
                    },
                    TooltipLine::Title(text) => rsx! {
                        div { key: "{i}", class: "tooltip-title", "{text}" }
                    },
                    TooltipLine::Spacer => rsx! {
                        div { key: "{i}", class: "tooltip-spacer" }
                    },
                    TooltipLine::Swatch { color, value, label } => rsx! {
                        div { key: "{i}", class: "tooltip-row",
                            span { class: "tooltip-swatch", style: "background: {color};" }
                            span { class: "tooltip-value", "{value}" }
                            span { class: "tooltip-label", "{label}" }
                        }
                    },
                }
            }
        }
    }
}
