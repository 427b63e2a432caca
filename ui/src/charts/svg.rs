//! Dioxus renderer for [`Scene`] graphs.

use dioxus::prelude::*;

use super::scene::{num, HitTarget, Node, Scene};

#[component]
pub fn ChartCanvas(
    scene: Scene,
    #[props(into)] class: Option<String>,
    on_select: Option<EventHandler<HitTarget>>,
    on_hover: Option<EventHandler<Option<HitTarget>>>,
) -> Element {
    let width = num(scene.width);
    let height = num(scene.height);
    let class = class.unwrap_or_else(|| "chart".to_string());

    rsx! {
        svg {
            class: "{class}",
            width: "{width}",
            height: "{height}",
            view_box: "0 0 {width} {height}",
            for node in scene.nodes {
                SceneNode { node, on_select, on_hover }
            }
        }
    }
}

fn select(handler: Option<EventHandler<HitTarget>>, hit: &Option<HitTarget>) {
    if let (Some(handler), Some(hit)) = (handler, hit) {
        handler.call(hit.clone());
    }
}

fn hover(handler: Option<EventHandler<Option<HitTarget>>>, hit: &Option<HitTarget>) {
    if let (Some(handler), Some(_)) = (handler, hit) {
        handler.call(hit.clone());
    }
}

fn leave(handler: Option<EventHandler<Option<HitTarget>>>, hit: &Option<HitTarget>) {
    if let (Some(handler), Some(_)) = (handler, hit) {
        handler.call(None);
    }
}

#[component]
fn SceneNode(
    node: Node,
    on_select: Option<EventHandler<HitTarget>>,
    on_hover: Option<EventHandler<Option<HitTarget>>>,
) -> Element {
    match node {
        Node::Group {
            x,
            y,
            class,
            children,
        } => rsx! {
            g {
                class,
                transform: "translate({num(x)},{num(y)})",
                for child in children {
                    SceneNode { node: child, on_select, on_hover }
                }
            }
        },
        Node::Rect {
            x,
            y,
            width,
            height,
            rx,
            paint,
            hit,
        } => {
            let (on_click, on_enter, on_leave) = (hit.clone(), hit.clone(), hit.clone());
            rsx! {
                rect {
                    class: if hit.is_some() { "hit" },
                    x: num(x),
                    y: num(y),
                    width: num(width.max(0.0)),
                    height: num(height.max(0.0)),
                    rx: (rx > 0.0).then(|| num(rx)),
                    fill: paint.fill,
                    stroke: paint.stroke,
                    stroke_width: paint.stroke_width,
                    opacity: paint.opacity,
                    fill_opacity: paint.fill_opacity,
                    stroke_opacity: paint.stroke_opacity,
                    onclick: move |_| select(on_select, &on_click),
                    onmouseenter: move |_| hover(on_hover, &on_enter),
                    onmouseleave: move |_| leave(on_hover, &on_leave),
                }
            }
        }
        Node::Circle {
            cx,
            cy,
            r,
            paint,
            hit,
        } => {
            let (on_click, on_enter, on_leave) = (hit.clone(), hit.clone(), hit.clone());
            rsx! {
                circle {
                    class: if hit.is_some() { "hit" },
                    cx: num(cx),
                    cy: num(cy),
                    r: num(r),
                    fill: paint.fill,
                    stroke: paint.stroke,
                    stroke_width: paint.stroke_width,
                    opacity: paint.opacity,
                    fill_opacity: paint.fill_opacity,
                    onclick: move |_| select(on_select, &on_click),
                    onmouseenter: move |_| hover(on_hover, &on_enter),
                    onmouseleave: move |_| leave(on_hover, &on_leave),
                }
            }
        }
        Node::Line {
            x1,
            y1,
            x2,
            y2,
            paint,
        } => rsx! {
            line {
                x1: num(x1),
                y1: num(y1),
                x2: num(x2),
                y2: num(y2),
                stroke: paint.stroke,
                stroke_width: paint.stroke_width,
                stroke_opacity: paint.stroke_opacity,
            }
        },
        Node::Path { d, paint, hit } => {
            let (on_click, on_enter, on_leave) = (hit.clone(), hit.clone(), hit.clone());
            rsx! {
                path {
                    d,
                    fill: paint.fill,
                    stroke: paint.stroke,
                    stroke_width: paint.stroke_width,
                    stroke_opacity: paint.stroke_opacity,
                    onclick: move |_| select(on_select, &on_click),
                    onmouseenter: move |_| hover(on_hover, &on_enter),
                    onmouseleave: move |_| leave(on_hover, &on_leave),
                }
            }
        }
        Node::Text {
            x,
            y,
            content,
            anchor,
            size,
            class,
            paint,
        } => rsx! {
            text {
                class,
                x: num(x),
                y: num(y),
                text_anchor: anchor.as_str(),
                font_size: size.map(num),
                fill: paint.fill,
                opacity: paint.opacity,
                "{content}"
            }
        },
        Node::Gradient {
            id,
            x1,
            y1,
            x2,
            y2,
            stops,
        } => rsx! {
            defs {
                linearGradient {
                    id,
                    "gradientUnits": "userSpaceOnUse",
                    x1: num(x1),
                    y1: num(y1),
                    x2: num(x2),
                    y2: num(y2),
                    for (offset, color) in stops {
                        stop { offset: "{num(offset * 100.0)}%", "stop-color": color }
                    }
                }
            }
        },
    }
}
