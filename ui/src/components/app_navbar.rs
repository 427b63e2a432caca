use crate::i18n;
use crate::story::Chapter;
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Platform hook for chapter links.
///
/// `ui` does not know the platform's `Route` enum, so each platform registers a
/// builder that wraps a localized chapter label in its own `Link`:
///
/// ```ignore
/// fn chapter_link(chapter: Chapter, label: &str) -> Element {
///     let index = chapter.first_slide().index();
///     rsx!(Link { class: "navbar__link", to: Route::SlideAt { index }, "{label}" })
/// }
/// register_nav(NavBuilder { chapter: chapter_link });
/// ```
///
/// Without a registered builder the navbar renders its `children` instead.
pub struct NavBuilder {
    pub chapter: fn(chapter: Chapter, label: &str) -> Element,
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    if NAV_BUILDER.set(builder).is_err() {
        tracing::trace!("nav builder already registered");
    }
}

pub fn chapter_label(chapter: Chapter) -> String {
    match chapter {
        Chapter::Opening => t!("chapter-opening"),
        Chapter::Distress => t!("chapter-distress"),
        Chapter::Correlations => t!("chapter-correlations"),
        Chapter::Factors => t!("chapter-factors"),
        Chapter::Closing => t!("chapter-closing"),
    }
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();

    let mut current_lang = use_signal(|| "en-US".to_string());
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    // Global language code, when the platform provides one.
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        match i18n::set_language(&val) {
            Ok(()) => {
                tracing::info!(lang = %val, "language changed");
                current_lang.set(val.clone());
                if let Some(mut code) = lang_code_ctx {
                    code.set(val);
                }
            }
            Err(err) => tracing::warn!(lang = %val, "language switch failed: {err}"),
        }
    };

    let builder = NAV_BUILDER.get();
    let tagline = t!("tagline");

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            // Re-render marker for the global language signal.
            div { style: "display:none", "{lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Solace" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                if let Some(builder) = builder {
                    nav { class: "navbar__links",
                        for chapter in Chapter::ALL {
                            {(builder.chapter)(chapter, &chapter_label(chapter))}
                        }
                    }
                } else {
                    nav { class: "navbar__links", {children} }
                }

                if show_switcher {
                    div { class: "navbar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            for code in langs() {
                                option { key: "{code}", value: "{code}", "{code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_chapter_has_a_label() {
        i18n::init();
        for chapter in Chapter::ALL {
            assert!(!chapter_label(chapter).trim().is_empty(), "{chapter:?}");
        }
    }
}
