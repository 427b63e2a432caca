#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config, LogicalSize};
use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::story::{Chapter, StoryDeck};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopNavbar)]
    #[route("/")]
    Home {},
    #[route("/slide/:index")]
    SlideAt { index: usize },
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Shared theme; desktop ships no assets of its own.

#[cfg(feature = "desktop")]
fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger init failed: {err}");
    }

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("Solace – v{}", env!("CARGO_PKG_VERSION")))
                    .with_inner_size(LogicalSize::new(1280.0, 860.0))
                    .with_min_inner_size(LogicalSize::new(720.0, 540.0)),
            ),
        )
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    LaunchBuilder::server().launch(App);
}

fn nav_chapter(chapter: Chapter, label: &str) -> Element {
    let index = chapter.first_slide().index();
    rsx!(Link { class: "navbar__link", to: Route::SlideAt { index }, "{label}" })
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // AppNavbar writes the selected language here; the keyed wrapper below
    // remounts the routed tree so every label is looked up again.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    register_nav(NavBuilder {
        chapter: nav_chapter,
    });

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        div {
            key: "{lang_code()}",
            Router::<Route> { }
        }
    }
}

#[component]
fn Home() -> Element {
    rsx! {
        RoutedDeck { index: 0 }
    }
}

#[component]
fn SlideAt(index: usize) -> Element {
    rsx! {
        RoutedDeck { index }
    }
}

#[component]
fn RoutedDeck(index: usize) -> Element {
    let navigator = use_navigator();
    rsx! {
        StoryDeck {
            start: index,
            on_navigate: move |index: usize| {
                navigator.replace(Route::SlideAt { index });
            },
        }
    }
}

/// Desktop layout: shared navbar above the routed deck.
#[component]
fn DesktopNavbar() -> Element {
    rsx! {
        AppNavbar { }

        main { class: "app-main", Outlet::<Route> {} }
    }
}
