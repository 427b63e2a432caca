use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::story::{Chapter, StoryDeck};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/slide/:index")]
    SlideAt { index: usize },
}

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

fn nav_chapter(chapter: Chapter, label: &str) -> Element {
    let index = chapter.first_slide().index();
    rsx!(Link {
        class: "navbar__link",
        to: Route::SlideAt { index },
        "{label}"
    })
}

fn main() {
    if let Err(err) = dioxus::logger::init(Level::INFO) {
        eprintln!("logger init failed: {err}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    register_nav(NavBuilder {
        chapter: nav_chapter,
    });

    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    rsx! {
        document::Title { "Solace" }
        document::Style { "{THEME_CSS}" }

        div {
            key: "{lang_code()}",
            Router::<Route> {}
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

/// Keeps the URL in step with the deck position.
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

/// Layout with the shared navbar around the web `Route` outlet.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {}
        main { class: "app-main", Outlet::<Route> {} }
    }
}
