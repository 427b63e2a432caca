//! Shared UI crate for Solace: data pipeline, chart views and the story deck.
//! The web and desktop crates only add routing and a window around it.

pub mod charts;
pub mod core;
pub mod i18n;
pub mod story;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}
