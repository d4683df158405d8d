//! Shared crate for the gym ratios overlay: the platform-agnostic core and
//! the Dioxus panel that the web entry point mounts into the host page.

pub mod core;
pub mod i18n;
pub mod panel;

pub use panel::GymPanel;
