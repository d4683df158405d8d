use dioxus::prelude::*;

use crate::core::theme::Theme;
use crate::t;

/// Color guide. The warning color reads as yellow on the light theme and
/// orange on the dark one, so its name follows the theme.
#[component]
pub fn HelpTooltip(theme: Theme) -> Element {
    let above_name = match theme {
        Theme::Light => t!("help-yellow"),
        Theme::Dark => t!("help-orange"),
    };

    rsx! {
        div { id: "gym-help-tooltip", class: "gym-help",
            div { class: "gym-help__title", {t!("help-title")} }
            div { class: "gym-help__row",
                span { class: "gym-help__bar gym-help__bar--on", "▏" }
                strong { " " {t!("help-green")} }
                " " {t!("help-on-target")}
            }
            div { class: "gym-help__row",
                span { class: "gym-help__bar gym-help__bar--above", "▏" }
                strong { " {above_name}" }
                " " {t!("help-above-target")}
            }
            div { class: "gym-help__row",
                span { class: "gym-help__bar gym-help__bar--below", "▏" }
                strong { " " {t!("help-red")} }
                " " {t!("help-below-target")}
            }
        }
    }
}
