use dioxus::prelude::*;

use crate::core::classify::Deviation;
use crate::core::format;
use crate::core::refresh::Snapshot;
use crate::core::stats::Stat;
use crate::i18n;
use crate::t;

/// The four stat cards, or a no-data notice when every stat read as zero.
#[component]
pub fn StatCards(snapshot: Option<Snapshot>) -> Element {
    let Some(snapshot) = snapshot else {
        return rsx! {
            div { id: "gym-stats-display", class: "gym-stats" }
        };
    };
    let Some(deviations) = snapshot.deviations else {
        return rsx! {
            div { id: "gym-stats-display", class: "gym-stats gym-stats--empty",
                p { class: "gym-stats__empty", {t!("no-data")} }
            }
        };
    };

    rsx! {
        div { id: "gym-stats-display", class: "gym-stats",
            for stat in Stat::ALL {
                StatCard {
                    key: "{stat.key()}",
                    stat,
                    value: snapshot.sample[stat],
                    deviation: deviations[stat],
                }
            }
        }
    }
}

#[component]
fn StatCard(stat: Stat, value: u64, deviation: Deviation) -> Element {
    let label = i18n::stat_label(stat);
    let current = format::format_count(value);
    let share = format::format_share(deviation.current);
    let diff = deviation.diff_label();
    let target = format::format_target(deviation.target);
    let share_class = format!(
        "gym-stat__share {}",
        deviation.classification.css_class()
    );

    rsx! {
        div { class: "gym-stat", "data-stat": stat.key(),
            div { class: "gym-stat__label", "{label}" }
            div { class: "gym-stat__current", {t!("stat-current")} " {current}" }
            div { class: "{share_class}", "{share} ({diff})" }
            div { class: "gym-stat__target", {t!("stat-target")} " {target}" }
        }
    }
}
