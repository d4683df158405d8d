use dioxus::prelude::*;

use crate::core::form::TargetDraft;
use crate::core::stats::Stat;
use crate::core::targets::TargetSet;
use crate::i18n;
use crate::t;

/// Target percentage editor. Save stays disabled until the inputs add up
/// to 100 (±0.1).
#[component]
pub fn ConfigForm(
    mut draft: Signal<TargetDraft>,
    on_save: EventHandler<TargetSet>,
    on_cancel: EventHandler<()>,
) -> Element {
    let current = draft.read().clone();
    let can_save = current.can_save();
    let total_class = if current.is_balanced() {
        "gym-config__total gym-config__total--ok"
    } else {
        "gym-config__total gym-config__total--off"
    };
    let total_label = format!("{:.1}%", current.total());

    rsx! {
        div { id: "gym-config-panel", class: "gym-config",
            h4 { class: "gym-config__title", {t!("config-title")} }
            div { class: "gym-config__grid",
                for stat in Stat::ALL {
                    div { key: "{stat.key()}", class: "gym-config__field",
                        label { r#for: "target-{stat.key()}",
                            {i18n::stat_label(stat)}
                            " "
                            {t!("config-percent-suffix")}
                        }
                        input {
                            id: "target-{stat.key()}",
                            r#type: "number",
                            min: "0",
                            max: "100",
                            step: "0.1",
                            value: "{current.input(stat)}",
                            oninput: move |evt: FormEvent| {
                                draft.with_mut(|d| d.set_input(stat, evt.value()));
                            },
                        }
                    }
                }
            }
            div { class: "gym-config__footer",
                span { id: "total-percentage", class: "{total_class}",
                    {t!("config-total")}
                    " {total_label}"
                }
                button {
                    id: "save-targets",
                    r#type: "button",
                    class: "gym-btn gym-btn--success",
                    disabled: !can_save,
                    onclick: move |_| {
                        let parsed = draft.peek().to_target_set();
                        if let Some(targets) = parsed {
                            on_save.call(targets);
                        }
                    },
                    {t!("config-save")}
                }
                button {
                    id: "cancel-config",
                    r#type: "button",
                    class: "gym-btn gym-btn--danger",
                    onclick: move |_| on_cancel.call(()),
                    {t!("config-cancel")}
                }
            }
        }
    }
}
