//! The injected panel: header buttons, stat cards, color guide and the
//! target configuration form.
//!
//! State lives in signals owned by [`GymPanel`]; the refresh loop writes
//! into them through [`PanelHost`]. Colors come from the palette as CSS
//! custom properties on the root element, so a host theme switch restyles
//! everything already on screen.

mod cards;
mod config;
mod help;

use std::rc::Rc;

use dioxus::prelude::*;

use crate::core::collapse::{CollapseStore, Viewport};
use crate::core::dom::{self, DomPage};
use crate::core::form::TargetDraft;
use crate::core::platform::HostProfile;
use crate::core::refresh::{RefreshHost, RefreshLoop, RefreshTick, Snapshot};
use crate::core::storage::{self, SettingsStore};
use crate::core::targets::{TargetSet, TargetStore};
use crate::core::theme::{Theme, ThemeSignal};
use crate::core::timing::SystemClock;
use crate::i18n;
use crate::t;

use cards::StatCards;
use config::ConfigForm;
use help::HelpTooltip;

const PANEL_CSS: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/panel.css"));

type SharedSettings = Rc<dyn SettingsStore>;

#[derive(Clone, Copy, PartialEq)]
struct PanelSignals {
    collapsed: Signal<bool>,
    targets: Signal<TargetSet>,
    snapshot: Signal<Option<Snapshot>>,
    theme: Signal<Theme>,
    show_help: Signal<bool>,
    show_config: Signal<bool>,
    draft: Signal<TargetDraft>,
}

impl PanelSignals {
    /// Out-of-band refresh after a user action.
    fn refresh(mut self) {
        let targets = *self.targets.peek();
        self.snapshot.set(Some(Snapshot::capture(&DomPage, targets)));
    }

    fn set_collapsed(mut self, collapsed: bool, store: &CollapseStore<SharedSettings>, viewport: Viewport) {
        self.collapsed.set(collapsed);
        store.save(viewport, collapsed);
        if collapsed {
            self.show_config.set(false);
        } else {
            self.refresh();
        }
    }

    fn toggle_collapsed(self, store: &CollapseStore<SharedSettings>, viewport: Viewport) {
        let collapsed = *self.collapsed.peek();
        self.set_collapsed(!collapsed, store, viewport);
    }

    fn toggle_help(mut self) {
        let open = !*self.show_help.peek();
        self.show_help.set(open);
        if open {
            self.show_config.set(false);
        }
    }

    fn open_config(mut self) {
        let targets = *self.targets.peek();
        self.draft.set(TargetDraft::from_targets(&targets));
        self.show_config.set(true);
        self.show_help.set(false);
    }

    fn toggle_config(mut self, store: &CollapseStore<SharedSettings>, viewport: Viewport) {
        if *self.collapsed.peek() {
            self.set_collapsed(false, store, viewport);
            self.open_config();
        } else if *self.show_config.peek() {
            self.show_config.set(false);
        } else {
            self.open_config();
        }
    }

    fn save_targets(mut self, store: &TargetStore<SharedSettings>, targets: TargetSet) {
        if let Err(err) = store.save(&targets) {
            tracing::warn!("could not persist targets: {err}");
        }
        self.targets.set(targets);
        self.show_config.set(false);
        self.refresh();
    }
}

/// Bridges the refresh loop to the panel's signals and the live page.
struct PanelHost {
    page: DomPage,
    signals: PanelSignals,
}

impl RefreshHost for PanelHost {
    type Page = DomPage;

    fn page(&self) -> &DomPage {
        &self.page
    }

    fn collapsed(&self) -> bool {
        *self.signals.collapsed.peek()
    }

    fn targets(&self) -> TargetSet {
        *self.signals.targets.peek()
    }

    fn theme_signal(&self) -> ThemeSignal {
        dom::theme_signal()
    }

    fn apply(&mut self, tick: RefreshTick) {
        if tick.theme.changed {
            self.signals.theme.set(tick.theme.theme);
        }
        if let Some(snapshot) = tick.snapshot {
            self.signals.snapshot.set(Some(snapshot));
        }
    }
}

#[component]
pub fn GymPanel(profile: HostProfile) -> Element {
    i18n::init();

    let settings: SharedSettings = use_hook(|| -> SharedSettings { Rc::new(storage::browser_settings()) });
    let viewport = use_hook(dom::current_viewport);
    let collapse_store = use_hook({
        let settings = settings.clone();
        move || Rc::new(CollapseStore::new(settings, &profile))
    });
    let target_store = use_hook({
        let settings = settings.clone();
        move || Rc::new(TargetStore::new(settings))
    });

    let signals = PanelSignals {
        collapsed: use_signal({
            let store = collapse_store.clone();
            move || store.load(viewport)
        }),
        targets: use_signal({
            let store = target_store.clone();
            move || store.load()
        }),
        snapshot: use_signal(|| None::<Snapshot>),
        theme: use_signal(|| Theme::from_signal(&dom::theme_signal())),
        show_help: use_signal(|| false),
        show_config: use_signal(|| false),
        draft: use_signal(TargetDraft::default),
    };

    use_future(move || async move {
        let initial_theme = *signals.theme.peek();
        let mut host = PanelHost {
            page: DomPage,
            signals,
        };
        RefreshLoop::new(&profile, SystemClock)
            .run(&mut host, initial_theme, None)
            .await;
    });

    let toggle_collapsed = {
        let store = collapse_store.clone();
        move |_: MouseEvent| signals.toggle_collapsed(&store, viewport)
    };
    let toggle_config = {
        let store = collapse_store.clone();
        move |_: MouseEvent| signals.toggle_config(&store, viewport)
    };
    let save_targets = {
        let store = target_store.clone();
        move |targets: TargetSet| signals.save_targets(&store, targets)
    };

    let theme = (signals.theme)();
    let is_collapsed = (signals.collapsed)();
    let show_help = (signals.show_help)();
    let show_config = (signals.show_config)() && !is_collapsed;
    let snapshot = (signals.snapshot)();
    let palette_vars = theme.palette().css_variables();
    let panel_class = if is_collapsed {
        "gym-panel gym-panel--collapsed"
    } else {
        "gym-panel"
    };
    let (collapse_glyph, collapse_label) = if is_collapsed {
        ("+", t!("expand-label"))
    } else {
        ("−", t!("collapse-label"))
    };

    rsx! {
        style { {PANEL_CSS} }
        div {
            id: "gym-helper-display",
            class: "{panel_class}",
            "data-theme": theme.as_str(),
            "data-host": profile.environment.as_str(),
            style: "{palette_vars}",

            div { class: "gym-panel__header",
                h3 {
                    id: "gym-header-clickable",
                    class: "gym-panel__title",
                    onclick: toggle_collapsed.clone(),
                    {t!("panel-title")}
                }
                div { class: "gym-panel__buttons",
                    button {
                        id: "gym-help-btn",
                        r#type: "button",
                        class: "gym-btn gym-btn--neutral",
                        aria_label: t!("help-button-label"),
                        onclick: move |_| signals.toggle_help(),
                        "?"
                    }
                    button {
                        id: "gym-collapse-btn",
                        r#type: "button",
                        class: "gym-btn gym-btn--neutral",
                        aria_label: collapse_label,
                        onclick: toggle_collapsed,
                        "{collapse_glyph}"
                    }
                    button {
                        id: "gym-config-btn",
                        r#type: "button",
                        class: "gym-btn gym-btn--primary",
                        onclick: toggle_config,
                        {t!("config-button")}
                    }
                }
            }

            if show_help {
                HelpTooltip { theme }
            }

            if !is_collapsed {
                StatCards { snapshot }
            }

            if show_config {
                ConfigForm {
                    draft: signals.draft,
                    on_save: save_targets,
                    on_cancel: move |_| {
                        let mut show = signals.show_config;
                        show.set(false);
                    },
                }
            }
        }
    }
}
