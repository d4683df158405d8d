//! Host color-theme detection and the panel palette for each theme.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// What the host page exposes about its current theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeSignal {
    pub body_classes: Vec<String>,
    pub inline_background: String,
    pub computed_background: String,
}

const DARK_CLASSES: [&str; 2] = ["dark-mode", "dark"];
const DARK_INLINE_MARKER: &str = "#191919";
const DARK_COMPUTED_BACKGROUND: &str = "rgb(25, 25, 25)";

impl Theme {
    pub fn from_signal(signal: &ThemeSignal) -> Self {
        let dark = signal
            .body_classes
            .iter()
            .any(|class| DARK_CLASSES.contains(&class.as_str()))
            || signal.inline_background.contains(DARK_INLINE_MARKER)
            || signal.computed_background.trim() == DARK_COMPUTED_BACKGROUND;
        if dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => DARK,
            Theme::Light => LIGHT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeCheck {
    pub theme: Theme,
    pub changed: bool,
}

/// Compare the host's current theme with the one last applied.
pub fn check_theme(previous: Theme, signal: &ThemeSignal) -> ThemeCheck {
    let theme = Theme::from_signal(signal);
    ThemeCheck {
        theme,
        changed: theme != previous,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub panel_bg: &'static str,
    pub panel_border: &'static str,
    pub config_bg: &'static str,
    pub config_border: &'static str,
    pub stat_box_bg: &'static str,
    pub stat_box_border: &'static str,
    pub stat_box_shadow: &'static str,
    pub input_bg: &'static str,
    pub input_border: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub danger: &'static str,
    pub primary: &'static str,
    pub neutral: &'static str,
}

const DARK: Palette = Palette {
    panel_bg: "#2a2a2a",
    panel_border: "#444",
    config_bg: "#333",
    config_border: "#555",
    stat_box_bg: "#3a3a3a",
    stat_box_border: "#444",
    stat_box_shadow: "0 1px 3px rgba(0,0,0,0.1)",
    input_bg: "#444",
    input_border: "#555",
    text_primary: "#fff",
    text_secondary: "#ccc",
    text_muted: "#999",
    success: "#5cb85c",
    warning: "#f0ad4e",
    danger: "#d9534f",
    primary: "#4a90e2",
    neutral: "#666",
};

const LIGHT: Palette = Palette {
    panel_bg: "#f8f9fa",
    panel_border: "rgba(102, 102, 102, 0.3)",
    config_bg: "#ffffff",
    config_border: "#ced4da",
    stat_box_bg: "#ffffff",
    stat_box_border: "rgba(102, 102, 102, 0.3)",
    stat_box_shadow: "rgba(50, 50, 50, 0.2) 0px 0px 2px 0px",
    input_bg: "#ffffff",
    input_border: "#ced4da",
    text_primary: "#212529",
    text_secondary: "#6c757d",
    text_muted: "#adb5bd",
    success: "rgb(105, 168, 41)",
    warning: "#ffc107",
    danger: "#dc3545",
    primary: "#007bff",
    neutral: "#6c757d",
};

impl Palette {
    /// Inline `style` value exposing the palette as CSS custom properties.
    pub fn css_variables(&self) -> String {
        [
            ("--gr-panel-bg", self.panel_bg),
            ("--gr-panel-border", self.panel_border),
            ("--gr-config-bg", self.config_bg),
            ("--gr-config-border", self.config_border),
            ("--gr-box-bg", self.stat_box_bg),
            ("--gr-box-border", self.stat_box_border),
            ("--gr-box-shadow", self.stat_box_shadow),
            ("--gr-input-bg", self.input_bg),
            ("--gr-input-border", self.input_border),
            ("--gr-text", self.text_primary),
            ("--gr-text-secondary", self.text_secondary),
            ("--gr-text-muted", self.text_muted),
            ("--gr-success", self.success),
            ("--gr-warning", self.warning),
            ("--gr-danger", self.danger),
            ("--gr-primary", self.primary),
            ("--gr-neutral", self.neutral),
        ]
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
    }
}
