use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub found: Style,
    pub missing: Style,
    pub error: Style,
    pub label: Style,
    pub dim: Style,
}

impl Theme {
    /// Colors only when stdout is a terminal, so piped source stays clean
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            found: Style::new().green().bold(),
            missing: Style::new().yellow().bold(),
            error: Style::new().red().bold(),
            label: Style::new().magenta(),
            dim: Style::new().bright_black(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            found: Style::new(),
            missing: Style::new(),
            error: Style::new(),
            label: Style::new(),
            dim: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
