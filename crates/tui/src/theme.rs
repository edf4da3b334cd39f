//! Color themes

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use shelfwise_core::ReadingStatus;

/// Available themes, in the order `t` cycles through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    HighContrast,
    SolarizedDark,
    SolarizedLight,
    Dracula,
    Nord,
    Monokai,
}

impl ThemeType {
    pub fn all() -> [ThemeType; 8] {
        [
            ThemeType::Dark,
            ThemeType::Light,
            ThemeType::HighContrast,
            ThemeType::SolarizedDark,
            ThemeType::SolarizedLight,
            ThemeType::Dracula,
            ThemeType::Nord,
            ThemeType::Monokai,
        ]
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            ThemeType::Dark => "Dark",
            ThemeType::Light => "Light",
            ThemeType::HighContrast => "High Contrast",
            ThemeType::SolarizedDark => "Solarized Dark",
            ThemeType::SolarizedLight => "Solarized Light",
            ThemeType::Dracula => "Dracula",
            ThemeType::Nord => "Nord",
            ThemeType::Monokai => "Monokai",
        }
    }

    /// Name used in the `ui.theme` config value
    pub fn config_name(&self) -> &'static str {
        match self {
            ThemeType::Dark => "dark",
            ThemeType::Light => "light",
            ThemeType::HighContrast => "high-contrast",
            ThemeType::SolarizedDark => "solarized-dark",
            ThemeType::SolarizedLight => "solarized-light",
            ThemeType::Dracula => "dracula",
            ThemeType::Nord => "nord",
            ThemeType::Monokai => "monokai",
        }
    }

    /// Looks up a theme by its config name, falling back to the default
    pub fn from_name(name: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|t| t.config_name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                log::warn!("Unknown theme {name:?}, using dark");
                ThemeType::Dark
            })
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let index = all.iter().position(|t| t == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}

/// Resolved palette for one theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,
    pub text: Color,
    pub text_secondary: Color,
    pub background: Color,
    /// Selection color
    pub highlight: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub border: Color,
    /// Star rating color
    pub stars: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        let base = match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::HighContrast => Self::high_contrast(),
            ThemeType::SolarizedDark => Self::solarized(Color::Rgb(131, 148, 150), Color::Rgb(88, 110, 117), Color::Rgb(0, 43, 54), Color::Rgb(7, 54, 66)),
            ThemeType::SolarizedLight => Self::solarized(Color::Rgb(101, 123, 131), Color::Rgb(147, 161, 161), Color::Rgb(253, 246, 227), Color::Rgb(238, 232, 213)),
            ThemeType::Dracula => Self::dracula(),
            ThemeType::Nord => Self::nord(),
            ThemeType::Monokai => Self::monokai(),
        };
        Self { theme_type, ..base }
    }

    fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            text: Color::White,
            text_secondary: Color::Gray,
            background: Color::Black,
            highlight: Color::Yellow,
            accent: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::Gray,
            stars: Color::Yellow,
        }
    }

    fn light() -> Self {
        Self {
            text: Color::Black,
            text_secondary: Color::DarkGray,
            background: Color::White,
            highlight: Color::Blue,
            accent: Color::Magenta,
            border: Color::DarkGray,
            stars: Color::Rgb(184, 134, 11),
            ..Self::dark()
        }
    }

    fn high_contrast() -> Self {
        Self {
            text: Color::White,
            text_secondary: Color::LightYellow,
            background: Color::Black,
            highlight: Color::LightYellow,
            accent: Color::LightCyan,
            success: Color::LightGreen,
            warning: Color::LightYellow,
            error: Color::LightRed,
            border: Color::White,
            stars: Color::LightYellow,
            ..Self::dark()
        }
    }

    /// Solarized accents over the given base tones
    fn solarized(text: Color, text_secondary: Color, background: Color, border: Color) -> Self {
        Self {
            text,
            text_secondary,
            background,
            border,
            highlight: Color::Rgb(181, 137, 0), // yellow
            accent: Color::Rgb(38, 139, 210),   // blue
            success: Color::Rgb(133, 153, 0),   // green
            warning: Color::Rgb(203, 75, 22),   // orange
            error: Color::Rgb(220, 50, 47),     // red
            stars: Color::Rgb(181, 137, 0),
            ..Self::dark()
        }
    }

    fn dracula() -> Self {
        Self {
            text: Color::Rgb(248, 248, 242),
            text_secondary: Color::Rgb(98, 114, 164),
            background: Color::Rgb(40, 42, 54),
            highlight: Color::Rgb(255, 121, 198), // pink
            accent: Color::Rgb(189, 147, 249),    // purple
            success: Color::Rgb(80, 250, 123),
            warning: Color::Rgb(255, 184, 108),
            error: Color::Rgb(255, 85, 85),
            border: Color::Rgb(68, 71, 90),
            stars: Color::Rgb(241, 250, 140),
            ..Self::dark()
        }
    }

    fn nord() -> Self {
        Self {
            text: Color::Rgb(216, 222, 233),           // nord4
            text_secondary: Color::Rgb(143, 157, 179), // nord3
            background: Color::Rgb(46, 52, 64),        // nord0
            highlight: Color::Rgb(136, 192, 208),      // nord8
            accent: Color::Rgb(129, 161, 193),         // nord9
            success: Color::Rgb(163, 190, 140),        // nord14
            warning: Color::Rgb(208, 135, 112),        // nord12
            error: Color::Rgb(191, 97, 106),           // nord11
            border: Color::Rgb(59, 66, 82),            // nord1
            stars: Color::Rgb(235, 203, 139),          // nord13
            ..Self::dark()
        }
    }

    fn monokai() -> Self {
        Self {
            text: Color::Rgb(248, 248, 240),
            text_secondary: Color::Rgb(117, 113, 94),
            background: Color::Rgb(39, 40, 34),
            highlight: Color::Rgb(249, 38, 114),
            accent: Color::Rgb(102, 217, 239),
            success: Color::Rgb(166, 226, 46),
            warning: Color::Rgb(253, 151, 31),
            error: Color::Rgb(249, 38, 114),
            border: Color::Rgb(73, 72, 62),
            stars: Color::Rgb(230, 219, 116),
            ..Self::dark()
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn stars_style(&self) -> Style {
        Style::default().fg(self.stars)
    }

    /// Badge color for a reading status
    pub fn status_style(&self, status: ReadingStatus) -> Style {
        match status {
            ReadingStatus::Owned => self.text_secondary_style(),
            ReadingStatus::Started => self.accent_style(),
            ReadingStatus::Finished => self.success_style(),
        }
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
