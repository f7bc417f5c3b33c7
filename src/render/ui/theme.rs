//! Color theme and styling definitions using ratatui colors

use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Plain line text (None uses terminal default)
    pub normal_text: Option<Color>,

    /// Line number gutter
    pub line_numbers: Option<Color>,

    /// Whether synthetic rows use their source color
    pub source_colors: bool,

    /// Status line background
    pub status_bg: Color,

    /// Status line text
    pub status_fg: Color,

    /// Status messages reporting a failed action
    pub error_text: Color,

    /// Tab of the active source
    pub active_tab: Style,

    /// "No results" and similar placeholders
    pub placeholder: Style,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            normal_text: Some(Color::Rgb(0xdd, 0xdd, 0xdd)),
            line_numbers: Some(Color::DarkGray),
            source_colors: true,
            status_bg: Color::Blue,
            status_fg: Color::White,
            error_text: Color::LightRed,
            active_tab: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            placeholder: Style::default().fg(Color::Rgb(0x77, 0x77, 0x77)),
        }
    }
}

impl ColorTheme {
    /// Theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            normal_text: None,
            line_numbers: None,
            source_colors: false,
            status_bg: Color::Black,
            status_fg: Color::White,
            error_text: Color::White,
            active_tab: Style::default().add_modifier(Modifier::REVERSED),
            placeholder: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// Style for a row's text, given the source color of synthetic rows.
    pub fn row_style(&self, source_color: Option<Color>) -> Style {
        match (source_color, self.normal_text) {
            (Some(color), _) if self.source_colors => Style::default().fg(color),
            (_, Some(color)) => Style::default().fg(color),
            _ => Style::default(),
        }
    }

    /// Style for a tab label in its source color.
    pub fn tab_style(&self, source_color: Color, active: bool) -> Style {
        let base = if self.source_colors {
            Style::default().fg(source_color)
        } else {
            Style::default()
        };
        if active {
            base.patch(self.active_tab)
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.status_fg, Color::White);
        assert_eq!(theme.status_bg, Color::Blue);
        assert!(theme.source_colors);
    }

    #[test]
    fn test_row_style_prefers_source_color() {
        let theme = ColorTheme::default();
        let colored = theme.row_style(Some(Color::Rgb(1, 2, 3)));
        assert_eq!(colored.fg, Some(Color::Rgb(1, 2, 3)));
        let plain = theme.row_style(None);
        assert_eq!(plain.fg, theme.normal_text);
    }

    #[test]
    fn test_monochrome_ignores_source_colors() {
        let theme = ColorTheme::monochrome();
        assert_eq!(theme.row_style(Some(Color::Red)).fg, None);
        assert_eq!(theme.tab_style(Color::Red, false).fg, None);
        assert!(theme
            .tab_style(Color::Red, true)
            .add_modifier
            .contains(Modifier::REVERSED));
    }
}
