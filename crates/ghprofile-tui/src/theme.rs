//! Light and dark palettes with semantic styling for the TUI.
//!
//! Mirrors the two page themes: light is the default, dark matches the
//! `dark-mode` body class of the rendered HTML.

use ratatui::style::{Color, Modifier, Style};

use ghprofile_core::Theme;

/// Colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub link: Color,
    pub error: Color,
    pub success: Color,
}

// ── Palettes ──────────────────────────────────────────────────────────

pub const LIGHT: Palette = Palette {
    background: Color::Rgb(244, 244, 244), // #f4f4f4
    text: Color::Rgb(51, 51, 51),          // #333333
    muted: Color::Rgb(102, 102, 102),      // #666666
    border: Color::Rgb(204, 204, 204),     // #cccccc
    accent: Color::Rgb(36, 41, 46),        // #24292e
    link: Color::Rgb(3, 102, 214),         // #0366d6
    error: Color::Rgb(203, 36, 49),        // #cb2431
    success: Color::Rgb(40, 167, 69),      // #28a745
};

pub const DARK: Palette = Palette {
    background: Color::Rgb(18, 18, 18), // #121212
    text: Color::Rgb(224, 224, 224),    // #e0e0e0
    muted: Color::Rgb(158, 158, 158),   // #9e9e9e
    border: Color::Rgb(68, 68, 68),     // #444444
    accent: Color::Rgb(187, 134, 252),  // #bb86fc
    link: Color::Rgb(88, 166, 255),     // #58a6ff
    error: Color::Rgb(255, 99, 99),     // #ff6363
    success: Color::Rgb(80, 250, 123),  // #50fa7b
};

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    }
}

// ── Semantic Styles ───────────────────────────────────────────────────

impl Palette {
    /// Base text on the page background.
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    /// Title text for blocks/panels.
    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn border_default(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn label_style(&self) -> Style {
        Style::default().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.link)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    /// Key hint text (e.g., "Esc quit").
    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Key hint key character.
    pub fn key_hint_key(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_follow_theme() {
        assert_eq!(*palette(Theme::Light), LIGHT);
        assert_eq!(*palette(Theme::Dark), DARK);
        assert_ne!(LIGHT.background, DARK.background);
    }
}
