//! Light and dark palettes for the terminal UI
//!
//! Colors are the Catppuccin Latte (light) and Mocha (dark) values.

use mytasks_core::{ColorScheme, TaskState};
use ratatui::style::{Color, Modifier, Style};

/// Colors used by every widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Color,
    pub text: Color,
    pub subtext: Color,
    pub overlay: Color,
    pub surface: Color,
    pub accent: Color,
    pub green: Color,
    pub yellow: Color,
    pub red: Color,
    pub mauve: Color,
}

impl Palette {
    pub const LATTE: Palette = Palette {
        base: Color::Rgb(0xef, 0xf1, 0xf5),
        text: Color::Rgb(0x4c, 0x4f, 0x69),
        subtext: Color::Rgb(0x6c, 0x6f, 0x85),
        overlay: Color::Rgb(0x9c, 0xa0, 0xb0),
        surface: Color::Rgb(0xcc, 0xd0, 0xda),
        accent: Color::Rgb(0x1e, 0x66, 0xf5),
        green: Color::Rgb(0x40, 0xa0, 0x2b),
        yellow: Color::Rgb(0xdf, 0x8e, 0x1d),
        red: Color::Rgb(0xd2, 0x0f, 0x39),
        mauve: Color::Rgb(0x88, 0x39, 0xef),
    };

    pub const MOCHA: Palette = Palette {
        base: Color::Rgb(0x1e, 0x1e, 0x2e),
        text: Color::Rgb(0xcd, 0xd6, 0xf4),
        subtext: Color::Rgb(0xa6, 0xad, 0xc8),
        overlay: Color::Rgb(0x6c, 0x70, 0x86),
        surface: Color::Rgb(0x31, 0x32, 0x44),
        accent: Color::Rgb(0x89, 0xb4, 0xfa),
        green: Color::Rgb(0xa6, 0xe3, 0xa1),
        yellow: Color::Rgb(0xf9, 0xe2, 0xaf),
        red: Color::Rgb(0xf3, 0x8b, 0xa8),
        mauve: Color::Rgb(0xcb, 0xa6, 0xf7),
    };

    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::LATTE,
            ColorScheme::Dark => Self::MOCHA,
        }
    }

    /// Default text on the background
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.base)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.subtext)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.accent)
        } else {
            Style::default().fg(self.overlay)
        }
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.surface).add_modifier(Modifier::BOLD)
    }

    pub fn state(&self, state: TaskState) -> Style {
        match state {
            TaskState::Done => Style::default().fg(self.green),
            TaskState::Doing => Style::default().fg(self.yellow),
            TaskState::NotDone => Style::default().fg(self.mauve),
        }
    }
}
