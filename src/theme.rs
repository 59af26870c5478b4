use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub bg: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub error: Color,
    pub warning: Color,
    pub selected_bg: Color,
    pub border_focused: Color,
    pub value: Color,
    pub address: Color,
    pub hash: Color,
}

pub const THEME: Theme = Theme {
    bg: Color::Rgb(14, 21, 37),
    surface: Color::Rgb(28, 35, 51),
    text: Color::Rgb(245, 249, 252),
    text_muted: Color::Rgb(157, 162, 166),
    accent: Color::Rgb(0, 153, 255),
    error: Color::Rgb(242, 63, 63),
    warning: Color::Rgb(204, 173, 20),
    selected_bg: Color::Rgb(60, 68, 92),
    border_focused: Color::Rgb(0, 114, 189),
    value: Color::Rgb(98, 126, 234),
    address: Color::Rgb(255, 179, 71),
    hash: Color::Rgb(194, 200, 204),
};

impl Theme {
    pub const fn header_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.surface)
    }

    pub const fn selected_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.selected_bg).add_modifier(Modifier::BOLD)
    }

    pub const fn border_focused_style(&self) -> Style {
        Style::new().fg(self.border_focused)
    }

    pub const fn muted_style(&self) -> Style {
        Style::new().fg(self.text_muted)
    }

    pub const fn accent_style(&self) -> Style {
        Style::new().fg(self.accent)
    }

    pub const fn title_style(&self) -> Style {
        Style::new().fg(self.text).add_modifier(Modifier::BOLD)
    }

    pub const fn error_style(&self) -> Style {
        Style::new().fg(self.error)
    }

    /// Placeholder shown while a loader is pending
    pub const fn loading_style(&self) -> Style {
        Style::new().fg(self.text_muted).add_modifier(Modifier::ITALIC)
    }

    pub const fn value_style(&self) -> Style {
        Style::new().fg(self.value)
    }

    pub const fn address_style(&self) -> Style {
        Style::new().fg(self.address)
    }

    pub const fn hash_style(&self) -> Style {
        Style::new().fg(self.hash)
    }
}
