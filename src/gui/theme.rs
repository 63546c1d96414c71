use iced::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn background(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.96, 0.96, 0.97),
            Theme::Dark => Color::from_rgb(0.11, 0.11, 0.13),
        }
    }

    pub fn card_background(&self) -> Color {
        match self {
            Theme::Light => Color::WHITE,
            Theme::Dark => Color::from_rgb(0.19, 0.19, 0.21),
        }
    }

    pub fn text(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.08, 0.08, 0.08),
            Theme::Dark => Color::from_rgb(0.95, 0.95, 0.95),
        }
    }

    pub fn secondary_text(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.4, 0.4, 0.45),
            Theme::Dark => Color::from_rgb(0.7, 0.7, 0.72),
        }
    }

    /// Highlight for the active mode button and the selected row.
    pub fn accent(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.68, 0.85, 0.90), // light blue
            Theme::Dark => Color::from_rgb(0.38, 0.62, 0.75),
        }
    }

    pub fn danger(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.8, 0.15, 0.15),
            Theme::Dark => Color::from_rgb(1.0, 0.4, 0.4),
        }
    }
}
