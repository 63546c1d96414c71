use iced::widget::button::{Appearance as ButtonAppearance, StyleSheet as ButtonStyleSheet};
use iced::widget::container::{Appearance as ContainerAppearance, StyleSheet as ContainerStyleSheet};
use iced::widget::scrollable::{Appearance as ScrollableAppearance, StyleSheet as ScrollableStyleSheet};
use iced::widget::text_input::{Appearance as TextInputAppearance, StyleSheet as TextInputStyleSheet};
use iced::{Border, Color};

fn with_alpha(color: Color, a: f32) -> Color {
    Color { a, ..color }
}

/// Buttons and list rows. `highlighted` marks the active mode or the
/// selected package.
pub struct RoundedButtonStyle {
    pub highlighted: bool,
    pub radius: f32,
    pub accent: Color,
    pub background: Color,
    pub text_color: Color,
}

impl ButtonStyleSheet for RoundedButtonStyle {
    type Style = iced::Theme;

    fn active(&self, _style: &Self::Style) -> ButtonAppearance {
        let bg_color = if self.highlighted {
            self.accent
        } else {
            self.background
        };

        ButtonAppearance {
            background: Some(iced::Background::Color(bg_color)),
            border: Border {
                radius: self.radius.into(),
                width: 1.0,
                color: with_alpha(self.accent, if self.highlighted { 1.0 } else { 0.4 }),
            },
            text_color: self.text_color,
            shadow: iced::Shadow::default(),
            shadow_offset: iced::Vector::default(),
        }
    }

    fn hovered(&self, style: &Self::Style) -> ButtonAppearance {
        let mut appearance = self.active(style);
        if !self.highlighted {
            appearance.background = Some(iced::Background::Color(with_alpha(self.accent, 0.35)));
        }
        appearance
    }

    fn pressed(&self, style: &Self::Style) -> ButtonAppearance {
        let mut appearance = self.active(style);
        appearance.background = Some(iced::Background::Color(with_alpha(self.accent, 0.7)));
        appearance
    }

    // disabled while a brew task is running
    fn disabled(&self, style: &Self::Style) -> ButtonAppearance {
        let mut appearance = self.active(style);
        appearance.background = Some(iced::Background::Color(with_alpha(self.background, 0.4)));
        appearance.border.color = with_alpha(self.accent, 0.15);
        appearance.text_color = with_alpha(self.text_color, 0.4);
        appearance
    }
}

pub struct RoundedContainerStyle {
    pub radius: f32,
    pub background: Color,
}

impl ContainerStyleSheet for RoundedContainerStyle {
    type Style = iced::Theme;

    fn appearance(&self, _style: &Self::Style) -> ContainerAppearance {
        ContainerAppearance {
            background: Some(iced::Background::Color(self.background)),
            border: Border {
                radius: self.radius.into(),
                width: 0.0,
                color: Color::TRANSPARENT,
            },
            ..Default::default()
        }
    }
}

pub struct ListScrollableStyle {
    pub accent: Color,
    pub radius: f32,
}

impl ScrollableStyleSheet for ListScrollableStyle {
    type Style = iced::Theme;

    fn active(&self, _style: &Self::Style) -> ScrollableAppearance {
        ScrollableAppearance {
            container: ContainerAppearance::default(),
            scrollbar: iced::widget::scrollable::Scrollbar {
                background: Some(iced::Background::Color(Color::TRANSPARENT)),
                border: Border::default(),
                scroller: iced::widget::scrollable::Scroller {
                    color: with_alpha(self.accent, 0.5),
                    border: Border {
                        radius: (self.radius * 0.5).into(),
                        width: 0.0,
                        color: Color::TRANSPARENT,
                    },
                },
            },
            gap: None,
        }
    }

    fn hovered(&self, style: &Self::Style, is_mouse_over_scrollbar: bool) -> ScrollableAppearance {
        let mut appearance = self.active(style);
        if is_mouse_over_scrollbar {
            appearance.scrollbar.scroller.color = with_alpha(self.accent, 0.8);
        }
        appearance
    }

    fn dragging(&self, style: &Self::Style) -> ScrollableAppearance {
        let mut appearance = self.active(style);
        appearance.scrollbar.scroller.color = self.accent;
        appearance
    }
}

pub struct SearchInputStyle {
    pub radius: f32,
    pub accent: Color,
    pub background: Color,
    pub text_color: Color,
}

impl TextInputStyleSheet for SearchInputStyle {
    type Style = iced::Theme;

    fn active(&self, _style: &Self::Style) -> TextInputAppearance {
        TextInputAppearance {
            background: iced::Background::Color(self.background),
            border: Border {
                radius: self.radius.into(),
                width: 1.0,
                color: with_alpha(self.accent, 0.6),
            },
            icon_color: self.text_color,
        }
    }

    fn focused(&self, style: &Self::Style) -> TextInputAppearance {
        let mut appearance = self.active(style);
        appearance.border.width = 2.0;
        appearance.border.color = self.accent;
        appearance
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        with_alpha(self.text_color, 0.5)
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        self.text_color
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        with_alpha(self.text_color, 0.4)
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        with_alpha(self.accent, 0.5)
    }

    fn disabled(&self, style: &Self::Style) -> TextInputAppearance {
        let mut appearance = self.active(style);
        appearance.background = iced::Background::Color(with_alpha(self.background, 0.5));
        appearance
    }
}
