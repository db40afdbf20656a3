use iced::{Background, Border, Color, Shadow, Theme, Vector};
use iced::widget::button;
use iced::widget::container;

pub const ACCENT: Color = Color::from_rgb(0.486, 0.227, 0.929); // #7C3AED
pub const DANGER: Color = Color::from_rgb(0.937, 0.267, 0.267);
pub const SUCCESS: Color = Color::from_rgb(0.133, 0.773, 0.369);
pub const MUTED: Color = Color::from_rgb(0.612, 0.639, 0.686);
pub const SCREEN_BACKGROUND: Color = Color::from_rgb(0.973, 0.976, 0.988); // #f8f9fc

pub struct ScreenStyleSheet;

impl container::StyleSheet for ScreenStyleSheet {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(Color::BLACK),
            background: Some(Background::Color(SCREEN_BACKGROUND)),
            border: Border::default(),
            shadow: Shadow::default(),
        }
    }
}

pub struct CardStyleSheet;

impl container::StyleSheet for CardStyleSheet {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(Color::BLACK),
            background: Some(Background::Color(Color::WHITE)),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 24.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.04),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
        }
    }
}

/// Rounded pill button, filled with the accent color when `primary`.
pub struct PillButtonStyleSheet {
    pub primary: bool,
}

impl button::StyleSheet for PillButtonStyleSheet {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        let (background, text_color, border_color) = if self.primary {
            (ACCENT, Color::WHITE, ACCENT)
        } else {
            (Color::WHITE, Color::BLACK, Color::from_rgb(0.898, 0.906, 0.922))
        };

        button::Appearance {
            shadow_offset: Default::default(),
            background: Some(Background::Color(background)),
            text_color,
            border: Border {
                color: border_color,
                width: 1.0,
                radius: 999.0.into(),
            },
            shadow: Shadow::default(),
        }
    }
}

/// Dashed-looking outline used by the "Add device" tile.
pub struct AddDeviceButtonStyleSheet;

impl button::StyleSheet for AddDeviceButtonStyleSheet {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            shadow_offset: Default::default(),
            background: None,
            text_color: Color::BLACK,
            border: Border {
                color: Color::from_rgb(0.82, 0.835, 0.859),
                width: 2.0,
                radius: 24.0.into(),
            },
            shadow: Shadow::default(),
        }
    }
}

/// Plain text button, used for header navigation and inline links.
pub struct TextButtonStyleSheet {
    pub color: Color,
}

impl button::StyleSheet for TextButtonStyleSheet {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            shadow_offset: Default::default(),
            background: None,
            text_color: self.color,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 0.0.into(),
            },
            shadow: Shadow::default(),
        }
    }
}

/// The black rounded rectangle standing in for a product photo.
pub struct ThumbnailStyleSheet;

impl container::StyleSheet for ThumbnailStyleSheet {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: None,
            background: Some(Background::Color(Color::from_rgb(0.09, 0.09, 0.09))),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 12.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 6.0,
            },
        }
    }
}
