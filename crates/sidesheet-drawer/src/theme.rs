//! Navigation themes the drawer pulls its colors from.

use sidesheet_ui_graphics::Color;

/// HSL lightness reduction applied to the card color for the backdrop.
pub const BACKDROP_DARKEN: f32 = 0.2;

/// Opacity of the fully shown backdrop.
pub const BACKDROP_ALPHA: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub dark: bool,
    pub background: Color,
    pub card: Color,
    pub border: Color,
    pub text: Color,
}

impl Theme {
    pub const fn light() -> Self {
        Self {
            dark: false,
            background: Color::from_rgb_u8(242, 242, 242),
            card: Color::from_rgb_u8(255, 255, 255),
            border: Color::from_rgb_u8(216, 216, 216),
            text: Color::from_rgb_u8(28, 28, 30),
        }
    }

    pub const fn dark() -> Self {
        Self {
            dark: true,
            background: Color::from_rgb_u8(1, 1, 1),
            card: Color::from_rgb_u8(18, 18, 18),
            border: Color::from_rgb_u8(39, 39, 41),
            text: Color::from_rgb_u8(229, 229, 231),
        }
    }

    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark => Self::dark(),
        }
    }

    /// Backdrop color at full drawer progress.
    pub fn backdrop_color(&self) -> Color {
        self.card.darken(BACKDROP_DARKEN).with_alpha(BACKDROP_ALPHA)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Supplies the theme for the active color scheme.
pub trait ThemeProvider {
    fn theme(&self, scheme: ColorScheme) -> Theme;
}

/// Serves [`Theme::light`] and [`Theme::dark`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultThemeProvider;

impl ThemeProvider for DefaultThemeProvider {
    fn theme(&self, scheme: ColorScheme) -> Theme {
        Theme::for_scheme(scheme)
    }
}
