//! Derived visual mappers.
//!
//! Side-effect free functions from store values to what the renderer draws.
//! Geometry extends linearly outside the keyboard range; the overlay color
//! clamps.

use sidesheet_animation::interpolate;
use sidesheet_ui_graphics::Color;

use crate::config::{DrawerConfig, ScreenGeometry};
use crate::store::StoreSnapshot;
use crate::theme::Theme;

/// Offsets the chat screen applies so its input bar rides the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChatInsets {
    /// Upward lift of the bottom input bar.
    pub bottom_bar_offset: f32,
    /// Height of the message list footer spacer; negative while the keyboard
    /// shows.
    pub list_footer_height: f32,
}

/// Every mapped value for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerVisuals {
    pub overlay_color: Color,
    pub drawer_width: f32,
    pub drawer_height: f32,
    pub chat_insets: ChatInsets,
}

/// Transparent at progress 0, the theme backdrop at progress 1.
pub fn overlay_color(progress: f32, theme: &Theme) -> Color {
    Color::TRANSPARENT.interpolate(&theme.backdrop_color(), progress)
}

/// Panel width: `open_width_fraction * w` with the keyboard hidden, the full
/// width minus both margins with it shown.
pub fn drawer_width(keyboard_progress: f32, screen_width: f32, config: &DrawerConfig) -> f32 {
    interpolate(
        keyboard_progress,
        (0.0, 1.0),
        (
            config.open_width_fraction * screen_width,
            screen_width - 2.0 * config.margin,
        ),
    )
}

/// Drawer container height, shrinking above the keyboard.
pub fn drawer_height(
    keyboard_progress: f32,
    keyboard_height: f32,
    screen_height: f32,
    margin: f32,
) -> f32 {
    interpolate(
        keyboard_progress,
        (0.0, 1.0),
        (screen_height, screen_height - keyboard_height - margin),
    )
}

pub fn chat_insets(keyboard_progress: f32, keyboard_height: f32, safe_bottom: f32) -> ChatInsets {
    ChatInsets {
        bottom_bar_offset: interpolate(
            keyboard_progress,
            (0.0, 1.0),
            (0.0, keyboard_height - safe_bottom),
        ),
        list_footer_height: interpolate(
            keyboard_progress,
            (0.0, 1.0),
            (0.0, -keyboard_height),
        ),
    }
}

pub fn map_visuals(
    snapshot: &StoreSnapshot,
    screen: &ScreenGeometry,
    config: &DrawerConfig,
    theme: &Theme,
) -> DrawerVisuals {
    DrawerVisuals {
        overlay_color: overlay_color(snapshot.progress, theme),
        drawer_width: drawer_width(snapshot.keyboard_progress, screen.width(), config),
        drawer_height: drawer_height(
            snapshot.keyboard_progress,
            snapshot.keyboard_height,
            screen.height(),
            config.margin,
        ),
        chat_insets: chat_insets(
            snapshot.keyboard_progress,
            snapshot.keyboard_height,
            screen.safe_area().bottom,
        ),
    }
}

#[cfg(test)]
#[path = "tests/mappers_tests.rs"]
mod tests;
