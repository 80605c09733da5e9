//! Drawer surface geometry.
//!
//! The container spans the whole screen and rests one screen width to the
//! left; the drawer offset slides it right into view. A tap-catcher fills
//! the container behind the panel, and the panel sits inset by the margin.

use sidesheet_ui_graphics::{Color, Point, Rect};

use crate::config::{DrawerConfig, ScreenGeometry};
use crate::mappers::DrawerVisuals;
use crate::theme::Theme;

/// Corner radius of the drawer panel.
pub const PANEL_CORNER_RADIUS: f32 = 60.0;

/// Panel border width: one device pixel on a 2x display.
pub const HAIRLINE_WIDTH: f32 = 0.5;

/// What a point on screen lands on, top-most first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceHit {
    Panel,
    /// The tap-catcher around the panel; tapping it closes the drawer.
    Backdrop,
    Outside,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    pub background: Color,
    pub border: Color,
    pub border_width: f32,
    pub corner_radius: f32,
    /// Top padding of the panel content, clearing the status bar.
    pub content_padding_top: f32,
}

impl PanelStyle {
    pub fn from_theme(theme: &Theme, screen: &ScreenGeometry) -> Self {
        Self {
            background: theme.background,
            border: theme.border,
            border_width: HAIRLINE_WIDTH,
            corner_radius: PANEL_CORNER_RADIUS,
            content_padding_top: screen.safe_area().top,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerSurface {
    pub container: Rect,
    pub panel: Rect,
    pub style: PanelStyle,
}

impl DrawerSurface {
    pub fn layout(
        offset: f32,
        visuals: &DrawerVisuals,
        screen: &ScreenGeometry,
        config: &DrawerConfig,
        theme: &Theme,
    ) -> Self {
        let width = screen.width();
        let container = Rect::new(-width + offset, 0.0, width, visuals.drawer_height);
        let panel = Rect::new(
            container.x + config.margin,
            config.margin,
            visuals.drawer_width,
            (visuals.drawer_height - 2.0 * config.margin).max(0.0),
        );
        Self {
            container,
            panel,
            style: PanelStyle::from_theme(theme, screen),
        }
    }

    pub fn hit_test(&self, point: Point) -> SurfaceHit {
        if covers(&self.panel, point) {
            SurfaceHit::Panel
        } else if covers(&self.container, point) {
            SurfaceHit::Backdrop
        } else {
            SurfaceHit::Outside
        }
    }

    /// True when any part of the container is on screen.
    pub fn is_visible(&self) -> bool {
        self.container.right() > 0.0
    }
}

/// Half-open containment, so a container resting exactly off-screen at
/// `right == 0` does not catch taps on the screen edge.
fn covers(rect: &Rect, point: Point) -> bool {
    point.x >= rect.x && point.x < rect.right() && point.y >= rect.y && point.y < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SafeAreaInsets;
    use crate::mappers::ChatInsets;

    fn screen() -> ScreenGeometry {
        ScreenGeometry::new(400.0, 800.0)
            .unwrap()
            .with_safe_area(SafeAreaInsets::new(47.0, 34.0))
    }

    fn visuals(width: f32, height: f32) -> DrawerVisuals {
        DrawerVisuals {
            overlay_color: Color::TRANSPARENT,
            drawer_width: width,
            drawer_height: height,
            chat_insets: ChatInsets::default(),
        }
    }

    fn layout(offset: f32) -> DrawerSurface {
        DrawerSurface::layout(
            offset,
            &visuals(320.0, 800.0),
            &screen(),
            &DrawerConfig::default(),
            &Theme::light(),
        )
    }

    #[test]
    fn closed_surface_sits_off_screen() {
        let surface = layout(0.0);
        assert_eq!(surface.container, Rect::new(-400.0, 0.0, 400.0, 800.0));
        assert_eq!(surface.panel, Rect::new(-395.0, 5.0, 320.0, 790.0));
        assert!(!surface.is_visible());
        assert_eq!(surface.hit_test(Point::new(0.0, 400.0)), SurfaceHit::Outside);
    }

    #[test]
    fn open_surface_covers_screen() {
        let surface = layout(400.0);
        assert_eq!(surface.container.x, 0.0);
        assert_eq!(surface.panel.x, 5.0);
        assert_eq!(surface.hit_test(Point::new(100.0, 400.0)), SurfaceHit::Panel);
        assert_eq!(surface.hit_test(Point::new(360.0, 400.0)), SurfaceHit::Backdrop);
        assert_eq!(surface.hit_test(Point::new(2.0, 400.0)), SurfaceHit::Backdrop);
    }

    #[test]
    fn partially_open_surface_slides_with_offset() {
        let surface = layout(200.0);
        assert_eq!(surface.container.x, -200.0);
        assert_eq!(surface.hit_test(Point::new(50.0, 400.0)), SurfaceHit::Panel);
        assert_eq!(surface.hit_test(Point::new(150.0, 400.0)), SurfaceHit::Backdrop);
        assert_eq!(surface.hit_test(Point::new(250.0, 400.0)), SurfaceHit::Outside);
    }

    #[test]
    fn container_follows_mapped_height() {
        let surface = DrawerSurface::layout(
            400.0,
            &visuals(390.0, 495.0),
            &screen(),
            &DrawerConfig::default(),
            &Theme::dark(),
        );
        assert_eq!(surface.container.height, 495.0);
        assert_eq!(surface.panel.height, 485.0);
        assert_eq!(surface.hit_test(Point::new(200.0, 600.0)), SurfaceHit::Outside);
    }

    #[test]
    fn style_comes_from_theme() {
        let surface = layout(0.0);
        assert_eq!(surface.style.background, Theme::light().background);
        assert_eq!(surface.style.border, Theme::light().border);
        assert_eq!(surface.style.corner_radius, PANEL_CORNER_RADIUS);
        assert_eq!(surface.style.content_padding_top, 47.0);
    }
}
