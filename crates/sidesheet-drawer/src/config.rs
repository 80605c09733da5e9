//! Construction-time configuration for the drawer engine.
//!
//! Everything here is validated once, when a controller is built. Runtime
//! paths never fail.

use sidesheet_animation::SpringSpec;
use sidesheet_foundation::PanConfig;
use sidesheet_ui_graphics::Size;

/// Gap between the drawer panel and the screen edges, in px.
pub const MARGIN: f32 = 5.0;

/// Drawer panel width as a fraction of the screen width, keyboard hidden.
pub const DRAWER_OPEN_WIDTH_FRACTION: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    InvalidScreenSize { width: f32, height: f32 },
    InvalidFraction { name: &'static str, value: f32 },
    InvalidMargin { margin: f32, width: f32 },
    InvalidSpring,
    InvalidPan,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidScreenSize { width, height } => {
                write!(f, "screen size {width}x{height} must be finite and positive")
            }
            ConfigError::InvalidFraction { name, value } => {
                write!(f, "{name} must lie in (0, 1], got {value}")
            }
            ConfigError::InvalidMargin { margin, width } => {
                write!(f, "margin {margin} does not fit a screen {width} wide")
            }
            ConfigError::InvalidSpring => write!(f, "spring spec has non-positive parameters"),
            ConfigError::InvalidPan => write!(f, "pan thresholds must be finite and non-negative"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Insets of the system bars that overlap the screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SafeAreaInsets {
    pub top: f32,
    pub bottom: f32,
}

impl SafeAreaInsets {
    pub fn new(top: f32, bottom: f32) -> Self {
        Self {
            top: sanitize_inset(top),
            bottom: sanitize_inset(bottom),
        }
    }
}

fn sanitize_inset(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Viewport size read once at screen init. The width doubles as the drawer
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenGeometry {
    size: Size,
    safe_area: SafeAreaInsets,
}

impl ScreenGeometry {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::InvalidScreenSize { width, height });
        }
        Ok(Self {
            size: Size::new(width, height),
            safe_area: SafeAreaInsets::default(),
        })
    }

    pub fn with_safe_area(mut self, safe_area: SafeAreaInsets) -> Self {
        self.safe_area = safe_area;
        self
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn safe_area(&self) -> SafeAreaInsets {
        self.safe_area
    }

    /// Offset that counts as fully overtravelled; normalises progress.
    pub fn threshold(&self) -> f32 {
        self.size.width
    }
}

/// Tunables for one drawer instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawerConfig {
    pub margin: f32,
    pub open_width_fraction: f32,
    pub spring: SpringSpec,
    pub pan: PanConfig,
}

impl DrawerConfig {
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_open_width_fraction(mut self, fraction: f32) -> Self {
        self.open_width_fraction = fraction;
        self
    }

    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_pan(mut self, pan: PanConfig) -> Self {
        self.pan = pan;
        self
    }

    pub fn validate(&self, screen: &ScreenGeometry) -> Result<(), ConfigError> {
        let fraction = self.open_width_fraction;
        if !(fraction.is_finite() && fraction > 0.0 && fraction <= 1.0) {
            return Err(ConfigError::InvalidFraction {
                name: "open_width_fraction",
                value: fraction,
            });
        }
        let width = screen.width();
        if !(self.margin.is_finite() && self.margin >= 0.0 && 2.0 * self.margin < width) {
            return Err(ConfigError::InvalidMargin {
                margin: self.margin,
                width,
            });
        }
        if !self.spring.is_valid() {
            return Err(ConfigError::InvalidSpring);
        }
        if !self.pan.is_valid() {
            return Err(ConfigError::InvalidPan);
        }
        Ok(())
    }
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            margin: MARGIN,
            open_width_fraction: DRAWER_OPEN_WIDTH_FRACTION,
            spring: SpringSpec::default_spring(),
            pan: PanConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_screens() {
        assert!(ScreenGeometry::new(390.0, 844.0).is_ok());
        assert_eq!(
            ScreenGeometry::new(0.0, 844.0),
            Err(ConfigError::InvalidScreenSize {
                width: 0.0,
                height: 844.0
            })
        );
        assert!(ScreenGeometry::new(f32::NAN, 844.0).is_err());
        assert!(ScreenGeometry::new(390.0, f32::INFINITY).is_err());
    }

    #[test]
    fn threshold_is_width() {
        let screen = ScreenGeometry::new(390.0, 844.0).unwrap();
        assert_eq!(screen.threshold(), 390.0);
    }

    #[test]
    fn default_config_is_valid() {
        let screen = ScreenGeometry::new(390.0, 844.0).unwrap();
        assert_eq!(DrawerConfig::default().validate(&screen), Ok(()));
    }

    #[test]
    fn invalid_fields_are_reported() {
        let screen = ScreenGeometry::new(100.0, 200.0).unwrap();
        let config = DrawerConfig::default();
        assert!(matches!(
            config.with_open_width_fraction(1.5).validate(&screen),
            Err(ConfigError::InvalidFraction { .. })
        ));
        assert!(matches!(
            config.with_margin(60.0).validate(&screen),
            Err(ConfigError::InvalidMargin { .. })
        ));
        let mut spring = SpringSpec::default_spring();
        spring.stiffness = 0.0;
        assert_eq!(
            config.with_spring(spring).validate(&screen),
            Err(ConfigError::InvalidSpring)
        );
        assert_eq!(
            config
                .with_pan(PanConfig::default().with_fail_offset_y(-1.0))
                .validate(&screen),
            Err(ConfigError::InvalidPan)
        );
    }

    #[test]
    fn safe_area_is_sanitized() {
        let insets = SafeAreaInsets::new(-3.0, f32::NAN);
        assert_eq!(insets, SafeAreaInsets::default());
    }

    #[test]
    fn error_messages_name_the_problem() {
        let message = ConfigError::InvalidMargin {
            margin: 60.0,
            width: 100.0,
        }
        .to_string();
        assert!(message.contains("margin 60"));
    }
}
