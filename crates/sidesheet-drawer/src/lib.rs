//! Gesture-driven side drawer engine for a chat screen.
//!
//! Pointer input flows through the pan recogniser into [`DrawerEngine`],
//! which applies the resistance/snap policy and writes the drawer offset
//! into the [`DrawerStore`]. Mappers derive the overlay color and drawer
//! geometry from store snapshots, and [`DrawerController`] packages it all
//! into a [`DrawerFrame`] per rendered frame.

pub mod config;
pub mod controller;
pub mod engine;
pub mod keyboard;
pub mod mappers;
pub mod phase;
pub mod policy;
pub mod store;
pub mod surface;
pub mod theme;

pub use config::{ConfigError, DrawerConfig, SafeAreaInsets, ScreenGeometry, MARGIN};
pub use controller::{DrawerController, DrawerFrame};
pub use engine::DrawerEngine;
pub use keyboard::{
    bind_keyboard, KeyboardBroadcaster, KeyboardDismisser, KeyboardEvent, KeyboardListener,
    KeyboardPhase, KeyboardSignal, KeyboardSubscription,
};
pub use mappers::{ChatInsets, DrawerVisuals};
pub use phase::{DrawerEvent, DrawerPhase, SettleKind};
pub use policy::{DecayConfig, SettleTarget};
pub use store::{DrawerStore, StoreCell, StoreObserverHandle, StoreSnapshot};
pub use surface::{DrawerSurface, PanelStyle, SurfaceHit};
pub use theme::{ColorScheme, DefaultThemeProvider, Theme, ThemeProvider};
