//! CrossDrop Core Library
//!
//! Platform-agnostic drag-and-drop coordination that spans several top-level
//! windows. A single [`DragCoordinator`] owns the drop target registry and the
//! in-flight drag session; every window of an application shares it.

pub mod config;
pub mod coordinator;
pub mod geometry;
pub mod gesture;
pub mod preview;
pub mod registry;
pub mod session;
pub mod target;
pub mod window;

pub use config::{ConfigError, ConfigResult, DragConfig, CONFIG_ENV};
pub use coordinator::{DragCoordinator, DragEvent, SharedCoordinator};
pub use geometry::{local_to_screen, screen_bounds, DEFAULT_CHROME_OFFSET};
pub use gesture::{DragGesture, GestureEvent};
pub use preview::PreviewPlacement;
pub use registry::DropTargetRegistry;
pub use session::{ActiveDrag, Crossing, CrossingKind, DragSession, DropOutcome};
pub use target::{
    new_target_id, DropCallbacks, DropHandler, DropTargetId, DropTargetRecord, VariantTarget,
};
pub use window::{ScreenOrigin, WindowKey, WindowRef};
