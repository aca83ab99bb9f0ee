//! Directional focus navigation for a remote-controlled TV interface.
//!
//! The pieces, leaves first:
//! - [`registry`]: the interactive regions of each scope, with measured
//!   geometry and zone tags.
//! - [`resolver`]: picks the next focus target for a direction: authored
//!   override, then zone isolation, then grid arithmetic, then geometry.
//! - [`scope`]: navigation contexts (one per page or modal) and the stack
//!   that decides which one receives input.
//! - [`keys`]: raw remote key codes for the supported TV platforms.
//! - [`dispatcher`]: the single input route into [`FocusEngine`].
//! - [`viewport`]: minimal scroll adjustment and the load-more signal.
//! - [`binding`]: what a page or modal declares about its layout.
//!
//! Everything runs synchronously on the input thread; the only timers live
//! in [`schedule`] and are driven by the host's tick.

pub mod binding;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod event;
pub mod geometry;
pub mod keys;
pub mod registry;
pub mod resolver;
pub mod schedule;
pub mod scope;
pub mod viewport;
pub mod zone;

pub use binding::{ScopeBinding, ScopeLayout, Section};
pub use dispatcher::Dispatch;
pub use engine::{FocusEngine, FocusVisual};
pub use error::FocusError;
pub use event::{Axis, Direction, NavigationEvent};
pub use geometry::Bounds;
pub use keys::RemotePlatform;
pub use registry::{FocusRegistry, FocusableItem, Measure, Target};
pub use resolver::Tuning;
pub use scope::{FocusScope, ScopeKind, ScopeStack};
pub use viewport::{ItemExtent, Padding, ScrollCommand, ScrollContainer, ViewportKeeper};
pub use zone::{Zone, ZoneIsolation, ZoneKind, ZoneMatch};
