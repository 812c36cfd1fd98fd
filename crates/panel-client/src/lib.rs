//! panel-client library crate.
//!
//! Client side of the macropanel configuration surface: everything that talks
//! to the device controller, built on the pure models in `panel-core`.
//!
//! # Architecture
//!
//! ```text
//! Device controller (REST over HTTP)
//!         ↕
//! [panel-client]
//!   ├── api/         DeviceApi trait + reqwest implementation
//!   ├── sync         write-then-refresh state synchronisation
//!   ├── controller   bind targets shared by drag-drop and context menu
//!   ├── session      interactive session wiring gesture, menu, and sync
//!   └── config       macropanel.toml loading
//! ```
//!
//! # Layer rules
//!
//! - `panel-core` has no I/O; every state machine there is synchronous.
//! - `api` is the only module that knows HTTP exists.
//! - `sync`, `controller`, and `session` depend on the [`api::DeviceApi`]
//!   trait, never on the concrete client, so they test against mocks and
//!   in-memory fakes.

/// Device controller REST seam and its HTTP implementation.
pub mod api;

/// Configuration file loading.
pub mod config;

/// Bind targets: the single binding path behind both input gestures.
pub mod controller;

/// Interactive panel session.
pub mod session;

/// Pessimistic write-then-refresh synchronisation against the controller.
pub mod sync;

pub use api::{ApiError, DeviceApi, HttpDeviceApi};
pub use config::{ConfigError, PanelConfig};
pub use controller::{
    BindTarget, BindingController, KeyboardKeyTarget, MouseButtonTarget, UnknownLayoutCode,
};
pub use session::{DropOutcome, PanelSession, SessionError};
pub use sync::{ClearAllError, ConfigSync, SyncError};
