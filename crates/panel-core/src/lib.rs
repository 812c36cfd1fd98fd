//! # panel-core
//!
//! Shared domain library for macropanel, the configuration panel for a
//! programmable keyboard/mouse macro device. This crate contains everything
//! that is pure logic: the macro catalog and binding data model, the key code
//! translation tables, the drag-and-drop transfer model, and the
//! selection/context-menu state machine.
//!
//! It has zero dependencies on HTTP, the async runtime, or any rendering
//! layer; the `panel-client` crate supplies those around it.
//!
//! # Module map
//!
//! - **`domain`** — data model and interaction state machines:
//!   [`domain::macros`] (catalog), [`domain::input`] (device inputs and wire
//!   sentinels), [`domain::bindings`] (per-class binding sets),
//!   [`domain::dnd`] (drag gesture + drop zone policy), [`domain::menu`]
//!   (selection overlay).
//! - **`keymap`** — lowercase layout codes → USB HID usage IDs, total over
//!   the rendered keyboard.

pub mod domain;
pub mod keymap;

pub use domain::bindings::BindingSet;
pub use domain::dnd::{DragGesture, DragPayload, DropZone};
pub use domain::input::{
    BindingValue, DeviceClass, DeviceInput, MouseButton, CLEAR_ALL, CLEAR_FUNCTION, NONE_VALUE,
};
pub use domain::macros::{MacroCatalog, MacroEntry, MacroInfo};
pub use domain::menu::{
    MenuAction, MenuAnchor, MenuItem, MenuModel, MenuOverlay, NARROW_VIEWPORT_MIN_WIDTH,
};
pub use keymap::{layout_to_hid, HidKey, KeyMapper, RENDERED_CODES};
