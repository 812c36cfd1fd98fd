//! Pure domain model for the panel: macros, inputs, bindings, and the two
//! interaction state machines (drag-and-drop, context menu). No I/O.

pub mod bindings;
pub mod dnd;
pub mod input;
pub mod macros;
pub mod menu;
