//! Physical input identifiers and binding values.
//!
//! A [`DeviceInput`] names one bindable input on the device: a keyboard key
//! (by HID usage ID) or a mouse button (by its bit mask). The device
//! controller's REST API addresses both as decimal strings, so every variant
//! knows its wire form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keymap::HidKey;

// ── Wire sentinels ────────────────────────────────────────────────────────────

/// `value=` sentinel that clears a single binding.
pub const CLEAR_FUNCTION: &str = "CLEAR_FUNCTION";

/// `key=` sentinel that clears every binding of a device class.
pub const CLEAR_ALL: &str = "CLEAR_ALL";

/// `value=` placeholder paired with [`CLEAR_ALL`] (the controller ignores it).
pub const NONE_VALUE: &str = "NONE";

// ── Device classes ────────────────────────────────────────────────────────────

/// The two configurable device classes, each with its own REST endpoints and
/// binding set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceClass {
    Keyboard,
    Mouse,
}

impl DeviceClass {
    /// The path segment used in `/api/get/{segment}` and `/api/set/{segment}`.
    pub fn api_segment(self) -> &'static str {
        match self {
            DeviceClass::Keyboard => "keyboard",
            DeviceClass::Mouse => "mouse",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_segment())
    }
}

// ── Mouse buttons ─────────────────────────────────────────────────────────────

/// A mouse button, identified by its bit mask in the controller's button
/// report. The wire identifier is the decimal mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MouseButton {
    Left = 1,
    Right = 2,
    Middle = 4,
    Back = 8,
    Forward = 16,
}

impl MouseButton {
    /// All five buttons, in panel display order.
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Back,
        MouseButton::Forward,
    ];

    /// The button's bit mask (the discriminant).
    pub fn mask(self) -> u8 {
        self as u8
    }

    /// Looks a button up by its bit mask.
    pub fn from_mask(mask: u8) -> Option<MouseButton> {
        match mask {
            1 => Some(MouseButton::Left),
            2 => Some(MouseButton::Right),
            4 => Some(MouseButton::Middle),
            8 => Some(MouseButton::Back),
            16 => Some(MouseButton::Forward),
            _ => None,
        }
    }

    /// Human-readable label used by the CLI and menu items.
    pub fn label(self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
            MouseButton::Back => "back",
            MouseButton::Forward => "forward",
        }
    }

    /// Looks a button up by its CLI/menu label.
    pub fn from_label(label: &str) -> Option<MouseButton> {
        MouseButton::ALL
            .into_iter()
            .find(|b| b.label() == label)
    }
}

// ── Device inputs ─────────────────────────────────────────────────────────────

/// A normalized identifier for one bindable physical input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceInput {
    Keyboard(HidKey),
    Mouse(MouseButton),
}

impl DeviceInput {
    /// The device class this input belongs to, selecting the REST endpoints.
    pub fn class(self) -> DeviceClass {
        match self {
            DeviceInput::Keyboard(_) => DeviceClass::Keyboard,
            DeviceInput::Mouse(_) => DeviceClass::Mouse,
        }
    }

    /// The `key=` identifier string for the set endpoint.
    pub fn wire_key(self) -> String {
        match self {
            DeviceInput::Keyboard(hid) => hid.wire_key(),
            DeviceInput::Mouse(btn) => btn.mask().to_string(),
        }
    }

    /// The numeric identifier under which this input appears in a fetched
    /// binding set.
    pub fn binding_id(self) -> u8 {
        match self {
            DeviceInput::Keyboard(hid) => hid.usage_id(),
            DeviceInput::Mouse(btn) => btn.mask(),
        }
    }
}

impl fmt::Display for DeviceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceInput::Keyboard(hid) => write!(f, "keyboard:{:?}", hid),
            DeviceInput::Mouse(btn) => write!(f, "mouse:{}", btn.label()),
        }
    }
}

// ── Binding values ────────────────────────────────────────────────────────────

/// What to bind to an input: a macro, or the clear sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingValue {
    /// Bind the macro with this catalog key.
    Macro(String),
    /// Remove the input's current binding.
    Clear,
}

impl BindingValue {
    /// The `value=` string for the set endpoint.
    pub fn wire_value(&self) -> &str {
        match self {
            BindingValue::Macro(key) => key,
            BindingValue::Clear => CLEAR_FUNCTION,
        }
    }
}
