//! Key code translation for the panel.
//!
//! The canonical representation is USB HID usage IDs (page 0x07); the panel
//! layout names keys with lowercase DOM-style codes and translates them to
//! HID at the binding boundary.

pub mod hid;
pub mod layout;

pub use hid::HidKey;
pub use layout::{layout_to_hid, RENDERED_CODES};

/// Unified mapper over the layout translation table.
pub struct KeyMapper;

impl KeyMapper {
    /// Translates a rendered layout code (e.g. `"keya"`) to a [`HidKey`].
    ///
    /// Returns `None` if the code is not part of the rendered layout.
    pub fn layout_code_to_hid(code: &str) -> Option<HidKey> {
        layout::layout_to_hid(code)
    }
}
