//! The rendered keyboard layout and its translation to HID usage IDs.
//!
//! The panel renders a full-size ANSI keyboard. Each key slot carries a
//! lowercase layout code (`"keya"`, `"escape"`, `"numpadenter"`, ...) — the
//! DOM `KeyboardEvent.code` in lowercase, the naming the panel markup uses
//! for its key slots. [`layout_to_hid`] translates a layout code to the
//! [`HidKey`] the device controller understands.
//!
//! The translation must be *total* over [`RENDERED_CODES`]: a rendered key
//! with no mapping would produce an invalid assignment identifier. That class
//! of defect is excluded by the exhaustiveness tests at the bottom of this
//! file rather than handled at runtime.

use super::hid::HidKey;

/// Every layout code the panel renders, grouped by keyboard region in the
/// same order the layout draws them.
pub const RENDERED_CODES: &[&str] = &[
    // Function region
    "escape", "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12",
    // System control region
    "printscreen", "scrolllock", "pause",
    // Typewriter region, first row
    "backquote", "digit1", "digit2", "digit3", "digit4", "digit5", "digit6", "digit7", "digit8",
    "digit9", "digit0", "minus", "equal", "backspace",
    // Second row
    "tab", "keyq", "keyw", "keye", "keyr", "keyt", "keyy", "keyu", "keyi", "keyo", "keyp",
    "bracketleft", "bracketright", "backslash",
    // Third row
    "capslock", "keya", "keys", "keyd", "keyf", "keyg", "keyh", "keyj", "keyk", "keyl",
    "semicolon", "quote", "enter",
    // Fourth row
    "shiftleft", "keyz", "keyx", "keyc", "keyv", "keyb", "keyn", "keym", "comma", "period",
    "slash", "shiftright",
    // Fifth row
    "controlleft", "metaleft", "altleft", "space", "altright", "metaright", "contextmenu",
    "controlright",
    // Navigation region
    "insert", "home", "pageup", "delete", "end", "pagedown", "arrowup", "arrowleft", "arrowdown",
    "arrowright",
    // Numpad region
    "numlock", "numpaddivide", "numpadmultiply", "numpadsubtract", "numpad7", "numpad8",
    "numpad9", "numpadadd", "numpad4", "numpad5", "numpad6", "numpad1", "numpad2", "numpad3",
    "numpadenter", "numpad0", "numpaddecimal",
];

/// Translates a rendered layout code to its [`HidKey`].
///
/// Returns `None` for codes the layout does not render. Callers inside the
/// panel never see `None` for a rendered slot; the tests below keep the
/// mapping total over [`RENDERED_CODES`].
pub fn layout_to_hid(code: &str) -> Option<HidKey> {
    let hid = match code {
        "keya" => HidKey::KeyA,
        "keyb" => HidKey::KeyB,
        "keyc" => HidKey::KeyC,
        "keyd" => HidKey::KeyD,
        "keye" => HidKey::KeyE,
        "keyf" => HidKey::KeyF,
        "keyg" => HidKey::KeyG,
        "keyh" => HidKey::KeyH,
        "keyi" => HidKey::KeyI,
        "keyj" => HidKey::KeyJ,
        "keyk" => HidKey::KeyK,
        "keyl" => HidKey::KeyL,
        "keym" => HidKey::KeyM,
        "keyn" => HidKey::KeyN,
        "keyo" => HidKey::KeyO,
        "keyp" => HidKey::KeyP,
        "keyq" => HidKey::KeyQ,
        "keyr" => HidKey::KeyR,
        "keys" => HidKey::KeyS,
        "keyt" => HidKey::KeyT,
        "keyu" => HidKey::KeyU,
        "keyv" => HidKey::KeyV,
        "keyw" => HidKey::KeyW,
        "keyx" => HidKey::KeyX,
        "keyy" => HidKey::KeyY,
        "keyz" => HidKey::KeyZ,
        "digit1" => HidKey::Digit1,
        "digit2" => HidKey::Digit2,
        "digit3" => HidKey::Digit3,
        "digit4" => HidKey::Digit4,
        "digit5" => HidKey::Digit5,
        "digit6" => HidKey::Digit6,
        "digit7" => HidKey::Digit7,
        "digit8" => HidKey::Digit8,
        "digit9" => HidKey::Digit9,
        "digit0" => HidKey::Digit0,
        "enter" => HidKey::Enter,
        "escape" => HidKey::Escape,
        "backspace" => HidKey::Backspace,
        "tab" => HidKey::Tab,
        "space" => HidKey::Space,
        "minus" => HidKey::Minus,
        "equal" => HidKey::Equal,
        "bracketleft" => HidKey::BracketLeft,
        "bracketright" => HidKey::BracketRight,
        "backslash" => HidKey::Backslash,
        "semicolon" => HidKey::Semicolon,
        "quote" => HidKey::Quote,
        "backquote" => HidKey::Backquote,
        "comma" => HidKey::Comma,
        "period" => HidKey::Period,
        "slash" => HidKey::Slash,
        "capslock" => HidKey::CapsLock,
        "f1" => HidKey::F1,
        "f2" => HidKey::F2,
        "f3" => HidKey::F3,
        "f4" => HidKey::F4,
        "f5" => HidKey::F5,
        "f6" => HidKey::F6,
        "f7" => HidKey::F7,
        "f8" => HidKey::F8,
        "f9" => HidKey::F9,
        "f10" => HidKey::F10,
        "f11" => HidKey::F11,
        "f12" => HidKey::F12,
        "printscreen" => HidKey::PrintScreen,
        "scrolllock" => HidKey::ScrollLock,
        "pause" => HidKey::Pause,
        "insert" => HidKey::Insert,
        "home" => HidKey::Home,
        "pageup" => HidKey::PageUp,
        "delete" => HidKey::Delete,
        "end" => HidKey::End,
        "pagedown" => HidKey::PageDown,
        "arrowright" => HidKey::ArrowRight,
        "arrowleft" => HidKey::ArrowLeft,
        "arrowdown" => HidKey::ArrowDown,
        "arrowup" => HidKey::ArrowUp,
        "numlock" => HidKey::NumLock,
        "numpaddivide" => HidKey::NumpadDivide,
        "numpadmultiply" => HidKey::NumpadMultiply,
        "numpadsubtract" => HidKey::NumpadSubtract,
        "numpadadd" => HidKey::NumpadAdd,
        "numpadenter" => HidKey::NumpadEnter,
        "numpad1" => HidKey::Numpad1,
        "numpad2" => HidKey::Numpad2,
        "numpad3" => HidKey::Numpad3,
        "numpad4" => HidKey::Numpad4,
        "numpad5" => HidKey::Numpad5,
        "numpad6" => HidKey::Numpad6,
        "numpad7" => HidKey::Numpad7,
        "numpad8" => HidKey::Numpad8,
        "numpad9" => HidKey::Numpad9,
        "numpad0" => HidKey::Numpad0,
        "numpaddecimal" => HidKey::NumpadDecimal,
        "contextmenu" => HidKey::ContextMenu,
        "controlleft" => HidKey::ControlLeft,
        "shiftleft" => HidKey::ShiftLeft,
        "altleft" => HidKey::AltLeft,
        "metaleft" => HidKey::MetaLeft,
        "controlright" => HidKey::ControlRight,
        "shiftright" => HidKey::ShiftRight,
        "altright" => HidKey::AltRight,
        "metaright" => HidKey::MetaRight,
        _ => return None,
    };
    Some(hid)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_every_rendered_code_has_a_mapping() {
        // Totality: an unmapped rendered code would send an invalid identifier
        // to the controller.
        for code in RENDERED_CODES {
            assert!(
                layout_to_hid(code).is_some(),
                "rendered layout code '{code}' has no HID mapping"
            );
        }
    }

    #[test]
    fn test_rendered_mappings_are_unique() {
        let mut seen = HashSet::new();
        for code in RENDERED_CODES {
            let hid = layout_to_hid(code).unwrap();
            assert!(
                seen.insert(hid.usage_id()),
                "layout code '{code}' maps to duplicate usage ID {}",
                hid.usage_id()
            );
        }
    }

    #[test]
    fn test_rendered_codes_are_distinct() {
        let unique: HashSet<_> = RENDERED_CODES.iter().collect();
        assert_eq!(unique.len(), RENDERED_CODES.len());
    }

    #[test]
    fn test_unrendered_code_maps_to_none() {
        assert_eq!(layout_to_hid("power"), None);
        assert_eq!(layout_to_hid(""), None);
        // Codes are lowercase by convention; the DOM spelling is not accepted.
        assert_eq!(layout_to_hid("KeyA"), None);
    }

    #[test]
    fn test_spot_check_wire_values() {
        assert_eq!(layout_to_hid("keya").unwrap().wire_key(), "4");
        assert_eq!(layout_to_hid("space").unwrap().wire_key(), "44");
        assert_eq!(layout_to_hid("metaright").unwrap().wire_key(), "232");
    }
}
