//! Binding sets: the authoritative input → macro assignments per device class.
//!
//! The backend serves each class's bindings as a JSON object whose keys are
//! the decimal input identifiers (`{"4":"m1","224":"m2"}`). The panel holds
//! these as a read-through cache that is replaced wholesale after every
//! mutation; it is never edited locally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::input::DeviceInput;

/// All bindings of one device class, keyed by numeric input identifier.
///
/// The invariant "at most one macro per input" is structural here: the map
/// key is the input identifier, so the last write always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingSet {
    entries: BTreeMap<u8, String>,
}

impl BindingSet {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The macro key bound to `input`, if any.
    ///
    /// The caller is responsible for asking the set of the matching device
    /// class; a keyboard input looked up in the mouse set can alias a button
    /// mask by numeric coincidence.
    pub fn bound_macro(&self, input: DeviceInput) -> Option<&str> {
        self.entries.get(&input.binding_id()).map(String::as_str)
    }

    /// The macro key bound to a raw numeric identifier.
    pub fn bound_macro_by_id(&self, id: u8) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Iterates `(input identifier, macro key)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> + '_ {
        self.entries.iter().map(|(id, key)| (*id, key.as_str()))
    }
}

impl FromIterator<(u8, String)> for BindingSet {
    fn from_iter<T: IntoIterator<Item = (u8, String)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::MouseButton;
    use crate::keymap::HidKey;

    #[test]
    fn test_deserializes_from_backend_json() {
        // Decimal-string keys, exactly as the Go controller encodes a
        // map[byte]string.
        let json = r#"{"4":"m1","224":"m2"}"#;
        let set: BindingSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.bound_macro(DeviceInput::Keyboard(HidKey::KeyA)), Some("m1"));
        assert_eq!(
            set.bound_macro(DeviceInput::Keyboard(HidKey::ControlLeft)),
            Some("m2")
        );
    }

    #[test]
    fn test_empty_object_is_empty_set() {
        let set: BindingSet = serde_json::from_str("{}").unwrap();
        assert!(set.is_empty());
        assert_eq!(set.bound_macro(DeviceInput::Mouse(MouseButton::Left)), None);
    }

    #[test]
    fn test_last_write_wins_is_structural() {
        let set: BindingSet = [(1u8, "old".to_string()), (1u8, "new".to_string())]
            .into_iter()
            .collect();
        assert_eq!(set.bound_macro_by_id(1), Some("new"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_in_identifier_order() {
        let set: BindingSet = [(16u8, "f".to_string()), (1u8, "l".to_string())]
            .into_iter()
            .collect();
        let ids: Vec<u8> = set.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 16]);
    }
}
