//! The selection / context-menu overlay state machine.
//!
//! Clicking a key or mouse button records that input as the current selection
//! and opens a positioned menu listing every assignable macro plus a leading
//! "clear" item. Selecting an item dispatches the same assignment path as a
//! drag-and-drop, so the two input modes are behaviorally equivalent.
//!
//! # Anchoring
//!
//! Three states: closed (position sentinel `(-1, -1)`), open at the click
//! position (wide viewport), or open re-anchored to the viewport center
//! (narrow viewport, below [`NARROW_VIEWPORT_MIN_WIDTH`]). The narrow form
//! ignores the stored click position entirely.

use super::input::DeviceInput;
use super::macros::MacroCatalog;

/// Viewports narrower than this center the menu instead of anchoring it at
/// the click position.
pub const NARROW_VIEWPORT_MIN_WIDTH: u32 = 560;

/// Position reported while the menu is closed.
pub const CLOSED_POSITION: (i32, i32) = (-1, -1);

/// What a menu item does when selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Clear the selected input's binding.
    Clear,
    /// Assign the macro with this catalog key to the selected input.
    Assign(String),
}

/// One row of the context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub action: MenuAction,
}

/// The menu's item list, rebuilt whenever the catalog changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuModel {
    items: Vec<MenuItem>,
}

impl MenuModel {
    /// Builds the item list: item 0 is always "Clear", followed by one item
    /// per catalog macro in stable order, labelled `"name : description"`.
    pub fn rebuild(catalog: &MacroCatalog) -> Self {
        let mut items = Vec::with_capacity(catalog.len() + 1);
        items.push(MenuItem {
            label: "Clear".to_string(),
            action: MenuAction::Clear,
        });
        for info in catalog.iter() {
            items.push(MenuItem {
                label: format!("{} : {}", info.name, info.description),
                action: MenuAction::Assign(info.key),
            });
        }
        Self { items }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }
}

/// Where the open menu is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAnchor {
    /// Anchored at the recorded click position (wide viewport).
    At { x: i32, y: i32 },
    /// Re-anchored to the viewport center (narrow viewport).
    Centered,
}

/// The overlay state: which input was last clicked and where the menu sits.
///
/// The selection and anchor are owned here as explicit values; nothing in the
/// panel reads them ambiently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuOverlay {
    state: Option<(DeviceInput, MenuAnchor)>,
}

impl MenuOverlay {
    /// A closed overlay with no selection.
    pub fn closed() -> Self {
        Self::default()
    }

    /// Opens the menu for `input` at the click position `(x, y)`.
    ///
    /// Narrow viewports force center anchoring regardless of the click
    /// position; the position is still recorded as the selection site only in
    /// the wide form.
    pub fn open(&mut self, input: DeviceInput, x: i32, y: i32, viewport_width: u32) {
        let anchor = if viewport_width >= NARROW_VIEWPORT_MIN_WIDTH {
            MenuAnchor::At { x, y }
        } else {
            MenuAnchor::Centered
        };
        self.state = Some((input, anchor));
    }

    /// Selects item `index` from `model`: closes the overlay and returns the
    /// `(input, action)` pair to dispatch through the binding controller.
    ///
    /// Returns `None` (leaving the overlay untouched) when the menu is closed
    /// or the index is out of range.
    pub fn select(&mut self, model: &MenuModel, index: usize) -> Option<(DeviceInput, MenuAction)> {
        let (input, _) = self.state.as_ref()?;
        let item = model.get(index)?;
        let result = (*input, item.action.clone());
        self.state = None;
        Some(result)
    }

    /// Closes the overlay without dispatching (backdrop click or dismissal).
    pub fn dismiss(&mut self) {
        self.state = None;
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// The input recorded by the opening click, while open.
    pub fn selection(&self) -> Option<DeviceInput> {
        self.state.as_ref().map(|(input, _)| *input)
    }

    pub fn anchor(&self) -> Option<MenuAnchor> {
        self.state.as_ref().map(|(_, anchor)| *anchor)
    }

    /// The anchor position as a raw pair: `(-1, -1)` while closed or
    /// centered, the click position while open-positioned.
    pub fn position(&self) -> (i32, i32) {
        match self.anchor() {
            Some(MenuAnchor::At { x, y }) => (x, y),
            Some(MenuAnchor::Centered) | None => CLOSED_POSITION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::MouseButton;
    use crate::domain::macros::MacroEntry;
    use crate::keymap::HidKey;

    fn catalog() -> MacroCatalog {
        [
            (
                "m1".to_string(),
                MacroEntry {
                    name: "Copy".to_string(),
                    description: "Ctrl+C".to_string(),
                },
            ),
            (
                "m2".to_string(),
                MacroEntry {
                    name: "Paste".to_string(),
                    description: "Ctrl+V".to_string(),
                },
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_item_zero_is_always_clear() {
        let model = MenuModel::rebuild(&catalog());
        assert_eq!(model.get(0).unwrap().action, MenuAction::Clear);
        assert_eq!(model.items().len(), 3);
    }

    #[test]
    fn test_items_follow_catalog_order_with_joined_labels() {
        let model = MenuModel::rebuild(&catalog());
        assert_eq!(model.get(1).unwrap().label, "Copy : Ctrl+C");
        assert_eq!(model.get(1).unwrap().action, MenuAction::Assign("m1".into()));
        assert_eq!(model.get(2).unwrap().label, "Paste : Ctrl+V");
    }

    #[test]
    fn test_empty_catalog_still_offers_clear() {
        let model = MenuModel::rebuild(&MacroCatalog::empty());
        assert_eq!(model.items().len(), 1);
        assert_eq!(model.get(0).unwrap().action, MenuAction::Clear);
    }

    #[test]
    fn test_wide_viewport_anchors_at_click_position() {
        let mut overlay = MenuOverlay::closed();
        overlay.open(DeviceInput::Keyboard(HidKey::KeyA), 120, 80, 1920);
        assert_eq!(overlay.anchor(), Some(MenuAnchor::At { x: 120, y: 80 }));
        assert_eq!(overlay.position(), (120, 80));
    }

    #[test]
    fn test_narrow_viewport_forces_center_anchor() {
        let mut overlay = MenuOverlay::closed();
        overlay.open(DeviceInput::Keyboard(HidKey::KeyA), 120, 80, 559);
        assert_eq!(overlay.anchor(), Some(MenuAnchor::Centered));
        // Centered anchoring ignores the stored click position.
        assert_eq!(overlay.position(), CLOSED_POSITION);
    }

    #[test]
    fn test_width_threshold_is_inclusive() {
        let mut overlay = MenuOverlay::closed();
        overlay.open(DeviceInput::Mouse(MouseButton::Left), 10, 10, 560);
        assert_eq!(overlay.anchor(), Some(MenuAnchor::At { x: 10, y: 10 }));
    }

    #[test]
    fn test_select_returns_pair_and_closes() {
        let model = MenuModel::rebuild(&catalog());
        let mut overlay = MenuOverlay::closed();
        overlay.open(DeviceInput::Mouse(MouseButton::Forward), 5, 5, 800);

        let (input, action) = overlay.select(&model, 1).unwrap();
        assert_eq!(input, DeviceInput::Mouse(MouseButton::Forward));
        assert_eq!(action, MenuAction::Assign("m1".into()));
        assert!(!overlay.is_open());
        assert_eq!(overlay.position(), CLOSED_POSITION);
    }

    #[test]
    fn test_select_clear_item() {
        let model = MenuModel::rebuild(&catalog());
        let mut overlay = MenuOverlay::closed();
        overlay.open(DeviceInput::Keyboard(HidKey::Space), 5, 5, 800);
        let (_, action) = overlay.select(&model, 0).unwrap();
        assert_eq!(action, MenuAction::Clear);
    }

    #[test]
    fn test_select_while_closed_is_noop() {
        let model = MenuModel::rebuild(&catalog());
        let mut overlay = MenuOverlay::closed();
        assert_eq!(overlay.select(&model, 0), None);
    }

    #[test]
    fn test_out_of_range_index_leaves_menu_open() {
        let model = MenuModel::rebuild(&catalog());
        let mut overlay = MenuOverlay::closed();
        overlay.open(DeviceInput::Keyboard(HidKey::KeyA), 5, 5, 800);
        assert_eq!(overlay.select(&model, 99), None);
        assert!(overlay.is_open());
    }

    #[test]
    fn test_dismiss_clears_selection() {
        let mut overlay = MenuOverlay::closed();
        overlay.open(DeviceInput::Keyboard(HidKey::KeyA), 5, 5, 800);
        overlay.dismiss();
        assert!(!overlay.is_open());
        assert_eq!(overlay.selection(), None);
    }

    #[test]
    fn test_reopening_replaces_selection() {
        let mut overlay = MenuOverlay::closed();
        overlay.open(DeviceInput::Keyboard(HidKey::KeyA), 5, 5, 800);
        overlay.open(DeviceInput::Mouse(MouseButton::Back), 9, 9, 800);
        assert_eq!(overlay.selection(), Some(DeviceInput::Mouse(MouseButton::Back)));
    }
}
