//! The panel session: one user's interactive configuration surface.
//!
//! `PanelSession` owns the drag gesture, the selection/context-menu overlay,
//! and a handle to the sync layer, and wires the domain state machines to the
//! binding controller. Every externally visible mutation flows through a
//! [`BindTarget`], so the drag path and the menu path are the same path.
//!
//! The session is single-user and event-driven: all methods are reactions to
//! pointer events or menu choices, and the only concurrency is the in-flight
//! network call inside an `await`.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use panel_core::{
    BindingSet, DeviceClass, DeviceInput, DragGesture, DragPayload, DropZone, MacroCatalog,
    MenuModel, MenuOverlay, MouseButton,
};

use crate::api::DeviceApi;
use crate::controller::{
    BindTarget, BindingController, KeyboardKeyTarget, MouseButtonTarget, UnknownLayoutCode,
};
use crate::sync::{ClearAllError, ConfigSync, SyncError};

/// Session-level errors surfaced to the embedding UI or CLI.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no macro '{0}' in the catalog")]
    UnknownMacro(String),
    #[error(transparent)]
    UnknownLayoutCode(#[from] UnknownLayoutCode),
    #[error(transparent)]
    Sync(#[from] SyncError),
}

/// What happened to a release event over a drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// A payload was delivered and the binding call completed.
    Bound,
    /// No drag was in flight (stray release) or the zone declined the drop.
    Ignored,
}

pub struct PanelSession<A: DeviceApi> {
    controller: BindingController<A>,
    gesture: DragGesture,
    overlay: MenuOverlay,
    menu: MenuModel,
    /// Every bindable slot in this panel shares one accepting zone policy.
    zone: DropZone,
    viewport_width: u32,
}

impl<A: DeviceApi> PanelSession<A> {
    /// Builds a session over `api` and performs the initial load (catalog
    /// once, then both binding sets). Load failures degrade to empty state,
    /// per the panel's no-retry policy; mutations report their own errors.
    pub async fn start(api: A, viewport_width: u32) -> Self {
        let mut sync = ConfigSync::new(api);
        sync.load().await;
        let menu = MenuModel::rebuild(sync.catalog());
        Self {
            controller: BindingController::new(Arc::new(Mutex::new(sync))),
            gesture: DragGesture::Idle,
            overlay: MenuOverlay::closed(),
            menu,
            zone: DropZone::accepting(),
            viewport_width,
        }
    }

    // ── Drag path ─────────────────────────────────────────────────────────────

    /// Picks up the macro card with catalog key `macro_key`.
    pub async fn drag_start(&mut self, macro_key: &str) -> Result<(), SessionError> {
        let info = self
            .catalog()
            .await
            .get(macro_key)
            .ok_or_else(|| SessionError::UnknownMacro(macro_key.to_string()))?;
        self.gesture.start(DragPayload::from_macro(&info));
        Ok(())
    }

    /// Abandons the drag without dropping.
    pub fn drag_cancel(&mut self) {
        self.gesture.cancel();
    }

    pub fn drag_active(&self) -> bool {
        self.gesture.is_active()
    }

    /// Releases the drag over the keyboard key with layout code `code`.
    pub async fn drop_on_key(&mut self, code: &str) -> Result<DropOutcome, SessionError> {
        let target = KeyboardKeyTarget::from_layout_code(code, self.controller.clone())?;
        self.deliver_drop(&target).await
    }

    /// Releases the drag over a mouse button.
    pub async fn drop_on_mouse(&mut self, button: MouseButton) -> Result<DropOutcome, SessionError> {
        let target = MouseButtonTarget::new(button, self.controller.clone());
        self.deliver_drop(&target).await
    }

    async fn deliver_drop(
        &mut self,
        target: &impl BindTarget<A>,
    ) -> Result<DropOutcome, SessionError> {
        if !self.zone.can_drop(&self.gesture) {
            return Ok(DropOutcome::Ignored);
        }
        // `release` consumes the payload, so the side effect fires once per
        // gesture even if a duplicate release event arrives.
        let Some(payload) = self.gesture.release() else {
            return Ok(DropOutcome::Ignored);
        };
        target.on_drop(&payload).await?;
        Ok(DropOutcome::Bound)
    }

    /// Whether a drop-zone overlay currently captures pointer events. False
    /// outside an active drag so clicks reach the slot underneath.
    pub fn zone_intercepts_pointer(&self) -> bool {
        self.zone.intercepts_pointer(&self.gesture)
    }

    // ── Click / menu path ─────────────────────────────────────────────────────

    /// Click on a keyboard key: record the selection, open the menu there.
    pub fn click_key(&mut self, code: &str, x: i32, y: i32) -> Result<(), SessionError> {
        let hid = panel_core::layout_to_hid(code)
            .ok_or_else(|| UnknownLayoutCode(code.to_string()))?;
        self.overlay
            .open(DeviceInput::Keyboard(hid), x, y, self.viewport_width);
        Ok(())
    }

    /// Click on a mouse button: record the selection, open the menu there.
    pub fn click_mouse(&mut self, button: MouseButton, x: i32, y: i32) {
        self.overlay
            .open(DeviceInput::Mouse(button), x, y, self.viewport_width);
    }

    /// Selects menu item `index`: closes the overlay and dispatches the
    /// item's action through the same target path as a drop.
    ///
    /// Returns `Ok(false)` when the menu was closed or the index invalid.
    pub async fn menu_select(&mut self, index: usize) -> Result<bool, SessionError> {
        let Some((input, action)) = self.overlay.select(&self.menu, index) else {
            return Ok(false);
        };
        match input {
            DeviceInput::Keyboard(hid) => {
                KeyboardKeyTarget::from_hid(hid, self.controller.clone())
                    .on_menu_select(action)
                    .await?
            }
            DeviceInput::Mouse(button) => {
                MouseButtonTarget::new(button, self.controller.clone())
                    .on_menu_select(action)
                    .await?
            }
        }
        Ok(true)
    }

    /// Backdrop click or explicit dismissal.
    pub fn menu_dismiss(&mut self) {
        self.overlay.dismiss();
    }

    pub fn menu(&self) -> &MenuModel {
        &self.menu
    }

    pub fn overlay(&self) -> &MenuOverlay {
        &self.overlay
    }

    /// Viewport resize; affects how the next menu open anchors itself.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    /// A handle to the binding controller, for embedders that construct
    /// their own targets.
    pub fn controller(&self) -> BindingController<A> {
        self.controller.clone()
    }

    // ── Bulk and read paths ───────────────────────────────────────────────────

    /// Clears every binding of both device classes.
    pub async fn clear_all(&mut self) -> Result<(), ClearAllError> {
        self.controller.sync().lock().await.clear_all().await
    }

    /// Snapshot of the macro catalog.
    pub async fn catalog(&self) -> MacroCatalog {
        self.controller.sync().lock().await.catalog().clone()
    }

    /// Snapshot of one class's cached bindings.
    pub async fn bindings(&self, class: DeviceClass) -> BindingSet {
        self.controller.sync().lock().await.bindings(class).clone()
    }
}
