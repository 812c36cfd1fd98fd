//! The target binding controller.
//!
//! Drag-and-drop and the context menu are two front ends to one capability:
//! binding a value to a physical input. [`BindTarget`] is that single
//! interface — `on_drop` and `on_menu_select` both route through the shared
//! [`BindingController::bind`], so the two input paths cannot drift apart.
//!
//! There is one target implementation per input class: [`KeyboardKeyTarget`]
//! resolves its layout code to a HID usage ID at construction time (an
//! unknown code is rejected there, keeping the runtime path total), and
//! [`MouseButtonTarget`] carries its literal bit mask.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use panel_core::{
    BindingValue, DeviceInput, DragPayload, KeyMapper, MenuAction, MouseButton,
};

use crate::api::DeviceApi;
use crate::sync::{ConfigSync, SyncError};

/// Error constructing a target for a layout code outside the rendered set.
#[derive(Debug, Error)]
#[error("unknown keyboard layout code '{0}'")]
pub struct UnknownLayoutCode(pub String);

/// Shared handle to the sync layer through which all bindings flow.
pub struct BindingController<A: DeviceApi> {
    sync: Arc<Mutex<ConfigSync<A>>>,
}

// Manual Clone: `A` itself need not be Clone for the Arc handle to be.
impl<A: DeviceApi> Clone for BindingController<A> {
    fn clone(&self) -> Self {
        Self {
            sync: Arc::clone(&self.sync),
        }
    }
}

impl<A: DeviceApi> BindingController<A> {
    pub fn new(sync: Arc<Mutex<ConfigSync<A>>>) -> Self {
        Self { sync }
    }

    /// The one binding operation both gesture paths converge on:
    /// write-then-refresh via [`ConfigSync::assign`].
    pub async fn bind(&self, input: DeviceInput, value: BindingValue) -> Result<(), SyncError> {
        self.sync.lock().await.assign(input, &value).await
    }

    pub fn sync(&self) -> &Arc<Mutex<ConfigSync<A>>> {
        &self.sync
    }
}

/// One bindable physical input with its two event-facing entry points.
///
/// Both provided methods delegate to [`BindingController::bind`]; an
/// implementation only supplies its identity and its controller handle.
#[async_trait]
pub trait BindTarget<A: DeviceApi>: Send + Sync {
    /// The normalized identifier of the input this target fronts.
    fn device_input(&self) -> DeviceInput;

    fn controller(&self) -> &BindingController<A>;

    /// Drop front end: a released macro card binds its catalog key.
    async fn on_drop(&self, payload: &DragPayload) -> Result<(), SyncError> {
        self.controller()
            .bind(
                self.device_input(),
                BindingValue::Macro(payload.macro_key.clone()),
            )
            .await
    }

    /// Menu front end: a selected item binds its action.
    async fn on_menu_select(&self, action: MenuAction) -> Result<(), SyncError> {
        let value = match action {
            MenuAction::Clear => BindingValue::Clear,
            MenuAction::Assign(key) => BindingValue::Macro(key),
        };
        self.controller().bind(self.device_input(), value).await
    }
}

/// Binding target for one rendered keyboard key.
pub struct KeyboardKeyTarget<A: DeviceApi> {
    input: DeviceInput,
    controller: BindingController<A>,
}

// Manual Debug: `A` itself need not be Debug for the target to be.
impl<A: DeviceApi> std::fmt::Debug for KeyboardKeyTarget<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardKeyTarget")
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

impl<A: DeviceApi> KeyboardKeyTarget<A> {
    /// Builds a target from a rendered layout code, resolving the HID usage
    /// ID up front.
    pub fn from_layout_code(
        code: &str,
        controller: BindingController<A>,
    ) -> Result<Self, UnknownLayoutCode> {
        let hid = KeyMapper::layout_code_to_hid(code)
            .ok_or_else(|| UnknownLayoutCode(code.to_string()))?;
        Ok(Self {
            input: DeviceInput::Keyboard(hid),
            controller,
        })
    }

    /// Builds a target from an already-resolved HID key (menu dispatch path).
    pub fn from_hid(hid: panel_core::HidKey, controller: BindingController<A>) -> Self {
        Self {
            input: DeviceInput::Keyboard(hid),
            controller,
        }
    }
}

#[async_trait]
impl<A: DeviceApi> BindTarget<A> for KeyboardKeyTarget<A> {
    fn device_input(&self) -> DeviceInput {
        self.input
    }

    fn controller(&self) -> &BindingController<A> {
        &self.controller
    }
}

/// Binding target for one mouse button.
pub struct MouseButtonTarget<A: DeviceApi> {
    input: DeviceInput,
    controller: BindingController<A>,
}

impl<A: DeviceApi> MouseButtonTarget<A> {
    pub fn new(button: MouseButton, controller: BindingController<A>) -> Self {
        Self {
            input: DeviceInput::Mouse(button),
            controller,
        }
    }
}

#[async_trait]
impl<A: DeviceApi> BindTarget<A> for MouseButtonTarget<A> {
    fn device_input(&self) -> DeviceInput {
        self.input
    }

    fn controller(&self) -> &BindingController<A> {
        &self.controller
    }
}
