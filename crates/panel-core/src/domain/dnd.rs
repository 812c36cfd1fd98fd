//! The drag-and-drop transfer model.
//!
//! A single payload kind ("card") is exchanged: a macro card picked up from
//! the source panel and released over a key or mouse-button slot. This module
//! owns the gesture lifecycle and the drop-zone acceptance policy; the
//! binding side effect itself lives in the target binding controller, which
//! receives the payload from [`DragGesture::release`].
//!
//! # Pointer passthrough
//!
//! Drop zones are overlaid *above* the click targets they share space with.
//! The same physical region therefore serves two input modes: click (opens
//! the context menu) and drop (binds a macro). [`DropZone::intercepts_pointer`]
//! encodes the rule that keeps the two from shadowing each other: a zone
//! captures pointer events only while a drag is active and the zone would
//! accept the payload. Outside of an active drag, clicks must reach the
//! underlying target.

use super::macros::MacroInfo;

/// The transient data carried by an active drag: a snapshot of the macro
/// card. Constructed fresh at drag start, consumed on release, discarded on
/// cancel. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload {
    /// Catalog key of the dragged macro — the eventual `value=` parameter.
    pub macro_key: String,
    pub name: String,
    pub description: String,
}

impl DragPayload {
    pub fn from_macro(info: &MacroInfo) -> Self {
        Self {
            macro_key: info.key.clone(),
            name: info.name.clone(),
            description: info.description.clone(),
        }
    }
}

/// The drag gesture lifecycle.
///
/// Drags are exclusive by platform convention: starting a new drag replaces
/// any gesture already in flight, so there is never more than one payload
/// active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragGesture {
    #[default]
    Idle,
    Dragging(DragPayload),
}

impl DragGesture {
    /// Begins a drag with a fresh payload.
    pub fn start(&mut self, payload: DragPayload) {
        *self = DragGesture::Dragging(payload);
    }

    /// Ends the gesture over a drop zone, yielding the payload exactly once.
    ///
    /// Returns `None` when no drag was in flight, which makes a stray release
    /// event harmless.
    pub fn release(&mut self) -> Option<DragPayload> {
        match std::mem::take(self) {
            DragGesture::Dragging(payload) => Some(payload),
            DragGesture::Idle => None,
        }
    }

    /// Abandons the gesture without dropping (e.g. Escape, released outside
    /// any zone).
    pub fn cancel(&mut self) {
        *self = DragGesture::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DragGesture::Dragging(_))
    }

    /// The payload currently above the cursor, while dragging.
    pub fn payload(&self) -> Option<&DragPayload> {
        match self {
            DragGesture::Dragging(p) => Some(p),
            DragGesture::Idle => None,
        }
    }
}

/// A drop zone overlaid on a bindable slot.
///
/// The acceptance policy is a plain flag: every zone in this panel accepts
/// the single card payload kind, but a zone can be switched off wholesale
/// (e.g. a decorative slot with no bindable input behind it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropZone {
    accepts_cards: bool,
}

impl DropZone {
    /// A zone that accepts macro cards.
    pub fn accepting() -> Self {
        Self {
            accepts_cards: true,
        }
    }

    /// A zone that never accepts drops (and therefore never captures clicks).
    pub fn inert() -> Self {
        Self {
            accepts_cards: false,
        }
    }

    /// Whether a release over this zone right now would deliver the payload.
    pub fn can_drop(&self, gesture: &DragGesture) -> bool {
        self.accepts_cards && gesture.is_active()
    }

    /// Whether the overlay captures pointer events in the current gesture
    /// state. Equal to [`DropZone::can_drop`] by design: when no drag is in
    /// flight the overlay must let clicks through to the slot underneath.
    pub fn intercepts_pointer(&self, gesture: &DragGesture) -> bool {
        self.can_drop(gesture)
    }

    /// Advisory hover notification while a payload is above the zone.
    ///
    /// Wired but intentionally inert: reserved for a highlight affordance,
    /// performs no action.
    pub fn on_hover(&self, _payload: &DragPayload) {}
}
