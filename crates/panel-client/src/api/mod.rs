//! The device controller API seam.
//!
//! [`DeviceApi`] is the narrow trait the rest of the panel talks through; the
//! production implementation is [`http::HttpDeviceApi`]. Keeping the seam a
//! trait lets the sync layer and session be tested against a mock or an
//! in-memory fake controller without a network.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use panel_core::{BindingSet, DeviceClass, MacroCatalog};

pub use http::HttpDeviceApi;

/// Error type for device controller requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a usable response (connection refused, DNS,
    /// timeout, or a malformed JSON body).
    #[error("device controller request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The controller answered with a non-success status, e.g. `400 Invalid
    /// key` for an identifier outside its accepted set.
    #[error("device controller returned {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
}

/// The REST surface of the device controller, as consumed by the panel.
///
/// All four operations are plain GETs against `/api/get/*` and `/api/set/*`;
/// mutations are idempotent on the controller side (last write wins).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// `GET /api/get/macros` — the macro catalog snapshot.
    async fn fetch_macros(&self) -> Result<MacroCatalog, ApiError>;

    /// `GET /api/get/{keyboard|mouse}` — current bindings of one class.
    async fn fetch_bindings(&self, class: DeviceClass) -> Result<BindingSet, ApiError>;

    /// `GET /api/set/{class}?key=..&value=..` — assign, clear, or clear-all
    /// depending on the sentinel values carried in `key` and `value`.
    async fn set_binding(&self, class: DeviceClass, key: &str, value: &str)
        -> Result<(), ApiError>;
}
