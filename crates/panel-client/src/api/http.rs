//! `reqwest`-backed implementation of [`DeviceApi`].
//!
//! The controller speaks plain HTTP GET for both reads and writes, with
//! query-string parameters on the set endpoints. No request timeout is
//! configured: a stalled controller stalls only the in-flight refresh, never
//! the panel itself, and the panel has no retry policy to coordinate with.

use async_trait::async_trait;
use tracing::debug;

use panel_core::{BindingSet, DeviceClass, MacroCatalog};

use super::{ApiError, DeviceApi};

/// HTTP client for the device controller's REST API.
#[derive(Debug, Clone)]
pub struct HttpDeviceApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpDeviceApi {
    /// Creates a client against `base_url`, e.g. `http://127.0.0.1:9264`.
    /// A trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_url(&self, what: &str) -> String {
        format!("{}/api/get/{}", self.base_url, what)
    }

    fn set_url(&self, class: DeviceClass) -> String {
        format!("{}/api/set/{}", self.base_url, class.api_segment())
    }

    /// Converts a non-success response into [`ApiError::Status`], keeping the
    /// controller's body text (it answers `400 Invalid key` and similar in
    /// plain text).
    async fn check_status(endpoint: &str, resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl DeviceApi for HttpDeviceApi {
    async fn fetch_macros(&self) -> Result<MacroCatalog, ApiError> {
        let url = self.get_url("macros");
        debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        let resp = Self::check_status(&url, resp).await?;
        Ok(resp.json().await?)
    }

    async fn fetch_bindings(&self, class: DeviceClass) -> Result<BindingSet, ApiError> {
        let url = self.get_url(class.api_segment());
        debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        let resp = Self::check_status(&url, resp).await?;
        Ok(resp.json().await?)
    }

    async fn set_binding(
        &self,
        class: DeviceClass,
        key: &str,
        value: &str,
    ) -> Result<(), ApiError> {
        let url = self.set_url(class);
        debug!("GET {url}?key={key}&value={value}");
        let resp = self
            .http
            .get(&url)
            .query(&[("key", key), ("value", value)])
            .send()
            .await?;
        Self::check_status(&url, resp).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_stripped() {
        let api = HttpDeviceApi::new("http://127.0.0.1:9264/");
        assert_eq!(api.base_url(), "http://127.0.0.1:9264");
    }

    #[test]
    fn test_get_urls() {
        let api = HttpDeviceApi::new("http://device.local:9264");
        assert_eq!(api.get_url("macros"), "http://device.local:9264/api/get/macros");
        assert_eq!(api.get_url("mouse"), "http://device.local:9264/api/get/mouse");
    }

    #[test]
    fn test_set_urls_per_class() {
        let api = HttpDeviceApi::new("http://device.local:9264");
        assert_eq!(
            api.set_url(DeviceClass::Keyboard),
            "http://device.local:9264/api/set/keyboard"
        );
        assert_eq!(
            api.set_url(DeviceClass::Mouse),
            "http://device.local:9264/api/set/mouse"
        );
    }
}
