//! Remote configuration sync: the read-through cache over the device
//! controller, with pessimistic refresh after every write.
//!
//! The controller is the single source of truth. The panel never trusts its
//! own optimistic state: every mutation is a two-step `write` then `refresh`,
//! and the refresh runs on **both** the success and failure path of the write
//! (and only after the write settles). A failed write therefore converges the
//! cache back to whatever the controller actually holds, and the write error
//! is still reported to the caller instead of being swallowed.

use thiserror::Error;
use tracing::{info, warn};

use panel_core::{
    BindingSet, BindingValue, DeviceClass, DeviceInput, MacroCatalog, CLEAR_ALL, NONE_VALUE,
};

use crate::api::{ApiError, DeviceApi};

/// Error from an assignment: either the write itself or the follow-up
/// refresh. In both cases the refresh was attempted.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("assignment write failed: {0}")]
    Write(#[source] ApiError),
    #[error("post-write refresh failed: {0}")]
    Refresh(#[source] ApiError),
}

/// Error from a clear-all: the two class-level clears are independent writes
/// with no atomicity, so a failure names exactly which class(es) kept stale
/// bindings.
#[derive(Debug, Error)]
pub enum ClearAllError {
    #[error("clear-all failed for {class}: {source}")]
    Class {
        class: DeviceClass,
        #[source]
        source: ApiError,
    },
    #[error("clear-all failed for both classes (mouse: {mouse}; keyboard: {keyboard})")]
    Both { mouse: ApiError, keyboard: ApiError },
}

/// The sync layer: catalog snapshot plus one cached [`BindingSet`] per
/// device class, refreshed from the controller after every mutation.
pub struct ConfigSync<A: DeviceApi> {
    api: A,
    catalog: MacroCatalog,
    keyboard: BindingSet,
    mouse: BindingSet,
}

impl<A: DeviceApi> ConfigSync<A> {
    /// Creates the sync layer with empty caches; call [`ConfigSync::load`]
    /// to populate them.
    pub fn new(api: A) -> Self {
        Self {
            api,
            catalog: MacroCatalog::empty(),
            keyboard: BindingSet::default(),
            mouse: BindingSet::default(),
        }
    }

    /// Initial load: catalog once, then both binding sets.
    ///
    /// A catalog fetch failure yields an empty catalog (logged, no retry —
    /// the catalog is assumed immutable for the session, so there is nothing
    /// to come back for). Binding fetch failures are logged and leave that
    /// class's cache empty; the next mutation's refresh repairs it.
    pub async fn load(&mut self) {
        match self.api.fetch_macros().await {
            Ok(catalog) => {
                info!("loaded macro catalog ({} macros)", catalog.len());
                self.catalog = catalog;
            }
            Err(e) => {
                warn!("macro catalog fetch failed, continuing with empty catalog: {e}");
                self.catalog = MacroCatalog::empty();
            }
        }
        for class in [DeviceClass::Keyboard, DeviceClass::Mouse] {
            if let Err(e) = self.refresh(class).await {
                warn!("initial {class} binding fetch failed: {e}");
            }
        }
    }

    /// Re-reads one class's bindings from the controller, replacing the cache
    /// wholesale.
    pub async fn refresh(&mut self, class: DeviceClass) -> Result<(), ApiError> {
        let set = self.api.fetch_bindings(class).await?;
        match class {
            DeviceClass::Keyboard => self.keyboard = set,
            DeviceClass::Mouse => self.mouse = set,
        }
        Ok(())
    }

    /// Assigns `value` to `input`: write, then unconditional refresh of that
    /// input's class.
    ///
    /// The refresh is issued only after the write settles, and it is issued
    /// whether the write succeeded or not. A write error takes precedence in
    /// the returned result; a refresh error is reported only for a successful
    /// write.
    pub async fn assign(
        &mut self,
        input: DeviceInput,
        value: &BindingValue,
    ) -> Result<(), SyncError> {
        let class = input.class();
        let write = self
            .api
            .set_binding(class, &input.wire_key(), value.wire_value())
            .await;
        if let Err(ref e) = write {
            warn!("assign {input} <- {} failed: {e}", value.wire_value());
        } else {
            info!("assigned {input} <- {}", value.wire_value());
        }

        // Pessimistic refresh, regardless of the write outcome.
        let refresh = self.refresh(class).await;

        write.map_err(SyncError::Write)?;
        refresh.map_err(SyncError::Refresh)
    }

    /// Clears every binding of both classes: two independent `CLEAR_ALL`
    /// writes with no combined acknowledgment. Both caches are refreshed
    /// afterwards regardless of either write's outcome, so a partial failure
    /// is at least visible in the reported error and in the re-read state.
    pub async fn clear_all(&mut self) -> Result<(), ClearAllError> {
        let mouse = self
            .api
            .set_binding(DeviceClass::Mouse, CLEAR_ALL, NONE_VALUE)
            .await;
        let keyboard = self
            .api
            .set_binding(DeviceClass::Keyboard, CLEAR_ALL, NONE_VALUE)
            .await;

        for class in [DeviceClass::Mouse, DeviceClass::Keyboard] {
            if let Err(e) = self.refresh(class).await {
                warn!("refresh after clear-all failed for {class}: {e}");
            }
        }

        match (mouse, keyboard) {
            (Ok(()), Ok(())) => {
                info!("cleared all bindings");
                Ok(())
            }
            (Err(mouse), Err(keyboard)) => Err(ClearAllError::Both { mouse, keyboard }),
            (Err(source), Ok(())) => Err(ClearAllError::Class {
                class: DeviceClass::Mouse,
                source,
            }),
            (Ok(()), Err(source)) => Err(ClearAllError::Class {
                class: DeviceClass::Keyboard,
                source,
            }),
        }
    }

    pub fn catalog(&self) -> &MacroCatalog {
        &self.catalog
    }

    pub fn bindings(&self, class: DeviceClass) -> &BindingSet {
        match class {
            DeviceClass::Keyboard => &self.keyboard,
            DeviceClass::Mouse => &self.mouse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockDeviceApi;
    use mockall::predicate::eq;
    use panel_core::{HidKey, MacroEntry, MouseButton};

    fn reqwest_err() -> ApiError {
        ApiError::Status {
            endpoint: "/api/set/keyboard".to_string(),
            status: 400,
            body: "Invalid key".to_string(),
        }
    }

    fn one_binding(id: u8, key: &str) -> BindingSet {
        [(id, key.to_string())].into_iter().collect()
    }

    #[tokio::test]
    async fn test_assign_writes_then_refreshes_in_order() {
        let mut api = MockDeviceApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_set_binding()
            .with(eq(DeviceClass::Keyboard), eq("4"), eq("m1"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        api.expect_fetch_bindings()
            .with(eq(DeviceClass::Keyboard))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(one_binding(4, "m1")));

        let mut sync = ConfigSync::new(api);
        sync.assign(
            DeviceInput::Keyboard(HidKey::KeyA),
            &BindingValue::Macro("m1".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(
            sync.bindings(DeviceClass::Keyboard)
                .bound_macro(DeviceInput::Keyboard(HidKey::KeyA)),
            Some("m1")
        );
    }

    #[tokio::test]
    async fn test_failed_write_still_refreshes_and_reports_error() {
        let mut api = MockDeviceApi::new();
        api.expect_set_binding()
            .times(1)
            .returning(|_, _, _| Err(reqwest_err()));
        // The refresh must fire exactly once even though the write failed.
        api.expect_fetch_bindings()
            .with(eq(DeviceClass::Mouse))
            .times(1)
            .returning(|_| Ok(BindingSet::default()));

        let mut sync = ConfigSync::new(api);
        let err = sync
            .assign(
                DeviceInput::Mouse(MouseButton::Left),
                &BindingValue::Macro("m1".to_string()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Write(_)));
    }

    #[tokio::test]
    async fn test_clear_sends_clear_function_sentinel() {
        let mut api = MockDeviceApi::new();
        api.expect_set_binding()
            .with(eq(DeviceClass::Keyboard), eq("41"), eq("CLEAR_FUNCTION"))
            .times(1)
            .returning(|_, _, _| Ok(()));
        api.expect_fetch_bindings()
            .returning(|_| Ok(BindingSet::default()));

        let mut sync = ConfigSync::new(api);
        sync.assign(DeviceInput::Keyboard(HidKey::Escape), &BindingValue::Clear)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_clear_all_issues_both_class_writes() {
        let mut api = MockDeviceApi::new();
        api.expect_set_binding()
            .with(eq(DeviceClass::Mouse), eq("CLEAR_ALL"), eq("NONE"))
            .times(1)
            .returning(|_, _, _| Ok(()));
        api.expect_set_binding()
            .with(eq(DeviceClass::Keyboard), eq("CLEAR_ALL"), eq("NONE"))
            .times(1)
            .returning(|_, _, _| Ok(()));
        api.expect_fetch_bindings()
            .times(2)
            .returning(|_| Ok(BindingSet::default()));

        let mut sync = ConfigSync::new(api);
        sync.clear_all().await.unwrap();
        assert!(sync.bindings(DeviceClass::Keyboard).is_empty());
        assert!(sync.bindings(DeviceClass::Mouse).is_empty());
    }

    #[tokio::test]
    async fn test_clear_all_partial_failure_names_the_failed_class() {
        let mut api = MockDeviceApi::new();
        api.expect_set_binding()
            .with(eq(DeviceClass::Mouse), eq("CLEAR_ALL"), eq("NONE"))
            .times(1)
            .returning(|_, _, _| Err(reqwest_err()));
        api.expect_set_binding()
            .with(eq(DeviceClass::Keyboard), eq("CLEAR_ALL"), eq("NONE"))
            .times(1)
            .returning(|_, _, _| Ok(()));
        api.expect_fetch_bindings()
            .times(2)
            .returning(|_| Ok(BindingSet::default()));

        let mut sync = ConfigSync::new(api);
        let err = sync.clear_all().await.unwrap_err();
        match err {
            ClearAllError::Class { class, .. } => assert_eq!(class, DeviceClass::Mouse),
            other => panic!("expected per-class error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_with_failing_catalog_yields_empty_catalog() {
        let mut api = MockDeviceApi::new();
        api.expect_fetch_macros()
            .times(1)
            .returning(|| Err(reqwest_err()));
        api.expect_fetch_bindings()
            .times(2)
            .returning(|_| Ok(BindingSet::default()));

        let mut sync = ConfigSync::new(api);
        sync.load().await;
        assert!(sync.catalog().is_empty());
    }

    #[tokio::test]
    async fn test_load_populates_catalog_and_both_classes() {
        let mut api = MockDeviceApi::new();
        api.expect_fetch_macros().times(1).returning(|| {
            Ok([(
                "m1".to_string(),
                MacroEntry {
                    name: "Copy".to_string(),
                    description: "Ctrl+C".to_string(),
                },
            )]
            .into_iter()
            .collect())
        });
        api.expect_fetch_bindings()
            .with(eq(DeviceClass::Keyboard))
            .times(1)
            .returning(|_| Ok(one_binding(4, "m1")));
        api.expect_fetch_bindings()
            .with(eq(DeviceClass::Mouse))
            .times(1)
            .returning(|_| Ok(one_binding(2, "m1")));

        let mut sync = ConfigSync::new(api);
        sync.load().await;
        assert!(sync.catalog().contains("m1"));
        assert_eq!(sync.bindings(DeviceClass::Keyboard).len(), 1);
        assert_eq!(
            sync.bindings(DeviceClass::Mouse)
                .bound_macro(DeviceInput::Mouse(MouseButton::Right)),
            Some("m1")
        );
    }
}
