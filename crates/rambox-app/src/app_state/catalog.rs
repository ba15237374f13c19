//! Remote catalog fetch and hand-off to the picker.

use std::sync::mpsc;
use std::time::Duration;

use serde_json::{json, Value};

use rambox_services::{CatalogLoader, ServiceCatalog};

use super::core::RamboxApp;

/// Picker entries as the chrome wants them, logos made absolute.
pub(in crate::app_state) fn catalog_payload(catalog: &ServiceCatalog, icon_base_url: &str) -> Value {
    Value::Array(
        catalog
            .entries()
            .iter()
            .map(|e| {
                json!({
                    "id": e.id,
                    "name": e.name,
                    "description": e.description,
                    "url": e.url,
                    "logo": e.logo_url(icon_base_url),
                    "note": e.note,
                    "custom_domain": e.custom_domain,
                })
            })
            .collect(),
    )
}

impl RamboxApp {
    /// Fetch the catalog once in the background.
    ///
    /// Without a runtime the session goes on with an empty picker.
    pub(super) fn start_catalog_fetch(&mut self) {
        let Some(ref rt) = self.tokio_runtime else {
            tracing::warn!("No async runtime, continuing without a service catalog");
            self.apply_catalog(ServiceCatalog::default());
            return;
        };

        let loader = CatalogLoader::new(
            self.config.catalog.url.clone(),
            Duration::from_secs(u64::from(self.config.catalog.timeout_secs)),
        );
        let (tx, rx) = mpsc::channel();
        self.catalog_rx = Some(rx);

        tracing::info!(url = loader.url(), "Fetching service catalog");
        rt.spawn(async move {
            let catalog = loader.fetch().await;
            let _ = tx.send(catalog);
        });
    }

    /// Pick up a finished catalog fetch, if any.
    pub(super) fn poll_catalog(&mut self) {
        let Some(ref rx) = self.catalog_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(catalog) => {
                self.catalog_rx = None;
                self.apply_catalog(catalog);
            }
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                tracing::warn!("Catalog task ended without a result");
                self.catalog_rx = None;
                self.apply_catalog(ServiceCatalog::default());
            }
        }
    }

    /// Store the catalog and create the service views that waited on it.
    fn apply_catalog(&mut self, catalog: ServiceCatalog) {
        tracing::info!(entries = catalog.len(), "Service catalog ready");
        self.catalog = Some(catalog);
        self.push_catalog();
        self.create_service_views();
    }
}
