//! Ordered, persisted collection of services.
//!
//! The list is kept partitioned: every left-aligned service precedes every
//! right-aligned one. Each mutation is applied in memory, written through
//! the store, and rolled back if the write fails.

use tracing::{debug, info};

use rambox_common::{ServiceError, ServiceId};

use crate::catalog::url::validate_service_url;
use crate::model::{Align, NewService, Service, ServicePatch, ZoomAction};
use crate::store::{ServiceStore, StoredServices, STORE_VERSION};

pub struct ServiceRegistry {
    store: ServiceStore,
    services: Vec<Service>,
    next_id: u32,
    last_active: Option<ServiceId>,
}

fn validate_name(name: &str) -> Result<String, ServiceError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Invalid("service name must not be blank".into()));
    }
    Ok(trimmed.to_string())
}

impl ServiceRegistry {
    /// Load the registry from its store. A missing store is an empty registry.
    pub fn load(store: ServiceStore) -> Result<Self, ServiceError> {
        let stored = store.load()?;
        let mut services = stored.services;
        // Stable partition, left before right
        services.sort_by_key(|s| s.align == Align::Right);

        info!(count = services.len(), "service registry loaded");
        Ok(Self {
            store,
            services,
            next_id: stored.next_id,
            last_active: stored.last_active,
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn get(&self, id: ServiceId) -> Option<&Service> {
        self.services.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Service> {
        self.services.iter()
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn left(&self) -> impl Iterator<Item = &Service> {
        self.services.iter().filter(|s| s.align == Align::Left)
    }

    pub fn right(&self) -> impl Iterator<Item = &Service> {
        self.services.iter().filter(|s| s.align == Align::Right)
    }

    pub fn last_active(&self) -> Option<ServiceId> {
        self.last_active
    }

    pub fn store_path(&self) -> &std::path::Path {
        self.store.path()
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Add a service. Left services go after the last left one, right
    /// services at the end.
    pub fn add(&mut self, new: NewService) -> Result<ServiceId, ServiceError> {
        let name = validate_name(&new.name)?;
        let url = validate_service_url(&new.url)?;

        self.mutate(|reg| {
            let id = ServiceId(reg.next_id);
            reg.next_id = reg
                .next_id
                .checked_add(1)
                .ok_or_else(|| ServiceError::Invalid("no service ids left".into()))?;

            let mut service = new.into_service(id);
            service.name = name;
            service.url = url;

            let index = match service.align {
                Align::Left => reg.left_count(),
                Align::Right => reg.services.len(),
            };
            reg.services.insert(index, service);
            Ok(id)
        })
        .inspect(|id| info!(service_id = %id, "service added"))
    }

    /// Remove a service and return its record.
    pub fn remove(&mut self, id: ServiceId) -> Result<Service, ServiceError> {
        let removed = self.mutate(|reg| {
            let index = reg.index_of(id)?;
            if reg.last_active == Some(id) {
                reg.last_active = None;
            }
            Ok(reg.services.remove(index))
        })?;
        info!(service_id = %id, "service removed");
        Ok(removed)
    }

    /// Remove every service. Ids are not reused afterwards.
    pub fn remove_all(&mut self) -> Result<(), ServiceError> {
        self.mutate(|reg| {
            reg.services.clear();
            reg.last_active = None;
            Ok(())
        })?;
        info!("all services removed");
        Ok(())
    }

    /// Move a service to `index` within the `align` side. The index is
    /// clamped to the size of that side.
    pub fn move_to(
        &mut self,
        id: ServiceId,
        align: Align,
        index: usize,
    ) -> Result<(), ServiceError> {
        self.mutate(|reg| {
            let from = reg.index_of(id)?;
            let mut service = reg.services.remove(from);
            service.align = align;

            let left = reg.left_count();
            let at = match align {
                Align::Left => index.min(left),
                Align::Right => left + index.min(reg.services.len() - left),
            };
            reg.services.insert(at, service);
            Ok(())
        })?;
        debug!(service_id = %id, ?align, index, "service moved");
        Ok(())
    }

    pub fn rename(&mut self, id: ServiceId, name: &str) -> Result<(), ServiceError> {
        let name = validate_name(name)?;
        self.mutate(|reg| {
            reg.get_mut(id)?.name = name;
            Ok(())
        })
    }

    pub fn set_enabled(&mut self, id: ServiceId, enabled: bool) -> Result<(), ServiceError> {
        self.mutate(|reg| {
            reg.get_mut(id)?.enabled = enabled;
            Ok(())
        })
    }

    pub fn set_notifications(&mut self, id: ServiceId, on: bool) -> Result<(), ServiceError> {
        self.mutate(|reg| {
            reg.get_mut(id)?.notifications = on;
            Ok(())
        })
    }

    pub fn set_muted(&mut self, id: ServiceId, muted: bool) -> Result<(), ServiceError> {
        self.mutate(|reg| {
            reg.get_mut(id)?.muted = muted;
            Ok(())
        })
    }

    /// Apply a settings edit. Changing `align` moves the service to the end
    /// of its new side.
    pub fn update(&mut self, id: ServiceId, patch: ServicePatch) -> Result<(), ServiceError> {
        let name = patch.name.as_deref().map(validate_name).transpose()?;
        let url = patch.url.as_deref().map(validate_service_url).transpose()?;

        self.mutate(|reg| {
            let service = reg.get_mut(id)?;
            if let Some(name) = name {
                service.name = name;
            }
            if let Some(url) = url {
                service.url = url;
            }
            if let Some(v) = patch.notifications {
                service.notifications = v;
            }
            if let Some(v) = patch.muted {
                service.muted = v;
            }
            if let Some(v) = patch.show_name_in_tab {
                service.show_name_in_tab = v;
            }
            if let Some(v) = patch.display_tab_unread_counter {
                service.display_tab_unread_counter = v;
            }
            if let Some(v) = patch.include_in_global_unread_counter {
                service.include_in_global_unread_counter = v;
            }
            if let Some(js) = patch.js_unread {
                service.js_unread = js;
            }
            if let Some(ua) = patch.user_agent {
                let ua = ua.trim();
                service.user_agent = (!ua.is_empty()).then(|| ua.to_string());
            }

            if let Some(align) = patch.align {
                if service.align != align {
                    let from = reg.index_of(id)?;
                    let mut moved = reg.services.remove(from);
                    moved.align = align;
                    let at = match align {
                        Align::Left => reg.left_count(),
                        Align::Right => reg.services.len(),
                    };
                    reg.services.insert(at, moved);
                }
            }
            Ok(())
        })?;
        debug!(service_id = %id, "service updated");
        Ok(())
    }

    /// Step the zoom factor and return the new value.
    pub fn set_zoom(&mut self, id: ServiceId, action: ZoomAction) -> Result<f64, ServiceError> {
        self.mutate(|reg| {
            let service = reg.get_mut(id)?;
            service.zoom = action.apply(service.zoom);
            Ok(service.zoom)
        })
    }

    /// Remember the active tab so it can be restored next session.
    pub fn set_last_active(&mut self, id: Option<ServiceId>) -> Result<(), ServiceError> {
        if let Some(id) = id {
            self.index_of(id)?;
        }
        if self.last_active == id {
            return Ok(());
        }
        self.mutate(|reg| {
            reg.last_active = id;
            Ok(())
        })
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn left_count(&self) -> usize {
        self.services.iter().filter(|s| s.align == Align::Left).count()
    }

    fn index_of(&self, id: ServiceId) -> Result<usize, ServiceError> {
        self.services
            .iter()
            .position(|s| s.id == id)
            .ok_or(ServiceError::NotFound(id))
    }

    fn get_mut(&mut self, id: ServiceId) -> Result<&mut Service, ServiceError> {
        self.services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(ServiceError::NotFound(id))
    }

    fn snapshot(&self) -> StoredServices {
        StoredServices {
            version: STORE_VERSION,
            next_id: self.next_id,
            last_active: self.last_active,
            services: self.services.clone(),
        }
    }

    fn restore(&mut self, snapshot: StoredServices) {
        self.services = snapshot.services;
        self.next_id = snapshot.next_id;
        self.last_active = snapshot.last_active;
    }

    /// Apply `f`, then persist. On any error the in-memory state is
    /// restored to what it was before.
    fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let before = self.snapshot();
        let result = f(self).and_then(|value| {
            self.store.save(&self.snapshot())?;
            Ok(value)
        });
        if result.is_err() {
            self.restore(before);
        }
        result
    }
}
