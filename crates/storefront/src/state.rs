//! Application state shared across handlers.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::categories::CategoryRegistry;
use crate::config::StorefrontConfig;
use crate::events::EventBus;
use crate::models::{ContactMessage, NewContactMessage};
use crate::services::{AutosClient, CarritoClient, OrdenesClient, UsuariosClient};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration, the four service
/// clients, the event bus, and the small pieces of gateway-local state
/// (category registry, contact message log).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    autos: AutosClient,
    usuarios: UsuariosClient,
    carrito: CarritoClient,
    ordenes: OrdenesClient,
    events: EventBus,
    categories: CategoryRegistry,
    contact_log: Mutex<Vec<ContactMessage>>,
}

impl AppState {
    /// Create the application state, wiring one shared HTTP client into the
    /// four service clients.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let http = reqwest::Client::new();
        let services = &config.services;

        let autos = AutosClient::new(http.clone(), services.autos.clone());
        let usuarios = UsuariosClient::new(http.clone(), services.usuarios.clone());
        let carrito = CarritoClient::new(http.clone(), services.carrito.clone());
        let ordenes = OrdenesClient::new(http, services.ordenes.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                autos,
                usuarios,
                carrito,
                ordenes,
                events: EventBus::default(),
                categories: CategoryRegistry::default(),
                contact_log: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog service client.
    #[must_use]
    pub fn autos(&self) -> &AutosClient {
        &self.inner.autos
    }

    /// Get a reference to the users service client.
    #[must_use]
    pub fn usuarios(&self) -> &UsuariosClient {
        &self.inner.usuarios
    }

    /// Get a reference to the cart service client.
    #[must_use]
    pub fn carrito(&self) -> &CarritoClient {
        &self.inner.carrito
    }

    /// Get a reference to the orders service client.
    #[must_use]
    pub fn ordenes(&self) -> &OrdenesClient {
        &self.inner.ordenes
    }

    /// Get a reference to the event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Get a reference to the category registry.
    #[must_use]
    pub fn categories(&self) -> &CategoryRegistry {
        &self.inner.categories
    }

    /// Append a contact message to the log, timestamped now.
    pub fn push_contact_message(&self, form: NewContactMessage) -> ContactMessage {
        let message = ContactMessage::received(form, Utc::now());
        self.contact_log().push(message.clone());
        message
    }

    /// Snapshot of the contact message log.
    #[must_use]
    pub fn contact_messages(&self) -> Vec<ContactMessage> {
        self.contact_log().clone()
    }

    fn contact_log(&self) -> MutexGuard<'_, Vec<ContactMessage>> {
        match self.inner.contact_log.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
