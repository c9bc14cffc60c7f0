//! Application state container.
//!
//! [`AppStore`] owns the transport, auth and theme slices. Handlers read
//! snapshots and change state only through its methods; every change that
//! must survive a restart is persisted before the slice is replaced.

mod error;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth::{self, AuthApi, Credentials, RegisterForm, Session};
use crate::cache::CachedTransportClient;
use crate::domain::{AtcoCode, Coordinates, Departure, FavoritesList, Stop, search_stops};
use crate::storage::{Storage, StorageError};
use crate::theme::ThemeMode;
use crate::transport::{DataSource, Sourced};

pub use error::StoreError;

/// Stops, departures, selection and favourites.
#[derive(Debug, Clone, Default)]
pub struct TransportState {
    pub stops: Vec<Stop>,
    pub stops_source: Option<DataSource>,
    pub departures: Vec<Departure>,
    pub departures_source: Option<DataSource>,
    pub selected_stop: Option<AtcoCode>,
    pub favorites: FavoritesList,
}

/// The signed-in session, if any.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub session: Option<Session>,
}

/// Current theme. `ready` turns true once the stored mode has been read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeState {
    pub mode: ThemeMode,
    pub ready: bool,
}

/// Shared state and the services that change it.
pub struct AppStore {
    transport: RwLock<TransportState>,
    auth: RwLock<AuthState>,
    theme: RwLock<ThemeState>,
    storage: Storage,
    transit: CachedTransportClient,
    accounts: Arc<dyn AuthApi>,
}

impl AppStore {
    pub fn new(storage: Storage, transit: CachedTransportClient, accounts: Arc<dyn AuthApi>) -> Self {
        Self {
            transport: RwLock::new(TransportState::default()),
            auth: RwLock::new(AuthState::default()),
            theme: RwLock::new(ThemeState::default()),
            storage,
            transit,
            accounts,
        }
    }

    /// Load favourites, session and theme from storage.
    ///
    /// Unreadable values are logged and treated as absent.
    pub async fn hydrate(&self) {
        let favorites = self.storage.load_favorites().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring stored favourites");
            FavoritesList::new()
        });
        let session = self.storage.load_session().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring stored session");
            None
        });
        let mode = self.storage.load_theme().unwrap_or_else(|e| {
            warn!(error = %e, "ignoring stored theme");
            None
        });

        info!(
            favorites = favorites.len(),
            signed_in = session.is_some(),
            "state restored"
        );

        self.transport.write().await.favorites = favorites;
        self.auth.write().await.session = session;
        *self.theme.write().await = ThemeState {
            mode: mode.unwrap_or_default(),
            ready: true,
        };
    }

    /// Copy of the transport slice.
    pub async fn transport(&self) -> TransportState {
        self.transport.read().await.clone()
    }

    /// Fetch stops near `at` and hold them as the current list.
    pub async fn load_nearby_stops(&self, at: Coordinates) -> Sourced<Vec<Stop>> {
        let fetched = self.transit.nearby_stops(at).await;
        let stops = fetched.data.as_ref().clone();

        let mut transport = self.transport.write().await;
        transport.stops = stops.clone();
        transport.stops_source = Some(fetched.source);

        Sourced {
            data: stops,
            source: fetched.source,
        }
    }

    /// Filter the current stop list by name or code.
    pub async fn search_stops(&self, query: &str) -> Vec<Stop> {
        let transport = self.transport.read().await;
        search_stops(&transport.stops, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Mark a stop as selected.
    pub async fn select_stop(&self, stop: AtcoCode) {
        self.transport.write().await.selected_stop = Some(stop);
    }

    /// Fetch departures for `stop`, selecting it.
    pub async fn load_departures(&self, stop: &AtcoCode) -> Sourced<Vec<Departure>> {
        self.select_stop(stop.clone()).await;

        let fetched = self.transit.live_departures(stop).await;
        let departures = fetched.data.as_ref().clone();

        let mut transport = self.transport.write().await;
        // A later selection wins over a slower earlier fetch
        if transport.selected_stop.as_ref() == Some(stop) {
            transport.departures = departures.clone();
            transport.departures_source = Some(fetched.source);
        }

        Sourced {
            data: departures,
            source: fetched.source,
        }
    }

    pub async fn favorites(&self) -> FavoritesList {
        self.transport.read().await.favorites.clone()
    }

    /// Add or remove a favourite, persisting the new list first.
    ///
    /// On a storage failure the held list is unchanged.
    pub async fn toggle_favorite(&self, stop: &Stop) -> Result<FavoritesList, StorageError> {
        let mut transport = self.transport.write().await;
        let next = transport.favorites.toggle(stop);
        self.storage.save_favorites(&next)?;
        transport.favorites = next.clone();
        Ok(next)
    }

    pub async fn session(&self) -> Option<Session> {
        self.auth.read().await.session.clone()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, StoreError> {
        let session = auth::login(self.accounts.as_ref(), credentials).await?;
        self.set_session(session).await
    }

    pub async fn register(&self, form: &RegisterForm) -> Result<Session, StoreError> {
        let session = auth::register(self.accounts.as_ref(), form).await?;
        self.set_session(session).await
    }

    async fn set_session(&self, session: Session) -> Result<Session, StoreError> {
        let mut auth = self.auth.write().await;
        self.storage.save_session(&session)?;
        auth.session = Some(session.clone());
        Ok(session)
    }

    /// Forget the session along with loaded stops and departures.
    /// Favourites and theme stay.
    pub async fn logout(&self) -> Result<(), StorageError> {
        let mut auth = self.auth.write().await;
        self.storage.clear_session()?;
        auth.session = None;
        drop(auth);

        let mut transport = self.transport.write().await;
        let favorites = std::mem::take(&mut transport.favorites);
        *transport = TransportState {
            favorites,
            ..TransportState::default()
        };
        info!("signed out");
        Ok(())
    }

    pub async fn theme(&self) -> ThemeState {
        *self.theme.read().await
    }

    /// Flip the theme, persisting the new mode first.
    pub async fn toggle_theme(&self) -> Result<ThemeMode, StorageError> {
        let mut theme = self.theme.write().await;
        let next = theme.mode.toggled();
        self.storage.save_theme(next)?;
        theme.mode = next;
        Ok(next)
    }
}
