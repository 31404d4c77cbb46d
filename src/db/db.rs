// db/db.rs
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use super::persistence::{MemoryPersistence, Persistence};
use crate::models::{
    productmodel::Product,
    referralmodel::{Lead, ReferralSale},
    shopmodel::Shop,
    supportmodel::{AdminNotice, Complaint},
    usermodel::User,
    walletmodels::PayoutRequest,
};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Persistence error on {key}: {message}")]
    Persistence { key: String, message: String },

    #[error("Corrupt data under {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One persisted list. Every collection is stored under its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Users,
    Shops,
    Products,
    Sales,
    Payouts,
    Notices,
    Leads,
    Complaints,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Users,
        Collection::Shops,
        Collection::Products,
        Collection::Sales,
        Collection::Payouts,
        Collection::Notices,
        Collection::Leads,
        Collection::Complaints,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Collection::Users => "rfm_users",
            Collection::Shops => "rfm_shops",
            Collection::Products => "rfm_products",
            Collection::Sales => "rfm_sales",
            Collection::Payouts => "rfm_payouts",
            Collection::Notices => "rfm_requests",
            Collection::Leads => "rfm_leads",
            Collection::Complaints => "rfm_complaints",
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Store {
    pub users: Vec<User>,
    pub shops: Vec<Shop>,
    pub products: Vec<Product>,
    pub sales: Vec<ReferralSale>,
    pub payouts: Vec<PayoutRequest>,
    pub notices: Vec<AdminNotice>,
    pub leads: Vec<Lead>,
    pub complaints: Vec<Complaint>,
}

impl Store {
    fn encode(&self, collection: Collection) -> Result<String, serde_json::Error> {
        match collection {
            Collection::Users => serde_json::to_string(&self.users),
            Collection::Shops => serde_json::to_string(&self.shops),
            Collection::Products => serde_json::to_string(&self.products),
            Collection::Sales => serde_json::to_string(&self.sales),
            Collection::Payouts => serde_json::to_string(&self.payouts),
            Collection::Notices => serde_json::to_string(&self.notices),
            Collection::Leads => serde_json::to_string(&self.leads),
            Collection::Complaints => serde_json::to_string(&self.complaints),
        }
    }

    fn decode(&mut self, collection: Collection, raw: &str) -> Result<(), serde_json::Error> {
        match collection {
            Collection::Users => self.users = serde_json::from_str(raw)?,
            Collection::Shops => self.shops = serde_json::from_str(raw)?,
            Collection::Products => self.products = serde_json::from_str(raw)?,
            Collection::Sales => self.sales = serde_json::from_str(raw)?,
            Collection::Payouts => self.payouts = serde_json::from_str(raw)?,
            Collection::Notices => self.notices = serde_json::from_str(raw)?,
            Collection::Leads => self.leads = serde_json::from_str(raw)?,
            Collection::Complaints => self.complaints = serde_json::from_str(raw)?,
        }
        Ok(())
    }

    /// Copies only the listed collections; the rest stay empty.
    fn snapshot(&self, touched: &[Collection]) -> Store {
        let mut snapshot = Store::default();
        for collection in touched {
            match collection {
                Collection::Users => snapshot.users = self.users.clone(),
                Collection::Shops => snapshot.shops = self.shops.clone(),
                Collection::Products => snapshot.products = self.products.clone(),
                Collection::Sales => snapshot.sales = self.sales.clone(),
                Collection::Payouts => snapshot.payouts = self.payouts.clone(),
                Collection::Notices => snapshot.notices = self.notices.clone(),
                Collection::Leads => snapshot.leads = self.leads.clone(),
                Collection::Complaints => snapshot.complaints = self.complaints.clone(),
            }
        }
        snapshot
    }

    fn restore(&mut self, mut snapshot: Store, touched: &[Collection]) {
        for collection in touched {
            match collection {
                Collection::Users => self.users = std::mem::take(&mut snapshot.users),
                Collection::Shops => self.shops = std::mem::take(&mut snapshot.shops),
                Collection::Products => self.products = std::mem::take(&mut snapshot.products),
                Collection::Sales => self.sales = std::mem::take(&mut snapshot.sales),
                Collection::Payouts => self.payouts = std::mem::take(&mut snapshot.payouts),
                Collection::Notices => self.notices = std::mem::take(&mut snapshot.notices),
                Collection::Leads => self.leads = std::mem::take(&mut snapshot.leads),
                Collection::Complaints => {
                    self.complaints = std::mem::take(&mut snapshot.complaints)
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct DBClient {
    store: Arc<RwLock<Store>>,
    persistence: Arc<dyn Persistence>,
}

impl std::fmt::Debug for DBClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DBClient")
            .field("store", &"RwLock<Store>")
            .field("persistence", &self.persistence.name())
            .finish()
    }
}

impl DBClient {
    /// Create an empty DBClient that never leaves the process
    pub fn in_memory() -> Self {
        DBClient {
            store: Arc::new(RwLock::new(Store::default())),
            persistence: Arc::new(MemoryPersistence::default()),
        }
    }

    /// Create a DBClient from whatever the backend already holds
    pub async fn load(persistence: Arc<dyn Persistence>) -> Result<Self, StoreError> {
        let mut store = Store::default();

        for collection in Collection::ALL {
            let key = collection.key();
            if let Some(raw) = persistence.load(key).await? {
                store
                    .decode(collection, &raw)
                    .map_err(|source| StoreError::Serialization {
                        key: key.to_string(),
                        source,
                    })?;
            }
        }

        tracing::info!(
            "Loaded store from {} backend: {} users, {} shops, {} sales",
            persistence.name(),
            store.users.len(),
            store.shops.len(),
            store.sales.len()
        );

        Ok(DBClient {
            store: Arc::new(RwLock::new(store)),
            persistence,
        })
    }

    pub fn persistence_name(&self) -> &'static str {
        self.persistence.name()
    }

    pub async fn read<T>(&self, f: impl FnOnce(&Store) -> T) -> T {
        let store = self.store.read().await;
        f(&*store)
    }

    /// Runs `f` under the write lock and persists every collection in
    /// `touched`. If `f` fails or a write to the backend fails, the touched
    /// collections are put back as they were before `f` ran.
    ///
    /// `touched` must name every collection `f` mutates.
    pub async fn transaction<T, E, F>(&self, touched: &[Collection], f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Store) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut store = self.store.write().await;
        let snapshot = store.snapshot(touched);

        let value = match f(&mut *store) {
            Ok(value) => value,
            Err(err) => {
                store.restore(snapshot, touched);
                return Err(err);
            }
        };

        for (written, collection) in touched.iter().enumerate() {
            if let Err(err) = self.persist(&store, *collection).await {
                tracing::warn!(
                    "Rolling back transaction, failed to persist {}: {}",
                    collection.key(),
                    err
                );
                store.restore(snapshot, touched);

                // Keys saved before the failure still hold the new data.
                for earlier in &touched[..written] {
                    if let Err(undo) = self.persist(&store, *earlier).await {
                        tracing::error!(
                            "Could not restore {} after a failed transaction: {}",
                            earlier.key(),
                            undo
                        );
                    }
                }
                return Err(err.into());
            }
        }

        Ok(value)
    }

    async fn persist(&self, store: &Store, collection: Collection) -> Result<(), StoreError> {
        let key = collection.key();
        let raw = store
            .encode(collection)
            .map_err(|source| StoreError::Serialization {
                key: key.to_string(),
                source,
            })?;
        self.persistence.save(key, &raw).await
    }
}
