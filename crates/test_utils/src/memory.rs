//! In-memory store
//!
//! One mutex guards all three tables, so each composite claim operation
//! sees and writes a consistent snapshot, the same guarantee the
//! PostgreSQL adapter gets from its transaction.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use core_kernel::{
    AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, ItemId, PersonName,
    PortError, Role, UserId,
};
use domain_claims::{
    item_status_after_cancel, CancelledClaim, Claim, ClaimAmendment, ClaimDetails, ClaimError,
    ClaimStatus, ClaimStore, ClaimedItem,
};
use domain_identity::{NewUser, User, UserCredentials, UserStore};
use domain_items::{
    Item, ItemDetails, ItemFilter, ItemPage, ItemStatus, ItemStore, ItemUpdate, Reporter,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, (User, String)>,
    items: HashMap<ItemId, Item>,
    claims: HashMap<ClaimId, Claim>,
}

impl Tables {
    fn person(&self, id: UserId) -> Option<PersonName> {
        self.users
            .get(&id)
            .map(|(user, _)| PersonName::new(user.first_name.clone(), user.last_name.clone()))
    }

    fn item_details(&self, item: &Item) -> ItemDetails {
        let reporter = self.users.get(&item.reporter_id).map(|(user, _)| Reporter {
            name: PersonName::new(user.first_name.clone(), user.last_name.clone()),
            email: user.email.clone(),
        });
        ItemDetails::new(item.clone(), reporter)
    }

    fn claim_details(&self, claim: &Claim) -> ClaimDetails {
        ClaimDetails {
            claim: claim.clone(),
            item: self.items.get(&claim.item_id).map(ClaimedItem::from),
            claimer: self.person(claim.claimer_id),
            owner: claim.owner_id.and_then(|id| self.person(id)),
        }
    }

    /// Joined claims, newest first
    fn claim_details_where(&self, keep: impl Fn(&Claim) -> bool) -> Vec<ClaimDetails> {
        let mut claims: Vec<&Claim> = self.claims.values().filter(|c| keep(c)).collect();
        claims.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        claims.into_iter().map(|c| self.claim_details(c)).collect()
    }
}

/// A shared, cloneable store implementing `UserStore`, `ItemStore`, and
/// `ClaimStore`
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Makes the health check report unhealthy (or healthy again)
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Changes a user's role; returns `false` if the user does not exist
    pub async fn set_role(&self, user_id: UserId, role: Role) -> bool {
        let mut tables = self.tables.lock().await;
        match tables.users.get_mut(&user_id) {
            Some((user, _)) => {
                user.role = role;
                true
            }
            None => false,
        }
    }

    /// Registers a student account directly, bypassing credential hashing
    pub async fn seed_user(&self, first_name: &str, last_name: &str, email: &str) -> UserId {
        let (user, hash) = NewUser {
            id: UserId::new(),
            student_id: format!("S{}", &UserId::new().to_string()[..8]),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            campus: "Main".to_string(),
            program: None,
            password_hash: String::new(),
            is_verified: true,
            role: Role::Student,
        }
        .into_user(Utc::now());
        let id = user.id;
        self.tables.lock().await.users.insert(id, (user, hash));
        id
    }

    pub async fn item_count(&self) -> usize {
        self.tables.lock().await.items.len()
    }

    pub async fn claim_count(&self) -> usize {
        self.tables.lock().await.claims.len()
    }
}

impl DomainPort for InMemoryStore {}

#[async_trait]
impl HealthCheckable for InMemoryStore {
    async fn health_check(&self) -> HealthCheckResult {
        let available = self.available.load(Ordering::SeqCst);
        HealthCheckResult {
            adapter_id: "in-memory".to_string(),
            status: if available {
                AdapterHealth::Healthy
            } else {
                AdapterHealth::Unhealthy
            },
            latency_ms: 0,
            message: (!available).then(|| "store marked unavailable".to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_user(&self, id: UserId) -> Result<Option<User>, PortError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.get(&id).map(|(user, _)| user.clone()))
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, PortError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .find(|(user, _)| user.email == email)
            .map(|(user, hash)| UserCredentials {
                user: user.clone(),
                password_hash: hash.clone(),
            }))
    }

    async fn account_exists(&self, email: &str, student_id: &str) -> Result<bool, PortError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .values()
            .any(|(user, _)| user.email == email || user.student_id == student_id))
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, PortError> {
        let mut tables = self.tables.lock().await;
        let taken = tables.users.values().any(|(existing, _)| {
            existing.email == user.email || existing.student_id == user.student_id
        });
        if taken {
            return Err(PortError::conflict(format!(
                "email or student id already registered: {}",
                user.email
            )));
        }

        let (user, hash) = user.into_user(Utc::now());
        tables.users.insert(user.id, (user.clone(), hash));
        Ok(user)
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, PortError> {
        Ok(self.tables.lock().await.items.get(&id).cloned())
    }

    async fn find_item_details(&self, id: ItemId) -> Result<Option<ItemDetails>, PortError> {
        let tables = self.tables.lock().await;
        Ok(tables.items.get(&id).map(|item| tables.item_details(item)))
    }

    async fn list_items(&self, filter: &ItemFilter) -> Result<ItemPage, PortError> {
        let tables = self.tables.lock().await;
        let mut matching: Vec<&Item> =
            tables.items.values().filter(|i| filter.matches(i)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = matching.len() as u64;
        let offset = usize::try_from(filter.pagination.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(filter.pagination.limit() as usize)
            .map(|item| tables.item_details(item))
            .collect();

        Ok(ItemPage {
            items,
            total,
            pagination: filter.pagination,
        })
    }

    async fn insert_item(&self, item: Item) -> Result<Item, PortError> {
        let mut tables = self.tables.lock().await;
        if tables.items.contains_key(&item.id) {
            return Err(PortError::conflict(format!("item {} already exists", item.id)));
        }
        tables.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item(
        &self,
        id: ItemId,
        update: ItemUpdate,
    ) -> Result<Option<Item>, PortError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.items.get_mut(&id).map(|item| {
            update.apply_to(item);
            item.clone()
        }))
    }

    async fn set_item_status(
        &self,
        id: ItemId,
        status: ItemStatus,
    ) -> Result<Option<Item>, PortError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.items.get_mut(&id).map(|item| {
            item.status = status;
            item.updated_at = Utc::now();
            item.clone()
        }))
    }

    async fn delete_item(&self, id: ItemId) -> Result<bool, PortError> {
        let mut tables = self.tables.lock().await;
        let removed = tables.items.remove(&id).is_some();
        if removed {
            tables.claims.retain(|_, claim| claim.item_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ClaimStore for InMemoryStore {
    async fn open_claim(&self, item_id: ItemId, claimer_id: UserId) -> Result<Claim, ClaimError> {
        let mut tables = self.tables.lock().await;
        let item = tables
            .items
            .get_mut(&item_id)
            .ok_or(ClaimError::ItemNotFound(item_id))?;

        let claim = Claim::open(item, claimer_id)?;
        item.status = ItemStatus::Claimed;
        item.updated_at = claim.created_at;

        tables.claims.insert(claim.id, claim.clone());
        Ok(claim)
    }

    async fn find_claim(&self, id: ClaimId) -> Result<Option<Claim>, ClaimError> {
        Ok(self.tables.lock().await.claims.get(&id).cloned())
    }

    async fn find_claim_details(&self, id: ClaimId) -> Result<Option<ClaimDetails>, ClaimError> {
        let tables = self.tables.lock().await;
        Ok(tables.claims.get(&id).map(|claim| tables.claim_details(claim)))
    }

    async fn record_verification(
        &self,
        id: ClaimId,
        status: ClaimStatus,
        notes: Option<String>,
    ) -> Result<Claim, ClaimError> {
        let mut tables = self.tables.lock().await;
        let claim = tables
            .claims
            .get_mut(&id)
            .ok_or(ClaimError::ClaimNotFound(id))?;
        claim.record_verification(status, notes)?;
        Ok(claim.clone())
    }

    async fn amend_claim(
        &self,
        id: ClaimId,
        amendment: ClaimAmendment,
    ) -> Result<Claim, ClaimError> {
        let mut tables = self.tables.lock().await;
        let claim = tables
            .claims
            .get_mut(&id)
            .ok_or(ClaimError::ClaimNotFound(id))?;
        claim.amend(&amendment);
        Ok(claim.clone())
    }

    async fn cancel_claim(&self, id: ClaimId) -> Result<CancelledClaim, ClaimError> {
        let mut tables = self.tables.lock().await;
        let claim = tables
            .claims
            .get(&id)
            .ok_or(ClaimError::ClaimNotFound(id))?;
        claim.ensure_cancellable()?;

        let Some(claim) = tables.claims.remove(&id) else {
            return Err(ClaimError::ClaimNotFound(id));
        };
        let remaining = tables
            .claims
            .values()
            .filter(|c| c.item_id == claim.item_id)
            .count();

        let item_status = item_status_after_cancel(remaining);
        if let (Some(status), Some(item)) = (item_status, tables.items.get_mut(&claim.item_id)) {
            item.status = status;
            item.updated_at = Utc::now();
        }

        Ok(CancelledClaim { claim, item_status })
    }

    async fn claims_for_item(&self, item_id: ItemId) -> Result<Vec<ClaimDetails>, ClaimError> {
        let tables = self.tables.lock().await;
        Ok(tables.claim_details_where(|c| c.item_id == item_id))
    }

    async fn claims_for_user(&self, user_id: UserId) -> Result<Vec<ClaimDetails>, ClaimError> {
        let tables = self.tables.lock().await;
        Ok(tables.claim_details_where(|c| c.involves(user_id)))
    }
}
