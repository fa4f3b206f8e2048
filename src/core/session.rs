//! Explicit per-session application state: the signed-in user, the active
//! rate-sheet filter, and the in-progress visit cart. State lives in one
//! owned struct threaded through calls; registered observers are notified
//! on every change.

use tracing::debug;

use crate::core::clock::Clock;
use crate::core::identity::IdentityProvider;
use crate::core::services::report_service::Receipt;
use crate::core::services::{ServiceError, ServiceResult, TransactionService};
use crate::domain::rate_sheet::{RateSheet, ALL_RATE_SHEETS};
use crate::domain::transaction::LineItem;
use crate::domain::user::User;
use crate::storage::TransactionStore;

/// Emitted to observers after each state change.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoggedIn(String),
    LoggedOut,
    FilterChanged(String),
    CartChanged(usize),
    BatchSaved(usize),
}

pub trait SessionObserver: Send + Sync {
    fn notify(&self, event: &SessionEvent);
}

pub struct Session {
    current_user: Option<User>,
    rate_sheet_filter: String,
    client_name: String,
    cart: Vec<LineItem>,
    observers: Vec<Box<dyn SessionObserver>>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            current_user: None,
            rate_sheet_filter: ALL_RATE_SHEETS.to_string(),
            client_name: String::new(),
            cart: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) {
        self.observers.push(observer);
    }

    fn emit(&self, event: SessionEvent) {
        debug!(?event, "session state changed");
        for observer in &self.observers {
            observer.notify(&event);
        }
    }

    pub fn log_in(&mut self, user: User) {
        let email = user.email.clone();
        self.current_user = Some(user);
        self.emit(SessionEvent::LoggedIn(email));
    }

    pub fn log_out(&mut self) {
        self.current_user = None;
        self.cart.clear();
        self.client_name.clear();
        self.emit(SessionEvent::LoggedOut);
    }

    pub fn user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn rate_sheet_filter(&self) -> &str {
        &self.rate_sheet_filter
    }

    pub fn set_rate_sheet_filter(&mut self, name: impl Into<String>) {
        self.rate_sheet_filter = name.into();
        self.emit(SessionEvent::FilterChanged(self.rate_sheet_filter.clone()));
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    /// The client name locks once materials are in the cart; every line of a
    /// visit belongs to the same client.
    pub fn set_client_name(&mut self, name: impl Into<String>) -> ServiceResult<()> {
        if !self.cart.is_empty() {
            return Err(ServiceError::Validation(
                "client name is locked while materials are in the cart".into(),
            ));
        }
        self.client_name = name.into();
        Ok(())
    }

    pub fn cart(&self) -> &[LineItem] {
        &self.cart
    }

    pub fn grand_total(&self) -> f64 {
        self.cart.iter().map(|item| item.total).sum()
    }

    /// Prices and adds one material line to the cart. A client name must be
    /// captured first.
    pub fn add_item(
        &mut self,
        sheet: &RateSheet,
        material: &str,
        weight_kg: f64,
    ) -> ServiceResult<()> {
        if self.client_name.trim().is_empty() {
            return Err(ServiceError::Validation(
                "enter a client name first".into(),
            ));
        }
        let item = TransactionService::line_item(sheet, material, weight_kg)?;
        self.cart.push(item);
        self.emit(SessionEvent::CartChanged(self.cart.len()));
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> ServiceResult<LineItem> {
        if index >= self.cart.len() {
            return Err(ServiceError::Validation("no such cart item".into()));
        }
        let removed = self.cart.remove(index);
        self.emit(SessionEvent::CartChanged(self.cart.len()));
        Ok(removed)
    }

    /// Saves the cart as one transaction batch and returns the printable
    /// receipt. The cart and client name reset on success.
    pub fn save_all(
        &mut self,
        store: &dyn TransactionStore,
        clock: &dyn Clock,
    ) -> ServiceResult<Receipt> {
        let user = self
            .current_user
            .clone()
            .ok_or_else(|| ServiceError::Validation("no user is signed in".into()))?;
        let now = clock.now();
        let created =
            TransactionService::add_batch(store, &user, &self.client_name, &self.cart, now)?;

        let receipt = Receipt {
            client_name: self.client_name.trim().to_string(),
            rep_name: user.name.clone(),
            grand_total: self.grand_total(),
            items: std::mem::take(&mut self.cart),
            issued_at: now,
        };
        self.client_name.clear();
        self.emit(SessionEvent::BatchSaved(created.len()));
        self.emit(SessionEvent::CartChanged(0));
        Ok(receipt)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for Session {
    fn current_user(&self) -> Option<User> {
        self.current_user.clone()
    }
}
