//! Quote store
//!
//! Same shape as the order store, plus the per-year reference sequence.
//! Reference numbers are `GT-<year>-<seq:04>` with the sequence scoped per
//! calendar year and starting at 0001.

use dashmap::DashMap;
use shared::models::quote::format_reference;
use shared::models::{Quote, QuoteStatus};
use shared::util::now_millis;

use super::{StoreError, StoreResult};

#[derive(Debug, Default)]
pub struct QuoteStore {
    quotes: DashMap<String, Quote>,
    /// Per-year reference sequence, atomically incremented
    sequences: DashMap<i32, u64>,
}

impl QuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next reference number for the given year
    pub fn next_reference(&self, year: i32) -> String {
        let mut entry = self.sequences.entry(year).or_insert(0);
        *entry += 1;
        format_reference(year, *entry)
    }

    pub fn insert(&self, quote: Quote) {
        self.quotes.insert(quote.id.clone(), quote);
    }

    pub fn find_by_id(&self, id: &str) -> Option<Quote> {
        self.quotes.get(id).map(|entry| entry.value().clone())
    }

    /// All quotes, newest first
    pub fn find_all(&self) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = self.quotes.iter().map(|e| e.value().clone()).collect();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        quotes
    }

    /// Apply a status transition, enforcing the quote state machine
    ///
    /// An approval attempt past `expires_at` marks the quote `EXPIRED` and
    /// fails: expired quotes must never become approved. The check-and-set
    /// runs inside the per-key write guard.
    pub fn update_status(&self, id: &str, new_status: QuoteStatus) -> StoreResult<Quote> {
        let mut entry = self
            .quotes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("Quote {}", id)))?;
        let quote = entry.value_mut();

        let now = now_millis();
        if new_status == QuoteStatus::Approved
            && quote.status == QuoteStatus::Pending
            && quote.is_expired_at(now)
        {
            quote.status = QuoteStatus::Expired;
            quote.last_modified_at = now;
            return Err(StoreError::Expired(format!("Quote {}", id)));
        }

        if !quote.status.can_transition_to(new_status) {
            return Err(StoreError::InvalidTransition {
                from: quote.status.to_string(),
                to: new_status.to_string(),
            });
        }

        quote.status = new_status;
        quote.last_modified_at = now;
        Ok(quote.clone())
    }

    pub fn count(&self) -> usize {
        self.quotes.len()
    }
}
