use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain representation of a single priced rate record.
///
/// A record applies to one product of one brand during the inclusive
/// `[start_date, end_date]` window. When several records are applicable at the
/// same instant, `priority` decides which one wins; `price_list` breaks
/// priority ties and doubles as the record's natural identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Price {
    /// Rate list identifier; natural key and secondary tie-break.
    pub price_list: i64,
    /// Owning brand identifier.
    pub brand_id: i64,
    /// Product the rate applies to.
    pub product_id: i64,
    /// Higher value overrides lower when validity windows overlap.
    pub priority: i32,
    /// Final sale price.
    pub price: Decimal,
    /// ISO 4217 currency code.
    pub curr: String,
    /// First instant (inclusive) at which the rate applies.
    pub start_date: NaiveDateTime,
    /// Last instant (inclusive) at which the rate applies.
    pub end_date: NaiveDateTime,
}

impl Price {
    /// Whether the rate is in force at `at`, inclusive on both window bounds.
    pub fn is_valid_at(&self, at: NaiveDateTime) -> bool {
        self.start_date <= at && at <= self.end_date
    }

    /// Whether this rate should be preferred over `other`.
    ///
    /// Any rate beats an absent one. Otherwise the higher `priority` wins and,
    /// on a priority tie, the higher `price_list` wins. A full tie on both
    /// keys returns `false`, so a rate never outranks an identical rate
    /// (including itself).
    pub fn has_higher_priority_than(&self, other: Option<&Price>) -> bool {
        let Some(other) = other else {
            return true;
        };

        if self.priority != other.priority {
            return self.priority > other.priority;
        }

        self.price_list > other.price_list
    }

    /// Whether the record satisfies the basic domain invariants: positive
    /// brand/product identifiers, non-negative priority, positive amount, a
    /// non-inverted validity window and a non-blank currency code.
    ///
    /// Ingestion rejects inconsistent records before they are persisted; the
    /// selection code assumes its input already passed this check.
    pub fn is_consistent(&self) -> bool {
        self.brand_id > 0
            && self.product_id > 0
            && self.priority >= 0
            && self.price > Decimal::ZERO
            && self.start_date <= self.end_date
            && !self.curr.trim().is_empty()
    }
}

/// Immutable lookup key for the candidate query: which brand and product, at
/// which instant. Carries no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceSearchCriteria {
    /// Owning brand identifier.
    pub brand_id: i64,
    /// Product the lookup targets.
    pub product_id: i64,
    /// Instant the returned rates must be valid at.
    pub query_date: NaiveDateTime,
}

impl PriceSearchCriteria {
    /// Construct a criteria tuple for the given brand, product and instant.
    pub fn new(brand_id: i64, product_id: i64, query_date: NaiveDateTime) -> Self {
        Self {
            brand_id,
            product_id,
            query_date,
        }
    }
}
