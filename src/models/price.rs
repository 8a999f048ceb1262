use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::price::Price as DomainPrice;
use crate::repository::RepositoryError;

/// Database row for a priced rate record. The amount is stored as text because
/// SQLite has no decimal column type.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::prices)]
#[diesel(primary_key(price_list))]
pub struct Price {
    pub price_list: i64,
    pub brand_id: i64,
    pub product_id: i64,
    pub priority: i32,
    pub price: String,
    pub curr: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::prices)]
pub struct NewPrice {
    pub price_list: i64,
    pub brand_id: i64,
    pub product_id: i64,
    pub priority: i32,
    pub price: String,
    pub curr: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

impl TryFrom<Price> for DomainPrice {
    type Error = RepositoryError;

    fn try_from(value: Price) -> Result<Self, Self::Error> {
        let amount = value.price.parse::<Decimal>().map_err(|err| {
            RepositoryError::Malformed(format!(
                "price list {}: stored amount `{}` is not a decimal: {err}",
                value.price_list, value.price
            ))
        })?;

        Ok(Self {
            price_list: value.price_list,
            brand_id: value.brand_id,
            product_id: value.product_id,
            priority: value.priority,
            price: amount,
            curr: value.curr,
            start_date: value.start_date,
            end_date: value.end_date,
        })
    }
}

impl From<&DomainPrice> for NewPrice {
    fn from(value: &DomainPrice) -> Self {
        Self {
            price_list: value.price_list,
            brand_id: value.brand_id,
            product_id: value.product_id,
            priority: value.priority,
            price: value.price.to_string(),
            curr: value.curr.clone(),
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}
