use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::price::{Price, PriceSearchCriteria};
use crate::domain::selection::select_best_price;
use crate::forms::prices::UploadPricesForm;
use crate::repository::{PriceReader, PriceWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the price lookup endpoint.
#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    /// Owning brand identifier.
    pub brand_id: i64,
    /// Product identifier.
    pub product_id: i64,
    /// Instant the price must be valid at.
    pub date: NaiveDateTime,
}

/// Response body returned by the price lookup endpoint. `id` carries the
/// winning record's rate list identifier; the window bounds are rendered as
/// UTC offset datetimes.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PriceResponse {
    pub id: i64,
    pub brand_id: i64,
    pub product_id: i64,
    pub price: Decimal,
    pub curr: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl From<Price> for PriceResponse {
    fn from(value: Price) -> Self {
        Self {
            id: value.price_list,
            brand_id: value.brand_id,
            product_id: value.product_id,
            price: value.price,
            curr: value.curr,
            start_date: DateTime::from_naive_utc_and_offset(value.start_date, Utc),
            end_date: DateTime::from_naive_utc_and_offset(value.end_date, Utc),
        }
    }
}

/// Resolves the single applicable price for a brand and product at an instant.
///
/// Fetches the candidates valid at `at` and reduces them with
/// [`select_best_price`]. An empty candidate set maps to
/// [`ServiceError::NotFound`]; repository failures propagate unchanged.
pub fn find_best_price<R>(
    repo: &R,
    brand_id: i64,
    product_id: i64,
    at: NaiveDateTime,
) -> ServiceResult<Price>
where
    R: PriceReader + ?Sized,
{
    let criteria = PriceSearchCriteria::new(brand_id, product_id, at);
    let candidates = repo.list_prices_at(&criteria).map_err(ServiceError::from)?;

    select_best_price(&candidates)
        .cloned()
        .ok_or(ServiceError::NotFound)
}

/// Imports rate records from an uploaded CSV file.
///
/// Rows that parse but fail the domain consistency check abort the import;
/// nothing is persisted in that case.
pub fn import_prices<R>(repo: &R, mut form: UploadPricesForm) -> ServiceResult<usize>
where
    R: PriceWriter + ?Sized,
{
    let prices = form
        .into_prices()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_prices(&prices).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::{Seek, SeekFrom, Write};

    use actix_multipart::form::tempfile::TempFile;
    use tempfile::NamedTempFile;

    use crate::repository::RepositoryError;
    use crate::repository::mock::{MockPriceReader, MockPriceWriter};

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .expect("valid test datetime")
    }

    fn rate(price_list: i64, priority: i32, amount: &str) -> Price {
        Price {
            price_list,
            brand_id: 1,
            product_id: 35455,
            priority,
            price: amount.parse().expect("valid decimal literal"),
            curr: "EUR".to_string(),
            start_date: dt(2020, 6, 14, 0, 0, 0),
            end_date: dt(2020, 12, 31, 23, 59, 59),
        }
    }

    #[test]
    fn returns_the_highest_priority_candidate() {
        let mut reader = MockPriceReader::new();
        reader
            .expect_list_prices_at()
            .withf(|criteria| criteria.brand_id == 1 && criteria.product_id == 35455)
            .returning(|_| Ok(vec![rate(1, 0, "35.50"), rate(2, 1, "25.45")]));

        let best = find_best_price(&reader, 1, 35455, dt(2020, 6, 14, 16, 0, 0))
            .expect("a price should be found");

        assert_eq!(best.price_list, 2);
        assert_eq!(best.price, "25.45".parse().unwrap());
    }

    #[test]
    fn empty_candidate_set_maps_to_not_found() {
        let mut reader = MockPriceReader::new();
        reader.expect_list_prices_at().returning(|_| Ok(Vec::new()));

        let result = find_best_price(&reader, 1, 35455, dt(2020, 6, 14, 10, 0, 0));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn repository_failures_propagate_unchanged() {
        let mut reader = MockPriceReader::new();
        reader
            .expect_list_prices_at()
            .returning(|_| Err(RepositoryError::Malformed("bad amount".to_string())));

        let result = find_best_price(&reader, 1, 35455, dt(2020, 6, 14, 10, 0, 0));

        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::Malformed(_)))
        ));
    }

    fn upload_form(csv: &str) -> UploadPricesForm {
        let mut file = NamedTempFile::new().expect("create temp file");
        file.write_all(csv.as_bytes()).expect("write csv file");
        file.as_file_mut()
            .seek(SeekFrom::Start(0))
            .expect("seek to start");

        UploadPricesForm {
            csv: TempFile {
                file,
                content_type: None,
                file_name: Some("prices.csv".to_string()),
                size: csv.len(),
            },
        }
    }

    #[test]
    fn import_persists_parsed_rate_records() {
        let csv = "price_list,brand_id,product_id,priority,price,curr,start_date,end_date\n\
                   1,1,35455,0,35.50,EUR,2020-06-14T00:00:00,2020-12-31T23:59:59\n\
                   2,1,35455,1,25.45,EUR,2020-06-14T15:00:00,2020-06-14T18:30:00\n";

        let mut writer = MockPriceWriter::new();
        writer
            .expect_create_prices()
            .withf(|prices| prices.len() == 2 && prices.iter().all(Price::is_consistent))
            .returning(|prices| Ok(prices.len()));

        let created = import_prices(&writer, upload_form(csv)).expect("import should succeed");
        assert_eq!(created, 2);
    }

    #[test]
    fn import_rejects_inconsistent_rows_before_persisting() {
        // zero amount violates the consistency invariant
        let csv = "price_list,brand_id,product_id,priority,price,curr,start_date,end_date\n\
                   1,1,35455,0,0,EUR,2020-06-14T00:00:00,2020-12-31T23:59:59\n";

        let mut writer = MockPriceWriter::new();
        writer.expect_create_prices().never();

        let result = import_prices(&writer, upload_form(csv));
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn response_reports_the_rate_list_as_id_and_utc_bounds() {
        let response = PriceResponse::from(rate(4, 1, "38.95"));

        assert_eq!(response.id, 4);
        assert_eq!(response.start_date.to_rfc3339(), "2020-06-14T00:00:00+00:00");
        assert_eq!(response.end_date.to_rfc3339(), "2020-12-31T23:59:59+00:00");
    }
}
