use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use chrono::NaiveDateTime;
use csv::Trim;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::price::Price;

/// Errors that can occur while parsing an uploaded rates CSV file.
#[derive(Debug, Error)]
pub enum UploadPricesFormError {
    #[error("error reading csv file")]
    FileReadError,
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    /// Field-level validation failures from the `validator` crate.
    #[error("row {row} failed validation: {errors}")]
    RowValidation { row: usize, errors: ValidationErrors },
    /// The row parsed but violates a domain invariant (see `Price::is_consistent`).
    #[error("row {row} (price list {price_list}) is not a consistent rate record")]
    InconsistentRow { row: usize, price_list: i64 },
    #[error("upload contains no rate records")]
    EmptyUpload,
}

impl From<std::io::Error> for UploadPricesFormError {
    fn from(_: std::io::Error) -> Self {
        UploadPricesFormError::FileReadError
    }
}

#[derive(MultipartForm)]
/// Multipart form for uploading a CSV file with new rate records.
pub struct UploadPricesForm {
    #[multipart(limit = "10MB")]
    /// Uploaded CSV file with `price_list,brand_id,product_id,priority,price,curr,start_date,end_date` columns.
    pub csv: TempFile,
}

impl UploadPricesForm {
    /// Parse and validate the uploaded CSV file into a list of [`Price`] records.
    ///
    /// The whole upload is rejected on the first invalid or inconsistent row,
    /// so a partial import never reaches the repository.
    pub fn into_prices(&mut self) -> Result<Vec<Price>, UploadPricesFormError> {
        self.csv.file.rewind()?;
        parse_prices(self.csv.file.by_ref())
    }
}

#[derive(Debug, Deserialize, Validate)]
struct PriceCsvRow {
    price_list: i64,
    #[validate(range(min = 1))]
    brand_id: i64,
    #[validate(range(min = 1))]
    product_id: i64,
    #[validate(range(min = 0))]
    priority: i32,
    price: Decimal,
    #[validate(length(min = 1))]
    curr: String,
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
}

impl From<PriceCsvRow> for Price {
    fn from(row: PriceCsvRow) -> Self {
        Self {
            price_list: row.price_list,
            brand_id: row.brand_id,
            product_id: row.product_id,
            priority: row.priority,
            price: row.price,
            curr: row.curr.trim().to_string(),
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

fn parse_prices<R: Read>(reader: R) -> Result<Vec<Price>, UploadPricesFormError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader);

    let mut prices = Vec::new();

    for (index, row) in csv_reader.deserialize::<PriceCsvRow>().enumerate() {
        let row_number = index + 1;
        let record = row?;

        record
            .validate()
            .map_err(|errors| UploadPricesFormError::RowValidation {
                row: row_number,
                errors,
            })?;

        let price = Price::from(record);
        if !price.is_consistent() {
            return Err(UploadPricesFormError::InconsistentRow {
                row: row_number,
                price_list: price.price_list,
            });
        }

        prices.push(price);
    }

    if prices.is_empty() {
        return Err(UploadPricesFormError::EmptyUpload);
    }

    Ok(prices)
}
