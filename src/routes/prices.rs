use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Serialize;

use crate::forms::prices::UploadPricesForm;
use crate::repository::DieselRepository;
use crate::routes::ErrorResponse;
use crate::services::prices::{self, PriceQuery, PriceResponse};
use crate::services::ServiceError;

#[get("/v1/prices")]
/// Return the single applicable price for a brand and product at an instant.
///
/// Responds with `404` and a `PRICE_NOT_FOUND` body when no rate record is
/// valid at the requested instant.
pub async fn find_price(
    params: web::Query<PriceQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let PriceQuery {
        brand_id,
        product_id,
        date,
    } = params.into_inner();

    match prices::find_best_price(repo.get_ref(), brand_id, product_id, date) {
        Ok(price) => HttpResponse::Ok().json(PriceResponse::from(price)),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().json(ErrorResponse::new(
            "PRICE_NOT_FOUND",
            "No price found for the given parameters",
        )),
        Err(err) => {
            log::error!("Failed to resolve price: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "INTERNAL_ERROR",
                "Unexpected error while resolving the price",
            ))
        }
    }
}

/// Body returned after a successful CSV import.
#[derive(Debug, Serialize)]
pub struct UploadPricesResponse {
    pub created: usize,
}

#[post("/v1/prices/upload")]
/// Import rate records from an uploaded CSV file.
pub async fn upload_prices(
    MultipartForm(form): MultipartForm<UploadPricesForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match prices::import_prices(repo.get_ref(), form) {
        Ok(created) => HttpResponse::Created().json(UploadPricesResponse { created }),
        Err(ServiceError::Form(message)) => {
            HttpResponse::BadRequest().json(ErrorResponse::new("INVALID_UPLOAD", message))
        }
        Err(err) => {
            log::error!("Failed to import prices: {err}");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "INTERNAL_ERROR",
                "Unexpected error while importing prices",
            ))
        }
    }
}
