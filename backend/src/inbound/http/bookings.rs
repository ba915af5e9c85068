//! Bookings API handlers.
//!
//! ```text
//! POST /api/v1/bookings                 Reserve a stay
//! GET  /api/v1/bookings/{id}            Read a booking
//! POST /api/v1/bookings/{id}/confirm    Owner accepts; charges the fee
//! POST /api/v1/bookings/{id}/reject     Owner declines
//! POST /api/v1/bookings/{id}/cancel     Client withdraws
//! POST /api/v1/bookings/{id}/complete   Mark the stay as finished
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Booking, BookingStatus, ReserveBookingRequest, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MoneyDto;
use crate::inbound::http::state::HttpState;

/// Reservation request body for `POST /api/v1/bookings`.
///
/// Example JSON:
/// `{"clientId":"…","propertyId":"…","guestName":"Ada Lovelace",
///   "phoneNumber":"+44 20 7946 0000","start":"2024-06-10T00:00:00Z",
///   "end":"2024-06-14T00:00:00Z"}`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReserveRequest {
    pub client_id: Uuid,
    pub property_id: Uuid,
    pub guest_name: String,
    pub phone_number: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl From<ReserveRequest> for ReserveBookingRequest {
    fn from(value: ReserveRequest) -> Self {
        Self {
            client_id: UserId::new(value.client_id),
            property_id: value.property_id,
            guest_name: value.guest_name,
            phone_number: value.phone_number,
            start: value.start,
            end: value.end,
        }
    }
}

/// Booking representation returned by every bookings endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub client_id: UserId,
    pub property_id: Uuid,
    pub guest_name: String,
    pub phone_number: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_price: MoneyDto,
    pub status: BookingStatus,
    pub reserved_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Booking> for BookingResponse {
    fn from(value: &Booking) -> Self {
        Self {
            id: value.id(),
            client_id: value.client_id(),
            property_id: value.property_id(),
            guest_name: value.guest_name().to_owned(),
            phone_number: value.phone_number().to_owned(),
            start: value.range().start(),
            end: value.range().end(),
            total_price: MoneyDto::from(value.total_price()),
            status: value.status(),
            reserved_at: value.reserved_at(),
            updated_at: value.updated_at(),
        }
    }
}

/// Reserve a stay; the booking starts out `pending`.
#[post("/bookings")]
pub async fn reserve(
    state: web::Data<HttpState>,
    payload: web::Json<ReserveRequest>,
) -> ApiResult<HttpResponse> {
    let booking = state.bookings.reserve(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(BookingResponse::from(&booking)))
}

/// Read one booking.
#[get("/bookings/{id}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponse>> {
    let booking = state.bookings.get(path.into_inner()).await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

/// Owner accepts a pending booking; charges the confirmation fee and
/// rejects overlapping pending requests.
#[post("/bookings/{id}/confirm")]
pub async fn confirm(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponse>> {
    let booking = state.bookings.confirm(path.into_inner()).await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

/// Owner declines a pending booking.
#[post("/bookings/{id}/reject")]
pub async fn reject(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponse>> {
    let booking = state.bookings.reject(path.into_inner()).await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

/// Client withdraws a pending or confirmed booking.
#[post("/bookings/{id}/cancel")]
pub async fn cancel(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponse>> {
    let booking = state.bookings.cancel(path.into_inner()).await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

/// Mark a confirmed stay as finished.
#[post("/bookings/{id}/complete")]
pub async fn complete(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<BookingResponse>> {
    let booking = state.bookings.complete(path.into_inner()).await?;
    Ok(web::Json(BookingResponse::from(&booking)))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
