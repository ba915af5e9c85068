//! Wallets API handlers.
//!
//! ```text
//! POST /api/v1/wallets/{userId}/top-up   Credit the wallet
//! GET  /api/v1/wallets/{userId}          Read the balance
//! GET  /api/v1/wallets/{userId}/ledger   Read the movement history
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{LedgerDirection, LedgerEntry, Money, UserId, Wallet};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MoneyDto;
use crate::inbound::http::state::HttpState;

/// Top-up request body for `POST /api/v1/wallets/{userId}/top-up`.
///
/// Example JSON: `{"amount":"100.00","currency":"EUR"}`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopUpRequest {
    #[serde(flatten)]
    pub amount: MoneyDto,
}

/// Wallet representation returned by the wallets endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub id: Uuid,
    pub owner_id: UserId,
    pub balance: MoneyDto,
}

impl From<&Wallet> for WalletResponse {
    fn from(value: &Wallet) -> Self {
        Self {
            id: value.id(),
            owner_id: value.owner_id(),
            balance: MoneyDto::from(value.balance()),
        }
    }
}

/// One ledger movement as returned by the history endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryResponse {
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub amount: MoneyDto,
    pub direction: LedgerDirection,
    pub recorded_at: DateTime<Utc>,
    pub description: String,
}

impl From<&LedgerEntry> for LedgerEntryResponse {
    fn from(value: &LedgerEntry) -> Self {
        Self {
            id: value.id(),
            wallet_id: value.wallet_id(),
            amount: MoneyDto::from(value.amount()),
            direction: value.direction(),
            recorded_at: value.recorded_at(),
            description: value.description().to_owned(),
        }
    }
}

/// Credit a wallet.
#[post("/wallets/{user_id}/top-up")]
pub async fn top_up(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<TopUpRequest>,
) -> ApiResult<web::Json<WalletResponse>> {
    let amount = Money::try_from(payload.into_inner().amount)?;
    let wallet = state
        .wallets
        .add_funds(UserId::new(path.into_inner()), amount)
        .await?;
    Ok(web::Json(WalletResponse::from(&wallet)))
}

/// Read a wallet's balance.
#[get("/wallets/{user_id}")]
pub async fn get_wallet(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<WalletResponse>> {
    let wallet = state.wallets.wallet_of(UserId::new(path.into_inner())).await?;
    Ok(web::Json(WalletResponse::from(&wallet)))
}

/// Read a wallet's movement history, oldest entry first.
#[get("/wallets/{user_id}/ledger")]
pub async fn get_ledger(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<Vec<LedgerEntryResponse>>> {
    let entries = state.wallets.ledger_of(UserId::new(path.into_inner())).await?;
    Ok(web::Json(entries.iter().map(LedgerEntryResponse::from).collect()))
}
