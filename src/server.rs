// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! REST API for the ledger.
//!
//! ## Endpoints
//!
//! - `POST /account?accountNumber=<9-digit-string>` - Create an account
//! - `GET /account/{accountNumber}` - Get an account with its balance
//! - `POST /deposit?accountNumber=<str>&amount=<decimal>` - Deposit funds
//! - `POST /withdraw?accountNumber=<str>&amount=<decimal>` - Withdraw funds
//! - `GET /transactions` - List committed transactions
//!
//! Validation failures return `400` with a body of the form
//! `{"status": 400, "errors": {"<field>": ["<message>", ...]}}`, omitting
//! fields that have no errors. Anything unexpected is caught by the panic
//! layer and surfaced as a bare `500`; details stay in the server log.
//!
//! ## Example Usage
//!
//! ```bash
//! curl -X POST "http://localhost:3000/account?accountNumber=123456789"
//! curl -X POST "http://localhost:3000/deposit?accountNumber=123456789&amount=100.00"
//! curl -X POST "http://localhost:3000/withdraw?accountNumber=123456789&amount=50.00"
//! curl "http://localhost:3000/account/123456789"
//! ```

use crate::error::ValidationErrors;
use crate::ledger::{ACCOUNT_NUMBER_FIELD, Ledger};
use crate::transaction::Transaction;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

// === Request/Response DTOs ===

/// Query parameters for account creation.
///
/// Parameters are optional at the HTTP layer so a missing value is reported
/// as a blank-field validation error rather than a framework rejection.
#[derive(Debug, Deserialize)]
pub struct CreateAccountParams {
    #[serde(rename = "accountNumber")]
    pub account_number: Option<String>,
}

/// Query parameters for deposits and withdrawals.
#[derive(Debug, Deserialize)]
pub struct TransferParams {
    #[serde(rename = "accountNumber")]
    pub account_number: Option<String>,
    pub amount: Option<String>,
}

/// Response body for errors.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub errors: ValidationErrors,
}

// === Application State ===

/// Shared application state containing the ledger service.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
}

// === Error Handling ===

/// Wrapper converting validation failures into HTTP responses.
pub struct ApiError(ValidationErrors);

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        // User-caused, not a server error: keep it out of the error log.
        debug!(errors = %self.0, "request failed validation");
        (
            status,
            Json(ErrorBody {
                status: status.as_u16(),
                errors: self.0,
            }),
        )
            .into_response()
    }
}

// === Handlers ===

/// POST /account - Create a new account.
async fn create_account(
    State(state): State<AppState>,
    Query(params): Query<CreateAccountParams>,
) -> Result<StatusCode, ApiError> {
    state.ledger.create_account(params.account_number.as_deref())?;
    Ok(StatusCode::CREATED)
}

/// POST /deposit - Credit an existing account.
async fn deposit(
    State(state): State<AppState>,
    Query(params): Query<TransferParams>,
) -> Result<StatusCode, ApiError> {
    state
        .ledger
        .deposit(params.account_number.as_deref(), params.amount.as_deref())?;
    Ok(StatusCode::OK)
}

/// POST /withdraw - Debit an existing account.
async fn withdraw(
    State(state): State<AppState>,
    Query(params): Query<TransferParams>,
) -> Result<StatusCode, ApiError> {
    state
        .ledger
        .withdraw(params.account_number.as_deref(), params.amount.as_deref())?;
    Ok(StatusCode::OK)
}

/// GET /account/{accountNumber} - Get an account by number.
async fn get_account(
    State(state): State<AppState>,
    Path(account_number): Path<String>,
) -> Response {
    match state.ledger.account(&account_number) {
        Some(account) => Json(&*account).into_response(),
        None => {
            let status = StatusCode::NOT_FOUND;
            (
                status,
                Json(ErrorBody {
                    status: status.as_u16(),
                    errors: ValidationErrors::single(ACCOUNT_NUMBER_FIELD, "Account not found."),
                }),
            )
                .into_response()
        }
    }
}

/// GET /transactions - List all committed transactions.
async fn list_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    Json(state.ledger.transactions())
}

// === Router ===

/// Builds the application router with tracing and panic recovery layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/account", post(create_account))
        .route("/account/{accountNumber}", get(get_account))
        .route("/deposit", post(deposit))
        .route("/withdraw", post(withdraw))
        .route("/transactions", get(list_transactions))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
