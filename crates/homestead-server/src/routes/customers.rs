//! Customer endpoints.
//!
//! Store calls do blocking file I/O, so each one runs on the blocking pool.

use axum::{
    extract::{FromRequest, Path, State},
    Json,
};
use homestead::api::{CmdResult, HomesteadApi};
use homestead::error::Result as StoreResult;
use homestead::model::{Customer, CustomerPatch, StoredCustomer};
use serde::Serialize;

use crate::error::AppError;
use crate::state::{AppState, SharedStore};

/// `Json` whose rejections answer with the usual `{"detail": ...}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Response body for a successful update.
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub customer: StoredCustomer,
}

async fn run_blocking<F>(state: &AppState, op: F) -> Result<CmdResult, AppError>
where
    F: FnOnce(&HomesteadApi<SharedStore>) -> StoreResult<CmdResult> + Send + 'static,
{
    let api = state.api();
    let result = tokio::task::spawn_blocking(move || op(&*api))
        .await
        .map_err(|e| AppError::Internal(format!("store task failed: {}", e)))??;
    Ok(result)
}

fn into_customer(result: CmdResult) -> Result<Customer, AppError> {
    result
        .customer
        .ok_or_else(|| AppError::Internal("command returned no customer".to_string()))
}

/// `GET /customers/{customer_id}`
pub async fn show(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    let result = run_blocking(&state, move |api| api.get_customer(&customer_id)).await?;
    Ok(Json(into_customer(result)?))
}

/// `PATCH /customers/{customer_id}`
///
/// Only the fields present in the body change. `id` and
/// `electricity_usage_kwh` are ignored if sent.
pub async fn update(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    AppJson(patch): AppJson<CustomerPatch>,
) -> Result<Json<UpdateResponse>, AppError> {
    let result = run_blocking(&state, move |api| {
        api.update_customer(&customer_id, &patch)
    })
    .await?;
    let message = result
        .summary()
        .unwrap_or("Customer data updated successfully")
        .to_string();
    let customer = match (result.customer, result.partial) {
        (Some(customer), _) => StoredCustomer::Complete(customer),
        (None, Some(record)) => StoredCustomer::Partial(record),
        (None, None) => {
            return Err(AppError::Internal(
                "command returned no customer".to_string(),
            ))
        }
    };
    Ok(Json(UpdateResponse { message, customer }))
}

/// `POST /customers`
pub async fn create(
    State(state): State<AppState>,
    AppJson(customer): AppJson<Customer>,
) -> Result<Json<Customer>, AppError> {
    let result = run_blocking(&state, move |api| api.create_customer(customer)).await?;
    Ok(Json(into_customer(result)?))
}
