//! Customer handlers

use axum::extract::State;
use tracing::instrument;

use core_kernel::CustomerId;

use crate::dto::customer::*;
use crate::extract::{ApiJson, ApiPath};
use crate::{error::ApiError, AppState};

/// Creates a customer with its optional address and contact
#[instrument(skip(state, request))]
pub async fn create_customer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CustomerRequest>,
) -> Result<ApiJson<CustomerResponse>, ApiError> {
    let customer = state.service.create_customer(request.into()).await?;
    Ok(ApiJson(customer.into()))
}

/// Lists all customers
#[instrument(skip(state))]
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<ApiJson<Vec<CustomerResponse>>, ApiError> {
    let customers = state.service.get_all_customers().await?;
    Ok(ApiJson(customers.into_iter().map(Into::into).collect()))
}

/// Gets a customer by ID
#[instrument(skip(state))]
pub async fn get_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CustomerId>,
) -> Result<ApiJson<CustomerResponse>, ApiError> {
    let customer = state.service.get_customer(id).await?;
    Ok(ApiJson(customer.into()))
}

/// Updates a customer, merging any supplied address and contact
#[instrument(skip(state, request))]
pub async fn update_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CustomerId>,
    ApiJson(request): ApiJson<CustomerRequest>,
) -> Result<ApiJson<CustomerResponse>, ApiError> {
    let customer = state.service.update_customer(id, request.into()).await?;
    Ok(ApiJson(customer.into()))
}

/// Deletes a customer together with its address and contact
#[instrument(skip(state))]
pub async fn delete_customer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CustomerId>,
) -> Result<ApiJson<DeleteCustomerResponse>, ApiError> {
    state.service.delete_customer(id).await?;
    Ok(ApiJson(DeleteCustomerResponse::for_customer(id)))
}
