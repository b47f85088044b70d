use super::error::ApiError;
use super::AppState;
use crate::model::{Order, OrderCreate, OrderId};
use actor_framework::ActorClient;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub message: &'static str,
    pub order_id: OrderId,
}

pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    state.orders.list().await.map(Json).map_err(|e| {
        ApiError::internal("An error occurred while fetching orders.", e)
    })
}

/// Reserves capacity for every line and stores the order, or changes nothing.
pub async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderCreate>, JsonRejection>,
) -> Result<Json<PlaceOrderResponse>, ApiError> {
    let Json(order) = payload?;
    let order_id = state
        .orders
        .place_order(order)
        .await
        .map_err(ApiError::from_order)?;

    Ok(Json(PlaceOrderResponse {
        success: true,
        message: "Order saved successfully",
        order_id,
    }))
}
