use super::{LessonId, OrderId};
use serde::{Deserialize, Serialize};

/// One line of an order: how many spaces to take on which lesson.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(rename = "id")]
    pub lesson_id: LessonId,
    pub quantity: u32,
}

/// A placed order. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub customer_name: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
}

/// Body of `POST /order`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            customer_name: params.customer_name,
            customer_phone: params.customer_phone,
            items: params.items,
        }
    }
}
