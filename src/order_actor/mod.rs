//! Order actor: placing an order reserves capacity on every referenced lesson
//! before the order document is stored.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
///
/// The actor's context is the [`LessonClient`](crate::clients::LessonClient)
/// it reserves capacity through; pass it to `run()`.
pub fn new() -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, OrderClient::new(generic_client))
}

/// Creates an Order actor holding previously placed orders. Their
/// reservations are already reflected in the stored lessons.
pub fn with_orders(orders: Vec<Order>) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) =
        ResourceActor::with_documents(32, orders.into_iter().map(|o| (o.id, o)));
    (actor, OrderClient::new(generic_client))
}
