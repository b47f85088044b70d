//! [`ActorEntity`] implementation for [`Order`].
//!
//! Placement is a small saga run from `on_create`, inside the order actor:
//!
//! 1. Reserve every line item concurrently through the [`LessonClient`].
//! 2. If any reservation fails, release the ones that succeeded and fail the
//!    create, so no order is stored.
//! 3. Otherwise the actor stores the order. If storing fails after all,
//!    `on_discard` releases every line.
//!
//! Each reservation is atomic inside the lesson actor. Orders are immutable,
//! which the `Infallible` update and action types make unrepresentable.

use super::error::OrderError;
use crate::clients::LessonClient;
use crate::model::{Order, OrderCreate, OrderId, OrderItem};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::convert::Infallible;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = Infallible;
    type Action = Infallible;
    type ActionResult = ();
    type Context = LessonClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError(
                "order must contain at least one item".into(),
            ));
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "quantity for {} must be at least 1",
                item.lesson_id
            )));
        }
        Ok(Order::new(id, params))
    }

    async fn on_create(&mut self, lessons: &LessonClient) -> Result<(), Self::Error> {
        let mut reservations = JoinSet::new();
        for (index, item) in self.items.iter().copied().enumerate() {
            let lessons = lessons.clone();
            reservations.spawn(async move {
                let outcome = lessons.reserve_spaces(item.lesson_id, item.quantity).await;
                (index, item, outcome)
            });
        }

        let mut reserved: Vec<OrderItem> = Vec::with_capacity(self.items.len());
        let mut failure: Option<(usize, OrderError)> = None;
        while let Some(joined) = reservations.join_next().await {
            let (index, err) = match joined {
                Ok((_, item, Ok(_))) => {
                    reserved.push(item);
                    continue;
                }
                Ok((index, _, Err(e))) => (index, OrderError::from(e)),
                Err(e) => (usize::MAX, OrderError::ActorCommunicationError(e.to_string())),
            };
            // report the failing item that comes first in the order
            if failure.as_ref().map_or(true, |(first, _)| index < *first) {
                failure = Some((index, err));
            }
        }

        match failure {
            None => {
                info!(order = %self.id, items = self.items.len(), "All reservations held");
                Ok(())
            }
            Some((_, err)) => {
                warn!(order = %self.id, error = %err, released = reserved.len(), "Reservation failed, releasing");
                release(lessons, &reserved).await;
                Err(err)
            }
        }
    }

    async fn on_discard(&self, lessons: &LessonClient) {
        warn!(order = %self.id, "Order not stored, releasing its reservations");
        release(lessons, &self.items).await;
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &LessonClient) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &LessonClient) -> Result<(), Self::Error> {
        match action {}
    }
}

/// Gives back spaces taken by a placement that is being abandoned.
async fn release(lessons: &LessonClient, reserved: &[OrderItem]) {
    for item in reserved {
        if let Err(e) = lessons.release_spaces(item.lesson_id, item.quantity).await {
            // nothing left to compensate with; capacity on this lesson is now short
            error!(lesson = %item.lesson_id, quantity = item.quantity, error = %e, "Release failed");
        }
    }
}
