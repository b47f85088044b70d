//! [`ActorEntity`] implementation for [`Lesson`].
//!
//! The catalog has no dependencies (`Context = ()`). Every capacity check runs
//! inside the actor, so a reservation can never observe a stale `spaces`.

use super::actions::{LessonAction, LessonActionResult};
use super::error::LessonError;
use crate::model::{Lesson, LessonCreate, LessonId, LessonUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Lesson {
    type Id = LessonId;
    type Create = LessonCreate;
    type Update = LessonUpdate;
    type Action = LessonAction;
    type ActionResult = LessonActionResult;
    type Context = ();
    type Error = LessonError;

    fn from_create_params(id: LessonId, params: LessonCreate) -> Result<Self, Self::Error> {
        Ok(Lesson::new(id, params))
    }

    /// Overwrites `spaces` with the requested absolute value.
    async fn on_update(&mut self, update: LessonUpdate, _ctx: &()) -> Result<(), Self::Error> {
        self.spaces = update.spaces;
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: LessonAction,
        _ctx: &(),
    ) -> Result<LessonActionResult, Self::Error> {
        match action {
            LessonAction::CheckSpaces => Ok(LessonActionResult::CheckSpaces(self.spaces)),
            LessonAction::ReserveSpaces(0) | LessonAction::ReleaseSpaces(0) => {
                Err(LessonError::InvalidQuantity(0))
            }
            LessonAction::ReserveSpaces(quantity) => {
                if quantity > self.spaces {
                    return Err(LessonError::InsufficientSpaces {
                        lesson: self.id,
                        requested: quantity,
                        available: self.spaces,
                    });
                }
                self.spaces -= quantity;
                Ok(LessonActionResult::ReserveSpaces(self.spaces))
            }
            LessonAction::ReleaseSpaces(quantity) => {
                self.spaces = self.spaces.saturating_add(quantity);
                Ok(LessonActionResult::ReleaseSpaces(self.spaces))
            }
        }
    }

    fn is_read_only(action: &LessonAction) -> bool {
        matches!(action, LessonAction::CheckSpaces)
    }
}
