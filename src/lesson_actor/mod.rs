//! Lesson catalog actor, including the capacity actions orders rely on.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::LessonClient;
use crate::model::Lesson;
use actor_framework::ResourceActor;

/// Creates a new Lesson actor and its client.
pub fn new() -> (ResourceActor<Lesson>, LessonClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, LessonClient::new(generic_client))
}

/// Creates a Lesson actor holding previously stored lessons.
pub fn with_lessons(lessons: Vec<Lesson>) -> (ResourceActor<Lesson>, LessonClient) {
    let (actor, generic_client) =
        ResourceActor::with_documents(32, lessons.into_iter().map(|l| (l.id, l)));
    (actor, LessonClient::new(generic_client))
}
