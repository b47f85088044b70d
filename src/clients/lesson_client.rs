//! # Lesson Client
//!
//! High-level API over the Lesson actor: catalog reads, text search, the
//! absolute capacity update and the reserve/release pair used by orders.
use crate::lesson_actor::{LessonAction, LessonError};
use crate::model::{Lesson, LessonCreate, LessonId, LessonUpdate};
use crate::search::TextQuery;
use actor_framework::{ActorClient, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Lesson actor.
#[derive(Clone)]
pub struct LessonClient {
    inner: ResourceClient<Lesson>,
}

impl LessonClient {
    pub fn new(inner: ResourceClient<Lesson>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Lesson> for LessonClient {
    type Error = LessonError;

    fn inner(&self) -> &ResourceClient<Lesson> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        LessonError::ActorCommunicationError(e.to_string())
    }
}

/// Maps a failure on a request addressed to `id`, keeping the entity's own
/// error when the actor sent one.
fn lesson_error(id: LessonId, e: FrameworkError) -> LessonError {
    match e.into_entity_error::<LessonError>() {
        Ok(typed) => typed,
        Err(FrameworkError::NotFound(_)) => LessonError::NotFound(id),
        Err(other) => LessonClient::map_error(other),
    }
}

impl LessonClient {
    /// Adds a lesson to the catalog. There is no HTTP route for this; it is
    /// how an in-memory catalog gets filled.
    #[instrument(skip(self, params), fields(spaces = params.spaces))]
    pub async fn add_lesson(&self, params: LessonCreate) -> Result<LessonId, LessonError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Lessons whose subject or location match `query`, in id order.
    ///
    /// A query with nothing to look for matches nothing and never reaches the
    /// actor.
    #[instrument(skip(self))]
    pub async fn search(&self, query: TextQuery) -> Result<Vec<Lesson>, LessonError> {
        if query.is_empty() {
            debug!("Empty query");
            return Ok(Vec::new());
        }
        debug!("Sending request");
        self.inner
            .list_where(Filter::new(move |lesson: &Lesson| query.matches(lesson)))
            .await
            .map_err(Self::map_error)
    }

    /// Overwrites the lesson's remaining capacity and returns the new state.
    #[instrument(skip(self))]
    pub async fn set_spaces(&self, id: LessonId, spaces: u32) -> Result<Lesson, LessonError> {
        debug!("Sending request");
        self.inner
            .update(id, LessonUpdate { spaces })
            .await
            .map_err(|e| lesson_error(id, e))
    }

    /// Current remaining capacity.
    #[instrument(skip(self))]
    pub async fn check_spaces(&self, id: LessonId) -> Result<u32, LessonError> {
        self.act(id, LessonAction::CheckSpaces).await
    }

    /// Takes `quantity` spaces, failing with
    /// [`LessonError::InsufficientSpaces`] if fewer remain.
    ///
    /// Returns the capacity left afterwards.
    #[instrument(skip(self))]
    pub async fn reserve_spaces(&self, id: LessonId, quantity: u32) -> Result<u32, LessonError> {
        self.act(id, LessonAction::ReserveSpaces(quantity)).await
    }

    /// Gives back `quantity` spaces taken by [`reserve_spaces`](Self::reserve_spaces).
    #[instrument(skip(self))]
    pub async fn release_spaces(&self, id: LessonId, quantity: u32) -> Result<u32, LessonError> {
        self.act(id, LessonAction::ReleaseSpaces(quantity)).await
    }

    async fn act(&self, id: LessonId, action: LessonAction) -> Result<u32, LessonError> {
        debug!(?action, "Sending request");
        self.inner
            .perform_action(id, action)
            .await
            .map(|result| result.remaining())
            .map_err(|e| lesson_error(id, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson_actor::LessonActionResult;
    use actor_framework::mock::{create_mock_client, expect_action, expect_update, MockClient};

    #[tokio::test]
    async fn test_reserve_spaces_sends_the_quantity() {
        let (client, mut receiver) = create_mock_client::<Lesson>(10);
        let lessons = LessonClient::new(client);

        let reserve_task =
            tokio::spawn(async move { lessons.reserve_spaces(LessonId(1), 3).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, LessonId(1));
        assert_eq!(action, LessonAction::ReserveSpaces(3));

        responder
            .send(Ok(LessonActionResult::ReserveSpaces(2)))
            .unwrap();

        assert_eq!(reserve_task.await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_reserve_spaces_keeps_the_typed_conflict() {
        let mut mock = MockClient::<Lesson>::new();
        let conflict = LessonError::InsufficientSpaces {
            lesson: LessonId(1),
            requested: 9,
            available: 4,
        };
        mock.expect_action(LessonId(1))
            .return_err(FrameworkError::EntityError(Box::new(conflict.clone())));
        let lessons = LessonClient::new(mock.client());

        let err = lessons.reserve_spaces(LessonId(1), 9).await.unwrap_err();
        assert_eq!(err, conflict);
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_lesson_is_not_found() {
        let mut mock = MockClient::<Lesson>::new();
        mock.expect_action(LessonId(8))
            .return_err(FrameworkError::NotFound("lesson_8".into()));
        let lessons = LessonClient::new(mock.client());

        let err = lessons.release_spaces(LessonId(8), 1).await.unwrap_err();
        assert_eq!(err, LessonError::NotFound(LessonId(8)));
    }

    #[tokio::test]
    async fn test_closed_channel_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Lesson>(1);
        drop(receiver);
        let lessons = LessonClient::new(client);

        let err = lessons.check_spaces(LessonId(1)).await.unwrap_err();
        assert!(matches!(err, LessonError::ActorCommunicationError(_)));
    }

    #[tokio::test]
    async fn test_set_spaces_sends_an_absolute_update() {
        let (client, mut receiver) = create_mock_client::<Lesson>(10);
        let lessons = LessonClient::new(client);

        let update_task = tokio::spawn(async move { lessons.set_spaces(LessonId(2), 10).await });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, LessonId(2));
        assert_eq!(update, LessonUpdate { spaces: 10 });

        let mut lesson = Lesson::new(id, LessonCreate::new("Art", "Barnet", 80.0, 1));
        lesson.spaces = update.spaces;
        responder.send(Ok(lesson)).unwrap();

        assert_eq!(update_task.await.unwrap().unwrap().spaces, 10);
    }

    #[tokio::test]
    async fn test_empty_search_never_reaches_the_actor() {
        // no expectations: any request would panic the mock
        let mock = MockClient::<Lesson>::new();
        let lessons = LessonClient::new(mock.client());

        let found = lessons.search(TextQuery::parse("  -art ")).await.unwrap();
        assert!(found.is_empty());
    }
}
