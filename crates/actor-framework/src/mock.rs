//! # Mock Clients for Tests
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running actor. Use it to
//! test code that *calls* a store (client wrappers, or an actor whose context
//! holds another actor's client) without standing up the dependency.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, canned replies | real documents |
//! | **Error injection** | `return_err(..)` | needs the right state |
//! | **Use case** | logic around the client | the actor itself, end to end |
//!
//! Expectations are matched by request kind and id, not by arrival order, so
//! callers that fan out requests concurrently can still be mocked.
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Desk { id: u32 }
//! #[derive(Debug)] struct DeskCreate;
//! #[derive(Debug)] struct DeskUpdate;
//! #[derive(Debug)] enum DeskAction {}
//! #[derive(Debug, thiserror::Error)] #[error("desk error")] struct DeskError;
//!
//! #[async_trait]
//! impl ActorEntity for Desk {
//!     type Id = u32; type Create = DeskCreate; type Update = DeskUpdate;
//!     type Action = DeskAction; type ActionResult = (); type Context = (); type Error = DeskError;
//!     fn from_create_params(id: u32, _: DeskCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: DeskUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: DeskAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Desk>::new();
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For step-by-step control, [`create_mock_client`] returns the raw receiver
//! and the `expect_*` helper functions pull the next request off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// Removes and returns the first queued expectation accepted by `pick`.
fn take<T: ActorEntity, R>(
    expectations: &Expectations<T>,
    pick: impl Fn(Expectation<T>) -> Result<R, Expectation<T>>,
) -> Option<R> {
    let mut queue = expectations.lock().unwrap();
    let mut kept = VecDeque::with_capacity(queue.len());
    let mut found = None;
    while let Some(exp) = queue.pop_front() {
        if found.is_some() {
            kept.push_back(exp);
            continue;
        }
        match pick(exp) {
            Ok(hit) => found = Some(hit),
            Err(miss) => kept.push_back(miss),
        }
    }
    *queue = kept;
    found
}

fn reply<R>(
    respond_to: oneshot::Sender<Result<R, FrameworkError>>,
    response: Option<Result<R, FrameworkError>>,
    what: &str,
) {
    match response {
        Some(response) => {
            let _ = respond_to.send(response);
        }
        None => panic!("Unexpected {what} request"),
    }
}

/// A mock client with expectation tracking.
///
/// ```ignore
/// let mut mock = MockClient::<Lesson>::new();
/// mock.expect_action(LessonId(1)).return_ok(LessonActionResult::ReserveSpaces(3));
/// let lessons = LessonClient::new(mock.client());
/// // ... exercise code that reserves spaces ...
/// mock.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called from within a Tokio runtime. A request with no matching
    /// expectation panics the responder task; the caller then observes
    /// [`FrameworkError::ActorClosed`] or [`FrameworkError::ActorDropped`].
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                match request {
                    ResourceRequest::Get { id, respond_to } => {
                        let hit = take(&queue, |exp| match exp {
                            Expectation::Get { id: want, response } if want == id => Ok(response),
                            other => Err(other),
                        });
                        reply(respond_to, hit, "Get");
                    }
                    ResourceRequest::List { respond_to, .. } => {
                        let hit = take(&queue, |exp| match exp {
                            Expectation::List { response } => Ok(response),
                            other => Err(other),
                        });
                        reply(respond_to, hit, "List");
                    }
                    ResourceRequest::Create { respond_to, .. } => {
                        let hit = take(&queue, |exp| match exp {
                            Expectation::Create { response } => Ok(response),
                            other => Err(other),
                        });
                        reply(respond_to, hit, "Create");
                    }
                    ResourceRequest::Update { id, respond_to, .. } => {
                        let hit = take(&queue, |exp| match exp {
                            Expectation::Update { id: want, response } if want == id => {
                                Ok(response)
                            }
                            other => Err(other),
                        });
                        reply(respond_to, hit, "Update");
                    }
                    ResourceRequest::Action { id, respond_to, .. } => {
                        let hit = take(&queue, |exp| match exp {
                            Expectation::Action { id: want, response } if want == id => {
                                Ok(response)
                            }
                            other => Err(other),
                        });
                        reply(respond_to, hit, "Action");
                    }
                    ResourceRequest::Delete { id, .. } => {
                        panic!("Unexpected Delete request for {id}");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Get {
            id,
            response,
        })
    }

    /// Expects a `list` or `list_where`.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::List {
            response,
        })
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(&self.expectations, |response| Expectation::Create {
            response,
        })
    }

    /// Expects an `update` of `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Update {
            id,
            response,
        })
    }

    /// Expects an action on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(&self.expectations, move |response| Expectation::Action {
            id,
            response,
        })
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Finishes an expectation with the reply the mock should send.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Expectations<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        expectations: &Expectations<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            expectations: expectations.clone(),
            build: Box::new(build),
        }
    }

    /// Reply with `Ok(value)`.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Reply with `Err(error)`.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.build)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: pull requests with [`expect_get`],
/// [`expect_action`] and friends, assert on them, then answer through the
/// returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Update request.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Room {
        id: u32,
        name: String,
    }

    #[derive(Debug)]
    struct RoomCreate {
        name: String,
    }

    #[derive(Debug)]
    struct RoomUpdate;

    #[derive(Debug)]
    enum RoomAction {
        Book,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("room error")]
    struct RoomError;

    #[async_trait]
    impl ActorEntity for Room {
        type Id = u32;
        type Create = RoomCreate;
        type Update = RoomUpdate;
        type Action = RoomAction;
        type ActionResult = bool;
        type Context = ();
        type Error = RoomError;

        fn from_create_params(id: u32, params: RoomCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                name: params.name,
            })
        }

        async fn on_update(&mut self, _: RoomUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: RoomAction, _: &()) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    fn room(id: u32, name: &str) -> Room {
        Room {
            id,
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_create() {
        let (client, mut receiver) = create_mock_client::<Room>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(RoomCreate {
                    name: "Studio A".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.name, "Studio A");
        responder.send(Ok(1)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_expectations_are_consumed() {
        let mut mock = MockClient::<Room>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(room(1, "Studio A")));
        mock.expect_list()
            .return_ok(vec![room(1, "Studio A"), room(2, "Studio B")]);

        let client = mock.client();
        let id = client
            .create(RoomCreate {
                name: "Studio A".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert_eq!(client.get(1).await.unwrap().unwrap().name, "Studio A");
        assert_eq!(client.list().await.unwrap().len(), 2);

        mock.verify();
    }

    #[tokio::test]
    async fn test_actions_match_by_id_not_order() {
        let mut mock = MockClient::<Room>::new();
        mock.expect_action(1).return_ok(true);
        mock.expect_action(2).return_err(FrameworkError::NotFound("2".into()));

        let client = mock.client();
        let second = client.perform_action(2, RoomAction::Book).await;
        let first = client.perform_action(1, RoomAction::Book).await;

        assert!(matches!(second, Err(FrameworkError::NotFound(id)) if id == "2"));
        assert!(first.unwrap());
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_leftovers() {
        let mut mock = MockClient::<Room>::new();
        mock.expect_update(7).return_ok(room(7, "Studio C"));
        mock.verify();
    }
}
