//! # Generic Actor Server
//!
//! `ResourceActor<T>` owns one collection of documents and the receiving end of
//! its channel. It processes requests strictly one at a time, so entity hooks
//! never race with each other and the collection needs no lock.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use crate::snapshot::Snapshot;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on the Tokio runtime.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Seat { id: u32, taken: bool }
/// #[derive(Debug)] struct SeatCreate;
/// #[derive(Debug)] struct SeatUpdate;
/// #[derive(Debug)] enum SeatAction { Take }
/// #[derive(Debug, thiserror::Error)] #[error("seat already taken")] struct SeatTaken;
///
/// #[async_trait]
/// impl ActorEntity for Seat {
///     type Id = u32;
///     type Create = SeatCreate;
///     type Update = SeatUpdate;
///     type Action = SeatAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = SeatTaken;
///
///     fn from_create_params(id: u32, _: SeatCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, taken: false })
///     }
///     async fn on_update(&mut self, _: SeatUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: SeatAction, _: &()) -> Result<(), Self::Error> {
///         if self.taken { return Err(SeatTaken); }
///         self.taken = true;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Seat>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(SeatCreate).await.unwrap();
///     assert!(client.perform_action(id, SeatAction::Take).await.is_ok());
///     assert!(client.perform_action(id, SeatAction::Take).await.is_err());
/// }
/// ```
///
/// # Operations
///
/// * **Create**: build the entity with `from_create_params` under the next
///   id, run `on_create`, then insert. The id is only used up once the
///   document is stored, so failed creates leave no gaps. When the counter
///   passes `u32::MAX` creates fail with [`FrameworkError::IdsExhausted`].
/// * **Get**: clone of the stored entity, or `None`.
/// * **List**: clones of every stored entity passing the optional filter, in
///   id order.
/// * **Update**: `on_update` on the stored entity, reply with the new state.
/// * **Delete**: `on_delete`, then remove.
/// * **Action**: `handle_action` on the stored entity, reply with its result.
///
/// A hook that fails leaves the stored entity as it was. With a
/// [`Snapshot`] attached, every change is written out before the reply; a
/// failed write undoes the change.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: Option<u32>,
    snapshot: Option<Box<dyn Snapshot<T>>>,
    entity_type: &'static str,
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` bounds the channel. When it is full, client calls wait for
    /// room, which is the only backpressure in the system.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // "Lesson" rather than "lesson_booking::model::lesson::Lesson"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: Some(1),
            snapshot: None,
            entity_type,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Like [`new`](Self::new), but starting from previously stored documents.
    ///
    /// New ids continue after the largest one loaded.
    pub fn with_documents(
        buffer_size: usize,
        documents: impl IntoIterator<Item = (T::Id, T)>,
    ) -> (Self, ResourceClient<T>)
    where
        T::Id: Into<u32>,
    {
        let (mut actor, client) = Self::new(buffer_size);
        actor.store.extend(documents);
        let last: Option<u32> = actor.store.keys().map(|id| id.clone().into()).max();
        actor.next_id = match last {
            Some(last) => last.checked_add(1),
            None => Some(1),
        };
        (actor, client)
    }

    /// Writes the collection to `snapshot` after every change.
    pub fn persist_with(mut self, snapshot: impl Snapshot<T> + 'static) -> Self {
        self.snapshot = Some(Box::new(snapshot));
        self
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items = self.list(filter.as_ref());
                    debug!(
                        entity_type,
                        filtered = filter.is_some(),
                        count = items.len(),
                        "List"
                    );
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.act(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    fn list(&self, filter: Option<&Filter<T>>) -> Vec<T> {
        self.store
            .values()
            .filter(|item| filter.map_or(true, |f| f.matches(item)))
            .cloned()
            .collect()
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let n = self.next_id.ok_or(FrameworkError::IdsExhausted)?;
        let id = T::Id::from(n);

        let mut item = T::from_create_params(id.clone(), params).map_err(entity_error)?;
        item.on_create(context).await.map_err(entity_error)?;
        self.store.insert(id.clone(), item);

        if let Err(e) = persist(&self.snapshot, &self.store).await {
            if let Some(item) = self.store.remove(&id) {
                item.on_discard(context).await;
            }
            return Err(e);
        }
        self.next_id = n.checked_add(1);
        Ok(id)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let item = self
            .store
            .get_mut(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let before = item.clone();
        if let Err(e) = item.on_update(update, context).await {
            *item = before;
            return Err(entity_error(e));
        }
        let updated = item.clone();

        if let Err(e) = persist(&self.snapshot, &self.store).await {
            self.store.insert(id.clone(), before);
            return Err(e);
        }
        Ok(updated)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        item.on_delete(context).await.map_err(entity_error)?;
        let removed = self.store.remove(id);

        if let Err(e) = persist(&self.snapshot, &self.store).await {
            if let Some(item) = removed {
                self.store.insert(id.clone(), item);
            }
            return Err(e);
        }
        Ok(())
    }

    async fn act(
        &mut self,
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let read_only = T::is_read_only(&action);
        let item = self
            .store
            .get_mut(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let before = item.clone();
        let result = match item.handle_action(action, context).await {
            Ok(result) => result,
            Err(e) => {
                *item = before;
                return Err(entity_error(e));
            }
        };

        if !read_only {
            if let Err(e) = persist(&self.snapshot, &self.store).await {
                self.store.insert(id.clone(), before);
                return Err(e);
            }
        }
        Ok(result)
    }
}

/// Writes the whole collection through the snapshot, if one is attached.
async fn persist<T: ActorEntity>(
    snapshot: &Option<Box<dyn Snapshot<T>>>,
    store: &BTreeMap<T::Id, T>,
) -> Result<(), FrameworkError> {
    let Some(snapshot) = snapshot else {
        return Ok(());
    };
    let documents = store.values().cloned().collect();
    snapshot
        .save(documents)
        .await
        .map_err(|e| FrameworkError::Persistence(e.to_string()))
}
