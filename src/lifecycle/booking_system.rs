use crate::clients::{LessonClient, OrderClient};
use crate::lesson_actor::LessonError;
use crate::model::{Lesson, LessonCreate, LessonId, Order};
use crate::store::{Connection, JsonFile, StoreError, LESSONS_FILE, ORDERS_FILE};
use actor_framework::ResourceActor;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Runtime orchestrator for the booking service's actors.
///
/// `BookingSystem` owns the actor tasks and hands out their clients:
/// - **Lesson actor**: the catalog and its capacity (`Context = ()`).
/// - **Order actor**: placed orders; reserves capacity through a
///   [`LessonClient`] injected as its context.
///
/// The dependency only points from orders to lessons, so dropping the clients
/// stops the order actor first, which in turn releases the last lesson client.
///
/// ```ignore
/// let system = BookingSystem::open(&config.connection).await?;
/// let app = api::build_router(system.state(), &config);
/// // ... serve ...
/// system.shutdown().await?;
/// ```
pub struct BookingSystem {
    pub lesson_client: LessonClient,
    pub order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl BookingSystem {
    /// Spawns both actors, empty and in memory only. Must be called from
    /// within a Tokio runtime.
    pub fn new() -> Self {
        let (lesson_actor, lesson_client) = crate::lesson_actor::new();
        let (order_actor, order_client) = crate::order_actor::new();
        Self::spawn(lesson_actor, lesson_client, order_actor, order_client)
    }

    /// Loads whatever `connection` holds and spawns both actors on it. With a
    /// directory store, every later change is written back to it.
    pub async fn open(connection: &Connection) -> Result<Self, StoreError> {
        let stored = connection.load().await?;
        let (mut lesson_actor, lesson_client) = crate::lesson_actor::with_lessons(stored.lessons);
        let (mut order_actor, order_client) = crate::order_actor::with_orders(stored.orders);

        if let Connection::Directory(dir) = connection {
            lesson_actor = lesson_actor.persist_with(JsonFile::new(dir.join(LESSONS_FILE)));
            order_actor = order_actor.persist_with(JsonFile::new(dir.join(ORDERS_FILE)));
        }
        info!(store = %connection, "Opened store");
        Ok(Self::spawn(lesson_actor, lesson_client, order_actor, order_client))
    }

    fn spawn(
        lesson_actor: ResourceActor<Lesson>,
        lesson_client: LessonClient,
        order_actor: ResourceActor<Order>,
        order_client: OrderClient,
    ) -> Self {
        let lesson_handle = tokio::spawn(lesson_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(lesson_client.clone()));

        Self {
            lesson_client,
            order_client,
            handles: vec![order_handle, lesson_handle],
        }
    }

    /// Loads the initial catalog. Ids are assigned in input order.
    pub async fn seed(&self, lessons: Vec<LessonCreate>) -> Result<Vec<LessonId>, LessonError> {
        let mut ids = Vec::with_capacity(lessons.len());
        for lesson in lessons {
            ids.push(self.lesson_client.add_lesson(lesson).await?);
        }
        info!(count = ids.len(), "Catalog seeded");
        Ok(ids)
    }

    /// Router state sharing this system's clients.
    pub fn state(&self) -> crate::api::AppState {
        crate::api::AppState {
            lessons: self.lesson_client.clone(),
            orders: self.order_client.clone(),
        }
    }

    /// Drops the clients and waits for every actor task to finish.
    ///
    /// Actors only stop once *all* clones of their client are gone, so any
    /// router built from [`state`](Self::state) must be dropped first.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down booking system...");
        drop(self.order_client);
        drop(self.lesson_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {e:?}");
                return Err(e);
            }
        }

        info!("Booking system shutdown complete.");
        Ok(())
    }
}

impl Default for BookingSystem {
    fn default() -> Self {
        Self::new()
    }
}
