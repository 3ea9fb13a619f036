//! # Generic Actor Server
//!
//! `ResourceActor` owns the table of entities for one resource type and
//! processes messages sequentially, so the table needs no locking.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This struct is the "Server" half of the actor. It owns the state (`store`)
/// and the receiver end of the channel. Each instance runs in its own Tokio
/// task and handles one request at a time.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` (empty) or `ResourceActor::restore()`
///     (seeded from a snapshot) returns the actor and its client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Restaurant>::restore(32, rows, next_id);
/// tokio::spawn(actor.run(context));
/// let id = client.create(RestaurantCreate { name: "Cafe".into() }).await?;
/// ```
///
/// # Staged writes
///
/// * **Create**: the entity is inserted only after `on_create` succeeds.
/// * **Update / Action**: the hook runs on a clone; the clone replaces the
///   stored entity only if the hook succeeds.
/// * **Delete**: the entity is removed only after `on_delete` succeeds.
///
/// A hook failure therefore never leaves a half-applied entity behind.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an empty `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel. If the channel is
    /// full, calls to the client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::restore(buffer_size, Vec::new(), 1)
    }

    /// Creates an actor pre-populated with `entities`.
    ///
    /// New ids are generated starting at `next_id`; ids already present in
    /// the table are skipped.
    pub fn restore(
        buffer_size: usize,
        entities: Vec<T>,
        next_id: u32,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store: BTreeMap<T::Id, T> = entities.into_iter().map(|e| (e.id(), e)).collect();
        let actor = Self {
            receiver,
            store,
            next_id: next_id.max(1),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Restaurant" instead of "group_order::model::restaurant::Restaurant"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    while self.store.contains_key(&T::Id::from(self.next_id)) {
                        self.next_id += 1;
                    }
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| filter(*item))
                        .cloned()
                        .collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut staged = current.clone();
                    if let Err(e) = staged.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        continue;
                    }
                    self.store.insert(id.clone(), staged.clone());
                    info!(entity_type, %id, "Updated");
                    let _ = respond_to.send(Ok(staged));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut staged = current.clone();
                    match staged.handle_action(action, &context).await {
                        Ok(result) => {
                            self.store.insert(id.clone(), staged);
                            info!(entity_type, %id, "Action ok");
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        }
                    }
                }
                ResourceRequest::Retain { keep, respond_to } => {
                    let before = self.store.len();
                    self.store.retain(|_, item| keep(&*item));
                    let evicted = before - self.store.len();
                    info!(entity_type, evicted, size = self.store.len(), "Retained");
                    let _ = respond_to.send(Ok(evicted));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
