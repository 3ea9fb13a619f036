//! # Generic Client
//!
//! The sending half of a `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only a sender, so cloning is cheap; share it across tasks freely.
/// Every call resolves to `Result<…, FrameworkError<T::Error>>`.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

type Outcome<R, T> = Result<R, FrameworkError<<T as ActorEntity>::Error>>;

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Outcome<R, T>>) -> ResourceRequest<T> + Send,
    ) -> Outcome<R, T> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Outcome<T::Id, T> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Outcome<Option<T>, T> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Every entity, in id order.
    pub async fn list(&self) -> Outcome<Vec<T>, T> {
        self.list_where(|_| true).await
    }

    /// Entities matching `filter`, in id order.
    pub async fn list_where(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Outcome<Vec<T>, T> {
        let filter = Box::new(filter);
        self.request(|respond_to| ResourceRequest::List { filter, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Outcome<T, T> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Outcome<(), T> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Outcome<T::ActionResult, T> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// Evicts every entity for which `keep` returns false. Returns the
    /// number of evicted entities. Lifecycle hooks are not invoked.
    pub async fn retain(
        &self,
        keep: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Outcome<usize, T> {
        let keep = Box::new(keep);
        self.request(|respond_to| ResourceRequest::Retain { keep, respond_to })
            .await
    }
}
