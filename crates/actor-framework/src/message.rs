//! # Generic Messages
//!
//! The request envelope exchanged between a `ResourceClient` and its
//! `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

/// Predicate over stored entities, used by `List` and `Retain`.
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to CRUD operations plus:
/// - **List**: a filtered scan, returned in id order.
/// - **Action**: a resource-specific operation ([`ActorEntity::Action`]).
/// - **Retain**: bulk eviction of entities for which the predicate is false.
///   No hooks run; use it when the durable side already removed the rows
///   (e.g. a cascading delete).
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        filter: Filter<T>,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
    Retain {
        keep: Filter<T>,
        respond_to: Response<usize, T::Error>,
    },
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Short operation name, used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "Create",
            ResourceRequest::Get { .. } => "Get",
            ResourceRequest::List { .. } => "List",
            ResourceRequest::Update { .. } => "Update",
            ResourceRequest::Delete { .. } => "Delete",
            ResourceRequest::Action { .. } => "Action",
            ResourceRequest::Retain { .. } => "Retain",
        }
    }
}
