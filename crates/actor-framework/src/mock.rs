//! # Mock Clients
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of by a `ResourceActor`.
//! Use it to test client wrappers (e.g. a `MenuClient` that checks a
//! restaurant exists before creating an item) without spawning actors.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, answers are scripted | real table |
//! | **Error injection** | `return_err` | needs a failing context |
//! | **Use case** | logic *around* the client | the actor itself, full system |
//!
//! ```rust,ignore
//! let mut restaurants = MockClient::<Restaurant>::new();
//! restaurants
//!     .expect_get(RestaurantId(1))
//!     .return_ok(Some(Restaurant::new(RestaurantId(1), "Cafe")));
//!
//! let client = RestaurantClient::new(restaurants.client());
//! assert!(client.exists(RestaurantId(1)).await?);
//! restaurants.verify();
//! ```
//!
//! Expectations are consumed in order. A request that does not match the
//! next expectation (wrong kind or wrong id) panics the mock task, which the
//! caller observes as [`FrameworkError::ActorDropped`].
//!
//! For finer control, [`create_mock_client`] returns the raw receiver and the
//! `expect_*` helpers pop individual requests off it.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

type Scripted<R, T> = Result<R, FrameworkError<<T as ActorEntity>::Error>>;

/// An expected request and the scripted answer.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Scripted<Option<T>, T>,
    },
    Create {
        response: Scripted<T::Id, T>,
    },
    List {
        response: Scripted<Vec<T>, T>,
    },
    Update {
        id: T::Id,
        response: Scripted<T, T>,
    },
    Delete {
        id: T::Id,
        response: Scripted<(), T>,
    },
    Action {
        id: T::Id,
        response: Scripted<T::ActionResult, T>,
    },
    Retain {
        response: Scripted<usize, T>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: ActorEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue
        .lock()
        .expect("mock expectations poisoned")
        .push_back(expectation);
}

fn check_id<I: PartialEq + std::fmt::Debug>(actual: &I, expected: &I) {
    assert_eq!(actual, expected, "mock received a request for an unexpected id");
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
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
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .expect("mock expectations poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => {
                        check_id(&id, &expected);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::List { respond_to, .. },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) => {
                        check_id(&id, &expected);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) => {
                        check_id(&id, &expected);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        check_id(&id, &expected);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Retain { respond_to, .. },
                        Some(Expectation::Retain { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected {} request or expectation mismatch", request.kind());
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

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects a `list` or `list_where` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Expects a `retain` operation.
    pub fn expect_retain(&mut self) -> ExpectationBuilder<T, usize> {
        self.builder(|response| Expectation::Retain { response })
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Scripted<R, T>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectations poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Finishes an expectation by scripting its answer.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Scripted<R, T>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Answers the request successfully.
    pub fn return_ok(self, value: R) {
        push(&self.expectations, (self.make)(Ok(value)));
    }

    /// Answers the request with an error.
    pub fn return_err(self, error: FrameworkError<T::Error>) {
        push(&self.expectations, (self.make)(Err(error)));
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: pop requests with the `expect_*` helpers, assert
/// on their payload, then answer through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Pops the next request, expecting a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Scripted<T::Id, T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Pops the next request, expecting a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Scripted<Option<T>, T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Pops the next request, expecting an Update.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Scripted<T, T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Pops the next request, expecting a Retain. The predicate is returned so
/// the test can check which entities it would keep.
pub async fn expect_retain<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    crate::message::Filter<T>,
    oneshot::Sender<Scripted<usize, T>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Retain { keep, respond_to }) => Some((keep, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Table {
        id: u32,
        seats: u32,
    }

    #[derive(Debug)]
    struct TableCreate {
        seats: u32,
    }

    #[derive(Debug)]
    struct TableUpdate;

    #[derive(Debug)]
    enum TableAction {}

    #[derive(Debug, thiserror::Error)]
    #[error("table error")]
    struct TableError;

    #[async_trait]
    impl ActorEntity for Table {
        type Id = u32;
        type Create = TableCreate;
        type Update = TableUpdate;
        type Action = TableAction;
        type ActionResult = ();
        type Context = ();
        type Error = TableError;

        fn id(&self) -> u32 {
            self.id
        }

        fn from_create_params(id: u32, params: TableCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                seats: params.seats,
            })
        }

        async fn on_update(&mut self, _: TableUpdate, _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, action: TableAction, _: &()) -> Result<(), Self::Error> {
            match action {}
        }
    }

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<Table>(10);

        let create_task = tokio::spawn(async move { client.create(TableCreate { seats: 4 }).await });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.seats, 4);
        responder.send(Ok(7)).unwrap();

        let result = create_task.await.unwrap();
        assert!(matches!(result, Ok(7)));
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Table>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(Table { id: 1, seats: 2 }));
        mock.expect_list().return_ok(vec![Table { id: 1, seats: 2 }]);
        mock.expect_delete(1).return_err(FrameworkError::NotFound("1".into()));

        let client = mock.client();

        let id = client.create(TableCreate { seats: 2 }).await.unwrap();
        assert_eq!(id, 1);

        let fetched = client.get(1).await.unwrap();
        assert_eq!(fetched.unwrap().seats, 2);

        let all = client.list().await.unwrap();
        assert_eq!(all.len(), 1);

        let deleted = client.delete(1).await;
        assert!(matches!(deleted, Err(FrameworkError::NotFound(_))));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_rejects_unexpected_request() {
        let mut mock = MockClient::<Table>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().list().await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
