use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

// =============================================================================
// 1. THE ABSTRACTION (Entity trait with hooks, patches and actions)
// =============================================================================

/// Trait that any record must implement to be served by a [`ResourceActor`].
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;

    fn id(&self) -> &Self::Id;

    // --- Lifecycle Hooks ---

    fn on_insert(&mut self) -> Result<(), FrameworkError> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), FrameworkError>;

    /// Handle a record-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, FrameworkError>;
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Insert {
        item: T,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Serves requests until every client has been dropped.
    pub async fn run(mut self) {
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Insert { mut item, respond_to } => {
                    if let Err(e) = item.on_insert() {
                        let _ = respond_to.send(Err(e));
                        continue;
                    }
                    let id = item.id().clone();
                    self.store.insert(id.clone(), item);
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(patch) {
                            let _ = respond_to.send(Err(e));
                            continue;
                        }
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item.handle_action(action);
                        let _ = respond_to.send(result);
                    } else {
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }
        debug!("ResourceActor stopped");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self, item), fields(id = %item.id()))]
    pub async fn insert(&self, item: T) -> Result<T::Id, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Insert { item, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Update { id, patch, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    #[instrument(skip(self))]
    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action { id, action, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: u64,
        units: u32,
    }

    #[derive(Debug)]
    enum ShelfAction {
        Take(u32),
    }

    impl Entity for Shelf {
        type Id = u64;
        type Patch = u32;
        type Action = ShelfAction;
        type ActionResult = u32;

        fn id(&self) -> &u64 {
            &self.id
        }

        fn on_update(&mut self, units: u32) -> Result<(), FrameworkError> {
            self.units = units;
            Ok(())
        }

        fn handle_action(&mut self, action: ShelfAction) -> Result<u32, FrameworkError> {
            match action {
                ShelfAction::Take(n) if n <= self.units => {
                    self.units -= n;
                    Ok(self.units)
                }
                ShelfAction::Take(n) => Err(FrameworkError::Rejected(format!("only {} left, {} asked", self.units, n))),
            }
        }
    }

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let (actor, client) = ResourceActor::<Shelf>::new(10);
        tokio::spawn(actor.run());

        let id = client.insert(Shelf { id: 7, units: 3 }).await.unwrap();
        assert_eq!(id, 7);

        let left = client.perform_action(7, ShelfAction::Take(2)).await.unwrap();
        assert_eq!(left, 1);

        let refused = client.perform_action(7, ShelfAction::Take(2)).await;
        assert!(matches!(refused, Err(FrameworkError::Rejected(_))));

        let shelf = client.update(7, 10).await.unwrap();
        assert_eq!(shelf.units, 10);

        assert_eq!(client.get(8).await.unwrap(), None);
        assert_eq!(
            client.perform_action(8, ShelfAction::Take(1)).await.unwrap_err(),
            FrameworkError::NotFound("8".to_string())
        );
    }
}
