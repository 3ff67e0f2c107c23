use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, Changes, and Filters)
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Clone + Send + Sync + Display + Debug;
    type Changes: Send + Sync + Debug;
    type Filter: Send + Sync + Debug;

    /// Get the ID of the entity
    fn id(&self) -> &Self::Id;

    /// Whether this entity is selected by the given filter
    fn matches(&self, filter: &Self::Filter) -> bool;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), String> { Ok(()) }
    fn on_update(&mut self, changes: Self::Changes) -> Result<(), String>;
    fn on_delete(&self) -> Result<(), String> { Ok(()) }
}

/// Failures reported by the resource actor and its client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Rejected by entity hook: {0}")]
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
    Create {
        item: T,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: Option<T::Filter>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        changes: T::Changes,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Count {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns the collection. Items are kept in insertion order and every lookup is
/// a linear scan.
pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: Vec::new(),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        info!("Actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { item, respond_to } => {
                    let _ = respond_to.send(self.handle_create(item));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.position(&id).map(|index| self.store[index].clone());
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_list(filter.as_ref())));
                }
                ResourceRequest::Update { id, changes, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, changes));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }
        info!(remaining = self.store.len(), "Actor stopped");
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.store.iter().position(|item| item.id() == id)
    }

    #[instrument(fields(id = %item.id()), skip(self, item))]
    fn handle_create(&mut self, mut item: T) -> Result<T::Id, FrameworkError> {
        let id = item.id().clone();
        if self.position(&id).is_some() {
            warn!("Duplicate id rejected");
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }
        item.on_create().map_err(FrameworkError::Rejected)?;
        self.store.push(item);
        debug!(size = self.store.len(), "Item appended");
        Ok(id)
    }

    fn handle_list(&self, filter: Option<&T::Filter>) -> Vec<T> {
        match filter {
            Some(filter) => self
                .store
                .iter()
                .filter(|item| item.matches(filter))
                .cloned()
                .collect(),
            None => self.store.clone(),
        }
    }

    #[instrument(skip(self, changes))]
    fn handle_update(&mut self, id: T::Id, changes: T::Changes) -> Result<T, FrameworkError> {
        let index = self
            .position(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        let item = &mut self.store[index];
        item.on_update(changes).map_err(FrameworkError::Rejected)?;
        debug!("Item updated");
        Ok(item.clone())
    }

    #[instrument(skip(self))]
    fn handle_delete(&mut self, id: T::Id) -> Result<(), FrameworkError> {
        let index = self
            .position(&id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
        self.store[index].on_delete().map_err(FrameworkError::Rejected)?;
        self.store.remove(index);
        debug!(size = self.store.len(), "Item removed");
        Ok(())
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

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, item: T) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { item, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self, filter: Option<T::Filter>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { filter, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, changes: T::Changes) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, changes, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn count(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Count { respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        text: String,
        locked: bool,
    }

    #[derive(Debug)]
    struct NoteChanges {
        text: String,
    }

    impl Entity for Note {
        type Id = u32;
        type Changes = NoteChanges;
        type Filter = String;

        fn id(&self) -> &u32 { &self.id }

        fn matches(&self, filter: &String) -> bool {
            self.text.contains(filter.as_str())
        }

        fn on_update(&mut self, changes: NoteChanges) -> Result<(), String> {
            if self.locked {
                return Err("note is locked".to_string());
            }
            self.text = changes.text;
            Ok(())
        }

        fn on_delete(&self) -> Result<(), String> {
            if self.locked { Err("note is locked".to_string()) } else { Ok(()) }
        }
    }

    fn note(id: u32, text: &str) -> Note {
        Note { id, text: text.to_string(), locked: false }
    }

    fn start() -> ResourceClient<Note> {
        let (actor, client) = ResourceActor::new(10);
        tokio::spawn(actor.run());
        client
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let client = start();
        for (id, text) in [(3, "c"), (1, "a"), (2, "b")] {
            client.create(note(id, text)).await.unwrap();
        }

        let ids: Vec<u32> = client.list(None).await.unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_list_applies_filter() {
        let client = start();
        client.create(note(1, "apple")).await.unwrap();
        client.create(note(2, "banana")).await.unwrap();
        client.create(note(3, "pineapple")).await.unwrap();

        let ids: Vec<u32> = client
            .list(Some("apple".to_string()))
            .await
            .unwrap()
            .iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let client = start();
        client.create(note(1, "first")).await.unwrap();

        let result = client.create(note(1, "second")).await;
        assert_eq!(result, Err(FrameworkError::AlreadyExists("1".to_string())));
        assert_eq!(client.count().await.unwrap(), 1);
        assert_eq!(client.get(1).await.unwrap().unwrap().text, "first");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_item() {
        let client = start();

        let updated = client.update(9, NoteChanges { text: "x".into() }).await;
        assert_eq!(updated, Err(FrameworkError::NotFound("9".to_string())));

        let deleted = client.delete(9).await;
        assert_eq!(deleted, Err(FrameworkError::NotFound("9".to_string())));
    }

    #[tokio::test]
    async fn test_hooks_can_reject() {
        let client = start();
        client.create(Note { id: 1, text: "frozen".into(), locked: true }).await.unwrap();

        let updated = client.update(1, NoteChanges { text: "thawed".into() }).await;
        assert!(matches!(updated, Err(FrameworkError::Rejected(_))));

        let deleted = client.delete(1).await;
        assert!(matches!(deleted, Err(FrameworkError::Rejected(_))));
        assert_eq!(client.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_serialized() {
        let client = start();
        let mut handles = Vec::new();
        for id in 0..50 {
            let client = client.clone();
            handles.push(tokio::spawn(async move { client.create(note(id, "n")).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(client.count().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn test_client_reports_closed_actor() {
        let (actor, client) = ResourceActor::<Note>::new(1);
        drop(actor);

        assert_eq!(client.count().await, Err(FrameworkError::ActorClosed));
    }
}
