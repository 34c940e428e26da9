use std::fmt::Debug;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

use crate::error::StoreError;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// State container driven purely by dispatched actions.
///
/// Callers never touch the state directly: they send an action and the store
/// task applies it with [`Reducer::reduce`].
pub trait Reducer: Send + 'static {
    type Action: Send + Debug + 'static;
    type State: Clone + Send + Debug + 'static;

    /// Name used in tracing spans.
    const NAME: &'static str;

    fn reduce(&mut self, action: Self::Action);

    fn state(&self) -> Self::State;
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

#[derive(Debug)]
pub enum StoreRequest<R: Reducer> {
    Dispatch {
        action: R::Action,
    },
    GetState {
        respond_to: oneshot::Sender<R::State>,
    },
}

// =============================================================================
// 3. THE GENERIC STORE TASK
// =============================================================================

pub struct StoreActor<R: Reducer> {
    receiver: mpsc::Receiver<StoreRequest<R>>,
    reducer: R,
}

impl<R: Reducer> StoreActor<R> {
    pub fn new(buffer_size: usize, reducer: R) -> (Self, StoreClient<R>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, reducer };
        (actor, StoreClient::new(sender))
    }

    /// Runs until every client has been dropped.
    #[instrument(name = "store", fields(store = R::NAME), skip(self))]
    pub async fn run(mut self) {
        info!("Store starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Dispatch { action } => {
                    debug!(?action, "Applying action");
                    self.reducer.reduce(action);
                }
                StoreRequest::GetState { respond_to } => {
                    let _ = respond_to.send(self.reducer.state());
                }
            }
        }
        info!("Store stopped");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct StoreClient<R: Reducer> {
    sender: mpsc::Sender<StoreRequest<R>>,
}

impl<R: Reducer> Clone for StoreClient<R> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<R: Reducer> StoreClient<R> {
    pub fn new(sender: mpsc::Sender<StoreRequest<R>>) -> Self {
        Self { sender }
    }

    /// Fire-and-forget: the store applies the action in arrival order.
    pub async fn dispatch(&self, action: R::Action) -> Result<(), StoreError> {
        self.sender
            .send(StoreRequest::Dispatch { action })
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Store closed".to_string()))
    }

    pub async fn get_state(&self) -> Result<R::State, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::GetState { respond_to })
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Store closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::ActorCommunicationError("Store dropped".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        total: i64,
    }

    #[derive(Debug)]
    enum CounterAction {
        Add(i64),
        Reset,
    }

    impl Reducer for Counter {
        type Action = CounterAction;
        type State = i64;

        const NAME: &'static str = "counter";

        fn reduce(&mut self, action: CounterAction) {
            match action {
                CounterAction::Add(n) => self.total += n,
                CounterAction::Reset => self.total = 0,
            }
        }

        fn state(&self) -> i64 {
            self.total
        }
    }

    #[tokio::test]
    async fn test_actions_apply_in_order() {
        let (actor, client) = StoreActor::new(8, Counter::default());
        let handle = tokio::spawn(actor.run());

        client.dispatch(CounterAction::Add(5)).await.unwrap();
        client.dispatch(CounterAction::Reset).await.unwrap();
        client.dispatch(CounterAction::Add(2)).await.unwrap();
        assert_eq!(client.get_state().await.unwrap(), 2);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_dispatch_after_store_stopped_fails() {
        let (actor, client) = StoreActor::new(1, Counter::default());
        drop(actor);

        let err = client.dispatch(CounterAction::Add(1)).await.unwrap_err();
        assert_eq!(err, StoreError::ActorCommunicationError("Store closed".into()));
    }
}
