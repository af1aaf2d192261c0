//! Handle for communicating with the search controller actor.

use tokio::sync::{mpsc, oneshot, watch};

use super::ControllerError;
use super::commands::ControllerCommand;
use crate::state::ViewSnapshot;

/// Handle for communicating with the search controller actor.
///
/// Cheap to clone and safe to share between request handlers. Reads never
/// reach the actor: they copy the latest published snapshot.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    sender: mpsc::Sender<ControllerCommand>,
    snapshots: watch::Receiver<ViewSnapshot>,
}

impl ControllerHandle {
    pub(crate) fn new(
        sender: mpsc::Sender<ControllerCommand>,
        snapshots: watch::Receiver<ViewSnapshot>,
    ) -> Self {
        Self { sender, snapshots }
    }

    /// Reports new raw input.
    ///
    /// The input shows up in the next snapshot immediately; a fetch follows
    /// once the input has been quiet for the debounce window.
    ///
    /// # Errors
    /// - `ControllerError::Stopped` - Controller has shut down
    pub async fn set_search_term(&self, raw: impl Into<String>) -> Result<(), ControllerError> {
        self.send(ControllerCommand::SetSearchTerm { raw: raw.into() })
            .await
    }

    /// Asks the controller to reload the trending list.
    ///
    /// # Errors
    /// - `ControllerError::Stopped` - Controller has shut down
    pub async fn refresh_trending(&self) -> Result<(), ControllerError> {
        self.send(ControllerCommand::RefreshTrending).await
    }

    /// Stops the controller and waits for it to exit.
    ///
    /// # Errors
    /// - `ControllerError::Stopped` - Controller had already shut down
    pub async fn shutdown(&self) -> Result<(), ControllerError> {
        let (responder, rx) = oneshot::channel();
        self.send(ControllerCommand::Shutdown { responder }).await?;
        rx.await.map_err(|_| ControllerError::Stopped)
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.snapshots.clone()
    }

    /// Waits until a published snapshot satisfies `predicate` and returns it.
    ///
    /// # Errors
    /// - `ControllerError::Stopped` - Controller exited before the predicate held
    pub async fn wait_for<F>(&self, mut predicate: F) -> Result<ViewSnapshot, ControllerError>
    where
        F: FnMut(&ViewSnapshot) -> bool,
    {
        let mut receiver = self.snapshots.clone();
        let snapshot = receiver
            .wait_for(|snapshot| predicate(snapshot))
            .await
            .map_err(|_| ControllerError::Stopped)?;
        Ok(snapshot.clone())
    }

    async fn send(&self, command: ControllerCommand) -> Result<(), ControllerError> {
        self.sender
            .send(command)
            .await
            .map_err(|_| ControllerError::Stopped)
    }
}
