//! Session setup and initialization

use crate::auth::{AuthClient, HttpAuthClient, SimulatedAuthClient, error::AuthError};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::Event;
use crate::login::AuthEvent;
use crate::workers::auth::AuthWorker;
use crate::workers::core::EventSender;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Executes login commands against the auth backend
    pub auth_worker: AuthWorker,
    /// Outcomes of login commands
    pub auth_receiver: mpsc::Receiver<AuthEvent>,
    /// Activity events from the worker
    pub event_receiver: mpsc::Receiver<Event>,
    /// Sender for activity originating outside the worker
    pub events: EventSender,
    /// Auth backend in use
    pub environment: Environment,
}

/// Picks the auth adapter for `env`. Environments without an auth URL use the
/// in-process simulator with the given latency.
pub fn build_auth_client(
    env: Environment,
    latency: Duration,
) -> Result<Arc<dyn AuthClient>, AuthError> {
    match env.auth_url() {
        None => Ok(Arc::new(SimulatedAuthClient::new(latency))),
        Some(url) => Ok(Arc::new(HttpAuthClient::new(env, url)?)),
    }
}

/// Sets up the channels and worker shared by TUI and headless modes.
///
/// # Arguments
/// * `env` - Auth backend to talk to
/// * `latency` - Delay applied by the simulated backend
pub fn setup_session(env: Environment, latency: Duration) -> Result<SessionData, AuthError> {
    let client = build_auth_client(env, latency)?;
    log::debug!("Using auth backend {:?}", client.environment());

    let (auth_sender, auth_receiver) = mpsc::channel::<AuthEvent>(EVENT_QUEUE_SIZE);
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);
    let events = EventSender::new(event_sender);
    let auth_worker = AuthWorker::new(client, auth_sender, events.clone());

    Ok(SessionData {
        auth_worker,
        auth_receiver,
        event_receiver,
        events,
        environment: env,
    })
}
