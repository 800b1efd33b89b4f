//! Executes login commands against an auth backend.

use crate::auth::AuthClient;
use crate::auth::error::AuthError;
use crate::error_classifier::ErrorClassifier;
use crate::events::EventType;
use crate::logging::LogLevel;
use crate::login::{AuthEvent, LoginCommand};
use crate::workers::core::EventSender;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Runs each [`LoginCommand`] on its own task and reports the outcome as an
/// [`AuthEvent`]. Requests cannot be cancelled once started.
#[derive(Clone)]
pub struct AuthWorker {
    client: Arc<dyn AuthClient>,
    results: mpsc::Sender<AuthEvent>,
    events: EventSender,
    classifier: ErrorClassifier,
}

impl AuthWorker {
    pub fn new(
        client: Arc<dyn AuthClient>,
        results: mpsc::Sender<AuthEvent>,
        events: EventSender,
    ) -> Self {
        Self {
            client,
            results,
            events,
            classifier: ErrorClassifier::new(),
        }
    }

    /// Every command produces exactly one [`AuthEvent`], even when the
    /// request task panics.
    pub fn execute(&self, command: LoginCommand) -> JoinHandle<()> {
        let worker = self.clone();
        tokio::spawn(async move {
            let request_task = {
                let worker = worker.clone();
                let command = command.clone();
                tokio::spawn(async move { worker.run(command).await })
            };
            let outcome = match request_task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    log::error!("Auth request {:?} aborted: {}", command.request(), e);
                    let error = AuthError::Aborted(e.to_string());
                    worker
                        .events
                        .send_auth_event(
                            format!("Auth request failed: {}", error),
                            EventType::Error,
                            worker.classifier.classify_auth_error(&error),
                        )
                        .await;
                    failed(&command, error)
                }
            };
            let _ = worker.results.send(outcome).await;
        })
    }

    async fn run(&self, command: LoginCommand) -> AuthEvent {
        match command {
            LoginCommand::RequestOtp { request, phone } => {
                self.events
                    .send_auth_event(
                        format!("Sending OTP to {}", phone.masked()),
                        EventType::Waiting,
                        LogLevel::Info,
                    )
                    .await;
                let result = self.client.request_otp(&phone).await;
                match &result {
                    Ok(_) => {
                        self.events
                            .send_auth_event(
                                format!("OTP sent to {}", phone.masked()),
                                EventType::Success,
                                LogLevel::Info,
                            )
                            .await
                    }
                    Err(e) => {
                        self.events
                            .send_auth_event(
                                format!("Failed to send OTP: {}", e),
                                EventType::Error,
                                self.classifier.classify_auth_error(e),
                            )
                            .await
                    }
                }
                AuthEvent::OtpDispatched { request, result }
            }
            LoginCommand::VerifyOtp {
                request,
                dispatch,
                code,
            } => {
                self.events
                    .send_auth_event(
                        "Verifying OTP".to_string(),
                        EventType::Waiting,
                        LogLevel::Info,
                    )
                    .await;
                let result = self.client.verify_otp(&dispatch, &code).await;
                match &result {
                    Ok(session) => {
                        self.events
                            .send_auth_event(
                                format!("Authenticated by {}", session.authority),
                                EventType::Success,
                                LogLevel::Info,
                            )
                            .await
                    }
                    Err(e) => {
                        self.events
                            .send_auth_event(
                                format!("Verification failed: {}", e),
                                EventType::Error,
                                self.classifier.classify_auth_error(e),
                            )
                            .await
                    }
                }
                AuthEvent::OtpVerified { request, result }
            }
        }
    }
}

/// The response a command gets when its request never completed.
fn failed(command: &LoginCommand, error: AuthError) -> AuthEvent {
    match command {
        LoginCommand::RequestOtp { request, .. } => AuthEvent::OtpDispatched {
            request: *request,
            result: Err(error),
        },
        LoginCommand::VerifyOtp { request, .. } => AuthEvent::OtpVerified {
            request: *request,
            result: Err(error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MockAuthClient;
    use crate::auth::SimulatedAuthClient;
    use crate::auth::session::DispatchId;
    use crate::events::Event;
    use crate::login::LoginFlow;
    use std::time::{Duration, Instant};

    fn worker(
        client: impl AuthClient + 'static,
    ) -> (
        AuthWorker,
        mpsc::Receiver<AuthEvent>,
        mpsc::Receiver<Event>,
    ) {
        let (result_tx, result_rx) = mpsc::channel(8);
        let (event_tx, event_rx) = mpsc::channel(32);
        let worker = AuthWorker::new(Arc::new(client), result_tx, EventSender::new(event_tx));
        (worker, result_rx, event_rx)
    }

    #[tokio::test]
    async fn dispatch_outcome_is_reported_with_request_id() {
        let mut client = MockAuthClient::new();
        client
            .expect_request_otp()
            .times(1)
            .returning(|_| Ok(DispatchId::new("d-1")));
        let (worker, mut results, mut events) = worker(client);

        let mut flow = LoginFlow::new();
        flow.set_phone_input("9876543210");
        let command = flow.submit_phone().unwrap();
        let request = command.request();
        worker.execute(command).await.unwrap();

        let outcome = results.recv().await.unwrap();
        assert_eq!(outcome.request(), request);
        assert!(matches!(outcome, AuthEvent::OtpDispatched { result: Ok(_), .. }));

        let first = events.recv().await.unwrap();
        assert_eq!(first.event_type, EventType::Waiting);
        assert!(first.msg.contains("******3210"));
        let second = events.recv().await.unwrap();
        assert_eq!(second.event_type, EventType::Success);
    }

    #[tokio::test]
    async fn verification_failure_is_classified() {
        let mut client = MockAuthClient::new();
        client
            .expect_request_otp()
            .returning(|_| Ok(DispatchId::new("d-1")));
        client
            .expect_verify_otp()
            .returning(|_, _| Err(AuthError::InvalidCode));
        let (worker, mut results, mut events) = worker(client);

        let mut flow = LoginFlow::new();
        flow.set_phone_input("9876543210");
        worker.execute(flow.submit_phone().unwrap());
        flow.handle_auth_event(results.recv().await.unwrap(), Instant::now());

        worker.execute(flow.paste_otp(0, "123456").unwrap());
        flow.handle_auth_event(results.recv().await.unwrap(), Instant::now());
        assert_eq!(
            flow.error().map(ToString::to_string).as_deref(),
            Some("Invalid OTP. Please try again.")
        );

        let mut last = None;
        while let Ok(event) = events.try_recv() {
            last = Some(event);
        }
        let last = last.unwrap();
        assert_eq!(last.event_type, EventType::Error);
        assert_eq!(last.log_level, LogLevel::Warn);
    }

    #[tokio::test]
    /// A backend that panics still answers the request, so the flow leaves loading.
    async fn panicking_backend_yields_an_error_for_the_same_request() {
        let mut client = MockAuthClient::new();
        client
            .expect_request_otp()
            .returning(|_| panic!("backend exploded"));
        let (worker, mut results, mut events) = worker(client);

        let mut flow = LoginFlow::new();
        flow.set_phone_input("9876543210");
        let command = flow.submit_phone().unwrap();
        let request = command.request();
        worker.execute(command).await.unwrap();

        let outcome = results.recv().await.unwrap();
        assert_eq!(outcome.request(), request);
        assert!(matches!(
            outcome,
            AuthEvent::OtpDispatched {
                result: Err(AuthError::Aborted(_)),
                ..
            }
        ));

        flow.handle_auth_event(outcome, Instant::now());
        assert!(!flow.is_loading());
        assert!(flow.phone_entry().is_some());
        assert!(
            flow.error()
                .map(ToString::to_string)
                .is_some_and(|e| e.starts_with("Failed to send OTP"))
        );

        let mut last = None;
        while let Ok(event) = events.try_recv() {
            last = Some(event);
        }
        assert_eq!(last.unwrap().event_type, EventType::Error);
    }

    #[tokio::test(start_paused = true)]
    /// Phone "9876543210", five typed digits plus a sixth, simulated backend:
    /// the flow ends authenticated once both simulated delays have passed.
    async fn end_to_end_login_with_simulated_backend() {
        let (worker, mut results, _events) =
            worker(SimulatedAuthClient::new(Duration::from_millis(1500)));
        let mut flow = LoginFlow::new();

        flow.set_phone_input("9876543210");
        worker.execute(flow.submit_phone().unwrap());
        assert!(flow.is_loading());
        let started = tokio::time::Instant::now();
        flow.handle_auth_event(results.recv().await.unwrap(), Instant::now());
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(flow.resend_remaining(), 30);

        for (slot, digit) in ["1", "2", "3", "4", "5"].into_iter().enumerate() {
            assert!(flow.input_otp(slot, digit).is_none());
        }
        let verify = flow.input_otp(5, "6").expect("auto-submit");
        worker.execute(verify);

        let session = flow.handle_auth_event(results.recv().await.unwrap(), Instant::now());
        assert!(session.is_some());
        assert!(flow.is_authenticated());
    }
}
