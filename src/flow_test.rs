use super::*;
use crate::auth::{AuthError, LoginResponse};
use crate::state::AuthToken;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

// =========================================================================
// MockAuth
// =========================================================================

/// Scripted [`AuthClient`]. Optionally holds a state receiver so each call
/// can record what the flow was showing at the moment the network ran.
struct MockAuth {
    responses: Mutex<Vec<Result<LoginResponse, AuthError>>>,
    calls: AtomicUsize,
    observed: Mutex<Option<watch::Receiver<LoginState>>>,
    seen_at_call: Mutex<Vec<LoginState>>,
}

impl MockAuth {
    fn new(responses: Vec<Result<LoginResponse, AuthError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: AtomicUsize::new(0),
            observed: Mutex::new(None),
            seen_at_call: Mutex::new(Vec::new()),
        }
    }

    fn ok(token: &str) -> Self {
        Self::new(vec![Ok(LoginResponse { token: AuthToken::new(token) })])
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn watch_states(&self, rx: watch::Receiver<LoginState>) {
        *self.observed.lock().expect("mock mutex should lock") = Some(rx);
    }

    fn seen_at_call(&self) -> Vec<LoginState> {
        self.seen_at_call.lock().expect("mock mutex should lock").clone()
    }
}

#[async_trait::async_trait]
impl AuthClient for MockAuth {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(rx) = self.observed.lock().expect("mock mutex should lock").as_ref() {
            self.seen_at_call
                .lock()
                .expect("mock mutex should lock")
                .push(rx.borrow().clone());
        }
        let mut responses = self.responses.lock().expect("mock mutex should lock");
        if responses.is_empty() {
            Err(AuthError::Transport("mock exhausted".into()))
        } else {
            responses.remove(0)
        }
    }
}

fn flow_with(mock: &Arc<MockAuth>) -> LoginFlow {
    LoginFlow::new(mock.clone(), EmailPattern::default())
}

fn valid_creds() -> Credentials {
    Credentials::new("user@example.com", "hunter2hunter2")
}

// =========================================================================
// Validation short-circuits
// =========================================================================

#[tokio::test]
async fn starts_in_initial() {
    let mock = Arc::new(MockAuth::ok("abc123"));
    let flow = flow_with(&mock);
    assert_eq!(flow.current(), LoginState::Initial);
}

#[tokio::test]
async fn blank_email_stops_before_the_network() {
    let mock = Arc::new(MockAuth::ok("abc123"));
    let flow = flow_with(&mock);

    flow.submit(Credentials::new("   ", "hunter2hunter2")).await;

    assert_eq!(flow.current(), LoginState::EmailValidationError("Email cannot be empty".into()));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn malformed_email_stops_before_the_network() {
    let mock = Arc::new(MockAuth::ok("abc123"));
    let flow = flow_with(&mock);

    flow.submit(Credentials::new("not-an-email", "hunter2hunter2")).await;

    assert_eq!(flow.current(), LoginState::EmailValidationError("Invalid email address".into()));
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn blank_password_stops_before_the_network() {
    let mock = Arc::new(MockAuth::ok("abc123"));
    let flow = flow_with(&mock);

    flow.submit(Credentials::new("user@example.com", "  ")).await;

    assert_eq!(
        flow.current(),
        LoginState::PasswordValidationError("Password cannot be empty".into())
    );
    assert_eq!(mock.calls(), 0);
}

#[tokio::test]
async fn out_of_window_password_stops_before_the_network() {
    let mock = Arc::new(MockAuth::ok("abc123"));
    let flow = flow_with(&mock);

    flow.submit(Credentials::new("user@example.com", "seven77")).await;
    assert_eq!(
        flow.current(),
        LoginState::PasswordValidationError("Password must be 8 to 20 characters long!".into())
    );

    flow.submit(Credentials::new("user@example.com", "x".repeat(21))).await;
    assert_eq!(
        flow.current(),
        LoginState::PasswordValidationError("Password must be 8 to 20 characters long!".into())
    );
    assert_eq!(mock.calls(), 0);
}

// =========================================================================
// The network leg
// =========================================================================

#[tokio::test]
async fn success_passes_through_loading_then_lands_on_success() {
    let mock = Arc::new(MockAuth::ok("abc123"));
    let flow = flow_with(&mock);
    mock.watch_states(flow.subscribe());

    flow.submit(valid_creds()).await;

    // The client ran exactly once, and Loading was current while it did.
    assert_eq!(mock.calls(), 1);
    assert_eq!(mock.seen_at_call(), vec![LoginState::Loading]);
    assert_eq!(flow.current(), LoginState::LoginSuccess(AuthToken::new("abc123")));
}

#[tokio::test]
async fn server_rejection_surfaces_the_decoded_message() {
    let mock = Arc::new(MockAuth::new(vec![Err(AuthError::Server {
        status: 401,
        message: "bad credentials".into(),
    })]));
    let flow = flow_with(&mock);

    flow.submit(valid_creds()).await;

    assert_eq!(flow.current(), LoginState::LoginFailure("bad credentials".into()));
}

#[tokio::test]
async fn transport_failure_uses_the_generic_message() {
    let mock = Arc::new(MockAuth::new(vec![Err(AuthError::Transport("connection refused".into()))]));
    let flow = flow_with(&mock);

    flow.submit(valid_creds()).await;

    assert_eq!(flow.current(), LoginState::LoginFailure("Something went wrong!".into()));
}

#[tokio::test]
async fn subscriber_observes_the_terminal_state() {
    let mock = Arc::new(MockAuth::ok("abc123"));
    let flow = flow_with(&mock);
    let mut rx = flow.subscribe();

    flow.submit(valid_creds()).await;

    assert!(rx.has_changed().expect("sender alive"));
    assert!(rx.borrow_and_update().is_terminal());
}

// =========================================================================
// Supersession
// =========================================================================

#[tokio::test]
async fn stale_attempt_emissions_are_dropped() {
    let mock = Arc::new(MockAuth::ok("abc123"));
    let flow = flow_with(&mock);

    let first = flow.begin_attempt();
    let second = flow.begin_attempt();

    assert!(!flow.emit(first, LoginState::Loading));
    assert_eq!(flow.current(), LoginState::Initial);

    assert!(flow.emit(second, LoginState::Loading));
    assert_eq!(flow.current(), LoginState::Loading);
}

#[tokio::test]
async fn a_new_attempt_recovers_from_a_validation_error() {
    let mock = Arc::new(MockAuth::ok("abc123"));
    let flow = flow_with(&mock);

    flow.submit(Credentials::new("", "hunter2hunter2")).await;
    assert!(!flow.current().is_terminal());

    flow.submit(valid_creds()).await;
    assert_eq!(flow.current(), LoginState::LoginSuccess(AuthToken::new("abc123")));
}
