//! Terminal front end for the login flow.
//!
//! Plays the part a login screen would: skip the prompt when a token is
//! already stored, render each state as a line of text, persist the token
//! on success, and return to the prompt after a rejection.

use std::io::Write as _;
use std::sync::Arc;

use loginflow::auth::HttpAuthClient;
use loginflow::config::AuthConfig;
use loginflow::flow::LoginFlow;
use loginflow::screen::LoginScreen;
use loginflow::state::{Credentials, LoginState};
use loginflow::store::FileStore;
use loginflow::validate::EmailPattern;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AuthConfig::from_env().expect("auth config required");
    let client = HttpAuthClient::new(&config.base_url, config.timeouts).expect("HTTP client init failed");

    let flow = Arc::new(LoginFlow::new(Arc::new(client), EmailPattern::default()));
    let store = Arc::new(FileStore::new(config.token_path.clone()));
    let screen = LoginScreen::new(flow, store);

    tracing::info!(base_url = %config.base_url, "login flow ready");

    if screen.already_authenticated().await {
        println!("Already signed in. Remove {} to log in again.", config.token_path.display());
        return;
    }

    // A subscriber renders transient states; terminal states are handled
    // after submit returns.
    let mut rx = screen.flow().subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            if matches!(*rx.borrow_and_update(), LoginState::Loading) {
                println!("Signing in...");
            }
        }
    });

    loop {
        let email = prompt("email: ");
        let password = prompt("password: ");

        screen.flow().submit(Credentials::new(email, password)).await;

        let state = screen.flow().current();
        screen.handle_state(&state).await;

        match state {
            LoginState::LoginSuccess(_) => {
                println!("Signed in.");
                break;
            }
            LoginState::EmailValidationError(message)
            | LoginState::PasswordValidationError(message)
            | LoginState::LoginFailure(message) => println!("{message}"),
            LoginState::Initial | LoginState::Loading => {}
        }
    }
}

fn prompt(label: &str) -> String {
    print!("{label}");
    std::io::stdout().flush().expect("stdout flush");

    let mut line = String::new();
    std::io::stdin().read_line(&mut line).expect("stdin read");
    line.trim_end_matches(['\r', '\n']).to_owned()
}
