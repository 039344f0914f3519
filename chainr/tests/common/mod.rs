#![allow(dead_code)]

use chainr::{BoxError, Handler};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

// ============================================================================
// Test Argument Types
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct Request {
    pub body: String,
}

impl Request {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }
}

// ============================================================================
// Test Handlers
// ============================================================================

/// Claims one token, sleeps, then records its id in completion order.
pub struct DelayedHandler {
    pub id: &'static str,
    pub token: &'static str,
    pub delay: Duration,
    pub priority: i32,
    pub completions: Arc<Mutex<Vec<&'static str>>>,
}

impl DelayedHandler {
    pub fn new(
        id: &'static str,
        token: &'static str,
        delay_ms: u64,
        completions: &Arc<Mutex<Vec<&'static str>>>,
    ) -> Self {
        Self {
            id,
            token,
            delay: Duration::from_millis(delay_ms),
            priority: 0,
            completions: completions.clone(),
        }
    }
}

impl Handler<str, Request> for DelayedHandler {
    type Output = String;

    fn supports(&self, token: &str) -> bool {
        token == self.token
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn handle(&self, args: &Request) -> Result<String, BoxError> {
        tokio::time::sleep(self.delay).await;
        self.completions.lock().unwrap().push(self.id);
        Ok(format!("{}:{}", self.id, args.body))
    }
}

/// Echoes the request body with a prefix, for any token starting with `prefix`.
pub struct PrefixHandler {
    pub prefix: &'static str,
    pub priority: i32,
}

impl Handler<str, Request> for PrefixHandler {
    type Output = String;

    fn supports(&self, token: &str) -> bool {
        token.starts_with(self.prefix)
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    async fn handle(&self, args: &Request) -> Result<String, BoxError> {
        Ok(format!("{}{}", self.prefix, args.body))
    }
}

/// Fails with an `std::io::Error` so tests can check the error is not wrapped.
pub struct IoFailure {
    pub token: &'static str,
}

impl Handler<str, Request> for IoFailure {
    type Output = String;

    fn supports(&self, token: &str) -> bool {
        token == self.token
    }

    async fn handle(&self, _args: &Request) -> Result<String, BoxError> {
        Err(Box::new(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "intentional failure",
        )))
    }
}
