//! Scripted routes for the fake backend
//!
//! Provides a builder-style API for describing what the server does
//! on each request:
//!
//! ```ignore
//! let script = ScriptBuilder::new()
//!     .route("GET", "/gmail/list", Behavior::json(json!({"emails": []})))
//!     .route("POST", "/gmail/delete", Behavior::status(500, "boom"))
//!     .build();
//! ```
//!
//! Each route holds a queue of behaviors consumed one per request;
//! the final behavior repeats once the queue is down to one entry, so
//! a scripted sequence like `[abort, abort, json]` models "fail twice
//! then recover" and a single entry models a steady response.

use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// What the server does for one request to a route.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Respond 200 with the given JSON body.
    Json(Value),
    /// Respond 200 with the given JSON body after a delay.
    DelayedJson(Duration, Value),
    /// Respond with the given status and a plain body.
    Status(u16, String),
    /// Read the request, then close the connection without
    /// responding. The client sees an aborted connection.
    Abort,
    /// Read the request and never respond. The client times out.
    Hang,
}

impl Behavior {
    pub fn json(body: Value) -> Self {
        Self::Json(body)
    }

    pub fn delayed_json(delay: Duration, body: Value) -> Self {
        Self::DelayedJson(delay, body)
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self::Status(status, body.to_string())
    }
}

/// Scripted behavior queues keyed by `(method, path)`.
#[derive(Debug, Default)]
pub struct Script {
    routes: HashMap<(String, String), VecDeque<Behavior>>,
}

impl Script {
    /// Take the next behavior for a route. The last queued behavior
    /// repeats; unknown routes get a 404.
    pub fn next_behavior(&mut self, method: &str, path: &str) -> Behavior {
        let key = (method.to_string(), path.to_string());
        match self.routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front().expect("non-empty queue"),
            Some(queue) => queue
                .front()
                .cloned()
                .unwrap_or_else(|| Behavior::status(404, "no behavior scripted")),
            None => Behavior::status(404, "no route scripted"),
        }
    }
}

/// Builder for a [`Script`], one `.route()` call per queued behavior.
pub struct ScriptBuilder {
    script: Script,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self {
            script: Script::default(),
        }
    }

    /// Queue a behavior for `method path`. Repeated calls for the
    /// same route append to its queue.
    pub fn route(mut self, method: &str, path: &str, behavior: Behavior) -> Self {
        self.script
            .routes
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back(behavior);
        self
    }

    /// Consume the builder and return the finished [`Script`].
    pub fn build(self) -> Script {
        self.script
    }
}
