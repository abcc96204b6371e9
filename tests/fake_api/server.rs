//! In-process fake backend server.
//!
//! Binds to an ephemeral localhost port, accepts connections, parses
//! one request per connection, records it (hit counters and request
//! bodies are inspectable from tests), and answers according to the
//! scripted [`Script`](super::script::Script).

use super::http::{read_request, reason_phrase, write_response};
use super::script::{Behavior, Script};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};

/// Shared server state: the behavior script plus everything the
/// server has observed.
struct State {
    script: Mutex<Script>,
    hits: Mutex<HashMap<(String, String), usize>>,
    bodies: Mutex<HashMap<(String, String), Vec<Value>>>,
}

/// A fake backend running on localhost with an OS-assigned port.
pub struct FakeApiServer {
    port: u16,
    state: Arc<State>,
    /// Handle to the accept loop so it lives as long as the server.
    _handle: tokio::task::JoinHandle<()>,
}

impl FakeApiServer {
    /// Start a server answering per the given script.
    ///
    /// Binds `127.0.0.1:0` (the OS picks a free port) and spawns the
    /// accept loop; each connection gets its own task. The server
    /// runs until the `FakeApiServer` is dropped.
    pub async fn start(script: Script) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind to ephemeral port");
        let port = listener.local_addr().unwrap().port();

        let state = Arc::new(State {
            script: Mutex::new(script),
            hits: Mutex::new(HashMap::new()),
            bodies: Mutex::new(HashMap::new()),
        });

        let accept_state = Arc::clone(&state);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _addr)) = listener.accept().await else {
                    break;
                };
                let state = Arc::clone(&accept_state);
                tokio::spawn(async move {
                    handle_connection(stream, &state).await;
                });
            }
        });

        Self {
            port,
            state,
            _handle: handle,
        }
    }

    /// Base URL for pointing a client at this server.
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// How many requests have hit `method path`.
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// The most recent JSON request body received on `method path`.
    pub fn last_body(&self, method: &str, path: &str) -> Option<Value> {
        self.state
            .bodies
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .and_then(|bodies| bodies.last().cloned())
    }
}

/// Handle one connection: parse the request, record it, then act out
/// the scripted behavior.
async fn handle_connection(stream: TcpStream, state: &State) {
    let mut reader = BufReader::new(stream);

    let Some(request) = read_request(&mut reader).await else {
        return;
    };
    let key = (request.method.clone(), request.path.clone());

    *state.hits.lock().unwrap().entry(key.clone()).or_insert(0) += 1;
    if let Ok(body) = serde_json::from_slice::<Value>(&request.body) {
        state
            .bodies
            .lock()
            .unwrap()
            .entry(key)
            .or_default()
            .push(body);
    }

    let behavior = state
        .script
        .lock()
        .unwrap()
        .next_behavior(&request.method, &request.path);

    match behavior {
        Behavior::Json(body) => {
            let body = body.to_string();
            let _ = write_response(&mut reader, 200, "OK", body.as_bytes()).await;
        }
        Behavior::DelayedJson(delay, body) => {
            tokio::time::sleep(delay).await;
            let body = body.to_string();
            let _ = write_response(&mut reader, 200, "OK", body.as_bytes()).await;
        }
        Behavior::Status(status, body) => {
            let _ =
                write_response(&mut reader, status, reason_phrase(status), body.as_bytes()).await;
        }
        Behavior::Abort => {
            // Dropping the stream closes the socket mid-exchange.
        }
        Behavior::Hang => {
            // Hold the socket open until the client gives up; the
            // task dies with the test runtime.
            tokio::time::sleep(std::time::Duration::from_secs(3600)).await;
        }
    }
}
