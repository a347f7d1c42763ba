//! Minimal HTTP/1.1 server that serves canned JSON routes for integration tests.
//!
//! Routes are keyed by request target (path plus query), so a test can register
//! `/api/starships/?page=2` after learning the bound port. Every request is
//! counted per target.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

#[derive(Debug, Clone)]
struct Route {
    status: &'static str,
    content_type: &'static str,
    body: String,
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Route>,
    hits: HashMap<String, usize>,
}

pub struct SwapiServer {
    base: String,
    state: Arc<Mutex<State>>,
}

impl SwapiServer {
    /// Starts a server in a background thread. It runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(State::default()));
        let server_state = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&server_state);
                thread::spawn(move || handle(stream, &state));
            }
        });
        Self {
            base: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    /// Absolute URL for a request target, e.g. `url("/api/films/1/")`.
    pub fn url(&self, target: &str) -> String {
        format!("{}{}", self.base, target)
    }

    /// API root to use as `api_base_url`.
    pub fn api_base(&self) -> String {
        self.url("/api")
    }

    pub fn json(&self, target: &str, body: serde_json::Value) {
        self.raw(target, "200 OK", "application/json", body.to_string());
    }

    pub fn raw(&self, target: &str, status: &'static str, content_type: &'static str, body: String) {
        self.state.lock().unwrap().routes.insert(
            target.to_string(),
            Route {
                status,
                content_type,
                body,
            },
        );
    }

    pub fn hits(&self, target: &str) -> usize {
        self.state.lock().unwrap().hits.get(target).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> usize {
        self.state.lock().unwrap().hits.values().sum()
    }
}

fn handle(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("").to_string();

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    let route = {
        let mut state = state.lock().unwrap();
        *state.hits.entry(target.clone()).or_default() += 1;
        state.routes.get(&target).cloned()
    };
    let route = route.unwrap_or(Route {
        status: "404 Not Found",
        content_type: "application/json",
        body: r#"{"detail":"Not found"}"#.to_string(),
    });

    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        route.status,
        route.content_type,
        route.body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(route.body.as_bytes());
}
