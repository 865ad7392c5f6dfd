use axum::{
    body::Bytes,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    Router,
};
use serde_json::Value;
use server::backend::HttpBackend;
use std::sync::{Arc, Mutex};

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Value,
}

/// A canned reply for a method and path.
#[derive(Debug, Clone)]
struct Reply {
    method: Method,
    path: String,
    status: StatusCode,
    body: String,
}

#[derive(Clone, Default)]
struct MockState {
    replies: Arc<Vec<Reply>>,
    log: Arc<Mutex<Vec<Recorded>>>,
}

/// Scripted stand-in for the REST backend, served on an ephemeral port.
#[derive(Default)]
pub struct MockBackend {
    replies: Vec<Reply>,
}

/// Handle on a running mock: the client pointed at it, plus its request log.
pub struct Running {
    pub backend: HttpBackend,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl Running {
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests[0].clone()
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `method path` with a JSON body.
    pub fn json(self, method: Method, path: &str, status: StatusCode, body: Value) -> Self {
        self.raw(method, path, status, &body.to_string())
    }

    /// Reply to `method path` with a body sent verbatim.
    pub fn raw(mut self, method: Method, path: &str, status: StatusCode, body: &str) -> Self {
        self.replies.push(Reply {
            method,
            path: path.to_string(),
            status,
            body: body.to_string(),
        });
        self
    }

    pub async fn start(self) -> Running {
        let state = MockState {
            replies: Arc::new(self.replies),
            log: Arc::default(),
        };
        let log = state.log.clone();
        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend stopped");
        });

        Running {
            backend: HttpBackend::with_base_url(format!("http://{addr}")),
            log,
        }
    }
}

async fn handle(State(state): State<MockState>, request: Request) -> impl IntoResponse {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let bytes: Bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap_or_default();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    state.log.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        body,
    });

    match state
        .replies
        .iter()
        .find(|r| r.method == method && r.path == path)
    {
        Some(reply) => (
            reply.status,
            [("content-type", "application/json")],
            reply.body.clone(),
        ),
        None => (
            StatusCode::NOT_FOUND,
            [("content-type", "application/json")],
            r#"{"message":"no such route"}"#.to_string(),
        ),
    }
}

/// A base URL nothing listens on.
pub fn unreachable_backend() -> HttpBackend {
    HttpBackend::with_base_url("http://127.0.0.1:9")
}

pub fn wire_case(id: &str, district: &str, crime: &str) -> Value {
    serde_json::json!({
        "_id": id,
        "district": district,
        "Police_Station": "Andheri",
        "CR_NO": "CR20240001",
        "Section_of_law": "IPC 379",
        "Crime_type": crime,
        "Year": 2024,
        "Accused_Name": "Rahul Sharma",
        "Accused_Gender": "Male",
        "Accused_Age": 31,
        "Accused_Address": "12 Main Rd"
    })
}
