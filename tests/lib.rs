//! Shared fixtures: an in-process registry backend and a recording surface.

use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    Json, Router,
    extract::{OriginalUri, Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use entity::{Employee, EmployeeId, EmployeeUpdate, NewEmployee};
use platform_api::{EmployeeClient, Endpoint};
use registry_console::{
    Registry,
    feedback::{StatusBanner, StatusMessage},
    surface::{Frame, Surface},
};
use serde_json::{Value, json};
use tokio::{net::TcpListener, task::JoinHandle};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub const COLLECTION: &str = "/api/employees";

#[derive(Clone, Debug, PartialEq)]
pub struct Recorded {
    pub method: Method,
    /// Path as sent on the wire, percent-encoding intact.
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Clone, Debug)]
struct Failure {
    method: Method,
    status: StatusCode,
    body: Option<Value>,
}

#[derive(Debug, Default)]
struct StubState {
    employees: Vec<Employee>,
    requests: Vec<Recorded>,
    failures: VecDeque<Failure>,
    issue_ids: bool,
}

impl StubState {
    fn take_failure(&mut self, method: &Method) -> Option<Response> {
        let idx = self.failures.iter().position(|f| &f.method == method)?;
        let failure = self.failures.remove(idx)?;
        Some(match failure.body {
            Some(body) => (failure.status, Json(body)).into_response(),
            None => (failure.status, "upstream exploded").into_response(),
        })
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.employees.iter().position(|employee| match &employee.id {
            Some(id) => id.as_str() == key,
            None => employee.name == key,
        })
    }
}

type Shared = Arc<Mutex<StubState>>;

/// Registry backend on an ephemeral port, speaking the list/create/update/
/// delete contract and logging every request it receives.
pub struct StubBackend {
    addr: SocketAddr,
    state: Shared,
    task: JoinHandle<()>,
}

impl StubBackend {
    pub async fn start(seed: Vec<Employee>) -> Self {
        Self::start_with(seed, false).await
    }

    /// Like `start`, but records get server-issued ids.
    pub async fn start_with_ids(seed: Vec<Employee>) -> Self {
        Self::start_with(seed, true).await
    }

    async fn start_with(seed: Vec<Employee>, issue_ids: bool) -> Self {
        let employees = seed
            .into_iter()
            .map(|mut employee| {
                if issue_ids && employee.id.is_none() {
                    employee.id = Some(EmployeeId::new(Uuid::new_v4().to_string()));
                }
                employee
            })
            .collect();
        let state: Shared = Arc::new(Mutex::new(StubState {
            employees,
            issue_ids,
            ..StubState::default()
        }));

        let router = Router::new()
            .route(COLLECTION, get(list_handler).post(create_handler))
            .route(
                &format!("{COLLECTION}/{{key}}"),
                put(update_handler).delete(delete_handler),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub backend");
        let addr = listener.local_addr().expect("stub backend address");
        let task = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("stub backend crashed");
        });
        Self { addr, state, task }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.lock().requests.clone()
    }

    pub fn count(&self, method: Method) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method)
            .count()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    pub fn employees(&self) -> Vec<Employee> {
        self.lock().employees.clone()
    }

    /// The next `method` request fails with `status` and a JSON body.
    pub fn fail_next(&self, method: Method, status: StatusCode, body: Value) {
        self.lock().failures.push_back(Failure {
            method,
            status,
            body: Some(body),
        });
    }

    /// The next `method` request fails with `status` and a plain-text body.
    pub fn fail_next_plain(&self, method: Method, status: StatusCode) {
        self.lock().failures.push_back(Failure {
            method,
            status,
            body: None,
        });
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().expect("stub state poisoned")
    }
}

impl Drop for StubBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn record(state: &mut StubState, method: Method, uri: &OriginalUri, body: Option<Value>) {
    state.requests.push(Recorded {
        method,
        path: uri.0.path().to_string(),
        body,
    });
}

async fn list_handler(State(state): State<Shared>, uri: OriginalUri) -> Response {
    let mut state = state.lock().expect("stub state poisoned");
    record(&mut state, Method::GET, &uri, None);
    if let Some(failure) = state.take_failure(&Method::GET) {
        return failure;
    }
    Json(state.employees.clone()).into_response()
}

async fn create_handler(
    State(state): State<Shared>,
    uri: OriginalUri,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("stub state poisoned");
    record(&mut state, Method::POST, &uri, Some(body.clone()));
    if let Some(failure) = state.take_failure(&Method::POST) {
        return failure;
    }
    let new: NewEmployee = match serde_json::from_value(body) {
        Ok(new) => new,
        Err(err) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": [{"loc": ["body"], "msg": err.to_string()}]})),
            )
                .into_response();
        }
    };
    if state.employees.iter().any(|e| e.name == new.name) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Error al agregar empleado - verifica que el nombre sea único"})),
        )
            .into_response();
    }
    let id = state
        .issue_ids
        .then(|| EmployeeId::new(Uuid::new_v4().to_string()));
    state.employees.push(Employee {
        id,
        ..Employee::from(new)
    });
    Json(json!({"mensaje": "Empleado agregado exitosamente"})).into_response()
}

async fn update_handler(
    State(state): State<Shared>,
    uri: OriginalUri,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("stub state poisoned");
    record(&mut state, Method::PUT, &uri, Some(body.clone()));
    if let Some(failure) = state.take_failure(&Method::PUT) {
        return failure;
    }
    let update: EmployeeUpdate = match serde_json::from_value(body) {
        Ok(update) => update,
        Err(err) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"detail": [{"loc": ["body"], "msg": err.to_string()}]})),
            )
                .into_response();
        }
    };
    let Some(idx) = state.position(&key) else {
        return not_found();
    };
    state.employees[idx].apply(update);
    Json(json!({"mensaje": "Empleado actualizado exitosamente"})).into_response()
}

async fn delete_handler(
    State(state): State<Shared>,
    uri: OriginalUri,
    Path(key): Path<String>,
) -> Response {
    let mut state = state.lock().expect("stub state poisoned");
    record(&mut state, Method::DELETE, &uri, None);
    if let Some(failure) = state.take_failure(&Method::DELETE) {
        return failure;
    }
    let Some(idx) = state.position(&key) else {
        return not_found();
    };
    state.employees.remove(idx);
    Json(json!({"mensaje": "Empleado eliminado exitosamente"})).into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Empleado no encontrado"})),
    )
        .into_response()
}

/// What one `paint` call showed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaintedFrame {
    pub rows: usize,
    pub overlay_visible: bool,
    pub status: Option<StatusMessage>,
}

/// Surface that remembers every frame and answers confirmations from a
/// script (an exhausted script declines).
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub answers: VecDeque<bool>,
    pub questions: Vec<String>,
    pub frames: Vec<PaintedFrame>,
}

impl RecordingSurface {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl Surface for RecordingSurface {
    fn paint(&mut self, frame: &Frame<'_>) {
        self.frames.push(PaintedFrame {
            rows: frame.table.len(),
            overlay_visible: frame.overlay.is_visible(),
            status: frame.status.cloned(),
        });
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}

pub fn client_for(backend: &StubBackend) -> EmployeeClient {
    let endpoint = Endpoint::new(&backend.base_url(), COLLECTION).expect("stub endpoint");
    EmployeeClient::new(endpoint).expect("http client")
}

pub fn registry_for(
    backend: &StubBackend,
    surface: RecordingSurface,
) -> Registry<RecordingSurface> {
    Registry::new(client_for(backend), surface, StatusBanner::default())
}

pub fn employee(name: &str, department: &str, hours: i64, clock_in_hour: i64, salary: i64) -> Employee {
    Employee {
        id: None,
        name: name.into(),
        first_surname: Some("García".into()),
        second_surname: Some("López".into()),
        department: Some(department.into()),
        shift_type: Some(if hours >= 35 { "Completa" } else { "Parcial" }.into()),
        hours: Some(hours),
        clock_in_hour: Some(clock_in_hour),
        salary: Some(salary),
    }
}

pub fn staff() -> Vec<Employee> {
    vec![
        employee("Ana María", "Ventas", 40, 8, 1800),
        employee("Bruno", "Almacén", 20, 14, 950),
        employee("Carla", "IT", 40, 9, 2400),
    ]
}
