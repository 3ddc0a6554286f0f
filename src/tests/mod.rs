
use crate::api::HttpApi;
use crate::core::services::MediSlotService;
use crate::infrastructure::notifications::in_memory::InMemoryNotifier;
use crate::infrastructure::storage::in_memory::InMemoryCredentialStore;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

pub const PATIENT_EMAIL: &str = "pat@example.com";
pub const DOCTOR_EMAIL: &str = "grey@example.com";
pub const PASSWORD: &str = "secret";
pub const DOCTOR_ID: &str = "doc-grey";
pub const OTHER_DOCTOR_ID: &str = "doc-house";

pub type TestService = MediSlotService<HttpApi<InMemoryCredentialStore>, InMemoryCredentialStore, InMemoryNotifier>;

#[derive(Clone)]
pub struct FakeUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Default)]
pub struct BackendState {
    pub users: Vec<FakeUser>,
    pub tokens: HashMap<String, String>,
    pub appointments: Vec<Value>,
    pub auth_headers: Vec<Option<String>>,
    /// Every token is rejected while set.
    pub reject_tokens: bool,
    /// Endpoints answering a bare 500 with no body.
    pub failing: Vec<&'static str>,
    pub register_without_token: bool,
}

/// In-process stand-in for the booking backend.
#[derive(Clone, Default)]
pub struct FakeBackend {
    pub state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn seeded() -> Self {
        let backend = FakeBackend::default();
        {
            let mut state = backend.state.lock().unwrap();
            state.users.push(FakeUser {
                id: "pat-1".to_string(),
                name: "Asha".to_string(),
                email: PATIENT_EMAIL.to_string(),
                password: PASSWORD.to_string(),
                role: "patient".to_string(),
            });
            state.users.push(FakeUser {
                id: DOCTOR_ID.to_string(),
                name: "Grey".to_string(),
                email: DOCTOR_EMAIL.to_string(),
                password: PASSWORD.to_string(),
                role: "doctor".to_string(),
            });
            state.users.push(FakeUser {
                id: OTHER_DOCTOR_ID.to_string(),
                name: "House".to_string(),
                email: "house@example.com".to_string(),
                password: PASSWORD.to_string(),
                role: "doctor".to_string(),
            });
        }
        backend
    }

    pub fn add_appointment(&self, doctor: &str, patient: &str, date: &str, time: &str, status: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.state.lock().unwrap().appointments.push(json!({
            "_id": id,
            "doctor": doctor,
            "patient": patient,
            "date": date,
            "time": time,
            "status": status,
            "reason": "Follow-up",
        }));
        id
    }

    pub fn reject_tokens(&self) {
        self.state.lock().unwrap().reject_tokens = true;
    }

    pub fn fail(&self, endpoint: &'static str) {
        self.state.lock().unwrap().failing.push(endpoint);
    }

    pub fn register_without_token(&self) {
        self.state.lock().unwrap().register_without_token = true;
    }

    pub fn last_auth_header(&self) -> Option<String> {
        self.state.lock().unwrap().auth_headers.last().cloned().flatten()
    }

    pub fn appointment_count(&self) -> usize {
        self.state.lock().unwrap().appointments.len()
    }
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn user_json(user: &FakeUser, token: Option<&str>) -> Value {
    let mut value = json!({
        "_id": user.id,
        "name": user.name,
        "email": user.email,
        "role": user.role,
    });
    if let Some(token) = token {
        value["token"] = json!(token);
    }
    value
}

fn issue_token(state: &mut BackendState, user_id: &str) -> String {
    let token = format!("token-{}", Uuid::new_v4());
    state.tokens.insert(token.clone(), user_id.to_string());
    token
}

fn authenticate(state: &mut BackendState, headers: &HeaderMap) -> Result<FakeUser, Response> {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    state.auth_headers.push(auth.clone());

    let token = auth
        .as_deref()
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "Not authorized, no token"))?;
    if state.reject_tokens {
        return Err(message(StatusCode::UNAUTHORIZED, "Not authorized, token failed"));
    }
    let user_id = state
        .tokens
        .get(token)
        .cloned()
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "Not authorized, token failed"))?;
    state
        .users
        .iter()
        .find(|u| u.id == user_id)
        .cloned()
        .ok_or_else(|| message(StatusCode::UNAUTHORIZED, "User not found"))
}

fn populate(state: &BackendState, appt: &Value) -> Value {
    let mut appt = appt.clone();
    for field in ["doctor", "patient"] {
        let id = appt[field].as_str().unwrap_or_default().to_string();
        if let Some(user) = state.users.iter().find(|u| u.id == id) {
            appt[field] = json!({ "_id": user.id, "name": user.name, "email": user.email });
        }
    }
    appt
}

async fn login(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
    let mut state = backend.state.lock().unwrap();
    if state.failing.contains(&"login") {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let found = state
        .users
        .iter()
        .find(|u| Some(u.email.as_str()) == body["email"].as_str() && Some(u.password.as_str()) == body["password"].as_str())
        .cloned();
    match found {
        Some(user) => {
            let token = issue_token(&mut state, &user.id);
            Json(user_json(&user, Some(&token))).into_response()
        }
        None => message(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    }
}

async fn register(State(backend): State<FakeBackend>, Json(body): Json<Value>) -> Response {
    let mut state = backend.state.lock().unwrap();
    if state.failing.contains(&"register") {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if state.users.iter().any(|u| u.email == email) {
        return message(StatusCode::BAD_REQUEST, "User already exists");
    }
    let user = FakeUser {
        id: Uuid::new_v4().to_string(),
        name: body["name"].as_str().unwrap_or_default().to_string(),
        email,
        password: body["password"].as_str().unwrap_or_default().to_string(),
        role: body["role"].as_str().unwrap_or("patient").to_string(),
    };
    state.users.push(user.clone());
    if state.register_without_token {
        return (StatusCode::CREATED, Json(user_json(&user, None))).into_response();
    }
    let token = issue_token(&mut state, &user.id);
    (StatusCode::CREATED, Json(user_json(&user, Some(&token)))).into_response()
}

async fn list_appointments(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    let mut state = backend.state.lock().unwrap();
    let user = match authenticate(&mut state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    if state.failing.contains(&"appointments") {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let key = if user.role == "doctor" { "doctor" } else { "patient" };
    let visible = state
        .appointments
        .iter()
        .filter(|a| a[key].as_str() == Some(user.id.as_str()))
        .map(|a| populate(&state, a))
        .collect::<Vec<_>>();
    Json(visible).into_response()
}

async fn list_doctors(State(backend): State<FakeBackend>, headers: HeaderMap) -> Response {
    let mut state = backend.state.lock().unwrap();
    if let Err(response) = authenticate(&mut state, &headers) {
        return response;
    }
    let doctors = state
        .users
        .iter()
        .filter(|u| u.role == "doctor")
        .map(|u| json!({ "_id": u.id, "name": u.name, "email": u.email }))
        .collect::<Vec<_>>();
    Json(doctors).into_response()
}

async fn create_appointment(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = backend.state.lock().unwrap();
    let user = match authenticate(&mut state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    let taken = state.appointments.iter().any(|a| {
        a["doctor"] == body["doctor"] && a["date"] == body["date"] && a["time"] == body["time"]
    });
    if taken {
        return message(StatusCode::BAD_REQUEST, "Slot already booked");
    }
    let appt = json!({
        "_id": Uuid::new_v4().to_string(),
        "doctor": body["doctor"],
        "patient": user.id,
        "date": body["date"],
        "time": body["time"],
        "reason": body["reason"],
        "status": "pending",
    });
    state.appointments.push(appt.clone());
    (StatusCode::CREATED, Json(appt)).into_response()
}

async fn update_status(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = backend.state.lock().unwrap();
    let user = match authenticate(&mut state, &headers) {
        Ok(user) => user,
        Err(response) => return response,
    };
    if user.role != "doctor" {
        return message(StatusCode::FORBIDDEN, "Only doctors can update status");
    }
    let Some(index) = state.appointments.iter().position(|a| a["_id"] == id.as_str()) else {
        return message(StatusCode::NOT_FOUND, "Appointment not found");
    };
    state.appointments[index]["status"] = body["status"].clone();
    let updated = populate(&state, &state.appointments[index]);
    Json(updated).into_response()
}

async fn delete_appointment(
    State(backend): State<FakeBackend>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = backend.state.lock().unwrap();
    if let Err(response) = authenticate(&mut state, &headers) {
        return response;
    }
    let before = state.appointments.len();
    state.appointments.retain(|a| a["_id"] != id.as_str());
    if state.appointments.len() == before {
        return message(StatusCode::NOT_FOUND, "Appointment not found");
    }
    message(StatusCode::OK, "Appointment removed")
}

/// Binds the fake backend on an ephemeral port and returns its base URL.
pub async fn spawn_backend(backend: FakeBackend) -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/appointments", get(list_appointments).post(create_appointment))
        .route("/api/appointments/{id}", axum::routing::delete(delete_appointment))
        .route("/api/appointments/{id}/status", put(update_status))
        .route("/api/users/doctors", get(list_doctors))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

pub async fn create_test_service() -> (TestService, FakeBackend, InMemoryCredentialStore) {
    let _ = env_logger::try_init();
    let backend = FakeBackend::seeded();
    let base_url = spawn_backend(backend.clone()).await;
    let (service, credentials) = service_for(&base_url);
    (service, backend, credentials)
}

/// Service talking to whatever sits at `base_url`, with an empty session.
pub fn service_for(base_url: &str) -> (TestService, InMemoryCredentialStore) {
    let credentials = InMemoryCredentialStore::new();
    let api = HttpApi::new(base_url, Duration::from_secs(2), credentials.clone()).unwrap();
    let service = MediSlotService::new(api, credentials.clone(), InMemoryNotifier::new());
    (service, credentials)
}
