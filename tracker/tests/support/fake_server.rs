//! In-memory stand-in for the tracking service.
//!
//! Implements the transport port directly, keeping users and locations in a
//! shared map and recording every request it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use location_tracker::domain::ports::{
    HttpMethod, ResponseBody, Transport, TransportError, TransportRequest, TransportResponse,
};
use serde_json::{Value, json};

const CREATED_AT_MILLIS: i64 = 1_706_176_800_000;
const LAST_UPDATED: &str = "2024-01-25T10:00:00.000Z";

#[derive(Default)]
struct ServiceState {
    users: HashMap<String, Value>,
    locations: HashMap<String, Value>,
    next_id: u64,
    requests: Vec<TransportRequest>,
}

/// Fake service shared between a tracker and the test world.
#[derive(Clone, Default)]
pub struct FakeTrackingService {
    state: Arc<Mutex<ServiceState>>,
}

impl FakeTrackingService {
    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.state.lock().expect("service state lock").requests.len()
    }

    fn handle(&self, request: &TransportRequest) -> TransportResponse {
        let mut state = self.state.lock().expect("service state lock");
        state.requests.push(request.clone());

        let segments: Vec<&str> = request.path().split('/').collect();
        match (request.method(), segments.as_slice()) {
            (HttpMethod::Post, ["api", "users", "create"]) => state.create_user(request.body()),
            (HttpMethod::Post, ["api", "users", "verify"]) => {
                let id = body_str(request.body(), "user_id");
                state.user(&id)
            }
            (HttpMethod::Patch, ["api", "users", id, "status"]) => {
                let active = request
                    .body()
                    .and_then(|body| body.get("is_active"))
                    .and_then(Value::as_bool)
                    .unwrap_or_default();
                state.set_status(id, active)
            }
            (HttpMethod::Get, ["api", "users", id]) => state.user(id),
            (HttpMethod::Post, ["api", "locations", "update"]) => {
                state.update_location(request.body())
            }
            (HttpMethod::Get, ["api", "locations", "user", id]) => state.location(id),
            _ => text(404, "Route not found"),
        }
    }
}

impl ServiceState {
    fn create_user(&mut self, body: Option<&Value>) -> TransportResponse {
        self.next_id += 1;
        let id = format!("{:024x}", self.next_id);
        let user = json!({
            "_id": { "$oid": id },
            "username": body_str(body, "username"),
            "created_at": { "$date": CREATED_AT_MILLIS },
            "is_active": false
        });
        self.users.insert(id, user.clone());
        TransportResponse::json(201, &user)
    }

    fn user(&self, id: &str) -> TransportResponse {
        match self.users.get(id) {
            Some(user) => TransportResponse::json(200, user),
            None => text(404, "User not found"),
        }
    }

    fn set_status(&mut self, id: &str, active: bool) -> TransportResponse {
        match self.users.get_mut(id) {
            Some(user) => {
                if let Some(fields) = user.as_object_mut() {
                    fields.insert("is_active".to_owned(), Value::Bool(active));
                }
                TransportResponse::json(200, user)
            }
            None => text(404, "User not found"),
        }
    }

    fn update_location(&mut self, body: Option<&Value>) -> TransportResponse {
        let user_id = body_str(body, "user_id");
        if !self.users.contains_key(&user_id) {
            return text(404, "User not found");
        }
        let coordinate = |key: &str| body.and_then(|value| value.get(key)).cloned();
        let location = json!({
            "user_id": { "$oid": user_id },
            "latitude": coordinate("latitude"),
            "longitude": coordinate("longitude"),
            "last_updated": { "$date": LAST_UPDATED }
        });
        self.locations.insert(user_id, location.clone());
        TransportResponse::json(200, &location)
    }

    fn location(&self, id: &str) -> TransportResponse {
        match self.locations.get(id) {
            Some(location) => TransportResponse::json(200, location),
            None => text(404, "Location not found"),
        }
    }
}

#[async_trait]
impl Transport for FakeTrackingService {
    async fn execute(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        Ok(self.handle(&request))
    }
}

fn body_str(body: Option<&Value>, key: &str) -> String {
    body.and_then(|value| value.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn text(status: u16, message: &str) -> TransportResponse {
    TransportResponse::new(status, ResponseBody::from_bytes(message))
}
