//! Scripted in-memory API for client tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dentago_client::{ClientConfig, ClientError, ClientResult, DentagoApi, DentagoClient};
use dentago_core::booking::AppointmentRequest;
use dentago_core::reviews::ReviewSubmission;
use dentago_core::store::{KeyValueStore, MemoryStore};
use serde_json::Value;

/// A scripted reply.
#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Offline,
}

/// A recorded request.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub route: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Script {
    queue: VecDeque<Reply>,
    last: Option<Reply>,
}

/// Replies are queued per route (`"GET /favorites"`); once the queue runs
/// dry the last reply served repeats.
#[derive(Default)]
pub struct MockApi {
    replies: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, route: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(route.to_string())
            .or_default()
            .queue
            .push_back(reply);
        self
    }

    pub fn json(&self, route: &str, body: Value) -> &Self {
        self.reply(route, Reply::Json(body))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.route).collect()
    }

    pub fn count(&self, route: &str) -> usize {
        self.calls().iter().filter(|c| c.route == route).count()
    }

    fn respond(&self, route: String, token: Option<&str>, body: Option<Value>) -> ClientResult<Value> {
        self.calls.lock().unwrap().push(Call {
            route: route.clone(),
            token: token.map(str::to_string),
            body,
        });

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            replies.get_mut(&route).and_then(|script| {
                if let Some(next) = script.queue.pop_front() {
                    script.last = Some(next);
                }
                script.last.clone()
            })
        };

        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Status(status)) => Err(ClientError::from_status(status, "scripted")),
            Some(Reply::Offline) => Err(ClientError::Network("connection refused".into())),
            None => Err(ClientError::Http {
                status: 500,
                message: format!("unscripted route {route}"),
            }),
        }
    }
}

#[async_trait]
impl DentagoApi for MockApi {
    async fn list_doctors(&self, page: u32, limit: u32, sort: &str) -> ClientResult<Value> {
        self.respond(
            format!("GET /public/doctors?page={page}&limit={limit}&sort={sort}"),
            None,
            None,
        )
    }

    async fn get_doctor(&self, doctor_id: &str) -> ClientResult<Value> {
        self.respond(format!("GET /public/doctors/{doctor_id}"), None, None)
    }

    async fn create_appointment(
        &self,
        request: &AppointmentRequest,
        token: Option<&str>,
    ) -> ClientResult<Value> {
        let body = serde_json::to_value(request).unwrap();
        self.respond("POST /public/appointments".into(), token, Some(body))
    }

    async fn user_appointments(&self, token: &str) -> ClientResult<Value> {
        self.respond("GET /user/doctors".into(), Some(token), None)
    }

    async fn favorites(&self, token: &str) -> ClientResult<Value> {
        self.respond("GET /favorites".into(), Some(token), None)
    }

    async fn add_favorite(&self, token: &str, doctor_id: &str) -> ClientResult<Value> {
        self.respond(format!("POST /favorites/{doctor_id}"), Some(token), None)
    }

    async fn remove_favorite(&self, token: &str, doctor_id: &str) -> ClientResult<Value> {
        self.respond(format!("DELETE /favorites/{doctor_id}"), Some(token), None)
    }

    async fn submit_review(
        &self,
        token: &str,
        doctor_id: &str,
        review: &ReviewSubmission,
    ) -> ClientResult<Value> {
        let body = serde_json::to_value(review).unwrap();
        self.respond(
            format!("POST /public/doctors/{doctor_id}/reviews"),
            Some(token),
            Some(body),
        )
    }
}

/// Client over `api` with an in-memory store.
pub fn client(api: &Arc<MockApi>) -> DentagoClient {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    DentagoClient::with_api(ClientConfig::default(), api.clone(), store)
}

/// Same, already signed in with token `tok`.
pub fn signed_in_client(api: &Arc<MockApi>) -> DentagoClient {
    let client = client(api);
    client.session().set_tokens("tok", Some("refresh")).unwrap();
    client
}
