//! Scripted API double shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, oneshot};

use crate::api::ConfidiosApi;
use crate::api::types::{
    AdminLoginResponse, ApiError, ListFilesResponse, ReadFileResponse, StatusResponse, UserCreateRequest,
    UserCreateResponse, UserLoginRequest, UserLoginResponse,
};
use crate::notify::Notification;
use crate::state::IntegrationState;

/// A request observed by [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    UserLogin { token: String, username: String },
    UserLogout { token: String },
    AdminLogin { token: String },
    CreateUser { token: String, user_id: String },
    ListFiles { token: String, path: String },
    ReadFile { token: String, path: String },
}

struct Step<T> {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<T, ApiError>,
}

/// FIFO of canned results for one endpoint.
pub struct Script<T> {
    steps: Mutex<VecDeque<Step<T>>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self { steps: Mutex::new(VecDeque::new()) }
    }
}

impl<T> Script<T> {
    pub fn push(&self, result: Result<T, ApiError>) {
        self.steps.lock().unwrap().push_back(Step { gate: None, result });
    }

    /// Queue a result that is only delivered once the returned sender fires.
    pub fn push_gated(&self, result: Result<T, ApiError>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.steps.lock().unwrap().push_back(Step { gate: Some(rx), result });
        tx
    }

    async fn next(&self) -> Result<T, ApiError> {
        let step = self.steps.lock().unwrap().pop_front();
        let Some(Step { gate, result }) = step else {
            return Err(ApiError::Request("no scripted response".into()));
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        result
    }
}

#[derive(Default)]
pub struct ScriptedApi {
    pub user_login: Script<UserLoginResponse>,
    pub user_logout: Script<StatusResponse>,
    pub admin_login: Script<AdminLoginResponse>,
    pub create_user: Script<UserCreateResponse>,
    pub list_files: Script<ListFilesResponse>,
    pub read_file: Script<ReadFileResponse>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl ConfidiosApi for ScriptedApi {
    async fn user_login(&self, token: &str, request: &UserLoginRequest) -> Result<UserLoginResponse, ApiError> {
        self.record(Call::UserLogin { token: token.to_owned(), username: request.confidios_username.clone() });
        self.user_login.next().await
    }

    async fn user_logout(&self, token: &str) -> Result<StatusResponse, ApiError> {
        self.record(Call::UserLogout { token: token.to_owned() });
        self.user_logout.next().await
    }

    async fn admin_login(&self, token: &str) -> Result<AdminLoginResponse, ApiError> {
        self.record(Call::AdminLogin { token: token.to_owned() });
        self.admin_login.next().await
    }

    async fn create_user(&self, token: &str, request: &UserCreateRequest) -> Result<UserCreateResponse, ApiError> {
        self.record(Call::CreateUser { token: token.to_owned(), user_id: request.user_id.clone() });
        self.create_user.next().await
    }

    async fn list_files(&self, token: &str, path: &str) -> Result<ListFilesResponse, ApiError> {
        self.record(Call::ListFiles { token: token.to_owned(), path: path.to_owned() });
        self.list_files.next().await
    }

    async fn read_file(&self, token: &str, path: &str) -> Result<ReadFileResponse, ApiError> {
        self.record(Call::ReadFile { token: token.to_owned(), path: path.to_owned() });
        self.read_file.next().await
    }
}

/// Integration state backed by a [`ScriptedApi`] and a channel notifier.
pub fn scripted_state() -> (IntegrationState, Arc<ScriptedApi>, mpsc::UnboundedReceiver<Notification>) {
    let api = Arc::new(ScriptedApi::default());
    let (tx, rx) = mpsc::unbounded_channel();
    let state = IntegrationState::new(Arc::clone(&api) as Arc<dyn ConfidiosApi>, Arc::new(tx));
    (state, api, rx)
}

/// Drain every notification queued so far.
pub fn drain(rx: &mut mpsc::UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(n) = rx.try_recv() {
        out.push(n);
    }
    out
}
