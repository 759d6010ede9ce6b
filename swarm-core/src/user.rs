//! The simulated user: one virtual client of the language-tracker API

use crate::fake::FakeData;
use crate::payloads::{
    AnkiReview, BookEntry, MediaEntry, Registration, SessionRequest, SessionToken, TalkEntry,
    VocabularyReview, ANKI_PATH, BOOKS_PATH, HEALTH_PATH, MEDIAS_PATH, SESSIONS_PATH, TALK_PATH,
    USERS_PATH, VOCABULARY_PATH,
};
use crate::task::Task;
use std::fmt;
use std::sync::Arc;
use swarm_http::{ApiClient, ApiRequest, ApiResponse, HttpError};
use tracing::{debug, trace, warn};

/// Email and password submitted at registration
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// What a task did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// A precondition was missing and no request was sent
    Skipped,
    /// The API answered with the expected status
    Succeeded,
    /// The API answered with another status; already logged
    Rejected { status: u16 },
}

impl TaskOutcome {
    /// Whether a request went out
    pub fn was_sent(&self) -> bool {
        !matches!(self, TaskOutcome::Skipped)
    }
}

/// One virtual client
///
/// `user_data` is set by [`register`](Self::register) and read by
/// [`login`](Self::login); `token` is set by a successful login and gates
/// every authorized task. Tasks whose precondition is missing return
/// [`TaskOutcome::Skipped`] without touching the network. Rejected calls
/// are logged and never raised; only transport failures surface as `Err`.
pub struct SimulatedUser {
    id: usize,
    client: Arc<dyn ApiClient>,
    fake: FakeData,
    user_data: Option<Credentials>,
    token: Option<String>,
}

impl SimulatedUser {
    pub fn new(id: usize, client: Arc<dyn ApiClient>, fake: FakeData) -> Self {
        Self {
            id,
            client,
            fake,
            user_data: None,
            token: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn user_data(&self) -> Option<&Credentials> {
        self.user_data.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Run one task from the catalogue
    pub async fn perform(&mut self, task: Task) -> Result<TaskOutcome, HttpError> {
        match task {
            Task::Register => self.register().await,
            Task::Login => self.login().await,
            Task::CreateTalk => self.create_talk().await,
            Task::GetTalks => self.get_talks().await,
            Task::CreateMedia => self.create_media().await,
            Task::GetMedia => self.get_media().await,
            Task::CreateAnkiReview => self.create_anki_review().await,
            Task::GetAnkiReview => self.get_anki_review().await,
            Task::CreateVocabularyReview => self.create_vocabulary_review().await,
            Task::GetVocabularyReview => self.get_vocabulary_review().await,
            Task::CreateBook => self.create_book().await,
            Task::GetBooks => self.get_books().await,
            Task::HealthCheck => self.health_check().await,
        }
    }

    /// Sign up with freshly generated credentials
    ///
    /// The credentials replace `user_data` before the request goes out, so
    /// they are kept whatever the server answers.
    pub async fn register(&mut self) -> Result<TaskOutcome, HttpError> {
        let registration = Registration::generate(&mut self.fake);
        self.user_data = Some(Credentials {
            email: registration.email.clone(),
            password: registration.password.clone(),
        });

        let request = ApiRequest::post(USERS_PATH).json(&registration)?;
        let response = self.client.send(request).await?;

        if !response.is_status(Task::Register.success_status()) {
            warn!(
                user = self.id,
                status = response.status,
                body = %response.body,
                "Registration rejected"
            );
            return Ok(TaskOutcome::Rejected {
                status: response.status,
            });
        }

        debug!(user = self.id, email = %registration.email, "Registered");
        Ok(TaskOutcome::Succeeded)
    }

    /// Exchange the registered credentials for a bearer token
    pub async fn login(&mut self) -> Result<TaskOutcome, HttpError> {
        let Some(credentials) = &self.user_data else {
            return Ok(self.skip(Task::Login));
        };

        let request = ApiRequest::post(SESSIONS_PATH).json(&SessionRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        })?;
        let response = self.client.send(request).await?;

        if !response.is_status(Task::Login.success_status()) {
            warn!(user = self.id, status = response.status, "Login failed");
            return Ok(TaskOutcome::Rejected {
                status: response.status,
            });
        }

        match response.json::<SessionToken>() {
            Ok(SessionToken {
                token: Some(token), ..
            }) => {
                debug!(user = self.id, "Logged in");
                self.token = Some(token);
            }
            // A 201 without a usable token leaves the previous one in place
            Ok(_) => warn!(user = self.id, "Login succeeded without a token"),
            Err(e) => warn!(user = self.id, error = %e, "Unreadable login response"),
        }

        Ok(TaskOutcome::Succeeded)
    }

    pub async fn create_talk(&mut self) -> Result<TaskOutcome, HttpError> {
        let Some(token) = self.token.clone() else {
            return Ok(self.skip(Task::CreateTalk));
        };
        let entry = TalkEntry::generate(&mut self.fake);
        let request = ApiRequest::post(TALK_PATH).bearer(token).json(&entry)?;
        self.dispatch(Task::CreateTalk, request).await
    }

    pub async fn get_talks(&mut self) -> Result<TaskOutcome, HttpError> {
        self.authorized_read(Task::GetTalks, TALK_PATH).await
    }

    pub async fn create_media(&mut self) -> Result<TaskOutcome, HttpError> {
        let Some(token) = self.token.clone() else {
            return Ok(self.skip(Task::CreateMedia));
        };
        let request = ApiRequest::post(MEDIAS_PATH)
            .bearer(token)
            .json(&MediaEntry::default())?;
        self.dispatch(Task::CreateMedia, request).await
    }

    pub async fn get_media(&mut self) -> Result<TaskOutcome, HttpError> {
        self.authorized_read(Task::GetMedia, MEDIAS_PATH).await
    }

    pub async fn create_anki_review(&mut self) -> Result<TaskOutcome, HttpError> {
        let Some(token) = self.token.clone() else {
            return Ok(self.skip(Task::CreateAnkiReview));
        };
        let review = AnkiReview::generate(&mut self.fake);
        let request = ApiRequest::post(ANKI_PATH).bearer(token).json(&review)?;
        self.dispatch(Task::CreateAnkiReview, request)
            .await
    }

    pub async fn get_anki_review(&mut self) -> Result<TaskOutcome, HttpError> {
        self.authorized_read(Task::GetAnkiReview, ANKI_PATH).await
    }

    pub async fn create_vocabulary_review(&mut self) -> Result<TaskOutcome, HttpError> {
        let Some(token) = self.token.clone() else {
            return Ok(self.skip(Task::CreateVocabularyReview));
        };
        let review = VocabularyReview::generate(&mut self.fake);
        let request = ApiRequest::post(VOCABULARY_PATH)
            .bearer(token)
            .json(&review)?;
        self.dispatch(Task::CreateVocabularyReview, request)
            .await
    }

    pub async fn get_vocabulary_review(&mut self) -> Result<TaskOutcome, HttpError> {
        self.authorized_read(Task::GetVocabularyReview, VOCABULARY_PATH)
            .await
    }

    pub async fn create_book(&mut self) -> Result<TaskOutcome, HttpError> {
        let Some(token) = self.token.clone() else {
            return Ok(self.skip(Task::CreateBook));
        };
        let book = BookEntry::generate(&mut self.fake);
        let request = ApiRequest::post(BOOKS_PATH).bearer(token).json(&book)?;
        self.dispatch(Task::CreateBook, request).await
    }

    pub async fn get_books(&mut self) -> Result<TaskOutcome, HttpError> {
        self.authorized_read(Task::GetBooks, BOOKS_PATH).await
    }

    /// Probe the unauthenticated health endpoint
    pub async fn health_check(&mut self) -> Result<TaskOutcome, HttpError> {
        self.dispatch(Task::HealthCheck, ApiRequest::get(HEALTH_PATH))
            .await
    }

    async fn authorized_read(&mut self, task: Task, path: &str) -> Result<TaskOutcome, HttpError> {
        let Some(token) = self.token.clone() else {
            return Ok(self.skip(task));
        };
        self.dispatch(task, ApiRequest::get(path).bearer(token))
            .await
    }

    async fn dispatch(&self, task: Task, request: ApiRequest) -> Result<TaskOutcome, HttpError> {
        let path = request.path.clone();
        let response = self.client.send(request).await?;
        Ok(self.check(task, &path, &response))
    }

    fn check(&self, task: Task, path: &str, response: &ApiResponse) -> TaskOutcome {
        if response.is_status(task.success_status()) {
            trace!(user = self.id, task = %task, "Task succeeded");
            return TaskOutcome::Succeeded;
        }

        let error = response.error_message();
        warn!(
            user = self.id,
            task = %task,
            status = response.status,
            error = error.as_deref().unwrap_or("<none>"),
            "Failed to access {}",
            path
        );
        TaskOutcome::Rejected {
            status: response.status,
        }
    }

    fn skip(&self, task: Task) -> TaskOutcome {
        trace!(user = self.id, task = %task, "Precondition missing, skipping");
        TaskOutcome::Skipped
    }
}

impl fmt::Debug for SimulatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedUser")
            .field("id", &self.id)
            .field("user_data", &self.user_data)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Records every request and answers from a script
    #[derive(Default)]
    struct ScriptedClient {
        sent: Mutex<Vec<ApiRequest>>,
        replies: Mutex<VecDeque<ApiResponse>>,
    }

    impl ScriptedClient {
        fn replying(replies: Vec<ApiResponse>) -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                replies: Mutex::new(replies.into()),
            })
        }

        fn sent(&self) -> Vec<ApiRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ApiClient for ScriptedClient {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
            self.sent.lock().unwrap().push(request);
            Ok(self
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| ApiResponse::new(500, "no scripted reply")))
        }
    }

    fn user_with(client: Arc<ScriptedClient>) -> SimulatedUser {
        SimulatedUser::new(0, client, FakeData::from_seed(99))
    }

    #[tokio::test]
    async fn test_fresh_user_skips_everything_but_register_and_health() {
        let client = ScriptedClient::replying(vec![]);
        let mut user = user_with(client.clone());

        for task in Task::all() {
            if matches!(task, Task::Register | Task::HealthCheck) {
                continue;
            }
            assert_eq!(user.perform(*task).await.unwrap(), TaskOutcome::Skipped, "{}", task);
        }

        assert!(client.sent().is_empty());
        assert!(user.user_data().is_none());
        assert!(user.token().is_none());
    }

    #[tokio::test]
    async fn test_failed_registration_still_stores_credentials() {
        let client = ScriptedClient::replying(vec![ApiResponse::new(
            400,
            r#"{"error": "duplicate email"}"#,
        )]);
        let mut user = user_with(client.clone());

        let outcome = user.register().await.unwrap();
        assert_eq!(outcome, TaskOutcome::Rejected { status: 400 });

        let sent = client.sent();
        let body = sent[0].body.as_ref().unwrap();
        let credentials = user.user_data().unwrap();
        assert_eq!(body["email"], credentials.email.as_str());
        assert_eq!(body["password"], credentials.password.as_str());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_previous_token() {
        let client = ScriptedClient::replying(vec![
            ApiResponse::new(200, r#"{"message": "User created with success"}"#),
            ApiResponse::new(201, r#"{"user": "ana", "token": "first"}"#),
            ApiResponse::new(400, r#"{"error": "Wrong Password"}"#),
            ApiResponse::new(201, r#"{"user": "ana"}"#),
        ]);
        let mut user = user_with(client.clone());

        user.register().await.unwrap();
        assert_eq!(user.login().await.unwrap(), TaskOutcome::Succeeded);
        assert_eq!(user.token(), Some("first"));

        assert_eq!(
            user.login().await.unwrap(),
            TaskOutcome::Rejected { status: 400 }
        );
        assert_eq!(user.token(), Some("first"));

        user.login().await.unwrap();
        assert_eq!(user.token(), Some("first"));
    }

    #[tokio::test]
    async fn test_authorized_tasks_use_expected_routes() {
        let mut replies = vec![
            ApiResponse::new(200, "{}"),
            ApiResponse::new(201, r#"{"token": "tok"}"#),
        ];
        replies.extend((0..11).map(|_| ApiResponse::new(201, "{}")));
        let client = ScriptedClient::replying(replies);
        let mut user = user_with(client.clone());

        user.register().await.unwrap();
        user.login().await.unwrap();

        let expected = [
            (Task::CreateTalk, "POST", "/v1/talk"),
            (Task::GetTalks, "GET", "/v1/talk"),
            (Task::CreateMedia, "POST", "/v1/medias"),
            (Task::GetMedia, "GET", "/v1/medias"),
            (Task::CreateAnkiReview, "POST", "/v1/anki"),
            (Task::GetAnkiReview, "GET", "/v1/anki"),
            (Task::CreateVocabularyReview, "POST", "/v1/vocabulary"),
            (Task::GetVocabularyReview, "GET", "/v1/vocabulary"),
            (Task::CreateBook, "POST", "/v1/books"),
            (Task::GetBooks, "GET", "/v1/books"),
            (Task::HealthCheck, "GET", "/health"),
        ];

        for (task, _, _) in expected {
            user.perform(task).await.unwrap();
        }

        let sent = client.sent();
        assert_eq!(sent.len(), 2 + expected.len());
        for (request, (task, method, path)) in sent[2..].iter().zip(expected) {
            assert_eq!(request.method.as_str(), method, "{}", task);
            assert_eq!(request.path, path, "{}", task);
            if task == Task::HealthCheck {
                assert!(request.bearer.is_none());
            } else {
                assert_eq!(request.bearer.as_deref(), Some("tok"), "{}", task);
            }
        }
    }

    #[tokio::test]
    async fn test_outcome_follows_task_success_status() {
        let mut replies = vec![
            ApiResponse::new(Task::Register.success_status(), "{}"),
            ApiResponse::new(Task::Login.success_status(), r#"{"token": "tok"}"#),
        ];
        let authorized: Vec<Task> = Task::all()
            .iter()
            .copied()
            .filter(|task| task.requires_token() || *task == Task::HealthCheck)
            .collect();
        replies.extend(
            authorized
                .iter()
                .map(|task| ApiResponse::new(task.success_status(), "{}")),
        );
        // The same tasks again, each answered with the other success code
        replies.extend(authorized.iter().map(|task| {
            let other = if task.success_status() == 200 { 201 } else { 200 };
            ApiResponse::new(other, "{}")
        }));

        let client = ScriptedClient::replying(replies);
        let mut user = user_with(client);
        assert_eq!(user.register().await.unwrap(), TaskOutcome::Succeeded);
        assert_eq!(user.login().await.unwrap(), TaskOutcome::Succeeded);

        for task in &authorized {
            assert_eq!(user.perform(*task).await.unwrap(), TaskOutcome::Succeeded, "{}", task);
        }
        for task in &authorized {
            assert!(
                matches!(user.perform(*task).await.unwrap(), TaskOutcome::Rejected { .. }),
                "{}",
                task
            );
        }
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials {
            email: "a@b.io".to_string(),
            password: "hunter2hunter2".to_string(),
        };
        let rendered = format!("{:?}", credentials);
        assert!(rendered.contains("a@b.io"));
        assert!(!rendered.contains("hunter2"));
    }
}
