//! ChatRelay — turns a conversation plus language code into one completion call.
//!
//! Per request: check credentials, load active listings (best-effort), render
//! the language's system prompt, prepend it to the caller's messages, call the
//! completion API once and return the first choice's text.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::assistant::language;
use crate::assistant::prompts::render_system_prompt;
use crate::config::{AI_GATEWAY_KEY_VAR, DATA_SERVICE_URL_VAR};
use crate::errors::AppError;
use crate::listings::store::ListingStore;
use crate::llm_client::{CompletionClient, CompletionRequest, LlmError};
use crate::models::chat::ChatMessage;
use crate::models::listing::JobListing;

pub const FALLBACK_REPLY: &str = "I'm sorry, I couldn't generate a response.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatReply {
    pub message: String,
}

/// Stateless relay between UI clients and the completion API.
///
/// Either collaborator may be absent when its credentials were not configured;
/// requests then fail with `AppError::MissingConfig` before any I/O.
#[derive(Clone)]
pub struct ChatRelay {
    store: Option<Arc<dyn ListingStore>>,
    completions: Option<Arc<dyn CompletionClient>>,
}

impl ChatRelay {
    pub fn new(
        store: Option<Arc<dyn ListingStore>>,
        completions: Option<Arc<dyn CompletionClient>>,
    ) -> Self {
        Self { store, completions }
    }

    pub async fn respond(&self, request: ChatRequest) -> Result<ChatReply, AppError> {
        let completions = self
            .completions
            .as_deref()
            .ok_or(AppError::MissingConfig(AI_GATEWAY_KEY_VAR))?;
        let store = self
            .store
            .as_deref()
            .ok_or(AppError::MissingConfig(DATA_SERVICE_URL_VAR))?;

        let listings = load_listings(store).await;

        let profile = language::resolve(request.language.as_deref());
        let system_prompt = render_system_prompt(profile.prompt, &listings);
        info!(
            "Relaying {} message(s) in '{}' with {} listing(s) in context",
            request.messages.len(),
            profile.code,
            listings.len()
        );

        let outbound = CompletionRequest::new(build_messages(system_prompt, request.messages));

        let completion = completions
            .complete(&outbound)
            .await
            .map_err(map_llm_error)?;

        let message = completion.text().unwrap_or(FALLBACK_REPLY).to_string();
        Ok(ChatReply { message })
    }
}

/// Listings are supplementary context: a failed read degrades to an empty list.
async fn load_listings(store: &dyn ListingStore) -> Vec<JobListing> {
    match store.active_listings().await {
        Ok(listings) => listings,
        Err(e) => {
            warn!("Error fetching jobs, continuing without listings: {e}");
            Vec::new()
        }
    }
}

/// System prompt first, then the caller's messages untouched and in order.
fn build_messages(system_prompt: String, history: Vec<ChatMessage>) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(history);
    messages
}

fn map_llm_error(err: LlmError) -> AppError {
    match err {
        LlmError::RateLimited => AppError::RateLimited,
        LlmError::PaymentRequired => AppError::PaymentRequired,
        LlmError::Api { status, message } => {
            error!("AI gateway error: {status} {message}");
            AppError::Gateway
        }
        LlmError::Http(e) => AppError::Internal(e.to_string()),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::listings::store::{AuthUser, StoreError};
    use crate::llm_client::{Choice, ChoiceMessage, CompletionResponse};
    use crate::models::chat::Role;
    use crate::models::listing::{ListingStatus, NewJobListing};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use uuid::Uuid;

    /// The only access token `FakeStore` accepts.
    pub(crate) const EMPLOYER_TOKEN: &str = "employer-jwt";

    pub(crate) fn employer_id() -> Uuid {
        Uuid::parse_str("0b7f3b4e-2c55-4c8a-9a51-6c1f8e2d3a44").unwrap()
    }

    fn rejected_token() -> StoreError {
        StoreError::Api {
            status: 401,
            message: "invalid JWT".to_string(),
        }
    }

    pub(crate) struct FakeStore {
        pub listings: Option<Vec<JobListing>>,
        pub reads: AtomicUsize,
        pub inserted: Mutex<Vec<(String, NewJobListing)>>,
    }

    impl FakeStore {
        pub fn with(listings: Vec<JobListing>) -> Self {
            Self {
                listings: Some(listings),
                reads: AtomicUsize::new(0),
                inserted: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                listings: None,
                reads: AtomicUsize::new(0),
                inserted: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ListingStore for FakeStore {
        async fn active_listings(&self) -> Result<Vec<JobListing>, StoreError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.listings.clone().ok_or(StoreError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
        }

        async fn listings_visible_to(
            &self,
            access_token: &str,
        ) -> Result<Vec<JobListing>, StoreError> {
            self.authenticated_user(access_token).await?;
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.listings.clone().ok_or(StoreError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
        }

        async fn authenticated_user(&self, access_token: &str) -> Result<AuthUser, StoreError> {
            if access_token != EMPLOYER_TOKEN {
                return Err(rejected_token());
            }
            Ok(AuthUser {
                id: employer_id(),
                email: Some("hr@acme.in".to_string()),
            })
        }

        async fn insert_listing(
            &self,
            access_token: &str,
            listing: &NewJobListing,
        ) -> Result<JobListing, StoreError> {
            if access_token != EMPLOYER_TOKEN {
                return Err(rejected_token());
            }
            self.inserted
                .lock()
                .unwrap()
                .push((access_token.to_string(), listing.clone()));
            Ok(JobListing {
                id: Uuid::new_v4(),
                employer_id: Some(listing.employer_id),
                title: listing.title.clone(),
                company_name: listing.company_name.clone(),
                role: listing.role.clone(),
                salary: listing.salary.clone(),
                location: listing.location.clone(),
                skills_required: listing.skills_required.clone(),
                description: listing.description.clone(),
                status: listing.status,
                created_at: Utc::now(),
            })
        }
    }

    pub(crate) enum Outcome {
        Reply(Option<String>),
        Status(u16),
    }

    pub(crate) struct FakeCompletions {
        pub outcome: Outcome,
        pub requests: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeCompletions {
        pub fn replying(text: &str) -> Self {
            Self::new(Outcome::Reply(Some(text.to_string())))
        }

        pub fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionClient for FakeCompletions {
        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.outcome {
                Outcome::Reply(None) => Ok(CompletionResponse::default()),
                Outcome::Reply(Some(text)) => Ok(CompletionResponse {
                    choices: vec![Choice {
                        message: Some(ChoiceMessage {
                            content: Some(text.clone()),
                        }),
                    }],
                }),
                Outcome::Status(429) => Err(LlmError::RateLimited),
                Outcome::Status(402) => Err(LlmError::PaymentRequired),
                Outcome::Status(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream exploded".to_string(),
                }),
            }
        }
    }

    pub(crate) fn sample_listing(title: &str, skills: &[&str]) -> JobListing {
        JobListing {
            id: Uuid::new_v4(),
            employer_id: None,
            title: title.to_string(),
            company_name: "Acme Technologies".to_string(),
            role: "Engineering".to_string(),
            salary: "15 LPA".to_string(),
            location: "Remote".to_string(),
            skills_required: skills.iter().map(|s| s.to_string()).collect(),
            description: Some("Build the web app".to_string()),
            status: ListingStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn user(content: &str) -> ChatMessage {
        ChatMessage {
            role: Role::User,
            content: content.to_string(),
        }
    }

    fn assistant(content: &str) -> ChatMessage {
        ChatMessage {
            role: Role::Assistant,
            content: content.to_string(),
        }
    }

    fn relay(store: &Arc<FakeStore>, completions: &Arc<FakeCompletions>) -> ChatRelay {
        ChatRelay::new(
            Some(store.clone() as Arc<dyn ListingStore>),
            Some(completions.clone() as Arc<dyn CompletionClient>),
        )
    }

    fn request(messages: Vec<ChatMessage>, language: Option<&str>) -> ChatRequest {
        ChatRequest {
            messages,
            language: language.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_react_node_scenario() {
        let store = Arc::new(FakeStore::with(vec![sample_listing(
            "Frontend Engineer",
            &["React", "Node"],
        )]));
        let completions = Arc::new(FakeCompletions::replying("Try the Frontend Engineer role!"));

        let reply = relay(&store, &completions)
            .respond(request(vec![user("I know React and Node")], Some("en")))
            .await
            .unwrap();

        assert_eq!(reply.message, "Try the Frontend Engineer role!");
        let sent = completions.requests.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].model, "google/gemini-2.5-flash");
        let system = &sent[0].messages[0];
        assert_eq!(system.role, Role::System);
        assert!(system.content.contains("Frontend Engineer"));
        assert!(system.content.contains("React, Node"));
    }

    #[tokio::test]
    async fn test_history_follows_system_message_unchanged() {
        let store = Arc::new(FakeStore::with(vec![]));
        let completions = Arc::new(FakeCompletions::replying("ok"));
        let history = vec![
            user("Hello"),
            assistant("Hi! What are your skills?"),
            user("Welding and fabrication"),
        ];

        relay(&store, &completions)
            .respond(request(history.clone(), Some("hi")))
            .await
            .unwrap();

        let sent = completions.requests.lock().unwrap();
        assert_eq!(sent[0].messages.len(), history.len() + 1);
        assert_eq!(sent[0].messages[0].role, Role::System);
        assert_eq!(&sent[0].messages[1..], history.as_slice());
    }

    #[tokio::test]
    async fn test_unknown_language_uses_english_prompt() {
        let listings = vec![sample_listing("Chef", &["Cooking"])];
        let store = Arc::new(FakeStore::with(listings));
        let completions = Arc::new(FakeCompletions::replying("ok"));
        let relay = relay(&store, &completions);

        relay
            .respond(request(vec![user("hi")], Some("fr")))
            .await
            .unwrap();
        relay
            .respond(request(vec![user("hi")], Some("en")))
            .await
            .unwrap();
        relay.respond(request(vec![user("hi")], None)).await.unwrap();

        let sent = completions.requests.lock().unwrap();
        assert_eq!(sent[0].messages[0], sent[1].messages[0]);
        assert_eq!(sent[2].messages[0], sent[1].messages[0]);
    }

    #[tokio::test]
    async fn test_store_failure_degrades_to_no_jobs() {
        let store = Arc::new(FakeStore::failing());
        let completions = Arc::new(FakeCompletions::replying("ok"));

        let reply = relay(&store, &completions)
            .respond(request(vec![user("any jobs?")], Some("pa")))
            .await
            .unwrap();

        assert_eq!(reply.message, "ok");
        let sent = completions.requests.lock().unwrap();
        assert!(sent[0].messages[0]
            .content
            .contains("ਇਸ ਸਮੇਂ ਕੋਈ ਨੌਕਰੀ ਉਪਲਬਧ ਨਹੀਂ ਹੈ।"));
    }

    #[tokio::test]
    async fn test_empty_choices_returns_fallback() {
        let store = Arc::new(FakeStore::with(vec![]));
        let completions = Arc::new(FakeCompletions::new(Outcome::Reply(None)));

        let reply = relay(&store, &completions)
            .respond(request(vec![user("hello")], Some("en")))
            .await
            .unwrap();

        assert_eq!(reply.message, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_gateway_statuses_map_to_app_errors() {
        let cases = [
            (429, 429, "Rate limit exceeded. Please try again later."),
            (402, 402, "Payment required. Please add credits to your workspace."),
            (500, 500, "AI gateway error"),
            (400, 500, "AI gateway error"),
        ];
        for (upstream, expected_status, expected_message) in cases {
            let store = Arc::new(FakeStore::with(vec![]));
            let completions = Arc::new(FakeCompletions::new(Outcome::Status(upstream)));
            let err = relay(&store, &completions)
                .respond(request(vec![user("hello")], None))
                .await
                .unwrap_err();
            assert_eq!(err.status().as_u16(), expected_status, "upstream {upstream}");
            assert_eq!(err.to_string(), expected_message);
        }
    }

    #[tokio::test]
    async fn test_missing_ai_credential_makes_no_calls() {
        let store = Arc::new(FakeStore::with(vec![]));
        let relay = ChatRelay::new(Some(store.clone() as Arc<dyn ListingStore>), None);

        let err = relay
            .respond(request(vec![user("hello")], None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MissingConfig("LOVABLE_API_KEY")));
        assert_eq!(store.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_data_service_makes_no_completion_call() {
        let completions = Arc::new(FakeCompletions::replying("ok"));
        let relay = ChatRelay::new(
            None,
            Some(completions.clone() as Arc<dyn CompletionClient>),
        );

        let err = relay
            .respond(request(vec![user("hello")], None))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MissingConfig("SUPABASE_URL")));
        assert_eq!(completions.calls(), 0);
    }

    #[test]
    fn test_request_without_language_deserializes() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"messages":[{"role":"user","content":"hi"}]}"#).unwrap();
        assert!(request.language.is_none());
        assert_eq!(request.messages, vec![user("hi")]);
    }
}
