#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use podium_agents::{ChatGateway, DifyConfig};
use podium_server::AppState;
use podium_types::{Interviewer, VoiceRole};
use podium_voice::{SpeechConfig, SpeechGateway};
use serde_json::Value;
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const BOUNDARY: &str = "podium-test-boundary";

/// Mock speech and chat vendors.
pub struct Vendors {
    pub speech: MockServer,
    pub dify: MockServer,
}

impl Vendors {
    pub async fn start() -> Self {
        Self {
            speech: MockServer::start().await,
            dify: MockServer::start().await,
        }
    }

    /// Every voice and agent configured.
    pub fn speech_config(&self) -> SpeechConfig {
        SpeechConfig::new("xi-test", self.speech.uri())
            .with_voice(VoiceRole::Default, "voice-default")
            .with_voice(VoiceRole::Interviewer(Interviewer::A), "voice-a")
            .with_voice(VoiceRole::Interviewer(Interviewer::B), "voice-b")
            .with_voice(VoiceRole::Interviewer(Interviewer::C), "voice-c")
    }

    pub fn dify_config(&self) -> DifyConfig {
        DifyConfig::new("app-shared", self.dify.uri())
            .with_agent(Interviewer::A, "app-a", "agent-a")
            .with_agent(Interviewer::B, "app-b", "agent-b")
            .with_agent(Interviewer::C, "app-c", "agent-c")
    }

    pub fn state(&self) -> AppState {
        state_with(self.speech_config(), self.dify_config())
    }

    /// Fails the test on drop if either vendor receives any request.
    pub async fn expect_no_calls(&self) {
        for server in [&self.speech, &self.dify] {
            Mock::given(wiremock::matchers::any())
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(server)
                .await;
        }
    }
}

pub fn state_with(speech: SpeechConfig, dify: DifyConfig) -> AppState {
    let http = reqwest::Client::new();
    AppState::new(
        SpeechGateway::new(speech, http.clone()),
        ChatGateway::new(dify, http),
        25 * 1024 * 1024,
    )
}

pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a multipart request with a single part named `field`.
pub fn multipart_request(uri: &str, field: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: audio/webm\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Builds a multipart request with a single plain text part, the way a
/// browser `FormData` sends string fields.
pub fn multipart_text_request(uri: &str, field: &str, value: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{b}--\r\n",
        b = BOUNDARY,
    );

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
