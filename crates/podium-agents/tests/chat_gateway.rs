use podium_agents::{ChatError, ChatGateway, DifyConfig};
use podium_types::Interviewer;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> ChatGateway {
    let config = DifyConfig::new("app-shared", server.uri())
        .with_agent(Interviewer::A, "app-a", "agent-a")
        .with_agent(Interviewer::B, "app-b", "agent-b");
    ChatGateway::new(config, reqwest::Client::new())
}

#[tokio::test]
async fn chat_uses_shared_credential_and_empty_inputs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat-messages"))
        .and(header("authorization", "Bearer app-shared"))
        .and(body_json(json!({
            "inputs": {},
            "query": "배송은 얼마나 걸리나요?",
            "user": "guest"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "보통 2-3일 걸립니다.",
            "id": "msg-1",
            "conversation_id": "conv-1",
            "metadata": { "usage": { "total_tokens": 12 } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gateway(&server)
        .chat("배송은 얼마나 걸리나요?", "guest")
        .await
        .unwrap();

    assert_eq!(reply.answer.as_deref(), Some("보통 2-3일 걸립니다."));
    assert_eq!(reply.id.as_deref(), Some("msg-1"));
}

#[tokio::test]
async fn agent_chat_targets_agent_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agents/agent-b/chat-messages"))
        .and(header("authorization", "Bearer app-b"))
        .and(body_json(json!({
            "inputs": { "name": "minji" },
            "query": "I led the migration project.",
            "user": "minji"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "answer": "Tell me more." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = gateway(&server)
        .agent_chat(Interviewer::B, "minji", "I led the migration project.")
        .await
        .unwrap();

    assert_eq!(reply.answer.as_deref(), Some("Tell me more."));
    assert_eq!(reply.id, None);
}

#[tokio::test]
async fn agent_chat_without_credentials_makes_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    assert!(matches!(
        gateway.agent(Interviewer::C),
        Err(ChatError::MissingAgent(Interviewer::C))
    ));

    match gateway.agent_chat(Interviewer::C, "minji", "hello").await {
        Err(ChatError::MissingAgent(role)) => assert_eq!(role, Interviewer::C),
        other => panic!("expected MissingAgent, got {:?}", other),
    }
}

#[tokio::test]
async fn non_success_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat-messages"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    match gateway(&server).chat("hi", "guest").await {
        Err(ChatError::Upstream { status, body }) => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn non_200_success_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat-messages"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "answer": "queued" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/agents/agent-a/chat-messages"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    match gateway(&server).chat("hi", "guest").await {
        Err(ChatError::Upstream { status, .. }) => assert_eq!(status.as_u16(), 202),
        other => panic!("expected Upstream, got {:?}", other),
    }

    match gateway(&server)
        .agent_chat(Interviewer::A, "minji", "hello")
        .await
    {
        Err(ChatError::Upstream { status, body }) => {
            assert_eq!(status.as_u16(), 204);
            assert!(body.is_empty());
        }
        other => panic!("expected Upstream, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agents/agent-a/chat-messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = gateway(&server)
        .agent_chat(Interviewer::A, "minji", "hello")
        .await;
    assert!(matches!(result, Err(ChatError::Decode(_))));
}

#[test]
fn dify_config_parses_from_toml() {
    let config: DifyConfig = toml::from_str(
        r#"
        api_key = "app-shared"

        [agents.a]
        api_key = "app-a"
        agent_id = "agent-a"
        "#,
    )
    .unwrap();

    assert_eq!(config.base_url, podium_agents::DEFAULT_DIFY_BASE_URL);
    assert!(config.agents.get(Interviewer::A).is_complete());
    assert_eq!(
        config.agents.missing_roles(),
        vec![Interviewer::B, Interviewer::C]
    );
}
