use futures_util::TryStreamExt;
use podium_types::{Interviewer, VoiceRole};
use podium_voice::{SpeechConfig, SpeechGateway, VoiceError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> SpeechGateway {
    let config = SpeechConfig::new("test-xi-key", server.uri())
        .with_voice(VoiceRole::Default, "voice-default")
        .with_voice(VoiceRole::Interviewer(Interviewer::A), "voice-a");
    SpeechGateway::new(config, reqwest::Client::new())
}

async fn collect(stream: podium_voice::AudioStream) -> Vec<u8> {
    let chunks: Vec<bytes::Bytes> = stream.try_collect().await.unwrap();
    chunks.concat()
}

#[tokio::test]
async fn synthesize_streams_vendor_audio() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-to-speech/voice-a/stream"))
        .and(header("xi-api-key", "test-xi-key"))
        .and(body_json(json!({
            "text": "hello",
            "model_id": "eleven_multilingual_v2",
            "voice_settings": { "stability": 0.5, "similarity_boost": 0.8 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 1, 2, 3]))
        .expect(1)
        .mount(&server)
        .await;

    let stream = gateway(&server).synthesize("hello", "a").await.unwrap();
    assert_eq!(collect(stream).await, vec![0u8, 1, 2, 3]);
}

#[tokio::test]
async fn synthesize_uses_default_voice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-to-speech/voice-default/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let stream = gateway(&server)
        .synthesize("안녕하세요", "DEFAULT")
        .await
        .unwrap();
    assert_eq!(collect(stream).await, b"mp3".to_vec());
}

#[tokio::test]
async fn synthesize_rejects_unconfigured_role_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = gateway(&server);

    // B is a known role but has no voice configured.
    match gateway.synthesize("hi", "B").await {
        Err(VoiceError::InvalidRole(role)) => assert_eq!(role, "B"),
        other => panic!("expected InvalidRole, got {:?}", other.map(|_| ())),
    }
    match gateway.synthesize("hi", "Z").await {
        Err(VoiceError::InvalidRole(role)) => assert_eq!(role, "Z"),
        other => panic!("expected InvalidRole, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn synthesize_surfaces_vendor_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-to-speech/voice-default/stream"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .synthesize("hello", "default")
        .await
        .err()
        .expect("vendor failure should surface");

    match &err {
        VoiceError::Tts { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("expected Tts error, got {:?}", other),
    }
    assert!(err.to_string().contains("invalid api key"));
}

#[tokio::test]
async fn transcribe_returns_text_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio-to-text"))
        .and(header("xi-api-key", "test-xi-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "hi there" })))
        .expect(1)
        .mount(&server)
        .await;

    let text = gateway(&server)
        .transcribe(vec![1, 2, 3], "clip.webm")
        .await
        .unwrap();
    assert_eq!(text, "hi there");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"clip.webm\""));
}

#[tokio::test]
async fn transcribe_defaults_to_empty_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio-to-text"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "language": "ko" })))
        .mount(&server)
        .await;

    let text = gateway(&server)
        .transcribe(vec![9], "clip.wav")
        .await
        .unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn transcribe_surfaces_vendor_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio-to-text"))
        .respond_with(ResponseTemplate::new(422).set_body_string("unsupported format"))
        .mount(&server)
        .await;

    match gateway(&server).transcribe(vec![9], "clip.txt").await {
        Err(VoiceError::Stt { status, body }) => {
            assert_eq!(status.as_u16(), 422);
            assert_eq!(body, "unsupported format");
        }
        other => panic!("expected Stt error, got {:?}", other),
    }
}

#[test]
fn speech_config_parses_from_toml() {
    let config: SpeechConfig = toml::from_str(
        r#"
        api_key = "k"

        [voices]
        a = "voice-a"
        default = "voice-default"
        "#,
    )
    .unwrap();

    assert_eq!(config.base_url, podium_voice::DEFAULT_ELEVENLABS_BASE_URL);
    assert_eq!(config.model_id, podium_voice::DEFAULT_TTS_MODEL_ID);
    assert_eq!(config.voices.voice_id(VoiceRole::Default), Some("voice-default"));
    assert_eq!(
        config.voices.voice_id(VoiceRole::Interviewer(Interviewer::C)),
        None
    );
}
