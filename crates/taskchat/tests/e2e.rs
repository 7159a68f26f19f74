// SPDX-FileCopyrightText: 2026 Taskchat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: SQLite host, Gemini provider against a mock server,
//! and the assistant responder wired the way the binary wires them.
//!
//! Each test creates its own temp database and mock server.

use std::sync::Arc;

use serde_json::{Value, json};
use taskchat_agent::notices;
use taskchat_agent::{AssistantResponder, HostSession, ResponderSettings};
use taskchat_config::model::GeminiConfig;
use taskchat_core::MessageStore;
use taskchat_core::types::{ChannelId, PartnerId};
use taskchat_gemini::GeminiProvider;
use taskchat_storage::{Database, NewTask, SqliteHost};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHANNEL: ChannelId = ChannelId(1);
const API_KEY: &str = "e2e-secret";
const MODEL: &str = "gemini-e2e";

struct Env {
    host: Arc<SqliteHost>,
    responder: AssistantResponder,
    session: HostSession,
    server: MockServer,
    bot: PartnerId,
    user: PartnerId,
    _dir: TempDir,
}

async fn setup() -> Env {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("e2e.db");
    let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
    let host = Arc::new(SqliteHost::new(db));

    let bot = host.insert_partner("Asistente AI").await.unwrap();
    let admin = host.insert_partner("Administrador").await.unwrap();
    let user = host.insert_partner("Lucía").await.unwrap();
    host.link_reference("chatbot_ai.ai_assistant_partner", bot)
        .await
        .unwrap();
    host.link_reference("base.partner_admin", admin)
        .await
        .unwrap();
    host.set_param("chatbot_ai.gemini_api_key", API_KEY)
        .await
        .unwrap();

    let server = MockServer::start().await;
    let provider = GeminiProvider::new(&GeminiConfig {
        base_url: server.uri(),
        model: MODEL.to_string(),
        timeout_secs: Some(5),
    })
    .unwrap();
    let responder = AssistantResponder::new(Arc::new(provider), ResponderSettings::default());
    let session = HostSession::from_host(host.clone());

    Env {
        host,
        responder,
        session,
        server,
        bot,
        user,
        _dir: dir,
    }
}

fn reply_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "modelVersion": MODEL
    })
}

async fn ask(env: &Env, body: &str) {
    let message = env
        .host
        .insert_message(CHANNEL, Some(env.user), body)
        .await
        .unwrap();
    env.responder
        .on_message_posted(&env.session, &message)
        .await;
}

async fn sent_payload(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    serde_json::from_slice(&requests[0].body).unwrap()
}

#[tokio::test]
async fn reply_is_stored_under_the_assistant() {
    let env = setup().await;
    env.host
        .insert_task(&NewTask {
            project: Some("Almacén".into()),
            assignees: vec!["Lucía".into()],
            ..NewTask::named("Contar stock")
        })
        .await
        .unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/models/{MODEL}:generateContent")))
        .and(header("x-goog-api-key", API_KEY))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(reply_body("Tienes una tarea: Contar stock.")),
        )
        .expect(1)
        .mount(&env.server)
        .await;

    ask(&env, "<p>¿Qué tengo pendiente?</p>").await;

    let history = env.host.recent_comments(CHANNEL, 10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].author_id, Some(env.bot));
    assert_eq!(history[0].body, "Tienes una tarea: Contar stock.");

    let payload = sent_payload(&env.server).await;
    assert_eq!(
        payload["system_instruction"]["parts"][0]["text"],
        taskchat_agent::SYSTEM_INSTRUCTION
    );
    let contents = payload["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 2);
    assert_eq!(contents[0]["role"], "user");
    let context = contents[0]["parts"][0]["text"].as_str().unwrap();
    assert!(context.starts_with("Contexto:\nTienes 1 tareas activas:"));
    assert!(context.contains("- Contar stock | Estado: In Progress"));
    assert!(context.contains("Asignado a: Lucía"));
    assert!(context.contains("Proyecto: Almacén"));
    assert_eq!(contents[1]["parts"][0]["text"], "¿Qué tengo pendiente?");
}

#[tokio::test]
async fn api_error_stores_failure_notice() {
    let env = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&env.server)
        .await;

    ask(&env, "hola").await;

    let history = env.host.recent_comments(CHANNEL, 10).await.unwrap();
    assert_eq!(history[0].body, notices::API_FAILURE);
    assert_eq!(history[0].author_id, Some(env.bot));
}

#[tokio::test]
async fn empty_candidates_store_delivery_notice() {
    let env = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&env.server)
        .await;

    ask(&env, "hola").await;

    let history = env.host.recent_comments(CHANNEL, 10).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].body, notices::DELIVERY_FAILED);
}

#[tokio::test]
async fn missing_key_never_reaches_the_api() {
    let env = setup().await;
    env.host
        .set_param("chatbot_ai.gemini_api_key", "")
        .await
        .unwrap();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("no")))
        .expect(0)
        .mount(&env.server)
        .await;

    ask(&env, "hola").await;

    let history = env.host.recent_comments(CHANNEL, 10).await.unwrap();
    assert_eq!(history[0].body, notices::MISSING_API_KEY);
}

#[tokio::test]
async fn unreadable_task_dates_degrade_context() {
    let env = setup().await;
    env.host
        .database()
        .connection()
        .call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute(
                "INSERT INTO tasks (name, date_deadline) VALUES ('rota', 'mañana')",
                [],
            )?;
            Ok(())
        })
        .await
        .unwrap();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("De acuerdo.")))
        .mount(&env.server)
        .await;

    ask(&env, "hola").await;

    let payload = sent_payload(&env.server).await;
    assert_eq!(
        payload["contents"][0]["parts"][0]["text"],
        "Contexto:\nError al obtener el contexto de tareas."
    );
    let history = env.host.recent_comments(CHANNEL, 10).await.unwrap();
    assert_eq!(history[0].body, "De acuerdo.");
}

#[tokio::test]
async fn assistant_replies_feed_the_next_prompt() {
    let env = setup().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Primera respuesta")))
        .up_to_n_times(1)
        .mount(&env.server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Segunda respuesta")))
        .mount(&env.server)
        .await;

    ask(&env, "primera").await;
    ask(&env, "segunda").await;

    let requests = env.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let payload: Value = serde_json::from_slice(&requests[1].body).unwrap();
    let roles: Vec<(&str, &str)> = payload["contents"]
        .as_array()
        .unwrap()
        .iter()
        .skip(1)
        .map(|c| {
            (
                c["role"].as_str().unwrap(),
                c["parts"][0]["text"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        roles,
        [
            ("user", "primera"),
            ("model", "Primera respuesta"),
            ("user", "segunda"),
        ]
    );
}
