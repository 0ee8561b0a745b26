use crate::e2e::helpers;

use helpers::assertions::json_str;
use helpers::fixtures::{FAKE_MP3, FAKE_TAMIL};
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use uuid::Uuid;

async fn translate(ctx: &TestContext) -> serde_json::Value {
    let response = ctx
        .client
        .post(
            "/api/translate",
            &json!({ "text": "Thank you very much for your kind help yesterday." }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    response.body.clone().unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_synthesized_audio(ctx: &TestContext) {
    let body = translate(ctx).await;

    let response = ctx.client.get(json_str(&body, "audio_url")).await.unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "audio/mpeg")
        .assert_header("x-speech-language", "ta");
    assert_eq!(response.body_bytes, FAKE_MP3);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_download_translated_text_as_attachment(ctx: &TestContext) {
    let body = translate(ctx).await;

    let response = ctx
        .client
        .get(json_str(&body, "download_url"))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "text/plain; charset=utf-8")
        .assert_header(
            "content-disposition",
            "attachment; filename=\"tamil_translation.txt\"",
        );
    assert_eq!(response.text(), FAKE_TAMIL);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_artifacts_of_separate_requests_apart(ctx: &TestContext) {
    let first = translate(ctx).await;
    let second = translate(ctx).await;

    assert_ne!(json_str(&first, "id"), json_str(&second, "id"));

    for body in [&first, &second] {
        let response = ctx.client.get(json_str(body, "audio_url")).await.unwrap();
        response.assert_status(StatusCode::OK);
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_artifact(ctx: &TestContext) {
    let id = Uuid::new_v4();

    let response = ctx
        .client
        .get(&format!("/api/translations/{}/audio", id))
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    let response = ctx
        .client
        .get(&format!("/api/translations/{}/text", id))
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_artifact_id(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/translations/not-a-uuid/audio")
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forget_removed_artifacts(ctx: &TestContext) {
    let body = translate(ctx).await;
    let id: Uuid = json_str(&body, "id").parse().unwrap();

    ctx.audio_store.remove(id).await;

    let response = ctx.client.get(json_str(&body, "audio_url")).await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}
