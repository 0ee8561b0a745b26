use crate::e2e::helpers;

use helpers::fixtures::{FakeTranslator, FakeTts, FAKE_TAMIL};
use helpers::TestContext;
use hyper::StatusCode;
use std::sync::Arc;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_render_the_translation_form(ctx: &TestContext) {
    let response = ctx.client.get("/").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response
        .header("content-type")
        .is_some_and(|v| v.starts_with("text/html")));

    let page = response.text();
    assert!(page.contains("Adaptive Tamil Translation System"));
    assert!(page.contains(r#"name="text""#));
    assert!(page.contains("Translate to Tamil"));
    assert!(!page.contains("<audio"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_render_results_after_form_submit(ctx: &TestContext) {
    let response = ctx
        .client
        .post_form(
            "/",
            &[("text", "Hello, how are you? I hope you are having a lovely day.")],
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let page = response.text();
    assert!(page.contains("Translation Completed"));
    assert!(page.contains(">en</code>"));
    assert!(page.contains(FAKE_TAMIL));
    assert!(page.contains("<audio controls"));
    assert!(page.contains(r#"download="tamil_translation.txt""#));

    // The embedded links resolve to the stored artifact
    let audio_src = extract_attr(&page, "src=\"/api/translations/");
    let audio = ctx.client.get(&audio_src).await.unwrap();
    audio.assert_status(StatusCode::OK);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_warn_on_empty_form_submit(ctx: &TestContext) {
    let response = ctx.client.post_form("/", &[("text", "   ")]).await.unwrap();

    response.assert_status(StatusCode::OK);

    let page = response.text();
    assert!(page.contains("Please enter some text"));
    assert!(!page.contains("Translation Completed"));
    assert!(ctx.translator.calls().is_empty());
    assert!(ctx.tts.calls().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_treat_missing_field_as_empty(ctx: &TestContext) {
    let response = ctx.client.post_form("/", &[]).await.unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response.text().contains("Please enter some text"));
}

#[tokio::test]
async fn it_should_show_backend_failure_inside_the_page() {
    let translator = Arc::new(FakeTranslator::failing("upstream unavailable"));
    let ctx = TestContext::with_fakes(translator, Arc::new(FakeTts::mp3())).await;

    let response = ctx
        .client
        .post_form("/", &[("text", "Good evening, my friends.")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert!(response
        .header("content-type")
        .is_some_and(|v| v.starts_with("text/html")));

    let page = response.text();
    assert!(page.contains("Translation failed"));
    assert!(page.contains("upstream unavailable"));
    assert!(page.contains(">Good evening, my friends.</textarea>"));
    assert!(!page.contains("<audio"));
}

#[tokio::test]
async fn it_should_show_speech_failure_inside_the_page() {
    let tts = Arc::new(FakeTts::failing("TTS returned status 429"));
    let ctx = TestContext::with_fakes(Arc::new(FakeTranslator::tamil()), tts).await;

    let response = ctx
        .client
        .post_form("/", &[("text", "Good evening, my friends.")])
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert!(response.text().contains("429"));
}

/// Return the path inside the first attribute value starting with `prefix`
fn extract_attr(page: &str, prefix: &str) -> String {
    let start = page.find(prefix).expect("attribute not found") + prefix.len() - "/api/translations/".len();
    let end = start + page[start..].find('"').expect("unterminated attribute");
    page[start..end].to_string()
}
