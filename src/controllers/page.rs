use axum::{extract::State, http::StatusCode, response::Html, Form};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use serde::Deserialize;
use std::sync::Arc;

use super::translation::DOWNLOAD_FILE_NAME;
use crate::{
    domain::translation::{
        audio_url, download_url, TranslationResult, TranslationService, TranslationServiceApi,
        EMPTY_INPUT_WARNING,
    },
    error::AppError,
};

const PAGE_TITLE: &str = "Adaptive Tamil Translation System";

const STYLE: &str = r#"
    body {
        font-family: system-ui, -apple-system, sans-serif;
        line-height: 1.6;
        max-width: 760px;
        margin: 0 auto;
        padding: 24px;
        color: #222;
    }
    textarea { width: 100%; font-size: 1rem; padding: 8px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 18px; font-size: 1rem; cursor: pointer; }
    .warning { background: #fff3cd; border: 1px solid #ffc107; padding: 12px; border-radius: 4px; }
    .error { background: #f8d7da; border: 1px solid #dc3545; padding: 12px; border-radius: 4px; }
    .success { background: #d1e7dd; border: 1px solid #198754; padding: 12px; border-radius: 4px; }
    .result { margin-top: 24px; }
    audio { width: 100%; margin: 12px 0; }
    code { background: #f4f4f4; padding: 2px 6px; border-radius: 3px; }
"#;

/// Form body for POST /
#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    #[serde(default)]
    pub text: String,
}

/// What to show under the form
enum Outcome<'a> {
    Nothing,
    Warning(&'a str),
    Failed(&'a str),
    Translated(&'a TranslationResult),
}

pub struct PageController {
    translation_service: Arc<TranslationService>,
}

impl PageController {
    pub fn new(translation_service: Arc<TranslationService>) -> Self {
        Self {
            translation_service,
        }
    }

    /// GET / - Empty translation form
    pub async fn index() -> Html<String> {
        Html(render_page("", Outcome::Nothing).into_string())
    }

    /// POST / - Translate the submitted text and render the results.
    /// Backend failures are shown inside the page with the error status.
    pub async fn submit(
        State(controller): State<Arc<PageController>>,
        Form(form): Form<TranslateForm>,
    ) -> (StatusCode, Html<String>) {
        if form.text.trim().is_empty() {
            let page = render_page(&form.text, Outcome::Warning(EMPTY_INPUT_WARNING));
            return (StatusCode::OK, Html(page.into_string()));
        }

        match controller.translation_service.translate(form.text.clone()).await {
            Ok(result) => {
                let page = render_page(&form.text, Outcome::Translated(&result));
                (StatusCode::OK, Html(page.into_string()))
            }
            Err(e) => {
                let error = AppError::from(e);
                error.log();
                let message = error.to_string();
                let page = render_page(&form.text, Outcome::Failed(&message));
                (error.status_code(), Html(page.into_string()))
            }
        }
    }
}

fn render_page(input: &str, outcome: Outcome<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (PAGE_TITLE) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                h1 { "🌐 " (PAGE_TITLE) }
                p { "Translate " strong { "any language → Tamil" } " with text & voice output" }

                form method="post" action="/" {
                    label for="text" { "✍️ Enter text in ANY language" }
                    textarea id="text" name="text" rows="6"
                        placeholder="Type English / Hindi / French / Any language..." { (input) }
                    button type="submit" { "🔁 Translate to Tamil" }
                }

                @match outcome {
                    Outcome::Nothing => {}
                    Outcome::Warning(message) => {
                        div class="warning result" role="alert" { (message) }
                    }
                    Outcome::Failed(message) => {
                        div class="error result" role="alert" {
                            "Translation failed: " (message)
                        }
                    }
                    Outcome::Translated(result) => {
                        (render_result(result))
                    }
                }
            }
        }
    }
}

fn render_result(result: &TranslationResult) -> Markup {
    html! {
        div class="result" {
            div class="success" { "Translation Completed ✅" }
            p {
                strong { "Detected Language:" } " "
                code id="detected-language" { (result.detected.code) }
            }
            label for="translation" { "📘 Tamil Translation" }
            textarea id="translation" rows="6" readonly { (result.translated_text) }
            audio controls src=(audio_url(result.artifact_id)) {}
            p {
                a href=(download_url(result.artifact_id)) download=(DOWNLOAD_FILE_NAME) {
                    "⬇️ Download Tamil Text"
                }
            }
        }
    }
}
