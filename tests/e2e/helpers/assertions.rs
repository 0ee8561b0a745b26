use serde_json::Value;

pub fn assert_translation_response(body: &Value, expected_language: &str, expected_tag: &str) {
    let id = body
        .get("id")
        .and_then(|v| v.as_str())
        .expect("Missing translation id");

    assert_eq!(
        body.get("detected_language").and_then(|v| v.as_str()),
        Some(expected_language)
    );
    assert_eq!(
        body.get("source_tag").and_then(|v| v.as_str()),
        Some(expected_tag)
    );
    assert_eq!(
        body.get("target_tag").and_then(|v| v.as_str()),
        Some("tam_Taml")
    );
    assert!(body
        .get("translated_text")
        .and_then(|v| v.as_str())
        .is_some_and(|t| !t.is_empty()));

    assert_eq!(
        body.get("audio_url").and_then(|v| v.as_str()),
        Some(format!("/api/translations/{}/audio", id).as_str())
    );
    assert_eq!(
        body.get("download_url").and_then(|v| v.as_str()),
        Some(format!("/api/translations/{}/text", id).as_str())
    );
    assert!(body.get("created_at").is_some());
}

/// Pull a string field out of a JSON body, panicking with context
pub fn json_str<'a>(body: &'a Value, field: &str) -> &'a str {
    body.get(field)
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| panic!("Missing string field '{}' in {}", field, body))
}
