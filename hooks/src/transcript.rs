use std::path::Path;

/// Extract the text of the last assistant message from a JSONL
/// transcript. Lines that do not parse are skipped; a missing file
/// yields `None`.
pub fn last_assistant_text(path: &Path) -> Option<String> {
    let data = std::fs::read_to_string(path).ok()?;
    let mut last: Option<String> = None;
    for line in data.lines() {
        let Ok(value) = serde_json::from_str::<serde_json::Value>(line) else {
            continue;
        };
        let message = value.get("message").unwrap_or(&value);
        if message.get("role").and_then(|r| r.as_str()) != Some("assistant") {
            continue;
        }
        if let Some(text) = message_text(message) {
            if !text.is_empty() {
                last = Some(text);
            }
        }
    }
    last
}

/// Flatten a message's content to plain text. Content is either a
/// bare string or an array of typed blocks.
fn message_text(message: &serde_json::Value) -> Option<String> {
    match message.get("content") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Array(blocks)) => {
            let parts: Vec<&str> = blocks
                .iter()
                .filter(|b| b.get("type").and_then(|t| t.as_str()) == Some("text"))
                .filter_map(|b| b.get("text").and_then(|t| t.as_str()))
                .collect();
            Some(parts.join("\n"))
        }
        _ => None,
    }
}
