//! Structured extraction from page text.

use serde_json::{Value, json};

pub const EXTRACT_PROMPT: &str = r#"You extract information from web pages.
You receive the page URL, title and visible text, an instruction and a JSON schema.
Reply with a JSON object that follows the schema and holds what the instruction asks for.
Put the extracted content under "data". If the information is not on the page, set "data" to null.
Reply with JSON only."#;

pub fn extract_prompt(instruction: &str, schema: &Value, url: &str, title: &str, text: &str) -> String {
    format!(
        "URL: {}\nTitle: {}\nSchema: {}\nInstruction: {}\n\nPage text:\n{}",
        url, title, schema, instruction, text
    )
}

/// Ensure the extraction has a top-level `data` member.
pub fn wrap_extraction(reply: Value) -> Value {
    match reply {
        Value::Object(map) if map.contains_key("data") => Value::Object(map),
        other => json!({ "data": other }),
    }
}
