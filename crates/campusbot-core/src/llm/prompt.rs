//! Prompt assembly for generation requests

use super::{ChatMessage, Sender};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SYSTEM_PROMPT: &str = "Act as an expert virtual assistant for the university.
Use ONLY the structured information provided (displayed below as JSON blobs) to answer any question about the campus, admissions, academics, campus life, placement, or student services.
If you do not know the answer, politely say so and direct the user to appropriate university contacts.

Additional Guidelines:
- Do not speculate: if information is unknown, say so.
- For contact queries, provide up-to-date emails, phone numbers and office hours.
- For procedural queries, give stepwise instructions from the data.
- For requests about locations, blocks, or buildings, reference the campus map data.
- For sensitive issues (grievances, delays), provide official escalation contacts.
- Use friendly, concise language.
- Separate your answer into paragraphs and, if needed, simple markdown tables.
- Suggest next steps, links, or contacts if available.

If no answer is found: \"Sorry, I don't have that information. Please contact the relevant department.\"";

/// One turn of a generateContent request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

impl Content {
    fn new(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// System prompt and context as the opening user turn, then the transcript
/// with bot messages mapped to the `model` role.
pub fn build_contents(messages: &[ChatMessage], context: &[Value]) -> Result<Vec<Content>> {
    let context_json = serde_json::to_string_pretty(context)?;
    let preamble = format!("{}\n\nContext Data (JSON): {}", SYSTEM_PROMPT, context_json);

    let mut contents = Vec::with_capacity(messages.len() + 1);
    contents.push(Content::new("user", preamble));
    contents.extend(messages.iter().map(|msg| {
        let role = match msg.sender {
            Sender::User => "user",
            Sender::Bot => "model",
        };
        Content::new(role, msg.text.clone())
    }));
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_contents_layout() {
        let messages = vec![
            ChatMessage::bot("Welcome! Ask me anything."),
            ChatMessage::user("What hostels are available?"),
        ];
        let context = vec![json!({"table": "hostels", "rows": [{"id": 1, "name": "Aryabhatta"}]})];

        let contents = build_contents(&messages, &context).unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0].role, "user");
        assert!(contents[0].parts[0].text.starts_with(SYSTEM_PROMPT));
        assert!(contents[0].parts[0].text.contains("Context Data (JSON): "));
        assert!(contents[0].parts[0].text.contains("\"Aryabhatta\""));
        assert_eq!(contents[1].role, "model");
        assert_eq!(contents[2].role, "user");
        assert_eq!(contents[2].parts[0].text, "What hostels are available?");
    }

    #[test]
    fn test_empty_context_serializes_as_empty_array() {
        let contents = build_contents(&[ChatMessage::user("hi")], &[]).unwrap();
        assert!(contents[0].parts[0].text.ends_with("Context Data (JSON): []"));
    }
}
