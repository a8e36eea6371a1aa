use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::ChatConfig;

/// System prompt sent ahead of the conversation when the hosted API is used
const SYSTEM_PROMPT: &str = "You are a supportive mental health assistant. \
Provide empathetic, helpful, and evidence-based general advice. Always remind \
users that you are not a replacement for professional help. Keep responses \
concise and supportive. Reference HSE (Health Service Executive) resources \
when appropriate.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Chat API returned status {0}")]
    ApiError(u16),
    #[error("Chat API response contained no reply")]
    EmptyReply,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for the hosted chat-completions endpoint. The call is synchronous
/// and blocks the invoking command; there is no cancellation or retry.
pub struct ChatClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    api_key: String,
}

impl ChatClient {
    pub fn new(config: &ChatConfig, api_key: String) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            api_key,
        }
    }

    /// Send the system prompt, prior history and the user's message, and
    /// return the generated reply text
    pub fn complete(
        &self,
        history: &[ChatMessage],
        user_input: &str,
    ) -> Result<String, ChatError> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        });
        messages.extend(history.iter().cloned());
        messages.push(ChatMessage::user(user_input));

        let request = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(ChatError::ApiError(response.status().as_u16()));
        }

        let body: CompletionResponse = response.json()?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(ChatError::EmptyReply)
    }
}

/// Ordered keyword buckets for the rule-based fallback; the first bucket
/// whose keywords match wins
const FALLBACK_TOPICS: &[(&[&str], &str)] = &[
    (
        &["anxious", "anxiety", "worried"],
        "I understand that anxiety can be challenging. Here are some general tips:\n\n\
         • Try deep breathing exercises (4-4-4 technique)\n\
         • Practice mindfulness or meditation\n\
         • Take regular breaks and get some fresh air\n\
         • Consider talking to someone you trust\n\n\
         For professional support, visit: https://www2.hse.ie/mental-health/\n\n\
         Remember, I provide general guidance only. If you're experiencing severe \
         anxiety, please consult a healthcare professional.",
    ),
    (
        &["sad", "depressed", "down"],
        "I'm sorry you're feeling this way. Here are some general suggestions:\n\n\
         • Try to maintain a routine\n\
         • Get some natural light and gentle exercise\n\
         • Stay connected with supportive people\n\
         • Consider journaling your thoughts\n\
         • Practice self-compassion\n\n\
         For professional support, visit: https://www2.hse.ie/mental-health/\n\n\
         If you're having thoughts of self-harm, please contact emergency services \
         immediately.",
    ),
    (
        &["stress", "stressed"],
        "Stress can be overwhelming. Here are some general strategies:\n\n\
         • Break tasks into smaller steps\n\
         • Practice time management\n\
         • Try relaxation techniques\n\
         • Ensure you're getting enough sleep\n\
         • Consider what you can control vs. what you can't\n\n\
         For more resources, visit: https://www2.hse.ie/mental-health/\n\n\
         Remember, I provide general guidance only.",
    ),
    (
        &["sleep", "tired", "insomnia"],
        "Sleep is important for mental health. General tips:\n\n\
         • Maintain a regular sleep schedule\n\
         • Create a calming bedtime routine\n\
         • Limit screens before bed\n\
         • Avoid caffeine in the afternoon\n\
         • Keep your bedroom cool and dark\n\n\
         For persistent sleep issues, consider consulting a healthcare provider.",
    ),
    (
        &["help", "support"],
        "I'm here to listen and provide general guidance. Here are some resources:\n\n\
         • HSE Mental Health Services: https://www2.hse.ie/mental-health/\n\
         • HSE Live: 1800 700 700 (Mon-Fri 8am-8pm)\n\
         • In an emergency, call 999 or 112\n\n\
         Remember, I provide general information only. For professional mental \
         health support, please consult with a healthcare provider.",
    ),
];

const GENERIC_FALLBACK: &str =
    "Thank you for sharing. I understand this is important to you. Here are some \
     general mental health tips:\n\n\
     • Practice self-care regularly\n\
     • Stay connected with supportive people\n\
     • Maintain a routine when possible\n\
     • Consider mindfulness or relaxation techniques\n\
     • Track your mood and patterns (like you're doing in MoodGarden!)\n\n\
     For professional support and resources, visit: https://www2.hse.ie/mental-health/\n\n\
     Remember, I provide general guidance only. If you need immediate help, please \
     contact emergency services or a healthcare professional.";

/// Canned supportive reply keyed on the user's wording. Not a state machine,
/// just a first-match lookup over the topic buckets.
pub fn fallback_reply(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    for (keywords, reply) in FALLBACK_TOPICS {
        if keywords.iter().any(|k| lowered.contains(k)) {
            return reply;
        }
    }
    GENERIC_FALLBACK
}

/// Produce a reply for the user's message: the hosted API when a credential
/// is configured, the rule-based fallback otherwise or on any API failure.
/// Errors never surface past this point.
pub fn respond(
    api_key: Option<String>,
    config: &ChatConfig,
    history: &[ChatMessage],
    user_input: &str,
) -> String {
    let Some(api_key) = api_key.filter(|k| !k.is_empty()) else {
        return fallback_reply(user_input).to_string();
    };
    let client = ChatClient::new(config, api_key);
    match client.complete(history, user_input) {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "chat API call failed, using rule-based reply");
            fallback_reply(user_input).to_string()
        }
    }
}

/// Greeting shown when a conversation opens
pub const GREETING: &str = "Hello! I'm here to provide general mental health \
support and information. How can I help you today? 🌱\n\nPlease note: I \
provide general guidance only. For professional support, please consult with \
a healthcare provider or visit HSE Mental Health Services.";

/// A running conversation. Every exchange is appended to the history so the
/// hosted API sees the whole conversation on each turn; the history lives
/// only for the session and is never persisted.
pub struct ChatSession {
    config: ChatConfig,
    api_key: Option<String>,
    history: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(config: ChatConfig, api_key: Option<String>) -> Self {
        Self {
            config,
            api_key: api_key.filter(|k| !k.is_empty()),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Reply to the user's message and record the exchange
    pub fn send(&mut self, user_input: &str) -> String {
        let reply = respond(self.api_key.clone(), &self.config, &self.history, user_input);
        self.history.push(ChatMessage::user(user_input));
        self.history.push(ChatMessage::assistant(reply.clone()));
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_buckets_match_case_insensitively() {
        assert!(fallback_reply("I feel ANXIOUS today").contains("deep breathing"));
        assert!(fallback_reply("been so sad lately").contains("self-compassion"));
        assert!(fallback_reply("work stress is a lot").contains("smaller steps"));
        assert!(fallback_reply("can't sleep at all").contains("sleep schedule"));
        assert!(fallback_reply("where can I get help?").contains("HSE Live"));
    }

    #[test]
    fn earlier_buckets_win_over_later_ones() {
        // "anxious" and "sleep" both match; the anxiety bucket comes first
        assert!(fallback_reply("anxious and can't sleep").contains("deep breathing"));
    }

    #[test]
    fn unmatched_input_gets_the_generic_reply() {
        let reply = fallback_reply("the weather was nice");
        assert_eq!(reply, GENERIC_FALLBACK);
        assert!(reply.contains("https://www2.hse.ie/mental-health/"));
    }

    #[test]
    fn every_topic_reply_names_a_resource() {
        for (_, reply) in FALLBACK_TOPICS {
            assert!(reply.contains("hse.ie") || reply.contains("healthcare"));
        }
    }

    #[test]
    fn session_records_alternating_history_across_turns() {
        let mut session = ChatSession::new(ChatConfig::default(), None);
        session.send("feeling anxious about tomorrow");
        let reply = session.send("thanks, any advice on sleep?");
        assert!(reply.contains("sleep schedule"));

        let history = session.history();
        assert_eq!(history.len(), 4);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[1].role, "assistant");
        assert!(history[1].content.contains("deep breathing"));
        assert_eq!(history[2].role, "user");
        assert_eq!(history[3].role, "assistant");
    }

    #[test]
    fn respond_without_a_key_uses_the_fallback() {
        let config = ChatConfig::default();
        let reply = respond(None, &config, &[], "feeling worried");
        assert!(reply.contains("deep breathing"));
        let reply = respond(Some(String::new()), &config, &[], "feeling worried");
        assert!(reply.contains("deep breathing"));
    }
}
