use crate::{
    history::{HistoryCodec, Message},
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

pub const CHAT_SYSTEM_PROMPT: &str = "You are an AI-powered travel assistant named Nomad. Your role is to help users plan their trips by providing information, recommendations, and answering their travel-related questions. You have access to a vast knowledge base about destinations, accommodations, transportation, activities, and more.

When responding to users, keep in mind the following guidelines:
- Be friendly, helpful, and engaging in your interactions.
- Provide clear, concise, and relevant information to address the user's query.
- If you don't have a direct answer or are unsure, offer alternative suggestions or resources.
- Encourage users to provide more details about their preferences and needs to better assist them.
- Maintain a professional and empathetic tone throughout the conversation.
- If the query is not related to travel or is inappropriate, gently guide the user back to the topic of travel planning.";

pub const FALLBACK_REPLY: &str = "I apologize for the inconvenience, but I am currently unable to assist with your request. Please try again later or contact our support team for further assistance.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ChatResponse {
    fn chat(content: String, token: Option<String>) -> Self {
        Self {
            kind: "chat".to_string(),
            content,
            token,
        }
    }
}

/// Travel-assistant chat. Conversation state lives entirely in the token
/// handed back to the caller.
pub struct ChatService {
    llm: Arc<dyn LlmClient>,
    codec: HistoryCodec,
    system_prompt: String,
}

impl ChatService {
    pub fn new(llm: Arc<dyn LlmClient>, codec: HistoryCodec, system_prompt: Option<String>) -> Self {
        Self {
            llm,
            codec,
            system_prompt: system_prompt.unwrap_or_else(|| CHAT_SYSTEM_PROMPT.to_string()),
        }
    }

    pub async fn process_query(&self, query: &str, token: Option<&str>) -> ChatResponse {
        info!("Processing chat query ({} chars)", query.len());

        let mut history = self.codec.decode(token);
        debug!("Replaying {} history messages", history.len());

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend(history.iter().map(Message::to_chat_message));
        messages.push(ChatMessage::user(query));

        let request = ChatCompletionRequest {
            messages,
            temperature: None,
        };

        let reply = match self.llm.create_chat_completion(request).await {
            Ok(response) => response.first_text(),
            Err(e) => {
                error!("Error processing query: {}", e);
                return ChatResponse::chat(FALLBACK_REPLY.to_string(), None);
            }
        };
        let Some(reply) = reply else {
            error!("Error processing query: model returned no choices");
            return ChatResponse::chat(FALLBACK_REPLY.to_string(), None);
        };

        history.push(Message::user(query));
        history.push(Message::assistant(reply.clone()));

        match self.codec.encode(&history) {
            Ok(new_token) => ChatResponse::chat(reply, Some(new_token)),
            Err(e) => {
                error!("Error encoding chat history: {}", e);
                ChatResponse::chat(reply, None)
            }
        }
    }
}
