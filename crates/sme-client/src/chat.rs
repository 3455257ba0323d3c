//! Conversational Q&A over an uploaded file, via `/api/v1/chat`.

use serde::{Deserialize, Serialize};
use sme_core::validate::require_non_blank;
use sme_core::{ApiAck, ChatMessage, Conversation, CreateConversationRequest};

use crate::backend::BackendClient;
use crate::error::ClientError;
use crate::transport::{decode, decode_field};

/// The pair of messages produced by one user turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub user_message: ChatMessage,
    pub ai_message: ChatMessage,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
}

#[derive(Serialize)]
struct SendMessageBody<'a> {
    message: &'a str,
}

impl BackendClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if the backend refuses the conversation
    /// (e.g. unknown upload), or any transport error.
    pub async fn create_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> Result<Conversation, ClientError> {
        let url = self.http.url("api/v1/chat/conversations");
        let value = self
            .http
            .execute_once("createConversation", |client| {
                client.post(&url).json(request)
            })
            .await?;
        decode_field(value, "conversation", "createConversation")
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or API failure.
    pub async fn list_conversations(&self, user_id: i64) -> Result<Vec<Conversation>, ClientError> {
        let url = self
            .http
            .url(&format!("api/v1/chat/conversations/user/{user_id}"));
        let value = self
            .http
            .execute("listConversations", |client| client.get(&url))
            .await?;
        decode_field(
            value,
            "conversations",
            &format!("listConversations(user={user_id})"),
        )
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or API failure.
    pub async fn get_conversation(&self, conversation_id: i64) -> Result<Conversation, ClientError> {
        let url = self
            .http
            .url(&format!("api/v1/chat/conversations/{conversation_id}"));
        let value = self
            .http
            .execute("getConversation", |client| client.get(&url))
            .await?;
        decode_field(
            value,
            "conversation",
            &format!("getConversation({conversation_id})"),
        )
    }

    /// Messages in chronological order, as stored by the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or API failure.
    pub async fn list_messages(&self, conversation_id: i64) -> Result<Vec<ChatMessage>, ClientError> {
        let url = self
            .http
            .url(&format!("api/v1/chat/conversations/{conversation_id}/messages"));
        let value = self
            .http
            .execute("listMessages", |client| client.get(&url))
            .await?;
        decode_field(value, "messages", &format!("listMessages({conversation_id})"))
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a blank message, otherwise any
    /// transport or API error.
    pub async fn send_message(
        &self,
        conversation_id: i64,
        message: &str,
    ) -> Result<ChatReply, ClientError> {
        require_non_blank("message", message)?;
        let url = self
            .http
            .url(&format!("api/v1/chat/conversations/{conversation_id}/messages"));
        let body = SendMessageBody { message };
        let value = self
            .http
            .execute_once("sendMessage", |client| client.post(&url).json(&body))
            .await?;
        decode(value, &format!("sendMessage({conversation_id})"))
    }

    /// # Errors
    ///
    /// Returns [`ClientError`] on transport or API failure.
    pub async fn delete_conversation(&self, conversation_id: i64) -> Result<ApiAck, ClientError> {
        let url = self
            .http
            .url(&format!("api/v1/chat/conversations/{conversation_id}"));
        let value = self
            .http
            .execute("deleteConversation", |client| client.delete(&url))
            .await?;
        decode(value, &format!("deleteConversation({conversation_id})"))
    }
}
