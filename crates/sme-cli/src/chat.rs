//! `sme chat`: ask questions about an uploaded file.

use clap::Subcommand;
use sme_core::{AppConfig, ChatMessage, CreateConversationRequest, SenderType};
use sme_insights::{prompt_by_id, prompts_in, PromptCategory, PROMPT_CARDS};

use crate::context::backend_client;

/// Sub-commands available under `chat`.
#[derive(Debug, Subcommand)]
pub enum ChatCommands {
    /// List the starter prompts
    Prompts {
        /// financial, predictions, analytics or compare
        #[arg(long)]
        category: Option<PromptCategory>,
    },
    /// Start a conversation about an uploaded file
    New {
        #[arg(long)]
        user: i64,
        /// Backend id of the uploaded file
        #[arg(long)]
        file_id: i64,
        #[arg(long)]
        title: Option<String>,
    },
    /// List a user's conversations
    List {
        #[arg(long)]
        user: i64,
    },
    /// Show a conversation's messages
    History { conversation: i64 },
    /// Send a message and print the reply
    Send {
        conversation: i64,
        /// Message text
        #[arg(required_unless_present = "prompt", conflicts_with = "prompt")]
        message: Option<String>,
        /// Send a starter prompt by id instead of free text
        #[arg(long)]
        prompt: Option<String>,
    },
    /// Delete a conversation
    Delete { conversation: i64 },
}

fn resolve_message(message: Option<&str>, prompt: Option<&str>) -> anyhow::Result<String> {
    if let Some(id) = prompt {
        let card = prompt_by_id(id).ok_or_else(|| {
            anyhow::anyhow!("unknown prompt '{id}'; see `sme chat prompts`")
        })?;
        return Ok(card.prompt.to_owned());
    }
    message
        .map(str::to_owned)
        .ok_or_else(|| anyhow::anyhow!("a message or --prompt is required"))
}

fn print_message(message: &ChatMessage) {
    let who = match message.sender_type {
        SenderType::User => "you",
        SenderType::Ai => "assistant",
    };
    println!("[{}] {who}: {}", message.created_at.format("%Y-%m-%d %H:%M"), message.content);
}

/// # Errors
///
/// Returns an error if the backend call fails or a prompt id is unknown.
pub(crate) async fn run_chat(config: &AppConfig, command: &ChatCommands) -> anyhow::Result<()> {
    if let ChatCommands::Prompts { category } = command {
        let cards: Vec<_> = match category {
            Some(c) => prompts_in(*c).collect(),
            None => PROMPT_CARDS.iter().collect(),
        };
        for card in cards {
            println!("{:<22}{:<13}{}", card.id, card.category.as_str(), card.title);
            println!("{:<35}{}", "", card.description);
        }
        return Ok(());
    }

    let client = backend_client(config)?;
    match command {
        ChatCommands::Prompts { .. } => {}
        ChatCommands::New {
            user,
            file_id,
            title,
        } => {
            let request = CreateConversationRequest {
                user_id: *user,
                uploaded_file_id: *file_id,
                title: title.clone(),
            };
            let conversation = client.create_conversation(&request).await?;
            println!(
                "started conversation {} \"{}\" about {}",
                conversation.id, conversation.title, conversation.file_name
            );
        }
        ChatCommands::List { user } => {
            let conversations = client.list_conversations(*user).await?;
            if conversations.is_empty() {
                println!("no conversations for user {user}");
                return Ok(());
            }
            println!("{:<6}{:<30}{:<26}{:>9}", "ID", "TITLE", "FILE", "MESSAGES");
            for c in &conversations {
                println!(
                    "{:<6}{:<30}{:<26}{:>9}",
                    c.id,
                    c.title,
                    c.file_name,
                    c.message_count.map_or_else(|| "\u{2014}".to_string(), |n| n.to_string())
                );
            }
        }
        ChatCommands::History { conversation } => {
            for message in client.list_messages(*conversation).await? {
                print_message(&message);
            }
        }
        ChatCommands::Send {
            conversation,
            message,
            prompt,
        } => {
            let text = resolve_message(message.as_deref(), prompt.as_deref())?;
            let reply = client.send_message(*conversation, &text).await?;
            print_message(&reply.ai_message);
            if let Some(suggestions) = reply.suggestions.filter(|s| !s.is_empty()) {
                println!();
                println!("Try asking:");
                for s in suggestions {
                    println!("  - {s}");
                }
            }
        }
        ChatCommands::Delete { conversation } => {
            let ack = client.delete_conversation(*conversation).await?;
            println!(
                "{}",
                ack.message
                    .unwrap_or_else(|| format!("deleted conversation {conversation}"))
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_id_resolves_to_prompt_text() {
        let text = resolve_message(None, Some("seasonal-trends")).unwrap();
        assert!(text.starts_with("What seasonal patterns exist"));
    }

    #[test]
    fn unknown_prompt_is_an_error() {
        assert!(resolve_message(None, Some("nope")).is_err());
    }

    #[test]
    fn free_text_is_passed_through() {
        assert_eq!(resolve_message(Some("Hi"), None).unwrap(), "Hi");
    }
}
