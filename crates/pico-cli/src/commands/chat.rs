//! `pico chat` — Interactive session with the n8n maps workflow.
//!
//! Keeps the conversation in memory for the lifetime of the REPL and sends
//! a stable chat id, so the workflow can correlate turns on its side.

use std::io::{self, BufRead, Write};

use pico_core::{ConversationBody, Message, PicoConfig, RequestContext, WorkflowPipe};

use super::ConsoleSink;

/// One REPL conversation.
pub struct ChatSession {
    pipe: WorkflowPipe,
    body: ConversationBody,
    context: RequestContext,
}

impl ChatSession {
    pub fn new(config: &PicoConfig, chat_id: String) -> Self {
        Self {
            pipe: WorkflowPipe::new(config.pipe.clone(), config.maps.clone()),
            body: ConversationBody::default(),
            context: RequestContext::new(Some(chat_id), None),
        }
    }

    pub fn chat_id(&self) -> &str {
        self.context.session_id()
    }

    pub fn messages(&self) -> &[Message] {
        &self.body.messages
    }

    pub fn clear(&mut self) {
        self.body.messages.clear();
    }

    /// Append the user's text and run the pipe over the conversation.
    pub async fn send(&mut self, text: &str) -> Result<String, String> {
        self.body.messages.push(Message::user(text));
        self.pipe
            .invoke(&mut self.body, Some(&ConsoleSink), &self.context)
            .await
            .map_err(|e| e.to_string())
    }
}

pub async fn run(config: &PicoConfig, chat_id: Option<String>) -> Result<(), String> {
    let chat_id = chat_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let mut session = ChatSession::new(config, chat_id);

    println!("pico-maps chat");
    println!("══════════════════════════════════════");
    println!("Workflow: {}", config.pipe.n8n_url);
    println!("Chat ID:  {}", session.chat_id());
    println!("══════════════════════════════════════");
    println!();
    println!("Ask for a place and press Enter. Type /quit to exit.");
    println!("Commands: /history, /clear, /quit");
    print!("\n> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = line.map_err(|e| format!("Failed to read input: {}", e))?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            print!("> ");
            io::stdout().flush().ok();
            continue;
        }

        match trimmed {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                break;
            }
            "/history" => {
                for message in session.messages() {
                    println!("[{}] {}", message.role.as_str(), message.content);
                }
            }
            "/clear" => {
                session.clear();
                println!("Conversation cleared.");
            }
            _ => match session.send(trimmed).await {
                Ok(output) => println!("\n{}", output),
                Err(e) => println!("\nFailed: {}", e),
            },
        }

        print!("\n> ");
        io::stdout().flush().ok();
    }

    Ok(())
}
