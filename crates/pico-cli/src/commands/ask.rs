//! `pico ask` — Send one message through the n8n workflow pipe.

use pico_core::{ConversationBody, Message, PicoConfig, RequestContext, WorkflowPipe};

use super::ConsoleSink;

/// Run the pipe for a single message and return the rendered reply.
pub async fn execute(
    config: &PicoConfig,
    message: &str,
    chat_id: Option<&str>,
) -> Result<String, String> {
    let pipe = WorkflowPipe::new(config.pipe.clone(), config.maps.clone());
    let mut body = ConversationBody::new(vec![Message::user(message)]);
    let context = RequestContext::new(chat_id.map(|s| s.to_string()), None);

    pipe.invoke(&mut body, Some(&ConsoleSink), &context)
        .await
        .map_err(|e| e.to_string())
}

pub async fn run(config: &PicoConfig, message: &str, chat_id: Option<&str>) -> Result<(), String> {
    let output = execute(config, message, chat_id).await?;
    println!("{}", output);
    Ok(())
}
