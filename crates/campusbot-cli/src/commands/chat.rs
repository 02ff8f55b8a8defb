//! Chat command: one retrieval-augmented turn

use super::gemini_client;
use crate::app::{ChatArgs, OutputFormat};
use anyhow::Result;
use campusbot_core::{ChatMessage, ChatService, Config, SharedDatabase};

pub async fn run(
    args: ChatArgs,
    db: &SharedDatabase,
    config: &Config,
    format: OutputFormat,
    verbose: bool,
) -> Result<()> {
    let client = gemini_client(config)?;

    let mut retrieval = config.retrieval.clone();
    if let Some(mode) = args.mode {
        retrieval.mode = mode.into();
    }

    let chat = ChatService::new(db.clone(), client.clone(), client, retrieval);
    let messages = vec![ChatMessage::user(args.query.join(" "))];
    let reply = chat.respond(&messages).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reply)?);
        }
        OutputFormat::Cli => {
            if verbose {
                eprintln!("States:  {:?}", reply.trace);
                eprintln!("Context: {} entries", reply.context.len());
            }
            println!("{}", reply.response);
        }
    }
    Ok(())
}
