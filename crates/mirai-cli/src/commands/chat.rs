//! Interactive chat with Mirai. A plain Enter sends the line.

use colored::Colorize;
use mirai_application::{ConversationUseCase, SendOutcome};
use mirai_core::project::{Message, MessageRole, ProjectStore};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::sync::Arc;
use tokio::sync::RwLock;

pub async fn run(
    conversation: ConversationUseCase,
    store: Arc<RwLock<ProjectStore>>,
) -> anyhow::Result<()> {
    println!("{}", "ミライ探究ラボ".bold());
    println!(
        "{}",
        "ミライもしっぱいすることがあるから、図鑑や本でもたしかめてみてね！".dimmed()
    );
    println!();

    // Replay the restored transcript.
    for message in &store.read().await.project().chat_history {
        print_message(message);
    }

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("あなた> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);
                println!("{}", "ミライが一生けんめい考え中...".dimmed());
                match conversation.send(&line).await {
                    SendOutcome::Answered(message) => print_message(&message),
                    // A failed cycle shows no reply and no error banner;
                    // the child can simply send again.
                    SendOutcome::NoReply => {}
                    SendOutcome::RejectedEmpty | SendOutcome::RejectedBusy => {}
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    println!("{}", "またね！".dimmed());
    Ok(())
}

fn print_message(message: &Message) {
    match message.role {
        MessageRole::User => {
            println!("{} {}", "あなた>".green().bold(), message.content);
        }
        MessageRole::Assistant => {
            println!("{} {}", "ミライ>".cyan().bold(), message.content);
            for citation in message.sources.iter().flatten() {
                match citation.title() {
                    Some(title) => {
                        println!("    {} {} ({})", "出典:".dimmed(), title, citation.uri())
                    }
                    None => println!("    {} {}", "出典:".dimmed(), citation.uri()),
                }
            }
        }
    }
}
