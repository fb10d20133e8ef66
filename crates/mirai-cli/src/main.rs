use anyhow::Result;
use clap::{Parser, Subcommand};
use mirai_application::{ConversationUseCase, NotebookUseCase};
use mirai_core::config::Config;
use mirai_core::project::{Project, ProjectRepository, ProjectStore};
use mirai_infrastructure::{JsonProjectRepository, MiraiPaths};
use mirai_interaction::{GeminiGateway, MIRAI_PERSONA};
use std::sync::Arc;
use tokio::sync::RwLock;

mod commands;

#[derive(Parser)]
#[command(name = "mirai")]
#[command(about = "ミライ探究ラボ - Inquiry Based Learning Companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Talk with Mirai (the default when no command is given)
    Chat,
    /// Manage the research notebook
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Delete the saved project and start over
    Reset,
}

#[derive(Subcommand)]
enum NoteAction {
    /// Add a note
    Add {
        /// Note title
        title: String,
        /// Note content
        content: Vec<String>,
    },
    /// List notes, newest first
    List,
    /// Remove a note by id
    Rm {
        /// Note id as shown by `note list`
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(&MiraiPaths::config_file()?)?;
    let repository: Arc<dyn ProjectRepository> = Arc::new(match &config.data_dir {
        Some(dir) => JsonProjectRepository::new(dir)?,
        None => JsonProjectRepository::default_location()?,
    });

    let project = repository.load().await.unwrap_or_else(Project::initial);
    let store = Arc::new(RwLock::new(ProjectStore::new(project)));
    let notebook = NotebookUseCase::new(store.clone(), repository.clone());

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let gateway = Arc::new(
                GeminiGateway::try_from_env(config.model.clone())?
                    .with_system_instruction(MIRAI_PERSONA.system_instruction),
            );
            let conversation = ConversationUseCase::new(store.clone(), repository, gateway);
            commands::chat::run(conversation, store).await?;
        }
        Commands::Note { action } => match action {
            NoteAction::Add { title, content } => {
                commands::note::add(&notebook, &title, &content.join(" ")).await;
            }
            NoteAction::List => commands::note::list(&notebook).await,
            NoteAction::Rm { id } => commands::note::remove(&notebook, &id).await,
        },
        Commands::Reset => commands::reset::run(&notebook).await?,
    }

    Ok(())
}
