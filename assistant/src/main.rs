mod commands;
mod console;
mod selection;

use anyhow::Result;
use commands::Command;
use console::Console;
use pdf_qa::{Backend, Config, HttpBackend, QueryService, SessionState, UploadService};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    log::info!("Using backend at {}", config.backend_url);

    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(config));
    let upload_service = UploadService::new(backend.clone());
    let query_service = QueryService::new(backend);

    let mut session = SessionState::new();
    let mut console = Console::stdout();
    console.banner()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        console.prompt(session.collection_name())?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match commands::parse(&line) {
            Command::Blank => {}
            Command::Quit => break,
            Command::Help => console.help(commands::HELP)?,
            Command::Usage(usage) => console.error(usage)?,
            Command::ShowCollection => console.collection(session.collection_name())?,
            Command::SetCollection(name) => {
                session.set_collection_name(name);
                console.collection(session.collection_name())?;
            }
            Command::History => console.history(session.transcript())?,
            Command::Upload(path) => {
                let selected = match selection::read_pdf(&path).await {
                    Ok(selected) => selected,
                    Err(err) => {
                        console.error(&format!("{:#}", err))?;
                        continue;
                    }
                };

                console.upload_started(&selected.file_name)?;
                match upload_service
                    .upload(&mut session, &selected.file_name, selected.bytes)
                    .await
                {
                    Ok(name) => console.upload_succeeded(&name)?,
                    Err(err) => console.upload_failed(&err)?,
                }
            }
            Command::Ask(question) => {
                let outcome = query_service
                    .ask(&mut session, &question, |event| {
                        if let Err(err) = console.on_event(event) {
                            log::warn!("Failed to render answer: {}", err);
                        }
                    })
                    .await;

                if let Err(err) = outcome {
                    console.validation_failed(&err)?;
                }
            }
        }
    }

    log::info!("Session {} closed", session.id());
    Ok(())
}
