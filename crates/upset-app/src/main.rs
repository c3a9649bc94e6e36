//! Console front end of the UpSet interaction core

use std::path::PathBuf;
use std::sync::Arc;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use upset_data::{RenderConfigStore, SessionStorage};
use upset_views::Session;

mod commands;
mod console;
mod demo;
mod settings;

use commands::{execute, parse, Flow};
use settings::AppSettings;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = AppSettings::load(settings_path.as_deref()).await?;
    info!("Starting UpSet console");

    let (provider, demo_datasets) = demo::provider();
    let provider = Arc::new(provider);
    let session = Session::new(
        provider.clone(),
        RenderConfigStore::new(SessionStorage::new()),
        console::views(),
    );

    match &settings.manifest {
        Some(manifest) => {
            session
                .navbar
                .populate_dataset_selector(manifest, provider.as_ref())
                .await?;
        }
        None => session.navbar.set_datasets(demo_datasets)?,
    }

    let initial = match &settings.initial_dataset {
        Some(name) => session.navbar.find(name),
        None => session.navbar.datasets().into_iter().next(),
    };
    match initial {
        Some(info) => {
            if let Err(e) = session.change_dataset(info) {
                warn!("Could not load the initial dataset: {:#}", e);
            }
        }
        None => warn!("No dataset to load at startup"),
    }

    println!("{}", commands::HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match execute(&session, command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => error!("{:#}", e),
        }

        if settings.echo_history {
            let graph = session.app.graph();
            println!("history {}/{}", graph.cursor(), graph.len());
        }
    }

    info!("Bye");
    Ok(())
}
