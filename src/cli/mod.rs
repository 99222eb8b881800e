use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub mod render;
pub mod serve;

#[derive(Subcommand)]
enum Command {
    /// Run the web server
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Set the server port
        #[arg(long, default_value = "5000")]
        port: String,
    },
    /// Render a view state JSON file to HTML
    Render {
        /// Path to the view state JSON
        #[arg(long)]
        state: PathBuf,

        /// Date the canned ranges are relative to (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Write the page here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Render { state, today, out }) => {
            render::run(&state, today, out.as_deref()).await?;
        }
        None => {}
    }

    Ok(())
}
