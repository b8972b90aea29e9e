use clap::{Parser, Subcommand};
use samvidha_cli::cli::commands;

#[derive(Parser)]
#[command(name = "samvidha")]
#[command(author, version, about = "CLI for the IARE Samvidha student portal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    /// Profile to use
    #[arg(short, long, global = true, env = "SAMVIDHA_PROFILE")]
    profile: Option<String>,

    /// Portal base URL
    #[arg(long, global = true, env = "SAMVIDHA_PORTAL_URL")]
    portal_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Authentication commands
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Scrape the portal and show the attendance report
    Report {
        /// Do not record this scrape into history
        #[arg(long)]
        no_record: bool,
        /// History database path
        #[arg(long)]
        db: Option<String>,
    },
    /// Recorded per-day attendance history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Scrape the portal on an interval, recording history
    Watch {
        /// Scrape interval (e.g. 45s, 30m, 1h)
        #[arg(short, long, default_value = "30m")]
        interval: String,
        /// History database path
        #[arg(long)]
        db: Option<String>,
    },
}

#[derive(Subcommand)]
enum AuthCommands {
    /// Login to the Samvidha portal
    Login {
        /// Portal username (roll number)
        #[arg(short, long, env = "SAMVIDHA_USER")]
        username: Option<String>,
    },
    /// Logout and clear credentials
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Show the recorded history
    Show {
        /// History database path
        #[arg(long)]
        db: Option<String>,
    },
    /// Clear the recorded history
    Clear {
        /// History database path
        #[arg(long)]
        db: Option<String>,
    },
}

#[tokio::main]
async fn main() -> samvidha_cli::Result<()> {
    let cli = Cli::parse();
    let json = matches!(cli.format, OutputFormat::Json);

    let result = match cli.command {
        Commands::Auth { command } => match command {
            AuthCommands::Login { username } => {
                commands::login(username, cli.profile, cli.portal_url).await
            }
            AuthCommands::Logout => commands::logout(cli.profile).await,
            AuthCommands::Status => commands::status(cli.profile).await,
        },
        Commands::Report { no_record, db } => {
            commands::report(json, no_record, db, cli.profile, cli.portal_url).await
        }
        Commands::History { command } => match command {
            HistoryCommands::Show { db } => commands::show_history(json, db).await,
            HistoryCommands::Clear { db } => commands::clear_history(db).await,
        },
        Commands::Watch { interval, db } => {
            commands::watch(interval, db, cli.profile, cli.portal_url).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", samvidha_cli::error::format_user_error(&e));
        std::process::exit(1);
    }

    Ok(())
}
