use anyhow::Result;
use campus_core::identity::OAuthProvider;
use campus_infrastructure::{CampusPaths, ConfigService};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod app;
mod commands;
mod logging;
mod prompt;

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Campus - sign-in and student profiles for the engineering learning portal", long_about = None)]
#[command(version)]
struct Cli {
    /// Keep config and data under this directory (overrides CAMPUS_HOME)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an email/password account and sign in
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in with Google or GitHub
    LoginWith {
        provider: OAuthProvider,
        /// Provider account email; prompted for when omitted
        #[arg(long)]
        email: Option<String>,
        /// Display name released by the provider
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign out
    Logout,
    /// Show who is signed in and the state of their profile
    Status {
        /// Fetch the profile again after a failed load
        #[arg(long)]
        retry: bool,
    },
    /// Complete, edit or show the student profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Show where a navigation to PATH ends up
    Navigate { path: String },
    /// Show the configured routes
    Routes,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Complete the profile for the first time
    Setup(ProfileFields),
    /// Change fields of an existing profile
    Edit(ProfileFields),
    /// Print the stored profile
    Show {
        /// Print the profile document as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
struct ProfileFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    /// "1st Year" to "5th Year", or 1 to 5
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    department: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let paths = match cli.home {
        Some(home) => CampusPaths::at(home),
        None => CampusPaths::resolve()?,
    };
    let config = ConfigService::new(&paths).load()?;
    let _log_guard = logging::init(&config, &paths)?;

    match cli.command {
        Commands::Register { email, password } => {
            commands::auth::register(&paths, &config, email, password).await
        }
        Commands::Login { email, password } => {
            commands::auth::login(&paths, &config, email, password).await
        }
        Commands::LoginWith {
            provider,
            email,
            name,
        } => commands::auth::login_with(&paths, &config, provider, email, name).await,
        Commands::Logout => commands::auth::logout(&paths, &config).await,
        Commands::Status { retry } => commands::auth::status(&paths, &config, retry).await,
        Commands::Profile { action } => match action {
            ProfileAction::Setup(fields) => {
                commands::profile::setup(&paths, &config, fields.into()).await
            }
            ProfileAction::Edit(fields) => {
                commands::profile::edit(&paths, &config, fields.into()).await
            }
            ProfileAction::Show { json } => commands::profile::show(&paths, &config, json).await,
        },
        Commands::Navigate { path } => commands::routes::navigate(&paths, &config, &path).await,
        Commands::Routes => {
            commands::routes::show(&config);
            Ok(())
        }
    }
}

impl From<ProfileFields> for commands::profile::FieldOverrides {
    fn from(fields: ProfileFields) -> Self {
        Self {
            full_name: fields.name,
            phone: fields.phone,
            address: fields.address,
            year_of_study: fields.year,
            department: fields.department,
        }
    }
}
