use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio CLI - manage portfolio projects and skills", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and print the authenticated identity
    Login {
        /// Account email; password is read from FOLIO_PASSWORD
        email: String,
    },
    /// Print the current session state
    Whoami,
    /// Manage project records
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Manage skill records
    Skill {
        #[command(subcommand)]
        action: SkillAction,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    /// List all projects, newest first
    List,
    /// Create a project
    Add {
        title: String,
        description: String,
        /// Comma-separated technology list
        #[arg(long)]
        technologies: Option<String>,
        #[arg(long)]
        featured: bool,
    },
    /// Delete a project by id
    Rm { id: i64 },
}

#[derive(Subcommand)]
enum SkillAction {
    /// List all skills, grouped by category
    List,
    /// Create a skill
    Add {
        name: String,
        /// One of the fixed category names, e.g. "Backend Development"
        #[arg(long, default_value = "Other")]
        category: String,
    },
    /// Delete a skill by id
    Rm { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Login { email } => commands::login(&email).await?,
        Commands::Whoami => commands::whoami().await?,
        Commands::Project { action } => match action {
            ProjectAction::List => commands::project_list().await?,
            ProjectAction::Add {
                title,
                description,
                technologies,
                featured,
            } => commands::project_add(title, description, technologies, featured).await?,
            ProjectAction::Rm { id } => commands::project_rm(id).await?,
        },
        Commands::Skill { action } => match action {
            SkillAction::List => commands::skill_list().await?,
            SkillAction::Add { name, category } => commands::skill_add(name, category).await?,
            SkillAction::Rm { id } => commands::skill_rm(id).await?,
        },
    }

    Ok(())
}
