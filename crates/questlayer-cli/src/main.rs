use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "questlayer", version, about = "QuestLayer widget builder CLI")]
struct Cli {
    /// Use this config file instead of ~/.config/questlayer/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Reward task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Print the embeddable widget snippet
    Embed(commands::embed::EmbedArgs),
    /// Show level, rank and progress for an XP total
    Level {
        /// XP total
        xp: u64,
    },
    /// Render a feedback cue and print its summary
    Sound {
        /// Cue name: connect, reward or fanfare
        cue: String,
    },
    /// Run a live widget session from a list of actions
    Preview(commands::preview::PreviewArgs),
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("QUESTLAYER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let config_file = cli.config_file.as_deref();
    let result = match cli.command {
        Commands::Config { action } => commands::config::run(action, config_file),
        Commands::Task { action } => commands::task::run(action, config_file),
        Commands::Embed(args) => commands::embed::run(args, config_file),
        Commands::Level { xp } => commands::level::run(xp),
        Commands::Sound { cue } => commands::sound::run(&cue, config_file),
        Commands::Preview(args) => commands::preview::run(args, config_file),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "questlayer", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
