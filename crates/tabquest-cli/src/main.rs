use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tabquest-cli", version, about = "TabQuest CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scheduled tick (the external per-minute scheduler calls this)
    Tick(commands::tick::TickArgs),
    /// Record a tab/window switch without accruing time
    Switch(commands::tick::SwitchArgs),
    /// Classify a URL against the lists and user overrides
    Classify {
        /// URL to classify
        url: String,
    },
    /// Progression and analytics views
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Achievement catalog and unlocks
    Achievements {
        #[command(subcommand)]
        action: commands::achievements::AchievementsAction,
    },
    /// Settings management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Backup and reset
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Tick(args) => commands::tick::run(args),
        Commands::Switch(args) => commands::tick::run_switch(args),
        Commands::Classify { url } => commands::tick::run_classify(&url),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Achievements { action } => commands::achievements::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Data { action } => commands::data::run(action),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
