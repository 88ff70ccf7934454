use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "habitflow-cli", version, about = "HabitFlow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Log a completion (or miss) for a habit
    Log(commands::log::LogArgs),
    /// Streak calculation and updates
    Streaks(commands::streaks::StreaksArgs),
    /// Habit statistics
    Stats(commands::stats::StatsArgs),
    /// Coaching messages from milestones, risks and patterns
    Coach(commands::coach::CoachArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Log(args) => commands::log::run(args),
        Commands::Streaks(args) => commands::streaks::run(args),
        Commands::Stats(args) => commands::stats::run(args),
        Commands::Coach(args) => commands::coach::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "habitflow-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
