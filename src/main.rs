use anyhow::Result;
use clap::{Parser, Subcommand};

use pocket_budget::cli::{handle_budget_command, handle_item_command};
use pocket_budget::config::{paths::PocketPaths, settings::Settings};
use pocket_budget::logging::init_tracing;
use pocket_budget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "pocket",
    author = "Kaylee Beyene",
    version,
    about = "Simple personal budgets from the command line",
    long_about = "Pocket Budget keeps a list of budgets, each with income and expense \
                  items. It shows what you planned, your balance, and how much is \
                  still outstanding."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget management commands
    #[command(subcommand)]
    Budget(pocket_budget::cli::BudgetCommands),

    /// Income and expense item commands
    #[command(subcommand)]
    Item(pocket_budget::cli::ItemCommands),

    /// Mark yourself ready to budget
    Start,

    /// Show whether you're ready to budget
    Status,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PocketPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // Load the collection for this session
    let mut storage = Storage::open(&paths)?;
    storage.load();

    let changed = match cli.command {
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&mut storage, &settings, cmd)?;
            true
        }
        Some(Commands::Item(cmd)) => {
            handle_item_command(&mut storage, &settings, cmd)?;
            true
        }
        Some(Commands::Start) => {
            storage.set_ready_for_budget(true)?;
            println!("Ready to budget. Run 'pocket budget create <name>' to begin.");
            false
        }
        Some(Commands::Status) => {
            if storage.is_ready_for_budget() {
                println!("Ready for budget: yes");
            } else {
                println!("Ready for budget: no");
                println!("Run 'pocket start' when you're ready.");
            }
            println!("Budgets: {}", storage.budgets.len());
            false
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
            println!("Pocket Budget Configuration");
            println!("===========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            false
        }
        None => {
            println!("Pocket Budget - simple personal budgets");
            println!();
            println!("Run 'pocket --help' for usage information.");
            false
        }
    };

    // Write back at the end of the session; a failed write is only logged
    if changed {
        storage.save();
    }

    Ok(())
}
