//! Command-line surface.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(
    name = "travelease",
    version,
    about = "Plan a trip: itinerary, budget, packing list and memories"
)]
pub struct Cli {
    /// SQLite database file holding the saved trip.
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Directory for rolling log files.
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// One of trace|debug|info|warn|error.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Answer yes to every confirmation.
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Create the trip and regenerate its itinerary.
    Trip {
        #[command(subcommand)]
        action: TripCmd,
    },
    /// Add, delete or rename itinerary days.
    Day {
        #[command(subcommand)]
        action: DayCmd,
    },
    /// Add or delete activities within a day.
    Activity {
        #[command(subcommand)]
        action: ActivityCmd,
    },
    /// Save or export the itinerary.
    Itinerary {
        #[command(subcommand)]
        action: ItineraryCmd,
    },
    /// Set the budget total.
    Budget {
        #[command(subcommand)]
        action: BudgetCmd,
    },
    /// Record or delete expenses.
    Expense {
        #[command(subcommand)]
        action: ExpenseCmd,
    },
    /// Manage the packing list.
    Pack {
        #[command(subcommand)]
        action: PackCmd,
    },
    /// Record or delete trip memories.
    Memory {
        #[command(subcommand)]
        action: MemoryCmd,
    },
    /// Render the trip story from saved memories.
    Story,
    /// Print one rendered section.
    Show {
        #[arg(value_enum)]
        section: ShowSection,
    },
    /// Switch between light and dark mode.
    Theme {
        #[command(subcommand)]
        action: ThemeCmd,
    },
    /// Check that the core library is linked.
    Ping,
}

#[derive(Debug, Subcommand)]
pub enum TripCmd {
    Create(TripArgs),
}

#[derive(Debug, Args)]
pub struct TripArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub destination: String,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub start: Option<String>,
    /// YYYY-MM-DD; defaults to tomorrow.
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub travelers: Option<String>,
    /// Free-text traveler names, shown instead of the count.
    #[arg(long)]
    pub names: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum DayCmd {
    /// Append a day after the current last day.
    Add,
    Delete { day: u32 },
    Rename { day: u32, title: String },
}

#[derive(Debug, Subcommand)]
pub enum ActivityCmd {
    Add(ActivityArgs),
    Delete { day: u32, id: Uuid },
}

#[derive(Debug, Args)]
pub struct ActivityArgs {
    pub day: u32,
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub cost: String,
}

#[derive(Debug, Subcommand)]
pub enum ItineraryCmd {
    Save,
    /// Write the printable itinerary and open it.
    Export {
        /// Output file; defaults to the temp directory.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Only write the file.
        #[arg(long)]
        no_open: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum BudgetCmd {
    Set { amount: String },
}

#[derive(Debug, Subcommand)]
pub enum ExpenseCmd {
    Add(ExpenseArgs),
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
pub struct ExpenseArgs {
    pub description: String,
    pub amount: String,
    /// accommodation|transportation|food|activities|shopping|other
    #[arg(long, default_value = "")]
    pub category: String,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum PackCmd {
    Add(PackArgs),
    Toggle { id: Uuid },
    Delete { id: Uuid },
    /// Print the list, optionally narrowed to one category.
    List {
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct PackArgs {
    pub name: String,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long, default_value = "1")]
    pub quantity: String,
    #[arg(long)]
    pub packed: bool,
}

#[derive(Debug, Subcommand)]
pub enum MemoryCmd {
    Add(MemoryArgs),
    Delete { id: Uuid },
}

#[derive(Debug, Args)]
pub struct MemoryArgs {
    pub title: String,
    pub content: String,
    /// YYYY-MM-DD; defaults to today.
    #[arg(long)]
    pub date: Option<String>,
    /// Image file shown with the memory for this session.
    #[arg(long)]
    pub photo: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum ThemeCmd {
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowSection {
    Theme,
    Itinerary,
    Budget,
    Packing,
    Memories,
}

#[cfg(test)]
mod tests {
    use super::{Cli, Cmd, DayCmd, PackCmd};
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_yes_flag_applies_after_subcommand() {
        let cli = Cli::try_parse_from(["travelease", "day", "delete", "2", "--yes"]).unwrap();
        assert!(cli.yes);
        assert!(matches!(
            cli.command,
            Cmd::Day {
                action: DayCmd::Delete { day: 2 }
            }
        ));
    }

    #[test]
    fn pack_add_defaults_quantity_to_one() {
        let cli = Cli::try_parse_from(["travelease", "pack", "add", "Socks"]).unwrap();
        let Cmd::Pack {
            action: PackCmd::Add(args),
        } = cli.command
        else {
            panic!("expected pack add");
        };
        assert_eq!(args.quantity, "1");
        assert!(!args.packed);
    }
}
