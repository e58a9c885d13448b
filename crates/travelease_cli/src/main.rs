//! `travelease` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the snapshot database.
//! - Map each subcommand onto one page control or command and print the
//!   affected section afterwards.
//!
//! # Invariants
//! - Exactly one operation runs per invocation.
//! - Photo handles are released before the process exits.

mod cli;
mod config;
mod terminal;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use cli::{
    ActivityCmd, BudgetCmd, Cli, Cmd, DayCmd, ExpenseCmd, ItineraryCmd, MemoryCmd, PackCmd,
    ShowSection, ThemeCmd, TripCmd,
};
use config::{AppConfig, ConfigOverrides};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use terminal::TerminalPrompt;
use travelease_core::db::open_db;
use travelease_core::forms::{fields, ActivityForm};
use travelease_core::model::packing::CategoryFilter;
use travelease_core::render::print::PrintDocument;
use travelease_core::render::Container;
use travelease_core::{
    init_logging, App, Command, Control, FieldValues, FormDefaults, Outcome, Page, Prompt,
    SqliteStateRepository, StateRepository,
};

/// Exit status when the traveler's input was rejected.
const EXIT_REJECTED: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if matches!(cli.command, Cmd::Ping) {
        print_ping();
        return Ok(ExitCode::SUCCESS);
    }

    let config = AppConfig::resolve(ConfigOverrides {
        db_path: cli.db,
        log_dir: cli.log_dir,
        log_level: cli.log_level,
    });
    init_logging(&config.log_level, &config.log_dir.to_string_lossy())
        .map_err(|err| anyhow!(err))
        .context("failed to initialize logging")?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    let repo = SqliteStateRepository::try_new(&conn)?;
    let mut app = App::start(repo, TerminalPrompt::new(cli.yes))?;

    let today = Local::now().date_naive();
    let result = execute(&mut app, cli.command, FormDefaults::for_today(today))
        .map(|(outcome, view)| report(&outcome, &app.page(), view));
    app.shutdown();
    result
}

/// Runs one subcommand and returns its outcome plus the containers to print.
fn execute<R, P>(
    app: &mut App<R, P>,
    command: Cmd,
    defaults: FormDefaults,
) -> Result<(Outcome, &'static [Container])>
where
    R: StateRepository,
    P: Prompt,
{
    let mut values = FieldValues::new();
    defaults.apply(&mut values);

    let (outcome, view): (Outcome, &'static [Container]) = match command {
        Cmd::Trip {
            action: TripCmd::Create(args),
        } => {
            values.set(fields::TRIP_NAME, args.name);
            values.set(fields::DESTINATION, args.destination);
            set_if_given(&mut values, fields::START_DATE, args.start);
            set_if_given(&mut values, fields::END_DATE, args.end);
            set_if_given(&mut values, fields::TRAVELERS, args.travelers);
            set_if_given(&mut values, fields::TRAVELER_NAMES, args.names);
            let outcome = app.submit(Control::GenerateItinerary, &mut values)?;
            (outcome, containers(ShowSection::Itinerary))
        }
        Cmd::Day { action } => {
            let outcome = match action {
                DayCmd::Add => app.submit(Control::AddDay, &mut values)?,
                DayCmd::Delete { day } => app.dispatch(Command::DeleteDay(day))?,
                DayCmd::Rename { day, title } => {
                    app.dispatch(Command::RenameDay { day, title })?
                }
            };
            (outcome, containers(ShowSection::Itinerary))
        }
        Cmd::Activity { action } => {
            let outcome = match action {
                ActivityCmd::Add(args) => app.dispatch(Command::AddActivity {
                    day: args.day,
                    form: ActivityForm {
                        title: args.title,
                        description: args.description,
                        location: args.location,
                        cost: args.cost,
                    },
                })?,
                ActivityCmd::Delete { day, id } => app.dispatch(Command::DeleteActivity {
                    day,
                    activity: id,
                })?,
            };
            (outcome, containers(ShowSection::Itinerary))
        }
        Cmd::Itinerary { action } => match action {
            ItineraryCmd::Save => (app.submit(Control::SaveItinerary, &mut values)?, &[][..]),
            ItineraryCmd::Export { output, no_open } => {
                let outcome = app.submit(Control::PrintItinerary, &mut values)?;
                if let Outcome::Printed(document) = &outcome {
                    export_document(document, output, !no_open)?;
                }
                (outcome, &[][..])
            }
        },
        Cmd::Budget {
            action: BudgetCmd::Set { amount },
        } => {
            values.set(fields::TOTAL_BUDGET, amount);
            let outcome = app.submit(Control::SetBudget, &mut values)?;
            (outcome, containers(ShowSection::Budget))
        }
        Cmd::Expense { action } => {
            let outcome = match action {
                ExpenseCmd::Add(args) => {
                    values.set(fields::EXPENSE_DESCRIPTION, args.description);
                    values.set(fields::EXPENSE_AMOUNT, args.amount);
                    values.set(fields::EXPENSE_CATEGORY, args.category);
                    set_if_given(&mut values, fields::EXPENSE_DATE, args.date);
                    app.submit(Control::AddExpense, &mut values)?
                }
                ExpenseCmd::Delete { id } => app.dispatch(Command::DeleteExpense(id))?,
            };
            (outcome, containers(ShowSection::Budget))
        }
        Cmd::Pack { action } => {
            let outcome = match action {
                PackCmd::Add(args) => {
                    values.set(fields::ITEM_NAME, args.name);
                    values.set(fields::ITEM_CATEGORY, args.category);
                    values.set(fields::ITEM_QUANTITY, args.quantity);
                    if args.packed {
                        values.set(fields::ITEM_PACKED, "true");
                    }
                    app.submit(Control::AddPackingItem, &mut values)?
                }
                PackCmd::Toggle { id } => app.dispatch(Command::TogglePacked(id))?,
                PackCmd::Delete { id } => app.dispatch(Command::DeletePackingItem(id))?,
                PackCmd::List { category } => {
                    let filter = category.map_or(CategoryFilter::All, CategoryFilter::Category);
                    app.dispatch(Command::SelectCategory(filter))?
                }
            };
            (outcome, containers(ShowSection::Packing))
        }
        Cmd::Memory { action } => {
            let outcome = match action {
                MemoryCmd::Add(args) => {
                    values.set(fields::MEMORY_TITLE, args.title);
                    values.set(fields::MEMORY_CONTENT, args.content);
                    set_if_given(&mut values, fields::MEMORY_DATE, args.date);
                    if let Some(photo) = args.photo {
                        values.set(fields::MEMORY_PHOTO, photo.to_string_lossy());
                    }
                    app.submit(Control::SaveMemory, &mut values)?
                }
                MemoryCmd::Delete { id } => app.dispatch(Command::DeleteMemory(id))?,
            };
            (outcome, containers(ShowSection::Memories))
        }
        Cmd::Story => (
            app.submit(Control::GenerateStory, &mut values)?,
            &[Container::StoryContent][..],
        ),
        Cmd::Show { section } => (Outcome::Applied, containers(section)),
        Cmd::Theme {
            action: ThemeCmd::Toggle,
        } => (
            app.submit(Control::ToggleTheme, &mut values)?,
            containers(ShowSection::Theme),
        ),
        Cmd::Ping => {
            print_ping();
            (Outcome::Applied, &[][..])
        }
    };

    Ok((outcome, view))
}

fn report(outcome: &Outcome, page: &Page, view: &[Container]) -> ExitCode {
    match outcome {
        Outcome::Applied | Outcome::Printed(_) => {
            print_containers(page, view);
            ExitCode::SUCCESS
        }
        Outcome::Ignored => {
            println!("Nothing changed: no matching entry.");
            ExitCode::SUCCESS
        }
        Outcome::Cancelled => {
            println!("Cancelled.");
            ExitCode::SUCCESS
        }
        Outcome::Rejected(_) => ExitCode::from(EXIT_REJECTED),
    }
}

fn containers(section: ShowSection) -> &'static [Container] {
    match section {
        ShowSection::Theme => &[Container::ThemeToggle],
        ShowSection::Itinerary => &[Container::ItineraryDays],
        ShowSection::Budget => &[Container::BudgetSummary, Container::ExpenseList],
        ShowSection::Packing => &[
            Container::CategoryTabs,
            Container::ItemsList,
            Container::PackingProgress,
        ],
        ShowSection::Memories => &[Container::MemoriesList],
    }
}

fn print_containers(page: &Page, view: &[Container]) {
    for container in view {
        println!("<!-- #{} -->", container.element_id());
        match page.fragment(*container) {
            Some(fragment) if !fragment.markup.is_empty() => print!("{}", fragment.markup),
            _ => println!("(nothing to show yet)"),
        }
        if *container == Container::ThemeToggle {
            println!("<!-- body class: \"{}\" -->", page.body_class());
        }
    }
}

fn set_if_given(values: &mut FieldValues, name: &str, value: Option<String>) {
    if let Some(value) = value {
        values.set(name, value);
    }
}

fn export_document(document: &PrintDocument, output: Option<PathBuf>, open: bool) -> Result<()> {
    let path = output.unwrap_or_else(|| std::env::temp_dir().join(export_file_name(&document.title)));
    std::fs::write(&path, &document.html)
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    println!("Itinerary written to {}", path.display());
    info!("event=itinerary_export module=cli status=ok open={open}");

    if open {
        open_for_print(&path)?;
    }
    Ok(())
}

fn open_for_print(path: &Path) -> Result<()> {
    open::that(path).with_context(|| format!("failed to open `{}`", path.display()))
}

/// `Lisbon 2024 - Itinerary` becomes `lisbon-2024-itinerary.html`.
fn export_file_name(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "itinerary.html".to_string()
    } else {
        format!("{slug}.html")
    }
}

fn print_ping() {
    println!("travelease_core ping={}", travelease_core::ping());
    println!("travelease_core version={}", travelease_core::core_version());
}
