mod report;
mod tui;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::Parser;
use procrastinar_core::{
    daily_agenda, edit_plan, emergency_steps, short_id, AppController, Avatar, Category,
    ClassifiedTask, Clock, Config, FileStateRepository, OnboardingData, Priority, RandomIds,
    SystemClock, TaskEdit, UserPreferences,
};
use tracing::Level;
use tracing_subscriber::EnvFilter;

pub(crate) type Controller = AppController<FileStateRepository, SystemClock, RandomIds>;

// one day
const MAX_DONE_MINUTES: i64 = 24 * 60;

#[derive(Parser)]
#[command(name = "procrastinar")]
#[command(about = "Turns a brain dump into small focused steps", long_about = None)]
struct Cli {
    /// Where state.json lives (defaults to $PROCRASTINAR_HOME or ~/.procrastinar)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Set up your profile (usage: onboard -c study,finance -m 30 -l 7 -a serious)
    Onboard {
        /// Preferred categories, most important first
        #[arg(short, long, value_delimiter = ',', required = true)]
        categories: Vec<Category>,
        /// Minutes available per day
        #[arg(short, long, default_value_t = 30)]
        minutes: u32,
        /// Procrastination level, 1 to 10
        #[arg(short, long, default_value_t = 5)]
        level: u8,
        #[arg(short, long, default_value = "cute")]
        avatar: Avatar,
        #[arg(long)]
        name: Option<String>,
    },
    /// Classify and rank a list of tasks without saving anything
    Plan {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        text: Vec<String>,
    },
    /// Classify, rank and store a list of tasks
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        text: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Break one goal into small steps and store them
    Goal {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        text: Vec<String>,
        #[arg(short, long)]
        yes: bool,
    },
    /// List micro-tasks
    List {
        /// Include completed ones
        #[arg(short, long)]
        all: bool,
    },
    /// Show (and start) the next micro-task
    Next,
    /// Complete the current micro-task, or the one with the given ID
    Done {
        id: Option<String>,
        /// Minutes actually spent (defaults to the time since it started)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=MAX_DONE_MINUTES))]
        minutes: Option<u32>,
    },
    /// Put the current micro-task back and start it over
    Redo { id: Option<String> },
    /// Edit a micro-task (description, duration) or its goal (category, priority)
    Edit {
        id: String,
        #[arg(short, long)]
        desc: Option<String>,
        #[arg(short, long)]
        minutes: Option<u32>,
        #[arg(short, long)]
        category: Option<Category>,
        #[arg(short, long)]
        priority: Option<Priority>,
    },
    /// Delete a goal and all of its micro-tasks
    DeleteGoal { id: String },
    /// Today's progress, streak and achievements
    Progress,
    /// Five minutes, three steps, no thinking
    Emergency,
    /// A small agenda built from your preferred categories
    Agenda,
    /// Open the focus timer
    Focus,
}

fn init_logging(interactive: bool) {
    if interactive {
        // the TUI owns the terminal
        tracing_subscriber::fmt()
            .with_max_level(Level::ERROR)
            .with_writer(io::sink)
            .init();
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

fn ask(question: &str) -> Result<String> {
    print!("{} ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "y" | "yes" | "s" | "sim")
}

fn confirm(question: &str) -> Result<bool> {
    Ok(is_yes(&ask(&format!("{} [y/N]", question))?))
}

fn optional<T: std::str::FromStr<Err = anyhow::Error>>(answer: String) -> Result<Option<T>> {
    if answer.is_empty() {
        return Ok(None);
    }
    answer.parse().map(Some)
}

/// Asks for changes to one planned task. Blank answers keep the current value.
fn edit_planned(tasks: &mut [ClassifiedTask]) -> Result<()> {
    let order: usize = ask("Task number:")?
        .parse()
        .map_err(|_| anyhow!("Task number must be a number"))?;
    let description = ask("Description (blank keeps):")?;
    let minutes = ask("Minutes (blank keeps):")?;
    let edit = TaskEdit {
        description: Some(description).filter(|d| !d.is_empty()),
        duration_minutes: match minutes.as_str() {
            "" => None,
            m => Some(m.parse().map_err(|_| anyhow!("Minutes must be a number"))?),
        },
        category: optional(ask("Category (blank keeps):")?)?,
        priority: optional(ask("Priority (blank keeps):")?)?,
    };
    edit_plan(tasks, order, &edit)
}

fn require_onboarding(app: &Controller) -> Result<()> {
    if !app.state().is_onboarded() {
        return Err(anyhow!("No profile yet. Run `procrastinar onboard` first."));
    }
    Ok(())
}

fn elapsed_minutes(app: &Controller, started_at: Option<chrono::DateTime<Utc>>) -> u32 {
    let Some(started_at) = started_at else {
        return 1;
    };
    let secs = (app.clock().now() - started_at).num_seconds().max(0) as u64;
    (secs.div_ceil(60) as u32).max(1)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Focus));
    init_logging(interactive);

    let config = Config::resolve(cli.data_dir)?;
    let repo = FileStateRepository::new(&config.data_dir)?;
    let mut app = AppController::new(repo, SystemClock, RandomIds)?;

    match cli.command {
        Some(Commands::Onboard {
            categories,
            minutes,
            level,
            avatar,
            name,
        }) => {
            let data = OnboardingData {
                preferred_categories: categories,
                available_minutes_per_day: minutes,
                procrastination_level: level,
                avatar,
            };
            if app.state().is_onboarded() {
                data.validate()?;
                let prefs =
                    UserPreferences::new(data.preferred_categories, data.available_minutes_per_day);
                app.update_preferences(prefs)?;
                println!("Preferences updated.");
            } else {
                app.onboard(data)?;
                println!("Welcome! {} {} is here to help.", avatar.emoji(), avatar.name());
            }
            if let Some(name) = name {
                app.rename_user(&name)?;
            }
        }
        Some(Commands::Plan { text }) => {
            let tasks = app.plan(&text.join(" "));
            if tasks.is_empty() {
                println!("No tasks identified.");
            } else {
                report::print_plan(&tasks);
            }
        }
        Some(Commands::Add { text, yes }) => {
            require_onboarding(&app)?;
            let mut tasks = app.plan(&text.join(" "));
            if tasks.is_empty() {
                println!("No tasks identified.");
                return Ok(());
            }
            report::print_plan(&tasks);
            while !yes {
                let answer = ask("Save these tasks? [y/N/e to edit one]")?;
                if is_yes(&answer) {
                    break;
                }
                if answer != "e" {
                    println!("Nothing saved.");
                    return Ok(());
                }
                match edit_planned(&mut tasks) {
                    Ok(()) => report::print_plan(&tasks),
                    Err(e) => println!("Error: {}", e),
                }
            }
            let stored = app.confirm(&tasks)?;
            println!("Saved {} micro-task(s).", stored);
        }
        Some(Commands::Goal { text, yes }) => {
            require_onboarding(&app)?;
            let draft = app.draft_goal(&text.join(" "))?;
            report::print_draft(&draft);
            if !yes && !confirm("Save this goal?")? {
                println!("Nothing saved.");
                return Ok(());
            }
            let goal_id = app.add_goal(&draft)?;
            println!("Goal added (ID: {})", short_id(&goal_id));
        }
        Some(Commands::List { all }) => {
            report::print_micro_tasks(app.state(), all);
        }
        Some(Commands::Next) => match app.current_task()? {
            Some(task) => report::print_current(app.state(), &task, app.state().completed_count()),
            None => println!("Nothing left to do. Add more with `procrastinar add`."),
        },
        Some(Commands::Done { id, minutes }) => {
            let task = match id {
                Some(prefix) => {
                    let id = app.resolve_task_id(&prefix)?;
                    app.state().micro_task(&id).cloned()
                }
                None => app.current_task()?,
            }
            .ok_or_else(|| anyhow!("No micro-task in progress"))?;

            let minutes = minutes.unwrap_or_else(|| elapsed_minutes(&app, task.started_at));
            let report = app.complete(&task.id, minutes)?;

            println!("✔ {} ({} min)", report.completed.description, minutes);
            for kind in &report.unlocked {
                println!("{} Achievement unlocked: {}", kind.icon(), kind.title());
            }
            match report.next {
                Some(next) => {
                    println!("Next: {} ({} min)", next.description, next.duration_minutes)
                }
                None => println!("All done for now! 🎉"),
            }
        }
        Some(Commands::Redo { id }) => {
            let task = match id {
                Some(prefix) => {
                    let id = app.resolve_task_id(&prefix)?;
                    app.redo(&id)?;
                    app.current_task()?
                }
                None => Some(app.redo_current()?),
            };
            if let Some(task) = task {
                println!("Starting over: {} ({} min)", task.description, task.duration_minutes);
            }
        }
        Some(Commands::Edit {
            id,
            desc,
            minutes,
            category,
            priority,
        }) => {
            let id = app.resolve_task_id(&id)?;
            let edit = TaskEdit {
                description: desc,
                duration_minutes: minutes,
                category,
                priority,
            };
            if edit.is_empty() {
                println!("Nothing to change.");
                return Ok(());
            }
            app.edit_task(&id, &edit)?;
            println!("Micro-task updated.");
        }
        Some(Commands::DeleteGoal { id }) => {
            let id = app.resolve_goal_id(&id)?;
            let title = app.state().goal(&id).map(|g| g.title.clone()).unwrap_or_default();
            app.delete_goal(&id)?;
            println!("Deleted goal: {}", title);
        }
        Some(Commands::Progress) => {
            report::print_progress(app.state(), app.clock());
        }
        Some(Commands::Emergency) => {
            println!("\x1b[1;31mEmergency mode\x1b[0m: five minutes, just follow along.");
            report::print_steps(&emergency_steps());
        }
        Some(Commands::Agenda) => {
            report::print_agenda(&daily_agenda(&app.state().preferences()));
        }
        Some(Commands::Focus) | None => {
            require_onboarding(&app)?;
            tui::run(app)?;
        }
    }
    Ok(())
}
