use procrastinar_core::{
    short_id, AchievementKind, AgendaEntry, AppState, ClassifiedTask, Clock, GoalDraft, MicroTask,
    StepTemplate, TaskStatus,
};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "#")]
    order: usize,
    #[tabled(rename = "Task")]
    desc: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Min")]
    minutes: u32,
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "#")]
    order: usize,
    #[tabled(rename = "Step")]
    desc: String,
    #[tabled(rename = "Min")]
    minutes: u32,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "#")]
    order: usize,
    #[tabled(rename = "St")]
    status: String,
    #[tabled(rename = "Task")]
    desc: String,
    #[tabled(rename = "Goal")]
    goal: String,
    #[tabled(rename = "Min")]
    minutes: String,
}

#[derive(Tabled)]
struct AgendaRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Activity")]
    desc: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Min")]
    minutes: u32,
}

#[derive(Tabled)]
struct AchievementRow {
    #[tabled(rename = "")]
    icon: String,
    #[tabled(rename = "Achievement")]
    title: String,
    #[tabled(rename = "Goal")]
    desc: String,
    #[tabled(rename = "Unlocked")]
    unlocked: String,
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "☐",
        TaskStatus::InProgress => "▶",
        TaskStatus::Completed => "✔",
    }
}

pub fn print_plan(tasks: &[ClassifiedTask]) {
    let rows = tasks
        .iter()
        .map(|t| PlanRow {
            order: t.order,
            desc: t.description.clone(),
            category: format!("{} {}", t.category.emoji(), t.category),
            priority: t.priority.to_string(),
            minutes: t.estimated_duration_minutes,
        })
        .collect();
    print_table(rows);
}

pub fn print_steps(steps: &[StepTemplate]) {
    let rows = steps
        .iter()
        .map(|s| StepRow {
            order: s.order,
            desc: s.description.clone(),
            minutes: s.duration_minutes,
        })
        .collect();
    print_table(rows);
}

pub fn print_draft(draft: &GoalDraft) {
    println!(
        "\x1b[1;36m{}\x1b[0m ({} {}, {}, {} min)",
        draft.title,
        draft.category.emoji(),
        draft.category,
        draft.priority,
        draft.total_minutes()
    );
    print_steps(&draft.steps);
}

pub fn print_micro_tasks(state: &AppState, show_all: bool) {
    let mut tasks: Vec<&MicroTask> = state
        .micro_tasks
        .iter()
        .filter(|t| show_all || t.is_actionable())
        .collect();

    if tasks.is_empty() {
        println!("No micro-tasks found.");
        return;
    }
    tasks.sort_by_key(|t| (t.status == TaskStatus::Completed, t.order));

    let rows = tasks
        .into_iter()
        .map(|t| {
            let goal = state
                .goal(&t.goal_id)
                .map(|g| format!("{} {}", g.category.emoji(), g.title))
                .unwrap_or_else(|| "-".to_string());
            let minutes = match t.actual_minutes {
                Some(actual) => format!("{}/{}", actual, t.duration_minutes),
                None => t.duration_minutes.to_string(),
            };
            TaskRow {
                id: short_id(&t.id),
                order: t.order,
                status: status_icon(t.status).to_string(),
                desc: t.description.clone(),
                goal,
                minutes,
            }
        })
        .collect();
    print_table(rows);
}

pub fn print_current(state: &AppState, task: &MicroTask, seed: usize) {
    let goal = state.goal(&task.goal_id);
    println!(
        "\x1b[1;36m▶ {}\x1b[0m  ({} min, ID: {})",
        task.description,
        task.duration_minutes,
        short_id(&task.id)
    );
    if let Some(goal) = goal {
        println!("  Goal: {} {} [{}]", goal.category.emoji(), goal.title, goal.priority);
    }
    if let Some(user) = &state.user {
        println!("  {} {}", user.avatar.emoji(), user.avatar.phrase(seed));
    }
}

pub fn print_progress(state: &AppState, clock: &impl Clock) {
    let today = state.today_progress(clock);
    let streak = state.current_streak(clock.today());

    println!("\x1b[1;36mToday\x1b[0m {}", today.day.format("%Y-%m-%d"));
    println!("  Focused:   {} min", today.focused_minutes);
    println!("  Completed: {} micro-tasks", today.completed_tasks);
    println!("  Streak:    {} day(s) 🔥", streak);
    println!("  All time:  {} micro-tasks", state.completed_count());
    println!();

    let rows = AchievementKind::ALL
        .iter()
        .map(|kind| {
            let unlocked = state.achievements.iter().find(|a| a.kind == *kind);
            AchievementRow {
                icon: if unlocked.is_some() { kind.icon().to_string() } else { "🔒".to_string() },
                title: kind.title().to_string(),
                desc: kind.description().to_string(),
                unlocked: unlocked
                    .map(|a| a.unlocked_at.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect();
    print_table(rows);
}

pub fn print_agenda(entries: &[AgendaEntry]) {
    if entries.is_empty() {
        println!("No preferred categories yet. Run `procrastinar onboard` first.");
        return;
    }
    let rows = entries
        .iter()
        .map(|e| AgendaRow {
            time: e.time.clone(),
            desc: e.description.clone(),
            category: format!("{} {}", e.category.emoji(), e.category),
            minutes: e.duration_minutes,
        })
        .collect();
    print_table(rows);
}
