use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Row, Table, Wrap},
    Frame,
};
use procrastinar_core::{short_id, Priority};

use crate::tui::app::App;

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let header = Paragraph::new("PROCRASTINAR")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(content_chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(3)])
        .split(content_chunks[1]);

    draw_current(f, app, left[0]);
    draw_timer(f, app, left[1]);
    draw_progress(f, app, right[0]);
    draw_upcoming(f, app, right[1]);

    let footer = Paragraph::new("c: Complete | r: Redo | p: Pause | q: Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);
}

fn panel(title: &str) -> Block<'_> {
    Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded)
}

fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::Urgent => Style::default().fg(Color::Magenta),
        Priority::High => Style::default().fg(Color::Red),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Green),
    }
}

fn draw_current(f: &mut Frame, app: &App, area: Rect) {
    let block = panel(" Now ");

    let Some(task) = &app.current else {
        let done = Paragraph::new(vec![
            Line::from(Span::styled(
                "Nothing left to do 🎉",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Add more with `procrastinar add`."),
        ])
        .block(block);
        f.render_widget(done, area);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(&task.description, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];

    if let Some(goal) = app.controller.state().goal(&task.goal_id) {
        lines.push(Line::from(vec![
            Span::styled("Goal: ", Style::default().fg(Color::Blue)),
            Span::raw(format!("{} {}", goal.category.emoji(), goal.title)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Priority: ", Style::default().fg(Color::Blue)),
            Span::styled(goal.priority.to_string(), priority_style(goal.priority)),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("ID: ", Style::default().fg(Color::DarkGray)),
        Span::raw(short_id(&task.id)),
    ]));
    lines.push(Line::from(""));

    if let Some(phrase) = app.phrase() {
        lines.push(Line::from(Span::styled(phrase, Style::default().fg(Color::Cyan))));
    }
    if let Some(message) = &app.message {
        lines.push(Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Yellow))));
    }
    for kind in &app.celebrate {
        lines.push(Line::from(format!("{} Achievement unlocked: {}", kind.icon(), kind.title())));
    }

    let current = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(current, area);
}

fn draw_timer(f: &mut Frame, app: &App, area: Rect) {
    let block = panel(" Timer ");

    let Some(timer) = &app.timer else {
        f.render_widget(block, area);
        return;
    };

    let color = if timer.is_expired() {
        Color::Red
    } else if timer.is_running() {
        Color::Green
    } else {
        Color::DarkGray
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color))
        .percent(timer.progress_percent())
        .label(timer.display());
    f.render_widget(gauge, area);
}

fn draw_progress(f: &mut Frame, app: &App, area: Rect) {
    let today = app.today();
    let state = app.controller.state();

    let badges: Vec<&str> = state.achievements.iter().map(|a| a.kind.icon()).collect();
    let badges = badges.join(" ");

    let lines = vec![
        Line::from(vec![
            Span::styled("Focused:   ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{} min", today.focused_minutes),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled("Completed: ", Style::default().fg(Color::DarkGray)),
            Span::raw(today.completed_tasks.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Streak:    ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!("{} 🔥", today.streak)),
        ]),
        Line::from(vec![
            Span::styled("Badges:    ", Style::default().fg(Color::DarkGray)),
            Span::raw(badges),
        ]),
    ];

    let card = Paragraph::new(lines).block(panel(" Today "));
    f.render_widget(card, area);
}

fn draw_upcoming(f: &mut Frame, app: &App, area: Rect) {
    let rows: Vec<Row> = app
        .upcoming()
        .into_iter()
        .map(|task| {
            Row::new(vec![
                Span::raw(task.order.to_string()),
                Span::raw(format!("{}m", task.duration_minutes)),
                Span::raw(task.description.clone()),
            ])
        })
        .collect();

    let widths = [Constraint::Length(3), Constraint::Length(5), Constraint::Min(10)];
    let table = Table::new(rows, widths)
        .header(Row::new(vec!["#", "Min", "Up next"]).style(Style::default().fg(Color::Yellow)))
        .block(panel(" Queue "));
    f.render_widget(table, area);
}
