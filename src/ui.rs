use crate::app::{App, Theme};
use crate::pomodoro::format_time;
use crate::storage::Storage;
use crate::task;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

struct Palette {
    text: Color,
    dim: Color,
    accent: Color,
    warn: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                dim: Color::DarkGray,
                accent: Color::Cyan,
                warn: Color::LightRed,
            },
            Theme::Light => Self {
                text: Color::Black,
                dim: Color::Gray,
                accent: Color::Blue,
                warn: Color::Red,
            },
        }
    }
}

pub fn draw<S: Storage>(f: &mut Frame, app: &App<S>) {
    let palette = Palette::for_theme(app.theme);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(f.area());

    draw_sidebar(f, app, &palette, columns[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(columns[1]);

    draw_tasks(f, app, &palette, rows[0]);
    draw_stats(f, app, &palette, rows[1]);
    draw_pomodoro(f, app, &palette, rows[2]);
    draw_help(f, &palette, rows[3]);
}

fn draw_sidebar<S: Storage>(
    f: &mut Frame,
    app: &App<S>,
    palette: &Palette,
    area: Rect,
) {
    let items: Vec<ListItem> = app
        .lists
        .iter()
        .enumerate()
        .map(|(i, list)| {
            let style = if i == app.selected_list {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {}", list.icon, list.name), style),
                Span::styled(
                    format!(" ({})", task::count_incomplete(&list.tasks)),
                    Style::default().fg(palette.dim),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Lists").borders(Borders::ALL));
    f.render_widget(list, area);
}

fn draw_tasks<S: Storage>(
    f: &mut Frame,
    app: &App<S>,
    palette: &Palette,
    area: Rect,
) {
    let items: Vec<ListItem> = app
        .visible_tasks()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let checkbox = if t.completed { "[x] " } else { "[ ] " };
            let mut text_style = Style::default().fg(palette.text);
            if t.completed {
                text_style = Style::default()
                    .fg(palette.dim)
                    .add_modifier(Modifier::CROSSED_OUT);
            }
            if i == app.selected_task {
                text_style = text_style.add_modifier(Modifier::REVERSED);
            }
            let mut spans = vec![Span::raw(checkbox)];
            if t.priority {
                spans.push(Span::styled("! ", Style::default().fg(palette.warn)));
            }
            if t.today {
                spans.push(Span::styled("@today ", Style::default().fg(Color::Yellow)));
            }
            spans.push(Span::styled(t.text.clone(), text_style));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = match app.current_list() {
        Some(list) => format!("{} {} | {}", list.icon, list.name, app.filter.label()),
        None => "No lists".to_string(),
    };
    let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(list, area);
}

fn draw_stats<S: Storage>(
    f: &mut Frame,
    app: &App<S>,
    palette: &Palette,
    area: Rect,
) {
    let line = match app.current_list() {
        Some(list) => {
            let stats = task::compute_stats(&list.tasks);
            format!(
                "Total {} | Done {} | Pending {} | {}% complete",
                stats.total, stats.completed, stats.pending, stats.completion_rate
            )
        }
        None => "No list selected".to_string(),
    };
    let paragraph = Paragraph::new(line)
        .style(Style::default().fg(palette.text))
        .block(Block::default().title("Stats").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_pomodoro<S: Storage>(
    f: &mut Frame,
    app: &App<S>,
    palette: &Palette,
    area: Rect,
) {
    let phase = if app.timer.is_break { "Break" } else { "Focus" };
    let status = if app.timer.running { "" } else { " (paused)" };
    let label = format!("{} {}{}", phase, format_time(app.timer.time_left), status);
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!("Pomodoro | {} done today", app.daily_count))
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(palette.accent))
        .ratio((app.timer.progress_percent() / 100.0).clamp(0.0, 1.0))
        .label(label);
    f.render_widget(gauge, area);
}

fn draw_help(f: &mut Frame, palette: &Palette, area: Rect) {
    let help = "a add  e edit  d del  D del list  n new list  space done  p priority  t today  f filter  s timer  r reset  T theme  q quit";
    let paragraph = Paragraph::new(help).style(Style::default().fg(palette.dim));
    f.render_widget(paragraph, area);
}
