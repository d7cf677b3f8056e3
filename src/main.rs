use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    env, io,
    time::{Duration, Instant},
};

mod app;
mod list;
mod pomodoro;
mod storage;
mod task;
mod ui;

use app::App;
use storage::{FileStorage, Storage};

const TICK_RATE: Duration = Duration::from_secs(1);
const DEFAULT_DATA_DIR: &str = "taskflow_data";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = env::var("TASKFLOW_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let mut app = App::new(FileStorage::new(data_dir));

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.save();

    if let Err(err) = result {
        eprintln!("{:?}", err);
    }
    Ok(())
}

fn run_app<B: Backend, S: Storage>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('a') => {
                        if let Some(text) = prompt("Enter task text") {
                            app.add_task(&text);
                        }
                    }
                    KeyCode::Char('n') => {
                        if let Some(name) = prompt("Enter list name") {
                            let icon = prompt("Enter list icon (blank for default)")
                                .filter(|i| !i.is_empty())
                                .unwrap_or_else(|| "📋".to_string());
                            app.add_list(&name, &icon);
                        }
                    }
                    KeyCode::Char('e') => {
                        if let Some(text) = prompt("Enter new task text") {
                            app.edit_selected_task(&text);
                        }
                    }
                    KeyCode::Char('d') => app.delete_selected_task(),
                    KeyCode::Char('D') => app.delete_current_list(),
                    KeyCode::Char(' ') | KeyCode::Enter => app.toggle_completed(),
                    KeyCode::Char('p') => app.toggle_priority(),
                    KeyCode::Char('t') => app.toggle_today(),
                    KeyCode::Char('f') => app.cycle_filter(),
                    KeyCode::Char('s') => app.timer.toggle(),
                    KeyCode::Char('r') => app.timer.reset(),
                    KeyCode::Char('T') => app.toggle_theme(),
                    KeyCode::Left => app.select_prev_list(),
                    KeyCode::Right => app.select_next_list(),
                    KeyCode::Up => app.select_prev_task(),
                    KeyCode::Down => app.select_next_task(),
                    _ => {}
                }
            }
        }
        if last_tick.elapsed() >= TICK_RATE {
            app.tick();
            last_tick = Instant::now();
        }
    }
}

fn prompt(message: &str) -> Option<String> {
    disable_raw_mode().ok();
    println!("{}", message);
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_ok() {
        enable_raw_mode().ok();
        Some(input.trim().to_string())
    } else {
        enable_raw_mode().ok();
        None
    }
}
