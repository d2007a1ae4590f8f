mod app;
mod command;
mod effects;
mod sections;
mod stepflow;
mod ui;
mod widgets;

use std::io::{self, BufRead, Write as _};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::App;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let headless = args.iter().any(|a| a == "--headless");

    venture_telemetry::logging::init_logging("venture-tui", "warn");

    if headless {
        return run_headless();
    }

    // Restore the terminal even when something panics mid-draw.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));

    let result = run();

    restore_terminal()?;
    result
}

/// Run the interactive TUI with the standard crossterm backend.
fn run() -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    loop {
        terminal.draw(|frame| {
            ui::render(frame, &mut app);
        })?;

        if ct_event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = ct_event::read()? {
                app.on_key(key);
            }
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Headless mode: reads JSON or `:` text commands from stdin, one per
/// line, and emits JSON events on stdout. No terminal rendering -- a pure
/// state machine for scripted driving.
///
/// Usage: `echo '{"cmd":"query_state"}' | venture-tui --headless`
fn run_headless() -> Result<()> {
    let mut app = App::new();

    emit_event(&serde_json::json!({
        "event": "started",
        "sections": app::SECTION_NAMES,
    }));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        let cmd = command::parse_json_command(&line).or_else(|| command::parse_command(&line));

        match cmd {
            Some(cmd) => {
                let prev_section = app.current_section;
                let result = command::execute_command(&mut app, cmd, Instant::now());
                app.tick(Instant::now());

                if app.current_section != prev_section {
                    emit_event(&serde_json::json!({
                        "event": "section_changed",
                        "section": app.current_section,
                        "section_name": app::SECTION_NAMES[app.current_section],
                    }));
                }

                if let Some(json_str) = result {
                    // Query output is already JSON.
                    println!("{}", json_str);
                    let _ = io::stdout().flush();
                } else {
                    emit_event(&serde_json::json!({"event": "ok"}));
                }
            }
            None => {
                emit_event(&serde_json::json!({
                    "event": "error",
                    "message": format!("unknown command: {}", line),
                }));
            }
        }

        if app.should_quit {
            emit_event(&serde_json::json!({"event": "quit"}));
            break;
        }
    }

    Ok(())
}

fn emit_event(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string(value) {
        println!("{}", s);
        let _ = io::stdout().flush();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen)?;
    Ok(())
}
