//! Application runner and event loop.
//!
//! Handles terminal setup/teardown and the main event loop.
//! Events are read from an mpsc channel and dispatched to handlers.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{info, warn};

use crate::config::Config;
use crate::events::AppEvent;

use super::state::App;

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Entry point: set up terminal and run the event loop.
pub fn run(config: Config) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    stdout
        .execute(EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    stdout.execute(EnableBracketedPaste)?;
    // Not every terminal speaks the kitty protocol; plain key events still work.
    let enhanced = stdout
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS,
        ))
        .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_loop(&mut terminal, config);

    let _ = disable_raw_mode();
    if enhanced {
        let _ = terminal.backend_mut().execute(PopKeyboardEnhancementFlags);
    }
    let _ = terminal.backend_mut().execute(DisableBracketedPaste);
    let _ = terminal.backend_mut().execute(LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    result
}

/// Main event loop: process events until quit.
fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: Config) -> Result<()> {
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    spawn_input_thread(event_tx.clone());
    spawn_tick_thread(event_tx);

    let mut app = App::new(config, Box::new(Instant::now));
    info!(tabs = app.tabs.len(), "notator started");
    let result = drive(terminal, &mut app, &event_rx);
    // Flush the layout however the loop ended.
    app.persist_session();
    match &result {
        Ok(()) => info!("notator stopped"),
        Err(err) => warn!(error = %err, "notator stopped on error"),
    }
    result
}

fn drive(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &Receiver<AppEvent>,
) -> Result<()> {
    let mut title = String::new();
    terminal.clear()?;
    draw(terminal, app, &mut title)?;

    while !app.should_quit {
        let event = match event_rx.recv() {
            Ok(event) => event,
            Err(_) => break,
        };
        super::input::handle_event(app, event);
        // Drain any pending events before redraw
        while let Ok(event) = event_rx.try_recv() {
            super::input::handle_event(app, event);
            if app.should_quit {
                break;
            }
        }

        draw(terminal, app, &mut title)?;
    }
    Ok(())
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    title: &mut String,
) -> Result<()> {
    terminal
        .draw(|frame| super::render::render(app, frame))
        .context("failed to draw frame")?;
    let wanted = app.window_title();
    if *title != wanted {
        if let Err(err) = terminal.backend_mut().execute(SetTitle(&wanted)) {
            warn!(error = %err, "failed to set terminal title");
        }
        *title = wanted;
    }
    Ok(())
}

/// Spawn a thread to read terminal input events.
fn spawn_input_thread(sender: Sender<AppEvent>) {
    thread::spawn(move || loop {
        let event = match event::read() {
            Ok(Event::Key(key)) => AppEvent::Input(key),
            Ok(Event::Paste(text)) => AppEvent::Paste(text),
            Ok(Event::Resize(_, _)) => AppEvent::Resize,
            Ok(_) => continue,
            Err(_) => break,
        };
        if sender.send(event).is_err() {
            break;
        }
    });
}

/// Spawn the once-per-second tick source for timer deadlines.
fn spawn_tick_thread(sender: Sender<AppEvent>) {
    thread::spawn(move || loop {
        thread::sleep(TICK_INTERVAL);
        if sender.send(AppEvent::Tick).is_err() {
            break;
        }
    });
}
