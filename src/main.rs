mod actions;
mod api;
mod app;
mod config;
mod controller;
mod error;
mod input;
mod render;
mod ui;
mod worker;

use anyhow::{bail, Result};
use app::AppController;
use clap::Parser;
use config::{Cli, Command};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use render::DisplayInstruction;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 32;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.is_interactive())?;

    let client = api::PlaylistClient::new(cli.endpoint.clone(), cli.timeout())?;
    info!("Using playlist service at {}", client.endpoint());

    let (req_tx, req_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (resp_tx, mut resp_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let _worker = worker::spawn_worker(client, req_rx, resp_tx);

    let mut app_controller = AppController::new(req_tx);

    match cli.command {
        Some(Command::Generate { city, mood }) => {
            app_controller.input.set_city(city);
            app_controller.input.set_mood(mood);
            generate_once(&mut app_controller, &mut resp_rx).await
        }
        None => run_interactive(&mut app_controller, &mut resp_rx).await,
    }
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    // The TUI owns the terminal, so stay quiet there unless asked otherwise
    let default_filter = match (log_file, interactive) {
        (Some(_), _) => "info",
        (None, true) => "off",
        (None, false) => "warn",
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

async fn generate_once(
    app_controller: &mut AppController,
    resp_rx: &mut mpsc::Receiver<actions::Response>,
) -> Result<()> {
    app_controller.submit();
    app_controller.wait_until_settled(resp_rx).await?;

    let display = app_controller.display();
    if let DisplayInstruction::Error { .. } = display {
        bail!("{}", display.lines().join("\n"));
    }
    for line in display.lines() {
        println!("{}", line);
    }
    Ok(())
}

async fn run_interactive(
    app_controller: &mut AppController,
    resp_rx: &mut mpsc::Receiver<actions::Response>,
) -> Result<()> {
    // Set up panic handler to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app_controller, resp_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app_controller: &mut AppController,
    resp_rx: &mut mpsc::Receiver<actions::Response>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render_ui(f, app_controller))?;

        while let Ok(resp) = resp_rx.try_recv() {
            app_controller.process_response(resp);
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press && app_controller.handle_key_event(key) {
                    break;
                }
            }
        }

        if app_controller.should_quit() {
            break;
        }
    }

    Ok(())
}
