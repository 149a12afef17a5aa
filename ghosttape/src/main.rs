mod ghost;
mod math;
mod middle;
mod pipeline;
mod scheduler;
mod shared;
mod tui;
mod widgets;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal;
use log::{info, warn};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use middle::Middle;
use pipeline::settings;
use shared::{InputEvent, FRAMES_PER_SECOND};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let project_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    init_logging(&project_dir)?;

    let settings = settings::load_settings(&project_dir).unwrap_or_default();
    info!("ghosttape starting in {} with {:?}", project_dir.display(), settings);
    let mut middle = Middle::new(&settings);

    terminal::enable_raw_mode()?;
    crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
    let _guard = RawModeGuard; // auto drops when out of scope

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut term = Terminal::new(backend)?;
    term.clear()?;

    // one scheduler tick per frame, the ghost records one sample per tick
    let tick_rate = Duration::from_secs_f64(1.0 / FRAMES_PER_SECOND);
    let mut last_tick = Instant::now();
    let mut tui_state = tui::mode::TuiState::default();

    loop {
        let ds = middle.display_state();
        term.draw(|frame| {
            tui::view::render(frame, frame.area(), &middle, &ds, &mut tui_state);
        })?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        let events = tui::input::poll_input(timeout, &mut tui_state)?;
        for event in events {
            if event == InputEvent::Quit {
                // save before quitting
                if let Err(e) = settings::save_settings(&project_dir, &middle.ghost.borrow().settings()) {
                    warn!("could not save settings: {e}");
                }
                info!("bye");
                return Ok(());
            }
            middle.handle_input(event);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            middle.tick();
        }
    }
}

// the terminal belongs to the tui, so logs go to <project_dir>/.ghost/ghost.log
fn init_logging(project_dir: &Path) -> anyhow::Result<()> {
    let dir = project_dir.join(settings::GHOST_DIR);
    std::fs::create_dir_all(&dir)?;
    let file = std::fs::File::create(dir.join("ghost.log"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
        let _ = terminal::disable_raw_mode();
    }
}
