use std::io;
use std::panic;
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use powerup_snake::clock::TickClock;
use powerup_snake::config::{
    theme_by_name, GridSize, Theme, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TILE_COUNT,
    MIN_TICK_INTERVAL_MS,
};
use powerup_snake::game::{GameEvent, GameState, GameStatus};
use powerup_snake::input::{GameInput, InputHandler};
use powerup_snake::renderer;
use powerup_snake::score::{load_high_score, save_high_score, ScoreBoard};
use powerup_snake::ui::hud::{HudInfo, LastRound};

/// Smallest playable square grid.
const MIN_TILE_COUNT: u16 = 8;

/// Idle delay between loop iterations, well under one tick.
const LOOP_SLEEP: Duration = Duration::from_millis(8);

#[derive(Debug, Parser)]
#[command(version, about = "Grid snake with timed power-ups")]
struct Cli {
    /// Edge length of the square playing field, in cells.
    #[arg(long, default_value_t = DEFAULT_TILE_COUNT)]
    grid: u16,

    /// Base tick interval in milliseconds.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    tick_ms: u64,

    /// RNG seed for reproducible runs; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Color theme name.
    #[arg(long, default_value = "classic")]
    theme: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(theme) = theme_by_name(&cli.theme) else {
        eprintln!("unknown theme '{}'", cli.theme);
        return ExitCode::from(2);
    };

    let high_score = match load_high_score() {
        Ok(score) => score,
        Err(error) => {
            eprintln!("warning: could not read high score file: {error}");
            0
        }
    };

    install_panic_hook();

    let run_result = run(&cli, theme, high_score);
    let cleanup_result = cleanup_terminal();

    if let Err(error) = run_result.and(cleanup_result) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: &Cli, theme: &Theme, initial_high_score: u32) -> io::Result<()> {
    let mut terminal = setup_terminal()?;

    let bounds = GridSize::square(cli.grid.max(MIN_TILE_COUNT));
    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(bounds, seed),
        None => GameState::new(bounds),
    };
    state.set_base_interval(Duration::from_millis(cli.tick_ms.max(MIN_TICK_INTERVAL_MS)));
    state.scores = ScoreBoard::with_high(initial_high_score);

    let mut input = InputHandler::default();
    let mut clock = TickClock::new(state.current_tick_interval());
    let mut last_round: Option<LastRound> = None;

    loop {
        let snapshot = state.snapshot();
        terminal.draw(|frame| {
            renderer::render(frame, &snapshot, &HudInfo { theme, last_round });
        })?;

        if let Some(game_input) = input.poll_input()? {
            match game_input {
                GameInput::Quit => break,
                GameInput::Start => {
                    if matches!(state.status, GameStatus::Idle | GameStatus::GameOver) {
                        last_round = None;
                        state.start();
                        clock.set_interval(state.current_tick_interval());
                        clock.start(Instant::now());
                    }
                }
                GameInput::Pause => {
                    state.toggle_pause();
                    match state.status {
                        GameStatus::Paused => clock.pause(Instant::now()),
                        GameStatus::Running => clock.resume(Instant::now()),
                        _ => {}
                    }
                }
                GameInput::Reset => {
                    state.reset();
                    clock.reset();
                    last_round = None;
                }
                GameInput::Direction(direction) => state.set_direction(direction),
            }
        }

        if clock.poll(Instant::now()) {
            for event in state.tick() {
                if let GameEvent::GameOver {
                    final_score,
                    new_high,
                } = event
                {
                    last_round = Some(LastRound {
                        score: final_score,
                        new_high,
                    });
                    clock.reset();

                    if new_high {
                        if let Err(error) = save_high_score(state.scores.high()) {
                            eprintln!("Failed to save high score: {error}");
                        }
                    }
                }
            }
            clock.set_interval(state.current_tick_interval());
        }

        thread::sleep(LOOP_SLEEP);
    }

    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn cleanup_terminal() -> io::Result<()> {
    disable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, Show, LeaveAlternateScreen)?;

    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal_after_panic();
        default_hook(panic_info);
    }));
}

fn restore_terminal_after_panic() {
    let _ = disable_raw_mode();

    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}
