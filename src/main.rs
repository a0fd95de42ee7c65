use anyhow::{bail, Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flapper::build_info;
use flapper::config::{flapper_dir, Config, LOG_FILENAME};
use flapper::input::map_event;
use flapper::logging::{init_file_logging, parse_level};
use flapper::scene::{process_input, tick_scene, Scene};
use flapper::ui;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{info, warn, Level};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    seed: Option<u64>,
    config_path: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
enum Command {
    Play(CliArgs),
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-v" => return Ok(Command::Version),
            "--seed" => {
                let value = iter.next().context("--seed requires a number")?;
                cli.seed = Some(
                    value
                        .parse()
                        .with_context(|| format!("invalid --seed value '{value}'"))?,
                );
            }
            "--config" => {
                let value = iter.next().context("--config requires a path")?;
                cli.config_path = Some(PathBuf::from(value));
            }
            other => bail!("unknown argument: {other}\nRun 'flapper --help' for usage."),
        }
    }
    Ok(Command::Play(cli))
}

fn print_help() {
    println!("Flapper - tap to flap between the pipes\n");
    println!("Usage: flapper [options]\n");
    println!("Options:");
    println!("  --seed N       Seed the pipe heights");
    println!("  --config PATH  Tuning file (default: ~/.flapper/config.json)");
    println!("  --version      Show version information");
    println!("  --help         Show this help message\n");
    println!("Controls: Space/Enter/Up/W/K or left click to flap, Esc/Q to quit");
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = match parse_args(&args)? {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Command::Play(cli) => cli,
    };

    // A broken default config falls back to defaults; an explicit one is fatal
    let (config, config_error) = match Config::load(cli.config_path.as_deref()) {
        Ok(config) => (config, None),
        Err(e) if cli.config_path.is_none() => (Config::default(), Some(e)),
        Err(e) => return Err(e).context("failed to load config"),
    };

    let level = parse_level(&config.log_level).unwrap_or(Level::INFO);
    match flapper_dir() {
        Ok(dir) => {
            if let Err(e) = init_file_logging(&dir.join(LOG_FILENAME), level) {
                eprintln!("Warning: logging disabled: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: logging disabled: {}", e),
    }
    if let Some(e) = config_error {
        warn!(error = %e, "config unreadable, using defaults");
    }
    info!(version = %build_info::version_line(), seed = ?cli.seed, "starting");

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_budget = config.frame_budget();
    let mut scene = Scene::new(config);

    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    let result = run(&mut terminal, &mut scene, &mut rng, frame_budget);
    restore_terminal(&mut terminal).context("failed to restore terminal")?;
    result?;

    info!(
        best = scene.best_score,
        runs = scene.runs_played,
        "exiting"
    );
    println!("Best score: {}", scene.best_score);
    Ok(())
}

fn setup_terminal() -> io::Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)?
        .execute(EnableMouseCapture)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Tui) -> io::Result<()> {
    disable_raw_mode()?;
    terminal
        .backend_mut()
        .execute(DisableMouseCapture)?
        .execute(LeaveAlternateScreen)?;
    terminal.show_cursor()
}

/// Draw, gather input for one frame budget, then advance the scene by the
/// wall-clock time that passed.
fn run<R: Rng>(
    terminal: &mut Tui,
    scene: &mut Scene,
    rng: &mut R,
    frame_budget: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw(frame, scene))?;

        let deadline = Instant::now() + frame_budget;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Some(input) = map_event(&event::read()?) {
                process_input(scene, input);
            }
            if scene.quit_requested {
                return Ok(());
            }
        }

        // Carry sub-millisecond remainders into the next frame
        let elapsed_ms = last_tick.elapsed().as_millis() as u64;
        last_tick += Duration::from_millis(elapsed_ms);
        tick_scene(scene, elapsed_ms, rng);
    }
}
