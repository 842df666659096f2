//! Catching Mice entry point
//!
//! Terminal front end: reads one command per line, applies it, advances simulated time
//! by `step_ms` and redraws the board.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use catching_mice::Settings;
use catching_mice::audio::AudioManager;
use catching_mice::sim::{Command, Direction, GameState, MouseType, Position, Simulation};

#[derive(Parser)]
#[command(name = "catching-mice")]
#[command(about = "A cat chases randomly moving mice on a 10x10 board")]
#[command(version)]
struct Cli {
    /// Settings file (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the settings file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Starting level 1-5 (overrides the settings file)
    #[arg(short, long)]
    level: Option<u8>,

    /// Print a JSON snapshot after every input instead of the board
    #[arg(long)]
    json: bool,

    /// Write the effective settings to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Verbose logging (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// One line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Command(Command),
    /// Let time pass without acting
    Wait(u64),
    ToggleMute,
    Help,
    Quit,
}

const HELP: &str = "\
w/a/s/d or up/down/left/right  move the cat
spawn (or a single space)      spawn a random mouse
spawn <type> <row> <col>       spawn a baby/child/adult/grand mouse on a cell
obstacle <row> <col>           place/remove an obstacle
mode                           toggle obstacle placement mode
click <row> <col>              click a cell (places obstacles in placement mode)
clear                          remove all obstacles
next | prev | level <n>        change level
reset                          restart the level and zero the scores
wait [ms]                      let time pass (empty line waits one step)
mute                           toggle sound cues
help | quit";

/// Reads `<row> <col>`; values outside `i32` are refused rather than wrapped
fn parse_cell<'a>(words: &mut impl Iterator<Item = &'a str>) -> Option<Position> {
    let row = words.next()?.parse().ok()?;
    let col = words.next()?.parse().ok()?;
    Some(Position::new(row, col))
}

fn parse_input(line: &str, step_ms: u64) -> Option<Input> {
    if line.trim().is_empty() {
        return Some(if line.contains(' ') {
            Input::Command(Command::SpawnMouse)
        } else {
            Input::Wait(step_ms)
        });
    }

    let mut words = line.split_whitespace();
    let head = words.next()?.to_lowercase();

    if let Some(direction) = Direction::from_name(&head) {
        return Some(Input::Command(Command::MoveCat(direction)));
    }

    let input = match head.as_str() {
        "spawn" => match words.next() {
            None => Input::Command(Command::SpawnMouse),
            Some(name) => {
                let kind = MouseType::from_name(name)?;
                Input::Command(Command::SpawnMouseAt(parse_cell(&mut words)?, kind))
            }
        },
        "obstacle" | "o" => Input::Command(Command::ToggleObstacle(parse_cell(&mut words)?)),
        "click" | "c" => Input::Command(Command::SelectCell(parse_cell(&mut words)?)),
        "mode" => Input::Command(Command::ToggleObstacleMode),
        "clear" => Input::Command(Command::ClearObstacles),
        "next" | "n" => Input::Command(Command::NextLevel),
        "prev" | "p" => Input::Command(Command::PreviousLevel),
        "level" => Input::Command(Command::LoadLevel(words.next()?.parse().ok()?)),
        "reset" | "r" => Input::Command(Command::ResetGame),
        "wait" => Input::Wait(words.next().map_or(Some(step_ms), |ms| ms.parse().ok())?),
        "mute" | "m" => Input::ToggleMute,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        _ => return None,
    };
    Some(input)
}

fn render(state: &GameState, out: &mut impl Write) -> io::Result<()> {
    let level = state.level();
    writeln!(out)?;
    writeln!(
        out,
        "Level {} - {}   Cat {}   Mice {}   Caught {}/{}   Mice on board {}/{}{}",
        level.id,
        level.name,
        state.cat_score(),
        state.mice_score(),
        state.total_mice_caught(),
        level.mice_to_win,
        state.mice().len(),
        level.max_mice,
        if state.placing_obstacles() {
            "   [placing obstacles]"
        } else {
            ""
        }
    )?;
    for row in state.grid().iter() {
        let line: Vec<&str> = row.iter().map(|cell| cell.glyph()).collect();
        writeln!(out, "  {}", line.join(" "))?;
    }
    for message in state.log().iter().take(3) {
        writeln!(out, "  > {}", message)?;
    }
    if state.level_complete() && !level.is_last() {
        writeln!(out, "  Level complete! Type `next` to continue.")?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
    log::info!("Catching Mice starting...");

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(level) = cli.level {
        settings.starting_level = level;
    }
    settings.validate()?;

    if let Some(path) = &cli.write_config {
        settings.save(path)?;
        return Ok(());
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    let mut sim = Simulation::new(seed, &settings).context("starting simulation")?;
    let mut audio = AudioManager::new(settings.mute);
    let step = settings.step_ms;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Catching Mice (seed {seed}). Type `help` for commands.")?;
    render(sim.state(), &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let Some(input) = parse_input(&line, step) else {
            writeln!(out, "Unknown command `{}` (try `help`)", line.trim())?;
            continue;
        };

        match input {
            Input::Quit => break,
            Input::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Input::ToggleMute => {
                audio.set_muted(!audio.is_muted());
                let state = if audio.is_muted() { "off" } else { "on" };
                writeln!(out, "Sound cues {state}")?;
                continue;
            }
            Input::Wait(ms) => sim.advance(Duration::from_millis(ms)),
            Input::Command(command) => {
                if let Err(rejection) = sim.apply(command) {
                    log::debug!("{:?} rejected: {}", command, rejection);
                }
                sim.advance(Duration::from_millis(step));
            }
        }

        let events = sim.drain_events();
        for cue in audio.cues(&events) {
            log::debug!("Sound cue {:?} ({} ms)", cue, cue.length_ms());
        }

        if cli.json {
            writeln!(out, "{}", serde_json::to_string(&sim.state().snapshot())?)?;
        } else {
            render(sim.state(), &mut out)?;
        }
    }

    let state = sim.state();
    writeln!(
        out,
        "Final score - Cat {} : Mice {} (level {})",
        state.cat_score(),
        state.mice_score(),
        state.level().id
    )?;
    Ok(())
}
