use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use video_overlay::controls::ControlEvent;
use video_overlay::fullscreen::SimulatedFullscreen;
use video_overlay::media::SimulatedMedia;
use video_overlay::player::PlaybackController;
use video_overlay::storage::FileStore;
use video_overlay::utils;

/// Playback overlay driven from the terminal against a simulated video
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Length of the simulated video in seconds
    #[arg(short = 'l', long, value_name = "SECONDS", default_value = "120")]
    duration: f64,

    /// File the playback position is saved in
    #[arg(short, long, value_name = "FILE")]
    storage: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start playing once the controls are ready
    #[arg(short, long)]
    play: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

/// How often simulated playback advances
const TICK: Duration = Duration::from_millis(250);

const HELP: &str = "commands: play | pause | toggle | fwd | back | click X W | hover W | unhover \
| vol V | mute | mute-hover | mute-leave | fs | esc | move | leave | status | quit";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = utils::load_config(args.config.as_deref())?;

    let log_level = if args.debug { "debug" } else { config.general.log_level.as_str() };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting video-overlay v{}", env!("CARGO_PKG_VERSION"));

    if !args.duration.is_finite() || args.duration <= 0.0 {
        anyhow::bail!("Duration must be a positive number of seconds");
    }

    let storage_path = args
        .storage
        .clone()
        .or_else(|| config.storage.path.clone())
        .unwrap_or_else(FileStore::default_path);
    let store = FileStore::open(&storage_path)
        .with_context(|| format!("Failed to open storage {:?}", storage_path))?;

    let media = Rc::new(RefCell::new(SimulatedMedia::new(args.duration)));
    let fullscreen = SimulatedFullscreen::new();

    let controller = PlaybackController::builder(media.clone())
        .with_app_config(&config)
        .with_storage(Box::new(store))
        .with_fullscreen_host(Box::new(fullscreen.clone()))
        .build()?;

    let mut session = Session {
        controller,
        media,
        fullscreen,
        last_line: String::new(),
    };

    session.media.borrow_mut().load_metadata();
    if args.play {
        session.controller.play();
    }
    session.pump();
    println!("{}", HELP);
    session.print(true);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK);

    loop {
        tokio::select! {
            _ = ticker.tick() => session.advance(TICK),
            line = lines.next_line() => match next_command(line) {
                Some(Ok(Command::Quit)) | None => break,
                Some(Ok(command)) => session.apply(command),
                Some(Err(message)) => eprintln!("{}", message),
            }
        }
    }

    session.controller.handle_control_event(ControlEvent::PageUnload);
    info!("Position saved to {:?}", storage_path);

    Ok(())
}

/// Terminal command
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Play,
    Pause,
    Control(ControlEvent),
    EscapeFullscreen,
    Status,
    Help,
    Quit,
}

/// Command from the next stdin line; None once input is closed or unreadable
fn next_command(line: std::io::Result<Option<String>>) -> Option<std::result::Result<Command, String>> {
    match line {
        Ok(Some(line)) => Some(parse_command(&line)),
        Ok(None) => None,
        Err(e) => {
            warn!("Failed to read stdin: {}", e);
            None
        }
    }
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(Command::Status);
    };

    let mut number = |what: &str| -> std::result::Result<f64, String> {
        words
            .next()
            .ok_or_else(|| format!("{}: missing {}", name, what))?
            .parse::<f64>()
            .map_err(|e| format!("{}: invalid {}: {}", name, what, e))
    };

    let command = match name {
        "play" => Command::Play,
        "pause" => Command::Pause,
        "toggle" => Command::Control(ControlEvent::PlayPauseClick),
        "fwd" => Command::Control(ControlEvent::ForwardClick),
        "back" => Command::Control(ControlEvent::RewindClick),
        "click" => {
            let offset_x = number("offset")?;
            let track_width = number("track width")?;
            Command::Control(ControlEvent::ProgressClick { offset_x, track_width })
        }
        "hover" => Command::Control(ControlEvent::ProgressHover { track_width: number("track width")? }),
        "unhover" => Command::Control(ControlEvent::ProgressLeave),
        "vol" => Command::Control(ControlEvent::VolumeInput { value: number("volume")? }),
        "mute" => Command::Control(ControlEvent::MuteClick),
        "mute-hover" => Command::Control(ControlEvent::MuteButtonEnter),
        "mute-leave" => Command::Control(ControlEvent::MuteButtonLeave),
        "fs" => Command::Control(ControlEvent::FullscreenClick),
        "esc" => Command::EscapeFullscreen,
        "move" => Command::Control(ControlEvent::ContainerPointerMove),
        "leave" => Command::Control(ControlEvent::ContainerPointerLeave),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{}'; {}", other, HELP)),
    };

    Ok(command)
}

/// Controller plus the simulated host it runs in
struct Session {
    controller: PlaybackController,
    media: Rc<RefCell<SimulatedMedia>>,
    fullscreen: SimulatedFullscreen,
    last_line: String,
}

impl Session {
    fn apply(&mut self, command: Command) {
        match command {
            Command::Play => self.controller.play(),
            Command::Pause => self.controller.pause(),
            Command::Control(event) => self.controller.handle_control_event(event),
            Command::EscapeFullscreen => self.fullscreen.exit_externally(),
            Command::Help => println!("{}", HELP),
            Command::Status | Command::Quit => {}
        }

        self.pump();
        self.print(command == Command::Status);
    }

    fn advance(&mut self, by: Duration) {
        self.media.borrow_mut().advance(by.as_secs_f64());
        self.pump();
        self.controller.tick();
        self.print(false);
    }

    /// Deliver everything the host queued, the way the browser event loop would
    fn pump(&mut self) {
        loop {
            let events = self.media.borrow_mut().take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.controller.handle_media_event(event);
            }
        }

        let changes = self.fullscreen.take_changes();
        if changes > 0 && self.controller.fullscreen_change_event().is_none() {
            warn!("Fullscreen changed without a bound change notification");
        }
        for _ in 0..changes {
            self.controller.handle_control_event(ControlEvent::FullscreenChange);
        }
    }

    fn print(&mut self, force: bool) {
        let line = self.controller.surface().render_line();
        if force || line != self.last_line {
            println!("{}", line);
            self.last_line = line;
        }
    }
}
