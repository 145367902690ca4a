//! Aberred sprite animation demo.
//!
//! Runs the two-witch battle scene headless and logs every frame change.
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing) and the animation library
//! 2. Build the ECS world, spawn both witches and start their animations
//! 3. Each frame: advance world time, fire due animation ticks, trigger
//!    frame events (which update the sprites)
//! 4. Optionally pause and resume every animator at given times
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --fast --duration-ms 3000
//! ```

use std::path::PathBuf;
use std::time::{Duration, Instant};

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use aberredsprite::animation::library::{LibraryDef, witch_library};
use aberredsprite::animation::timer::TickDelay;
use aberredsprite::components::sprite::Sprite;
use aberredsprite::events::framechange::FrameChangedEvent;
use aberredsprite::game::{self, FramePump, Side};
use aberredsprite::resources::settings::SchedulerSettings;
use aberredsprite::resources::worldtime::WorldTime;

/// Aberred sprite animation demo
#[derive(Parser)]
#[command(version, about = "Plays the witch battle animations headless and logs every frame.")]
struct Cli {
    /// Settings file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Animation library, overriding the settings file.
    #[arg(long, value_name = "PATH")]
    library: Option<PathBuf>,

    /// Inter-frame delay in milliseconds, overriding the settings file.
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Simulated run time in milliseconds, overriding the settings file.
    #[arg(long, value_name = "MS")]
    duration_ms: Option<u64>,

    /// Pause every animation at this simulated time.
    #[arg(long, value_name = "MS")]
    pause_at: Option<u64>,

    /// Resume every animation at this simulated time.
    #[arg(long, value_name = "MS")]
    resume_at: Option<u64>,

    /// Simulate as fast as possible instead of following the wall clock.
    #[arg(long)]
    fast: bool,

    /// Print the segment names of the library and exit.
    #[arg(long)]
    list: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut settings = SchedulerSettings::with_path(&cli.config);
    if let Err(e) = settings.load_from_file() {
        warn!("{e}; using default settings");
    }
    let library_from_cli = cli.library.is_some();
    if let Some(path) = cli.library {
        settings.library_path = path;
    }
    if let Some(ms) = cli.delay_ms {
        match TickDelay::from_millis(ms) {
            Ok(delay) => settings.delay = delay,
            Err(e) => {
                eprintln!("Error: --delay-ms: {e}");
                std::process::exit(2);
            }
        }
    }
    if let Some(ms) = cli.duration_ms {
        settings.duration_ms = ms;
    }

    let loaded = LibraryDef::load_from_file(&settings.library_path).and_then(|def| def.build());
    let table = match loaded {
        Ok(table) => table,
        Err(e) if library_from_cli => {
            eprintln!("Error loading {}: {e}", settings.library_path.display());
            std::process::exit(1);
        }
        Err(e) => {
            warn!(
                "{}: {e}; using the built-in witch library",
                settings.library_path.display()
            );
            match witch_library() {
                Ok(table) => table,
                Err(e) => {
                    eprintln!("Error: built-in library: {e}");
                    std::process::exit(1);
                }
            }
        }
    };
    info!("Loaded {} animation segments", table.len());

    if cli.list {
        for name in table.names() {
            println!("{name}");
        }
        return;
    }

    let duration_ms = settings.duration_ms;
    let frame_ms = settings.frame_interval_ms();
    let mut world = game::build_world(settings, table);
    world.spawn(Observer::new(log_frame_change));
    world.flush();

    let mut pump = FramePump::new();
    let (left, right) = game::spawn_battle(&mut world);
    pump.flush(&mut world);

    let started = Instant::now();
    let mut paused = false;
    let mut resumed = false;
    loop {
        let now = world.resource::<WorldTime>().elapsed_ms;
        if now >= duration_ms {
            break;
        }
        if !paused && cli.pause_at.is_some_and(|at| now >= at) {
            info!("Pausing at {now}ms");
            game::pause_all(&mut world);
            paused = true;
        }
        if paused && !resumed && cli.resume_at.is_some_and(|at| now >= at) {
            info!("Resuming at {now}ms");
            game::resume_all(&mut world);
            resumed = true;
        }

        pump.step(&mut world, frame_ms);

        if !cli.fast {
            let target = started + Duration::from_millis(now + frame_ms);
            if let Some(wait) = target.checked_duration_since(Instant::now()) {
                std::thread::sleep(wait);
            }
        }
    }

    for entity in [left, right] {
        match world.get::<Sprite>(entity) {
            Some(sprite) => info!("{entity:?} ends on {}", sprite.frame_key),
            None => error!("{entity:?} lost its sprite"),
        }
    }
}

fn log_frame_change(trigger: On<FrameChangedEvent>, sides: Query<&Side>) {
    let event = trigger.event();
    let side = sides.get(event.entity).copied();
    info!(
        "{:?} frame {}/{} -> {}",
        side,
        event.index,
        event.frames.len(),
        event.frame
    );
}
