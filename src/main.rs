/// Entry point and frame loop.

mod config;
mod domain;
mod logging;
mod sim;
mod ui;

use std::process::ExitCode;
use std::time::Instant;

use tracing::{debug, error, info};

use config::GameConfig;
use sim::event::GameEvent;
use sim::level;
use sim::pacing::FramePacer;
use sim::simulation::Simulation;
use ui::gamepad::GamepadState;
use ui::input::InputState;
use ui::renderer::Renderer;

fn main() -> ExitCode {
    match logging::init() {
        Ok(Some(path)) => info!(path = %path, "logging enabled"),
        Ok(None) => {}
        Err(e) => eprintln!("Logging disabled: {e}"),
    }

    let config = match GameConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "config rejected");
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let loaded = match &config.level {
        Some(rows) => Simulation::from_level(rows),
        None => Simulation::from_level(&level::DEFAULT_LEVEL),
    };
    let mut sim = match loaded {
        Ok(sim) => sim,
        Err(e) => {
            error!(error = %e, "level rejected");
            eprintln!("Level error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let (w, h) = (sim.grid().width(), sim.grid().height());
    info!(width = w, height = h, fps = config.speed.fps, "level loaded");

    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return ExitCode::FAILURE;
    }

    let result = game_loop(&mut sim, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(()) => {
            info!(ticks = sim.ticks(), "quit");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "game loop failed");
            eprintln!("Game error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn game_loop(
    sim: &mut Simulation,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut gp = GamepadState::new();
    gp.load_button_config(&config.gamepad);
    if gp.connected {
        info!("gamepad detected");
    }
    let pacer = FramePacer::from_fps(config.speed.fps);
    let tile_size = config.render.tile_size;
    debug!(frame_ms = pacer.budget().as_millis() as u64, tile_size, "frame loop starting");

    loop {
        let frame_start = Instant::now();

        let keys = kb.drain_events(sim.inputs_mut())?;
        gp.update(sim.inputs_mut());

        if keys.quit || gp.quit_pressed() {
            break;
        }
        if keys.restart || gp.restart_pressed() {
            info!(ticks = sim.ticks(), "restart");
            sim.restart();
        }

        let pending = sim.inputs_mut();
        if !pending.is_empty() {
            debug!(queued = pending.len(), "draining inputs");
        }

        let events = sim.tick();
        log_events(sim.ticks(), &events);

        renderer.render(sim, tile_size)?;
        std::thread::sleep(pacer.sleep_after(frame_start.elapsed()));
    }

    Ok(())
}

fn log_events(tick: u64, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::LocksOpened { lock, count } => {
                info!(tick, ?lock, count, "locks opened");
            }
            other => debug!(tick, event = ?other, "tick event"),
        }
    }
}
