//! Game loop thread: drives the simulation engine with measured frame deltas.
//!
//! The engine is created inside this thread so the thread owns it outright.
//! Commands arrive via an `mpsc` channel. Each snapshot is stored in shared
//! state for the renderer to poll.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::debug;

use turret_core::state::GameStateSnapshot;
use turret_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Target frame length (~60 Hz).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Longest delta fed to the engine in one frame. A stalled or suspended
/// process resumes with one capped frame instead of a leap.
pub const MAX_FRAME_DELTA_MS: f64 = 250.0;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("turret-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// Clamp a measured wall-clock delta to what the engine should see.
pub fn frame_delta_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0).min(MAX_FRAME_DELTA_MS)
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(config);
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance by the measured frame time (the engine ignores it unless playing)
        let now = Instant::now();
        let delta_ms = frame_delta_ms(now - last_frame);
        last_frame = now;
        let snapshot = engine.tick(delta_ms);

        for event in &snapshot.events {
            debug!(?event, "game event");
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turret_core::commands::PlayerCommand;
    use turret_core::enums::GameStatus;

    fn wait_for<F>(latest: &Mutex<Option<GameStateSnapshot>>, pred: F) -> bool
    where
        F: Fn(&GameStateSnapshot) -> bool,
    {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if let Some(snap) = latest.lock().unwrap().as_ref() {
                if pred(snap) {
                    return true;
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::PauseToggle))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::StartSession)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::PauseToggle)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_frame_delta_is_capped() {
        assert_eq!(frame_delta_ms(Duration::from_millis(125)), 125.0);
        assert_eq!(frame_delta_ms(Duration::from_secs(5)), MAX_FRAME_DELTA_MS);
    }

    #[test]
    fn test_loop_starts_session_and_shuts_down() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest.clone()).unwrap();

        assert!(wait_for(&latest, |s| s.status == GameStatus::Menu));
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::StartSession))
            .unwrap();
        assert!(wait_for(&latest, |s| {
            s.status == GameStatus::Playing && s.time.elapsed_ms > 0.0
        }));

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_loop_exits_on_disconnect() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), latest).unwrap();
        drop(tx);
        handle.join().unwrap();
    }
}
