//! Application state shared between the terminal front-end and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Context};
use tracing::info;

use turret_core::commands::PlayerCommand;
use turret_core::state::GameStateSnapshot;
use turret_sim::SimConfig;

use crate::game_loop;

/// Commands sent from the front-end to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` sits behind a `Mutex` because it is Send but not Sync
/// - `Mutex<Option<...>>` covers state that does not exist before `start`
/// - the latest snapshot is an `Arc<Mutex<...>>` shared with the game loop thread
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` before `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the game loop thread has been started and not shut down.
    pub fn is_running(&self) -> bool {
        self.command_tx
            .lock()
            .map(|tx| tx.is_some())
            .unwrap_or(false)
    }

    /// Spawn the game loop thread. Fails if it is already running.
    pub fn start(&self, config: SimConfig) -> anyhow::Result<()> {
        let mut tx_lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!("command channel poisoned: {e}"))?;
        if tx_lock.is_some() {
            bail!("simulation already running");
        }

        let (cmd_tx, handle) = game_loop::spawn_game_loop(config, self.latest_snapshot.clone())?;
        *tx_lock = Some(cmd_tx);
        if let Ok(mut h) = self.loop_handle.lock() {
            *h = Some(handle);
        }
        info!("game loop started");
        Ok(())
    }

    /// Forward a player command to the simulation.
    pub fn send(&self, command: PlayerCommand) -> anyhow::Result<()> {
        let tx_lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!("command channel poisoned: {e}"))?;
        let tx = tx_lock.as_ref().context("simulation not started")?;
        tx.send(GameLoopCommand::PlayerCommand(command))
            .map_err(|e| anyhow!("failed to send command: {e}"))
    }

    /// Latest snapshot, if the loop has ticked at least once.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    /// Stop the game loop thread and wait for it to exit.
    pub fn shutdown(&self) {
        if let Ok(mut tx_lock) = self.command_tx.lock() {
            if let Some(tx) = tx_lock.take() {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
        let handle = self.loop_handle.lock().ok().and_then(|mut h| h.take());
        if let Some(handle) = handle {
            let _ = handle.join();
            info!("game loop stopped");
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!state.is_running());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        let err = state.send(PlayerCommand::StartSession).unwrap_err();
        assert!(err.to_string().contains("not started"));
    }

    #[test]
    fn test_start_twice_fails() {
        let state = AppState::new();
        state.start(SimConfig::default()).unwrap();
        assert!(state.is_running());
        assert!(state.start(SimConfig::default()).is_err());
        state.shutdown();
        assert!(!state.is_running());
    }
}
