//! Keyboard mapping: terminal key events to player commands.
//!
//! Mapping reads the latest snapshot so context-dependent keys (Enter, the
//! charge toggle, relative moves) resolve against what is on screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use turret_core::commands::PlayerCommand;
use turret_core::enums::{BulletKind, GameStatus};
use turret_core::state::GameStateSnapshot;

/// Horizontal distance covered by one arrow key press, in playfield units.
pub const MOVE_STEP: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    Command(PlayerCommand),
    Quit,
}

/// Map one key event. Returns `None` for keys with no meaning in the
/// current status.
pub fn map_key(key: KeyEvent, snapshot: &GameStateSnapshot) -> Option<InputAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(InputAction::Quit)
        }
        KeyCode::Esc => return Some(InputAction::Quit),
        KeyCode::Char(c) if c.eq_ignore_ascii_case(&'q') => return Some(InputAction::Quit),
        _ => {}
    }

    let command = match snapshot.status {
        GameStatus::Menu => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(start()),
            _ => None,
        },
        GameStatus::GameOver => match key.code {
            KeyCode::Enter => Some(start()),
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'m') => Some(to_menu()),
            _ => None,
        },
        GameStatus::Paused => match key.code {
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'p') => Some(PlayerCommand::PauseToggle),
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'m') => Some(to_menu()),
            _ => None,
        },
        GameStatus::Playing => map_playing(key.code, snapshot),
    };
    command.map(InputAction::Command)
}

fn map_playing(code: KeyCode, snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
    let x = snapshot.player.position.x;
    let command = match code {
        KeyCode::Left => move_to(x - MOVE_STEP),
        KeyCode::Right => move_to(x + MOVE_STEP),
        KeyCode::Char(' ') => PlayerCommand::Fire {
            special: false,
            charge_level: 0,
        },
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => move_to(x - MOVE_STEP),
            'd' => move_to(x + MOVE_STEP),
            // Most terminals never report key releases, so charge is a toggle.
            'c' if snapshot.player.charging => PlayerCommand::EndCharge,
            'c' => PlayerCommand::BeginCharge,
            'x' => PlayerCommand::ActivateSpecialAbility,
            's' => PlayerCommand::ActivateShieldAbility,
            'p' => PlayerCommand::PauseToggle,
            'm' => to_menu(),
            '1'..='4' => {
                let index = c as usize - '1' as usize;
                PlayerCommand::SetBulletType {
                    kind: BulletKind::ALL[index],
                }
            }
            _ => return None,
        },
        _ => return None,
    };
    Some(command)
}

fn start() -> PlayerCommand {
    PlayerCommand::SetStatus {
        status: GameStatus::Playing,
    }
}

fn to_menu() -> PlayerCommand {
    PlayerCommand::SetStatus {
        status: GameStatus::Menu,
    }
}

fn move_to(target_x: f64) -> PlayerCommand {
    PlayerCommand::MovePlayer { target_x }
}
