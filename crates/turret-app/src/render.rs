//! Rendering layer: all terminal drawing lives here.
//!
//! Each function receives a writer and an immutable snapshot. No game logic
//! is performed; this module only translates state into terminal commands.
//!
//! Screen layout, top to bottom: two HUD rows, the bordered playfield, one
//! row of key hints. One character cell covers `CELL_WIDTH` x `CELL_HEIGHT`
//! playfield units.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use turret_core::enums::{EnemyKind, GameStatus, PowerUpKind};
use turret_core::state::GameStateSnapshot;
use turret_core::types::{Position, Size};

pub const CELL_WIDTH: f64 = 10.0;
pub const CELL_HEIGHT: f64 = 20.0;

const HUD_ROWS: u16 = 2;
/// First interior row of the playfield (below HUD and top border).
const PLAY_TOP: u16 = HUD_ROWS + 1;
const PLAY_LEFT: u16 = 1;

// ── Colour palette ──

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::Yellow;
const C_HEALTH: Color = Color::Red;
const C_PLAYER: Color = Color::White;
const C_PLAYER_SHIELDED: Color = Color::Cyan;
const C_PLAYER_CHARGING: Color = Color::Yellow;
const C_PROJECTILE: Color = Color::Cyan;
const C_PROJECTILE_SPECIAL: Color = Color::Magenta;
const C_POWER_UP: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// A rectangle of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

/// Terminal geometry and the mapping from playfield units to cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cols: u16,
    pub rows: u16,
}

impl Layout {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Interior playfield size in cells.
    pub fn playfield_cells(&self) -> (u16, u16) {
        (
            self.cols.saturating_sub(2),
            self.rows.saturating_sub(HUD_ROWS + 3),
        )
    }

    /// Interior playfield size in playfield units, as reported to the engine.
    pub fn playfield_units(&self) -> Size {
        let (cols, rows) = self.playfield_cells();
        Size::new(cols as f64 * CELL_WIDTH, rows as f64 * CELL_HEIGHT)
    }

    /// Cells covered by a bounding box, clipped to the playfield. `None` if
    /// nothing of it is visible.
    pub fn cell_rect(&self, position: Position, size: Size) -> Option<CellRect> {
        let (cols, rows) = self.playfield_cells();
        let left = (position.x / CELL_WIDTH).floor().max(0.0);
        let top = (position.y / CELL_HEIGHT).floor().max(0.0);
        let right = ((position.x + size.width) / CELL_WIDTH)
            .ceil()
            .min(cols as f64);
        let bottom = ((position.y + size.height) / CELL_HEIGHT)
            .ceil()
            .min(rows as f64);
        if right <= left || bottom <= top {
            return None;
        }
        Some(CellRect {
            col: PLAY_LEFT + left as u16,
            row: PLAY_TOP + top as u16,
            width: (right - left) as u16,
            height: (bottom - top) as u16,
        })
    }

    fn bottom_border_row(&self) -> u16 {
        PLAY_TOP + self.playfield_cells().1
    }
}

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snapshot: &GameStateSnapshot,
    layout: Layout,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if snapshot.status == GameStatus::Menu {
        draw_menu(out, layout)?;
    } else {
        draw_border(out, layout)?;
        draw_hud(out, snapshot)?;
        draw_entities(out, snapshot, layout)?;
        draw_player(out, snapshot, layout)?;
        draw_hint(out, layout)?;

        match snapshot.status {
            GameStatus::Paused => draw_banner(
                out,
                layout,
                Color::Yellow,
                &["PAUSED".to_string(), "P: resume   M: menu".to_string()],
            )?,
            GameStatus::GameOver => draw_banner(
                out,
                layout,
                Color::Red,
                &[
                    "GAME OVER".to_string(),
                    format!("Score {}   Stage {}", snapshot.score, snapshot.stage),
                    format!(
                        "Shots {}   Kills {}   Best combo x{}",
                        snapshot.stats.shots_fired,
                        snapshot.stats.enemies_destroyed,
                        snapshot.stats.max_combo
                    ),
                    "Enter: play again   M: menu   Q: quit".to_string(),
                ],
            )?,
            _ => {}
        }
    }

    // Park the cursor and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, layout.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Menu ──

fn draw_menu<W: Write>(out: &mut W, layout: Layout) -> std::io::Result<()> {
    let lines: &[(&str, Color)] = &[
        ("TURRET DEFENSE", Color::Cyan),
        ("", Color::White),
        ("← → / A D : move      SPACE : fire", Color::White),
        ("C : charge (press again to release)", Color::White),
        ("X : special shot      S : shield", Color::White),
        ("1-4 : standard / laser / plasma / explosive", Color::White),
        ("P : pause             M : menu", Color::White),
        ("", Color::White),
        ("Power-ups:  R rapid fire   O shield   M multi-shot   * bomb", Color::Green),
        ("", Color::White),
        ("ENTER : start         Q : quit", Color::Yellow),
    ];
    let cy = (layout.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(centered(layout, text), cy + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*text))?;
    }
    Ok(())
}

// ── Border ──

fn draw_border<W: Write>(out: &mut W, layout: Layout) -> std::io::Result<()> {
    let inner = layout.playfield_cells().0 as usize;
    let bottom = layout.bottom_border_row();

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, HUD_ROWS))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(inner))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(inner))))?;

    for row in PLAY_TOP..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(layout.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD ──

fn draw_hud<W: Write>(out: &mut W, snapshot: &GameStateSnapshot) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(hud_status_line(snapshot)))?;
    out.queue(style::SetForegroundColor(C_HEALTH))?;
    out.queue(Print(format!("  {}", "♥".repeat(snapshot.health as usize))))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(hud_ability_line(snapshot)))?;
    Ok(())
}

/// Score, stage, stage clock and combo.
pub fn hud_status_line(snapshot: &GameStateSnapshot) -> String {
    format!(
        "Score {:>6}  Stage {}  Time {}  Combo x{}",
        snapshot.score,
        snapshot.stage,
        format_clock(snapshot.stage_remaining_ms),
        snapshot.combo
    )
}

/// Ammo, abilities and active power-ups.
pub fn hud_ability_line(snapshot: &GameStateSnapshot) -> String {
    let abilities = &snapshot.abilities;
    let mut parts = vec![
        format!("Ammo {:?}", snapshot.player.bullet_kind),
        format!(
            "Special {:.0}/{:.0}",
            abilities.special_charge, abilities.special_charge_max
        ),
    ];

    parts.push(if abilities.shield_ability_remaining_ms > 0.0 {
        format!("Shield {:.1}s", abilities.shield_ability_remaining_ms / 1000.0)
    } else if abilities.shield_ability_cooldown_ms > 0.0 {
        format!("Shield cd {:.1}s", abilities.shield_ability_cooldown_ms / 1000.0)
    } else {
        "Shield ready".to_string()
    });

    if snapshot.player.charging {
        parts.push(format!("Charge {}", snapshot.player.charge_level));
    }
    for active in &snapshot.active_power_ups {
        parts.push(format!(
            "[{} {:.1}s]",
            power_up_label(active.kind),
            active.remaining_ms / 1000.0
        ));
    }
    parts.join("  ")
}

/// `m:ss`, rounding partial seconds up.
pub fn format_clock(remaining_ms: f64) -> String {
    let secs = (remaining_ms.max(0.0) / 1000.0).ceil() as u64;
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn power_up_label(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::RapidFire => "Rapid",
        PowerUpKind::Shield => "Shield",
        PowerUpKind::MultiShot => "Multi",
        PowerUpKind::Bomb => "Bomb",
    }
}

// ── Entities ──

fn enemy_glyph(kind: EnemyKind) -> (char, Color) {
    match kind {
        EnemyKind::Basic => ('v', Color::Green),
        EnemyKind::Fast => ('w', Color::Yellow),
        EnemyKind::Armored => ('A', Color::Magenta),
        EnemyKind::Boss => ('B', Color::Red),
        EnemyKind::Special => ('S', Color::Cyan),
    }
}

fn power_up_glyph(kind: PowerUpKind) -> char {
    match kind {
        PowerUpKind::RapidFire => 'R',
        PowerUpKind::Shield => 'O',
        PowerUpKind::MultiShot => 'M',
        PowerUpKind::Bomb => '*',
    }
}

fn draw_entities<W: Write>(
    out: &mut W,
    snapshot: &GameStateSnapshot,
    layout: Layout,
) -> std::io::Result<()> {
    for enemy in &snapshot.enemies {
        let (glyph, color) = enemy_glyph(enemy.kind);
        if let Some(rect) = layout.cell_rect(enemy.position, enemy.size) {
            fill_rect(out, rect, glyph, color)?;
        }
    }
    for power_up in &snapshot.power_ups {
        if let Some(rect) = layout.cell_rect(power_up.position, power_up.size) {
            fill_rect(out, rect, power_up_glyph(power_up.kind), C_POWER_UP)?;
        }
    }
    for projectile in &snapshot.projectiles {
        let (glyph, color) = if projectile.special {
            ('#', C_PROJECTILE_SPECIAL)
        } else if projectile.charged {
            ('!', C_PLAYER_CHARGING)
        } else {
            ('|', C_PROJECTILE)
        };
        if let Some(rect) = layout.cell_rect(projectile.position, projectile.size) {
            fill_rect(out, rect, glyph, color)?;
        }
    }
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    snapshot: &GameStateSnapshot,
    layout: Layout,
) -> std::io::Result<()> {
    let player = &snapshot.player;
    let color = if player.shield_active {
        C_PLAYER_SHIELDED
    } else if player.charging {
        C_PLAYER_CHARGING
    } else {
        C_PLAYER
    };
    if let Some(rect) = layout.cell_rect(player.position, player.size) {
        fill_rect(out, rect, '^', color)?;
    }
    Ok(())
}

fn fill_rect<W: Write>(out: &mut W, rect: CellRect, glyph: char, color: Color) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    let line: String = std::iter::repeat(glyph).take(rect.width as usize).collect();
    for row in rect.row..rect.row + rect.height {
        out.queue(cursor::MoveTo(rect.col, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── Overlays ──

fn draw_hint<W: Write>(out: &mut W, layout: Layout) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, layout.bottom_border_row() + 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "←→ move  SPACE fire  C charge  X special  S shield  1-4 ammo  P pause  Q quit",
    ))?;
    Ok(())
}

fn draw_banner<W: Write>(
    out: &mut W,
    layout: Layout,
    color: Color,
    lines: &[String],
) -> std::io::Result<()> {
    let cy = (layout.rows / 2).saturating_sub(lines.len() as u16 / 2);
    out.queue(style::SetForegroundColor(color))?;
    for (i, text) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(centered(layout, text), cy + i as u16))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

fn centered(layout: Layout, text: &str) -> u16 {
    (layout.cols / 2).saturating_sub(text.chars().count() as u16 / 2)
}
