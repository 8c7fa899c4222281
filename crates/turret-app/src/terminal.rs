//! Interactive terminal front-end.
//!
//! A dedicated thread does blocking key reads and forwards them over a
//! channel; the render loop polls the latest snapshot each frame and never
//! blocks on I/O. The game loop runs on its own thread behind `AppState`.

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event},
    terminal, ExecutableCommand,
};
use tracing::{info, warn};

use turret_core::commands::PlayerCommand;
use turret_sim::SimConfig;

use crate::input::{self, InputAction};
use crate::render::{self, Layout};
use crate::state::AppState;

const RENDER_FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// Run the interactive game until the player quits. The terminal is always
/// restored, even on error.
pub fn run(config: SimConfig) -> anyhow::Result<()> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    let result = run_session(&mut out, config);

    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run_session<W: Write>(out: &mut W, config: SimConfig) -> anyhow::Result<()> {
    let app = AppState::new();
    app.start(config)?;

    let (tx, rx) = mpsc::channel::<Event>();
    thread::Builder::new()
        .name("turret-input".into())
        .spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break; // receiver dropped, program exiting
                }
            }
        })
        .context("failed to spawn input thread")?;

    let (cols, rows) = terminal::size()?;
    let mut layout = Layout::new(cols, rows);
    app.send(resize_command(layout))?;

    loop {
        let frame_start = Instant::now();
        let snapshot = app.latest().unwrap_or_default();

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => match input::map_key(key, &snapshot) {
                    Some(InputAction::Quit) => {
                        info!("quit requested");
                        app.shutdown();
                        return Ok(());
                    }
                    Some(InputAction::Command(command)) => app.send(command)?,
                    None => {}
                },
                Event::Resize(cols, rows) => {
                    layout = Layout::new(cols, rows);
                    app.send(resize_command(layout))?;
                }
                _ => {}
            }
        }

        if let Err(e) = render::render(out, &snapshot, layout) {
            warn!(error = %e, "render failed");
            return Err(e.into());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < RENDER_FRAME {
            thread::sleep(RENDER_FRAME - elapsed);
        }
    }
}

fn resize_command(layout: Layout) -> PlayerCommand {
    let size = layout.playfield_units();
    PlayerCommand::ResizePlayfield {
        width: size.width,
        height: size.height,
    }
}
