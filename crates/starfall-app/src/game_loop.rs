//! Game loop — paces the virtual scheduler against wall time and pumps
//! terminal events into the pipeline.

use std::io::Write;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal;
use log::info;

use starfall_core::commands::InputCommand;
use starfall_core::enums::TriggerSource;
use starfall_core::types::Bounds;
use starfall_sim::pipeline::{GameConfig, GamePipeline};

use crate::render;

/// Canvas units per terminal cell; keeps the simulation in its pixel-like
/// coordinate space on any terminal size.
pub(crate) const CELL_SCALE: f64 = 10.0;

/// If the loop falls this far behind the virtual clock (suspension,
/// stopped process), slew the origin instead of replaying a burst of
/// stale ticks.
const MAX_LAG: Duration = Duration::from_millis(500);

pub fn run<W: Write>(out: &mut W, events: &Receiver<Event>) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let bounds = Bounds::new(cols as f64 * CELL_SCALE, rows as f64 * CELL_SCALE);
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(42);

    let mut pipeline = GamePipeline::new(GameConfig {
        bounds,
        seed,
        ..Default::default()
    });
    let mut origin = Instant::now();

    loop {
        // 1. Drain pending terminal events into pipeline inputs.
        loop {
            match events.try_recv() {
                Ok(event) => {
                    if handle_event(event, &mut pipeline) {
                        info!("quit requested");
                        return Ok(());
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(()),
            }
        }

        // 2. Sleep until the next virtual deadline.
        let Some(deadline_ms) = pipeline.next_deadline_ms() else {
            break;
        };
        let target = origin + Duration::from_millis(deadline_ms);
        let now = Instant::now();
        if target > now {
            std::thread::sleep(target - now);
        } else if now - target > MAX_LAG {
            origin += now - target;
        }

        // 3. Dispatch; render when a frame comes out.
        if let Some(frame) = pipeline.advance() {
            for event in &frame.events {
                info!("{event:?}");
            }
            render::draw(out, &frame, cols, rows)?;
        }
    }

    // The pipeline stopped emitting frames: the game is over.
    let score = pipeline.score().value;
    info!("game over screen, score {score}");
    render::draw_game_over(out, score)?;

    // Wait for a key before handing the terminal back.
    while let Ok(event) = events.recv() {
        if matches!(
            event,
            Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            })
        ) {
            break;
        }
    }
    Ok(())
}

/// Map one terminal event to pipeline input. Returns true on quit.
fn handle_event(event: Event, pipeline: &mut GamePipeline) -> bool {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            // The two designated fire keys.
            KeyCode::Char(' ') | KeyCode::Enter => {
                pipeline.queue_input(InputCommand::FireTriggered {
                    source: TriggerSource::Key,
                });
            }
            _ => {}
        },
        Event::Mouse(MouseEvent { kind, column, .. }) => match kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                pipeline.queue_input(InputCommand::PointerMoved {
                    x: column as f64 * CELL_SCALE,
                });
            }
            MouseEventKind::Down(MouseButton::Left) => {
                pipeline.queue_input(InputCommand::FireTriggered {
                    source: TriggerSource::Pointer,
                });
            }
            _ => {}
        },
        _ => {}
    }
    false
}
