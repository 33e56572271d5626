//! Terminal front-end for Starfall.
//!
//! Thin I/O shell: raw-mode alternate-screen setup, a blocking input
//! thread, wall-clock pacing of the virtual scheduler, and a cell
//! renderer. All game logic lives in starfall-sim.

mod game_loop;
mod render;

use std::io::{stdout, BufWriter};
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::{cursor, terminal, ExecutableCommand};
use log::info;

use starfall_sim::pipeline::{GameConfig, GamePipeline};

fn main() -> std::io::Result<()> {
    // The TUI owns the terminal, so logs go to a file.
    let _ = simple_logging::log_to_file("starfall.log", log::LevelFilter::Info);
    info!("starting starfall");

    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("--headless") {
        let frames = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(500);
        return run_headless(frames);
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Dedicate a thread to blocking event reads so the game loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped, program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop::run(&mut out, &rx);

    // Always restore the terminal.
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

/// Run the pipeline without a terminal for up to `frames` frames and
/// print the final snapshot as JSON.
fn run_headless(frames: u64) -> std::io::Result<()> {
    let mut pipeline = GamePipeline::new(GameConfig::default());

    let mut last = None;
    for _ in 0..frames {
        match pipeline.next_frame() {
            Some(frame) => last = Some(frame),
            None => break,
        }
    }
    info!(
        "headless run finished at {}ms with score {}",
        pipeline.now_ms(),
        pipeline.score().value
    );

    if let Some(frame) = last {
        let json = serde_json::to_string_pretty(&frame)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        println!("{json}");
    }
    Ok(())
}
