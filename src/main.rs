use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event, KeyCode},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::env;
use std::io::{BufWriter, stdout};
use std::time::{Duration, Instant};

mod banner;
mod canvas;
mod firework;
mod font;
mod particle;
mod sim;
mod trail;

use banner::Banner;
use canvas::Canvas;
use sim::Simulation;

// The reference display's pink backdrop.
const DEFAULT_BG: (u8, u8, u8) = (255, 191, 204);
const DEFAULT_MESSAGE: &str = "Happy New Year!";

const TICK: f32 = 0.01;

fn print_usage() {
    eprintln!("skyburst - Fireworks display for the terminal");
    eprintln!();
    eprintln!("Usage: skyburst [OPTIONS] [MESSAGE]");
    eprintln!();
    eprintln!("  MESSAGE            Banner text drawn over the display");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --bg-color RRGGBB  Set background color as hex (e.g., --bg-color 1a1b26)");
    eprintln!();
    eprintln!("Press 'q', ESC, or Ctrl+C to exit");
}

fn run(message: String, bg: (u8, u8, u8)) -> std::io::Result<()> {
    let stdout = stdout();
    let mut stdout = BufWriter::with_capacity(1024 * 64, stdout);

    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))?;

    let (cols, rows) = terminal::size()?;
    let mut canvas = Canvas::new(cols as usize, rows as usize * 2, bg);
    let mut sim = Simulation::new();
    let banner = Banner::new(message);

    let start = Instant::now();
    let mut last_frame = Instant::now();
    let mut accumulator = 0.0f32;

    loop {
        if event::poll(Duration::from_millis(1))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.code == KeyCode::Char('q')
                        || key.code == KeyCode::Esc
                        || (key.code == KeyCode::Char('c')
                            && key.modifiers.contains(event::KeyModifiers::CONTROL))
                    {
                        break;
                    }
                }
                Event::Resize(cols, rows) => {
                    // The simulation runs in a fixed logical space; only the
                    // canvas depends on the cell grid.
                    canvas = Canvas::new(cols as usize, rows as usize * 2, bg);
                    execute!(stdout, Clear(ClearType::All))?;
                }
                _ => {}
            }
        }

        let now = Instant::now();
        let frame_time = now.duration_since(last_frame).as_secs_f32();
        last_frame = now;

        accumulator += frame_time;
        if accumulator > TICK * 3.0 {
            accumulator = TICK * 3.0;
        }

        let mut stepped = false;
        while accumulator >= TICK {
            canvas.clear();
            banner.draw(&mut canvas, start.elapsed().as_secs_f32());
            sim.tick(&mut canvas);
            accumulator -= TICK;
            stepped = true;
        }

        if stepped {
            canvas.present(&mut stdout)?;
        }
    }

    execute!(stdout, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    Ok(())
}

fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut message = String::from(DEFAULT_MESSAGE);
    let mut bg = DEFAULT_BG;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bg-color" => {
                if i + 1 < args.len() {
                    if let Some(color) = parse_hex_color(&args[i + 1]) {
                        bg = color;
                        i += 2;
                    } else {
                        eprintln!("Invalid hex color: {}", args[i + 1]);
                        eprintln!("Expected format: RRGGBB (e.g., 1a1b26)");
                        std::process::exit(1);
                    }
                } else {
                    eprintln!("--bg-color requires a hex color value");
                    std::process::exit(1);
                }
            }
            "help" | "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            arg => {
                if !arg.starts_with('-') {
                    message = arg.to_string();
                    i += 1;
                } else {
                    eprintln!("Unknown option: {}", arg);
                    eprintln!();
                    print_usage();
                    std::process::exit(1);
                }
            }
        }
    }

    run(message, bg)
}
