use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, terminal,
};
use flappy_cli::{Game, ScreenBuf, Tuning};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

/// Nominal frame length; `dt` is still measured from the wall clock so
/// physics stays correct under scheduling jitter.
const TICK: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let result = run(&mut out);

    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;
    result
}

fn run(out: &mut io::Stdout) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut rng = rand::thread_rng();
    let mut buf = ScreenBuf::new(cols, rows);
    let mut game = Game::new(cols, rows, Tuning::default(), &mut rng);

    let mut last_update = Instant::now();
    let mut running = true;

    while running {
        let frame_start = Instant::now();

        // Drain every pending key before stepping; latest input wins.
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => running = false,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        running = false;
                    }
                    KeyCode::Char(' ') | KeyCode::Up => game.flap(),
                    KeyCode::Char('r') => game.restart(&mut rng),
                    _ => {}
                },
                Event::Resize(c, r) => {
                    // The field dimensions are baked into the simulation;
                    // start a fresh round at the new size.
                    buf.resize(c, r);
                    game = Game::new(c, r, game.tuning, &mut rng);
                }
                _ => {}
            }
        }
        if !running {
            break;
        }

        let now = Instant::now();
        let dt = now.duration_since(last_update).as_secs_f64();
        last_update = now;
        game.update(dt, &mut rng);

        game.draw(&mut buf);
        buf.flush(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < TICK {
            std::thread::sleep(TICK - elapsed);
        }
    }

    Ok(())
}
