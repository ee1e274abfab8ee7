mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

use platform_adventure::compute::{click_menu, init_game, key_down, tick};
use platform_adventure::entities::{Input, Key};
use platform_adventure::scene;

use display::Terminal;

#[derive(Parser)]
#[command(name = "platform_adventure")]
#[command(about = "Jump across platforms, dodge the patrols, reach the goal")]
struct Args {
    /// Start with music and sound effects switched off
    #[arg(long)]
    mute: bool,

    /// Frames per second; movement speeds are tuned for 60
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Write tracing output to this file (filter with RUST_LOG, default `info`)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Held-key input ────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is refreshed before it expires.
const HOLD_WINDOW_MS: u64 = 133;

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, window: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame, window))
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const JUMP_KEYS: [KeyCode; 4] = [
    KeyCode::Up,
    KeyCode::Char('w'),
    KeyCode::Char('W'),
    KeyCode::Char(' '),
];

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the renderer, so logs only go to a file, and only
/// when one was asked for.
fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits (Q, Ctrl-C or the menu's quit button).
///
/// Input model: every key press/repeat records the frame it was seen in;
/// each frame the movement keys still inside the hold window form the
/// `Input` snapshot.  Esc and Space are also forwarded once per press as
/// key-down events, and left mouse presses as clicks in world coordinates.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, args: &Args) -> Result<()> {
    let fps = args.fps.max(1);
    let frame_len = Duration::from_secs(1) / fps;
    let hold_window = (HOLD_WINDOW_MS * fps as u64 / 1000).max(1);

    let (cols, rows) = terminal::size().context("reading terminal size")?;
    let mut term = Terminal::new(out, cols, rows);
    let mut game = init_game(!args.mute);
    info!(cols, rows, fps, sound_on = game.sound_on, "starting");

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Esc => game = key_down(&game, Key::Escape, &mut term),
                            KeyCode::Char(' ') => game = key_down(&game, Key::Space, &mut term),
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let point = term.cell_to_world(column, row);
                    game = click_menu(&game, point, &mut term);
                }
                Event::Resize(cols, rows) => term.resize(cols, rows),
                _ => {}
            }
        }

        let input = Input {
            left: any_held(&key_frame, &LEFT_KEYS, frame, hold_window),
            right: any_held(&key_frame, &RIGHT_KEYS, frame, hold_window),
            jump: any_held(&key_frame, &JUMP_KEYS, frame, hold_window),
        };

        game = tick(&game, &input, &mut term);
        scene::render(&mut term, &game).context("drawing frame")?;
        term.present().context("writing frame")?;

        if game.exit_requested {
            info!("quit from menu");
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Switch to the game screen.  Returns whether key-release reporting was
/// enabled, which `leave_screen` needs to undo it.
fn enter_screen<W: Write>(out: &mut W) -> Result<bool> {
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(cursor::Hide).context("hiding cursor")?;
    out.execute(EnableMouseCapture).context("enabling mouse capture")?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    Ok(keyboard_enhanced)
}

/// Undo `enter_screen`.  Safe to call after a partial setup.
fn leave_screen<W: Write>(out: &mut W, keyboard_enhanced: bool) {
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
}

/// Run `body` on the game screen.  The screen is left again whether setup
/// or `body` failed.
fn with_game_screen<W: Write, T>(
    out: &mut W,
    body: impl FnOnce(&mut W) -> Result<T>,
) -> Result<T> {
    let (result, keyboard_enhanced) = match enter_screen(out) {
        Ok(enhanced) => (body(out), enhanced),
        Err(e) => (Err(e), false),
    };
    leave_screen(out, keyboard_enhanced);
    result
}

/// Dedicate a thread exclusively to blocking event reads, sending them
/// through a channel so the game loop never has to block on I/O.
fn spawn_event_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });
    rx
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    let result = with_game_screen(&mut out, |out| {
        let rx = spawn_event_reader();
        run(out, &rx, &args)
    });
    let _ = terminal::disable_raw_mode();

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    const ALT_SCREEN_OFF: &str = "\x1b[?1049l";
    const CURSOR_SHOWN: &str = "\x1b[?25h";

    /// Records everything written, failing any write that carries `reject`.
    #[derive(Default)]
    struct ScriptedOut {
        bytes: Vec<u8>,
        reject: Option<&'static str>,
    }

    impl ScriptedOut {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.bytes).into_owned()
        }
    }

    impl Write for ScriptedOut {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if let Some(seq) = self.reject {
                if String::from_utf8_lossy(buf).contains(seq) {
                    return Err(io::Error::new(io::ErrorKind::Other, "rejected"));
                }
            }
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn screen_restored_when_setup_fails_midway() {
        // Mouse capture is the third setup step
        let mut out = ScriptedOut {
            reject: Some("\x1b[?1000h"),
            ..ScriptedOut::default()
        };
        let mut body_ran = false;
        let result = with_game_screen(&mut out, |_| {
            body_ran = true;
            Ok(())
        });

        assert!(result.is_err());
        assert!(!body_ran);
        let text = out.text();
        assert!(text.contains("\x1b[?1049h"));
        assert!(text.contains(ALT_SCREEN_OFF));
        assert!(text.contains(CURSOR_SHOWN));
    }

    #[test]
    fn screen_restored_when_game_loop_fails() {
        let mut out = ScriptedOut::default();
        let result: Result<()> = with_game_screen(&mut out, |_| anyhow::bail!("frame write failed"));

        assert!(result.is_err());
        let text = out.text();
        assert!(text.ends_with(ALT_SCREEN_OFF));
        assert!(text.contains(CURSOR_SHOWN));
    }
}
