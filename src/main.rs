mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use descent_shooter::audio::{dispatch, TerminalBell};
use descent_shooter::compute::{handle_click, initialize, restart, step};
use descent_shooter::config::{GameConfig, Variant};
use descent_shooter::entities::{GameStatus, InputIntent};

use display::Viewport;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum MenuResult {
    Start(Variant),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "▼  DESCENT  SHOOTER  ▼";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select variant:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Classic", Color::Green, "Square ships, quick spawns"),
        ("2", "Arcade ", Color::Magenta, "Round ships, slower pace"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 3))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    Ok(menu_choice(rx))
}

/// Block until the user picks a variant or quits.  A closed input channel
/// counts as quitting.
fn menu_choice(rx: &mpsc::Receiver<Event>) -> MenuResult {
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind, .. })) => {
                if kind == KeyEventKind::Release {
                    continue;
                }
                match code {
                    KeyCode::Char('1') => return MenuResult::Start(Variant::Classic),
                    KeyCode::Char('2') => return MenuResult::Start(Variant::Arcade),
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        return MenuResult::Quit;
                    }
                    _ => {}
                }
            }
            Ok(_) => {}
            Err(_) => {
                log::warn!("input channel closed in menu");
                return MenuResult::Quit;
            }
        }
    }
}

/// Everything queued on `rx` right now, or `None` once the input thread is
/// gone and nothing more can ever arrive.
fn drain_pending(rx: &mpsc::Receiver<Event>) -> Option<Vec<Event>> {
    let mut pending = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(ev) => pending.push(ev),
            Err(mpsc::TryRecvError::Empty) => return Some(pending),
            Err(mpsc::TryRecvError::Disconnected) => return None,
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the keys that are still
/// "fresh" (within `HOLD_WINDOW` frames) become the frame's `InputIntent`,
/// so Space and a direction can be held together.
///
/// Mouse clicks are mapped back into field coordinates and handed to the
/// simulation, which decides whether they hit the restart button.
fn game_loop<W: Write>(
    out: &mut W,
    variant: Variant,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<bool> {
    let mut rng = thread_rng();
    let mut bell = TerminalBell::new(stdout());

    let mut state = initialize(GameConfig::for_variant(variant))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut tick: u64 = 0;

    loop {
        let frame_start = Instant::now();
        tick += 1;

        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows);

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let Some(pending) = drain_pending(rx) else {
            log::warn!("input channel closed, leaving the game");
            return Ok(true);
        };
        for ev in pending {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    // Press: record key + handle one-shot actions
                    KeyEventKind::Press => {
                        key_frame.insert(code, tick);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(true);
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(true);
                            }
                            KeyCode::Char('r') | KeyCode::Char('R')
                                if state.status == GameStatus::GameOver =>
                            {
                                state = restart(&state);
                            }
                            KeyCode::Char('m') | KeyCode::Char('M')
                                if state.status == GameStatus::GameOver =>
                            {
                                return Ok(false);
                            }
                            _ => {}
                        }
                    }
                    // Repeat: refresh timestamp so key stays "held"
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, tick);
                    }
                    // Release: remove key immediately (keyboard-enhancement path)
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
                    if let Some((x, y)) = view.to_field(state.config(), column, row) {
                        state = handle_click(&state, x, y);
                    }
                }
                _ => {}
            }
        }

        let intent = InputIntent {
            left: any_held(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                tick,
            ),
            right: any_held(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                tick,
            ),
            fire: is_held(&key_frame, &KeyCode::Char(' '), tick),
        };

        let (next, events) = step(&state, &intent, &mut rng);
        state = next;
        dispatch(&mut bell, &events);

        display::render(out, &view, &state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    // Silent unless RUST_LOG is set; redirect stderr to keep the screen clean.
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::warn!("input thread stopped: {}", e);
                break;
            }
        }
    });

    log::info!("descent shooter starting");
    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("exiting with error: {}", e);
    }
    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start(variant) => {
                if game_loop(out, variant, rx)? {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn menu_picks_variant_from_key() {
        let (tx, rx) = mpsc::channel();
        tx.send(key('x')).unwrap();
        tx.send(key('2')).unwrap();
        assert_eq!(menu_choice(&rx), MenuResult::Start(Variant::Arcade));
    }

    #[test]
    fn menu_quits_when_input_thread_is_gone() {
        let (tx, rx) = mpsc::channel::<Event>();
        drop(tx);
        assert_eq!(menu_choice(&rx), MenuResult::Quit);
    }

    #[test]
    fn drain_returns_queued_events_while_connected() {
        let (tx, rx) = mpsc::channel();
        assert_eq!(drain_pending(&rx), Some(Vec::new()));
        tx.send(key('a')).unwrap();
        tx.send(key(' ')).unwrap();
        assert_eq!(drain_pending(&rx), Some(vec![key('a'), key(' ')]));
    }

    #[test]
    fn drain_reports_closed_channel() {
        let (tx, rx) = mpsc::channel::<Event>();
        drop(tx);
        assert_eq!(drain_pending(&rx), None);
    }
}
