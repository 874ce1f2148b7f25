/// Side-effect events emitted by the simulation and the audio collaborator
/// that turns them into sounds.
///
/// Playback is fire-and-forget: sinks never report back to the simulation.

use std::io::Write;

/// Sound clips the game can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Clip {
    Fire,
    Explosion,
    GameOver,
}

/// Something noteworthy that happened during one `step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    ShotFired,
    /// A bullet destroyed an enemy.
    Explosion,
    /// Emitted once per session, on the frame the game ends.
    GameOver,
}

impl GameEvent {
    pub fn clip(&self) -> Clip {
        match self {
            GameEvent::ShotFired => Clip::Fire,
            GameEvent::Explosion => Clip::Explosion,
            GameEvent::GameOver => Clip::GameOver,
        }
    }
}

pub trait AudioSink {
    fn play(&mut self, clip: Clip);
}

/// Play every event's clip, in emission order.
pub fn dispatch<S: AudioSink + ?Sized>(sink: &mut S, events: &[GameEvent]) {
    for event in events {
        sink.play(event.clip());
    }
}

/// Rings the terminal bell for explosions and game over.  Shots are silent
/// so holding fire does not turn into a continuous beep.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, clip: Clip) {
        match clip {
            Clip::Fire => {}
            Clip::Explosion | Clip::GameOver => {
                if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
                    log::debug!("bell for {:?} dropped: {}", clip, e);
                }
            }
        }
    }
}

/// Keeps every clip it is asked to play.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    pub played: Vec<Clip>,
}

impl AudioSink for Recorder {
    fn play(&mut self, clip: Clip) {
        self.played.push(clip);
    }
}
