//! Melodie-Player
//!
//! Spielt eine Notenfolge auf dem Buzzer ab, ohne zu blockieren:
//! pro Tick wird höchstens eine Note gestartet. Die Melodie läuft in
//! Endlosschleife, solange eine Runde läuft.

use crate::config::MELODY_NOTE_GAP_MS;
use crate::traits::Buzzer;
use crate::types::{MelodyChoice, MelodyName, Note};

const NOKIA: [Note; 8] = [
    Note::new(1318, 200),
    Note::new(1174, 200),
    Note::new(1046, 200),
    Note::new(0, 100),
    Note::new(1046, 200),
    Note::new(988, 200),
    Note::new(880, 300),
    Note::new(0, 100),
];

const WIPWUP: [Note; 8] = [
    Note::new(784, 200),
    Note::new(880, 200),
    Note::new(988, 200),
    Note::new(1046, 200),
    Note::new(0, 100),
    Note::new(1174, 200),
    Note::new(988, 300),
    Note::new(0, 100),
];

const ATEEZ: [Note; 8] = [
    Note::new(659, 200),
    Note::new(698, 200),
    Note::new(784, 200),
    Note::new(0, 100),
    Note::new(880, 200),
    Note::new(988, 200),
    Note::new(1046, 300),
    Note::new(0, 100),
];

const BABY: [Note; 8] = [
    Note::new(784, 150),
    Note::new(784, 150),
    Note::new(659, 150),
    Note::new(0, 100),
    Note::new(784, 150),
    Note::new(587, 200),
    Note::new(659, 300),
    Note::new(0, 100),
];

/// Notentabelle einer eingebauten Melodie
pub fn notes_for(name: MelodyName) -> &'static [Note] {
    match name {
        MelodyName::Nokia => &NOKIA,
        MelodyName::Wipwup => &WIPWUP,
        MelodyName::Ateez => &ATEEZ,
        MelodyName::Baby => &BABY,
    }
}

/// Zustand der aktuell gewählten Melodie
#[derive(Debug, Clone)]
pub struct MelodyPlayer {
    selected: Option<MelodyName>,
    notes: &'static [Note],
    index: usize,
    last_note_ms: u64,
}

impl Default for MelodyPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MelodyPlayer {
    pub const fn new() -> Self {
        Self {
            selected: None,
            notes: &[],
            index: 0,
            last_note_ms: 0,
        }
    }

    /// Ersetzt die Melodie komplett und beginnt wieder bei Note 0
    pub fn select(&mut self, choice: MelodyChoice) {
        match choice {
            MelodyChoice::Tune(name) => {
                self.selected = Some(name);
                self.notes = notes_for(name);
            }
            MelodyChoice::Silent => {
                self.selected = None;
                self.notes = &[];
            }
        }
        self.index = 0;
    }

    /// Verwirft die Notenfolge (Rundenende)
    ///
    /// Für die nächste Runde muss erneut eine Melodie gewählt werden.
    pub fn clear(&mut self) {
        self.selected = None;
        self.notes = &[];
        self.index = 0;
    }

    pub fn selected(&self) -> Option<MelodyName> {
        self.selected
    }

    /// Index der nächsten Note, immer in `[0, len)` (0 bei leerer Melodie)
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_silent(&self) -> bool {
        self.notes.is_empty()
    }

    /// Startet die nächste Note, wenn die vorherige samt Pause vorbei ist
    pub fn advance<Z: Buzzer + ?Sized>(&mut self, now_ms: u64, game_running: bool, buzzer: &mut Z) {
        if !game_running || self.notes.is_empty() {
            return;
        }

        let note = self.notes[self.index];
        let wait_ms = note.duration_ms as u64 + MELODY_NOTE_GAP_MS;
        if now_ms.saturating_sub(self.last_note_ms) <= wait_ms {
            return;
        }

        if note.freq_hz > 0 {
            buzzer.tone(note.freq_hz as u32);
        } else {
            buzzer.no_tone();
        }

        self.last_note_ms = now_ms;
        self.index = (self.index + 1) % self.notes.len();
    }
}
