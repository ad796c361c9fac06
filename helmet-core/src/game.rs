//! Spiel-Zustandsautomat
//!
//! `Idle` → (start, Wortliste nicht leer) → `Running { index }` →
//! (letztes Wort weitergeschaltet, Timeout, Abbruch) → `Idle`.
//!
//! Der Automat ist rein: Seiteneffekte (Broadcast, LED-Farbe, Buzzer)
//! führt der Scheduler anhand der Rückgabewerte aus.

use crate::config::MAX_WORDS;
use crate::types::Word;

/// Geordnete Wortliste mit fester Kapazität
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: heapless::Vec<Word, MAX_WORDS>,
}

impl WordList {
    pub const fn new() -> Self {
        Self {
            words: heapless::Vec::new(),
        }
    }

    /// Hängt ein Wort an; bei voller Liste wird es verworfen (`false`)
    pub fn add(&mut self, word: Word) -> bool {
        self.words.push(word).is_ok()
    }

    /// Entfernt den ersten exakten Treffer, gibt dessen Position zurück
    pub fn remove(&mut self, word: &str) -> Option<usize> {
        let position = self.words.iter().position(|w| w.as_str() == word)?;
        self.words.remove(position);
        Some(position)
    }

    pub fn get(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GamePhase {
    Idle,
    /// `index` ist immer eine gültige Position in der Wortliste
    Running { index: usize },
}

/// Ergebnis eines Weiterschaltens (Nicken oder Schrei)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Neues aktives Wort
    Next { index: usize, word: Word },
    /// Liste erschöpft, Runde beendet
    Finished,
    /// Keine Runde aktiv
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Game {
    words: WordList,
    phase: GamePhase,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub const fn new() -> Self {
        Self {
            words: WordList::new(),
            phase: GamePhase::Idle,
        }
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Running { .. })
    }

    /// Aktueller Wort-Index (`None` = kein aktives Wort)
    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            GamePhase::Running { index } => Some(index),
            GamePhase::Idle => None,
        }
    }

    pub fn add_word(&mut self, word: Word) -> bool {
        self.words.add(word)
    }

    /// Entfernt ein Wort
    ///
    /// Liegt der aktive Index danach außerhalb der Liste, endet die Runde
    /// (`true` = Runde wurde beendet).
    pub fn remove_word(&mut self, word: &str) -> bool {
        if self.words.remove(word).is_none() {
            return false;
        }

        match self.phase {
            GamePhase::Running { index } if index >= self.words.len() => {
                self.phase = GamePhase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Startet (oder startet neu) bei Wort 0; leere Liste bleibt `Idle`
    pub fn start(&mut self) -> Option<&Word> {
        let first = self.words.get(0)?;
        self.phase = GamePhase::Running { index: 0 };
        Some(first)
    }

    pub fn advance(&mut self) -> Advance {
        let GamePhase::Running { index } = self.phase else {
            return Advance::Ignored;
        };

        let next = index + 1;
        match self.words.get(next) {
            Some(word) => {
                self.phase = GamePhase::Running { index: next };
                Advance::Next {
                    index: next,
                    word: word.clone(),
                }
            }
            None => {
                self.phase = GamePhase::Idle;
                Advance::Finished
            }
        }
    }

    pub fn stop(&mut self) {
        self.phase = GamePhase::Idle;
    }
}
