//! Core Types für das Helm-Spiel
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt::Write;

use rgb::RGB8;

use crate::config::{MAX_PALETTE_COLORS, WORD_CAPACITY};

/// Ein Wort der Wortliste (feste Kapazität, kein Heap)
pub type Word = heapless::String<WORD_CAPACITY>;

/// Farb-Palette für die LED-Effekte
pub type Palette = heapless::Vec<RGB8, MAX_PALETTE_COLORS>;

/// Text einer Log-Benachrichtigung
pub type LogText = heapless::String<64>;

/// Text der Benachrichtigung bei Spielende
pub const GAME_OVER_TEXT: &str = "Game Over";

// ============================================================================
// LED-Effekte
// ============================================================================

/// Visuelle Effekte im manuellen LED-Modus
///
/// Die Reihenfolge von [`EffectKind::ALL`] bestimmt das Durchschalten
/// mit dem Drehgeber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EffectKind {
    Solid,
    Blink,
    Fade,
    Breathing,
}

impl EffectKind {
    /// Alle Effekte in Drehgeber-Reihenfolge
    pub const ALL: [EffectKind; 4] = [
        EffectKind::Solid,
        EffectKind::Blink,
        EffectKind::Fade,
        EffectKind::Breathing,
    ];

    /// Sucht den Effekt zum Namen aus dem Dashboard
    ///
    /// Unbekannte Namen ergeben `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "solid" => Some(Self::Solid),
            "blink" => Some(Self::Blink),
            "fade" => Some(Self::Fade),
            "breathing" => Some(Self::Breathing),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Blink => "blink",
            Self::Fade => "fade",
            Self::Breathing => "breathing",
        }
    }

    fn position(self) -> usize {
        match self {
            Self::Solid => 0,
            Self::Blink => 1,
            Self::Fade => 2,
            Self::Breathing => 3,
        }
    }

    /// Nächster Effekt (zyklisch)
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Vorheriger Effekt (zyklisch)
    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// Melodien
// ============================================================================

/// Eine Note: Frequenz 0 bedeutet Stille
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub freq_hz: u16,
    pub duration_ms: u16,
}

impl Note {
    pub const fn new(freq_hz: u16, duration_ms: u16) -> Self {
        Self {
            freq_hz,
            duration_ms,
        }
    }
}

/// Die vier eingebauten Melodien
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MelodyName {
    Nokia,
    Wipwup,
    Ateez,
    Baby,
}

impl MelodyName {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "nokia" => Some(Self::Nokia),
            "wipwup" => Some(Self::Wipwup),
            "ateez" => Some(Self::Ateez),
            "baby" => Some(Self::Baby),
            _ => None,
        }
    }
}

/// Auswahl aus dem Dashboard: bekannte Melodie oder Stille
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MelodyChoice {
    Tune(MelodyName),
    /// Unbekannter Name: leere Notenfolge
    Silent,
}

impl MelodyChoice {
    pub fn from_name(name: &str) -> Self {
        MelodyName::from_name(name).map_or(Self::Silent, Self::Tune)
    }
}

// ============================================================================
// Sensoren
// ============================================================================

/// Rohwerte des Beschleunigungssensors (MPU6050, ±2g)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Acceleration {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

// ============================================================================
// Control Channel: Kommandos (Dashboard → Gerät)
// ============================================================================

/// Neue Palette plus Effekt vom Dashboard
///
/// `effect == None` steht für einen unbekannten Effekt-Namen: die LEDs
/// frieren ein, bis ein gültiger Effekt gewählt wird.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightingUpdate {
    pub palette: Palette,
    pub effect: Option<EffectKind>,
}

/// Ein dekodiertes Kommando vom Dashboard
///
/// Jede Teilmenge der Felder kann gleichzeitig gesetzt sein.
/// Anwendungsreihenfolge: timer, word, remove, melody, start, lighting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlCommand {
    pub timer_secs: Option<u32>,
    pub add_word: Option<Word>,
    pub remove_word: Option<Word>,
    pub melody: Option<MelodyChoice>,
    pub start: bool,
    pub lighting: Option<LightingUpdate>,
}

// ============================================================================
// Benachrichtigungen (Gerät → alle Listener)
// ============================================================================

/// Diagnose-Ereignisse für das Dashboard-Log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogEvent {
    /// Drehgeber hat den Effekt gewechselt
    EffectChanged(EffectKind),
    HelmetWorn,
    HeadNod,
}

impl LogEvent {
    /// Menschenlesbarer Text für `{"log": ...}`
    pub fn text(self) -> LogText {
        let mut text = LogText::new();
        // Alle Texte passen in 64 Bytes
        let _ = match self {
            Self::EffectChanged(effect) => {
                write!(text, "Rotary Encoder turned \u{2014} Effect: {}", effect.as_str())
            }
            Self::HelmetWorn => text.write_str("Helmet worn detected"),
            Self::HeadNod => text.write_str("MPU6050: Head nod detected"),
        };
        text
    }
}

/// Broadcast an alle verbundenen Listener
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Neues aktives Wort
    Word(Word),
    /// Runde beendet (als Wort "Game Over" gesendet)
    GameOver,
    Log(LogEvent),
}

impl Notification {
    /// Wort-Text, falls es eine `{"word": ...}` Benachrichtigung ist
    pub fn word_text(&self) -> Option<&str> {
        match self {
            Self::Word(word) => Some(word.as_str()),
            Self::GameOver => Some(GAME_OVER_TEXT),
            Self::Log(_) => None,
        }
    }
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Note {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "Note {{ {} Hz, {} ms }}", self.freq_hz, self.duration_ms)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Notification {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Notification::Word(word) => defmt::write!(fmt, "Word({})", word.as_str()),
            Notification::GameOver => defmt::write!(fmt, "GameOver"),
            Notification::Log(event) => defmt::write!(fmt, "Log({})", event),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ControlCommand {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "ControlCommand {{ timer: {}, word: {}, remove: {}, melody: {}, start: {}, lighting: {} }}",
            self.timer_secs,
            self.add_word.as_ref().map(|w| w.as_str()),
            self.remove_word.as_ref().map(|w| w.as_str()),
            self.melody,
            self.start,
            self.lighting.as_ref().map(|l| l.palette.len()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_cycle_forward_wraps() {
        assert_eq!(EffectKind::Solid.next(), EffectKind::Blink);
        assert_eq!(EffectKind::Breathing.next(), EffectKind::Solid);
    }

    #[test]
    fn test_effect_cycle_backward_wraps() {
        assert_eq!(EffectKind::Solid.previous(), EffectKind::Breathing);
        assert_eq!(EffectKind::Fade.previous(), EffectKind::Blink);
    }

    #[test]
    fn test_effect_names() {
        for effect in EffectKind::ALL {
            assert_eq!(EffectKind::from_name(effect.as_str()), Some(effect));
        }
        assert_eq!(EffectKind::from_name("rainbow"), None);
    }

    #[test]
    fn test_unknown_melody_is_silent() {
        assert_eq!(MelodyChoice::from_name("nokia"), MelodyChoice::Tune(MelodyName::Nokia));
        assert_eq!(MelodyChoice::from_name("none"), MelodyChoice::Silent);
    }

    #[test]
    fn test_log_texts() {
        assert_eq!(LogEvent::HelmetWorn.text().as_str(), "Helmet worn detected");
        assert_eq!(LogEvent::HeadNod.text().as_str(), "MPU6050: Head nod detected");
        assert_eq!(
            LogEvent::EffectChanged(EffectKind::Fade).text().as_str(),
            "Rotary Encoder turned \u{2014} Effect: fade"
        );
    }

    #[test]
    fn test_game_over_word_text() {
        assert_eq!(Notification::GameOver.word_text(), Some("Game Over"));
        assert_eq!(Notification::Log(LogEvent::HeadNod).word_text(), None);
    }
}
