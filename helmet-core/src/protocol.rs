//! WebSocket-Protokoll-Definitionen
//!
//! Definiert die JSON-Nachrichten für Dashboard ↔ Gerät Kommunikation.
//!
//! Eingehend (alle Felder optional, beliebig kombinierbar):
//! `{"timer":30,"word":"cat","remove":"dog","melody":"nokia","start":true,
//!   "colors":["#FF0000","#00FF00"],"effect":"blink"}`
//!
//! Ausgehend (genau ein Feld): `{"word":"cat"}` oder `{"log":"..."}`

use serde::{Deserialize, Serialize};

use crate::config::{MAX_PALETTE_COLORS, UNESCAPE_BUFFER_SIZE};
use crate::logic::parse_hex_color;
use crate::types::{
    ControlCommand, EffectKind, LightingUpdate, MelodyChoice, Notification, Palette, Word,
};

/// Fehler beim Kodieren/Dekodieren
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Kein gültiges JSON-Objekt, falscher Feld-Typ oder zu lange Werte
    Malformed,
    /// Ausgabe-Buffer zu klein
    BufferTooSmall,
}

/// Dashboard → Gerät
///
/// Wörter werden entschlüsselt kopiert (`\"` wird zu `"`), alle anderen
/// Strings zeigen in den Empfangs-Buffer und dürfen keine Escapes enthalten.
/// Unbekannte Felder werden ignoriert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InboundMessage<'a> {
    #[serde(default)]
    pub timer: Option<u32>,
    #[serde(default)]
    pub word: Option<Word>,
    #[serde(default)]
    pub remove: Option<Word>,
    #[serde(default, borrow)]
    pub melody: Option<&'a str>,
    #[serde(default)]
    pub start: Option<bool>,
    #[serde(default, borrow)]
    pub colors: Option<heapless::Vec<&'a str, MAX_PALETTE_COLORS>>,
    #[serde(default, borrow)]
    pub effect: Option<&'a str>,
}

/// Gerät → alle Listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutboundMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<&'a str>,
}

impl InboundMessage<'_> {
    /// Wandelt die rohe Nachricht in ein eigenständiges Kommando
    ///
    pub fn into_command(self) -> ControlCommand {
        let lighting = match (self.colors, self.effect) {
            (Some(colors), Some(effect)) => {
                let palette: Palette = colors.iter().map(|hex| parse_hex_color(hex)).collect();
                Some(LightingUpdate {
                    palette,
                    effect: EffectKind::from_name(effect),
                })
            }
            _ => None,
        };

        ControlCommand {
            timer_secs: self.timer,
            add_word: self.word,
            remove_word: self.remove,
            melody: self.melody.map(MelodyChoice::from_name),
            start: self.start == Some(true),
            lighting,
        }
    }
}

/// Dekodiert eine Text-Nachricht vom Dashboard
///
/// Wörter über `WORD_CAPACITY` Bytes (nach dem Entschlüsseln) machen die
/// ganze Nachricht ungültig.
pub fn parse_command(bytes: &[u8]) -> Result<ControlCommand, ProtocolError> {
    let mut unescape_buffer = [0u8; UNESCAPE_BUFFER_SIZE];
    let (message, _) =
        serde_json_core::from_slice_escaped::<InboundMessage<'_>>(bytes, &mut unescape_buffer)
            .map_err(|_| ProtocolError::Malformed)?;
    Ok(message.into_command())
}

/// Serialisiert eine Benachrichtigung in `buffer`, gibt die Länge zurück
pub fn encode_notification(
    notification: &Notification,
    buffer: &mut [u8],
) -> Result<usize, ProtocolError> {
    let log_text;
    let message = match notification {
        Notification::Log(event) => {
            log_text = event.text();
            OutboundMessage {
                word: None,
                log: Some(log_text.as_str()),
            }
        }
        other => OutboundMessage {
            word: other.word_text(),
            log: None,
        },
    };

    serde_json_core::to_slice(&message, buffer).map_err(|_| ProtocolError::BufferTooSmall)
}
