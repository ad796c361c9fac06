//! LED Effect Engine
//!
//! Rendert im manuellen Modus einen von vier Effekten auf den Strip.
//! Jeder Aufruf von [`LedEffectEngine::render`] zeichnet höchstens einmal
//! und kehrt sofort zurück.
//!
//! Direkte Füllungen ([`paint_solid`], [`paint_word_hue`]) umgehen den
//! Effekt-Automaten komplett und werden für Countdown-, Helm- und
//! Wort-Farben genutzt.

use rgb::RGB8;

use crate::config::{
    BLINK_INTERVAL_MS, BREATHING_INTERVAL_MS, BRIGHTNESS_STEP, FADE_INTERVAL_MS, SOLID_BRIGHTNESS,
};
use crate::logic::word_hue;
use crate::traits::{LedError, LedStrip};
use crate::types::{EffectKind, LightingUpdate, Palette};

/// Helligkeit, die zwischen 0 und 255 hin und her läuft
///
/// Die Richtung kehrt um, sobald eine Grenze erreicht ist; der Grenzwert
/// selbst wird noch gezeichnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounce {
    level: i16,
    delta: i16,
}

impl Default for Bounce {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounce {
    pub const fn new() -> Self {
        Self {
            level: 0,
            delta: BRIGHTNESS_STEP,
        }
    }

    /// Ein Schritt, gibt die neue Helligkeit zurück
    pub fn step(&mut self) -> u8 {
        self.level += self.delta;
        if self.level >= 255 || self.level <= 0 {
            self.delta = -self.delta;
        }
        self.level()
    }

    pub fn level(&self) -> u8 {
        self.level.clamp(0, 255) as u8
    }

    pub fn is_rising(&self) -> bool {
        self.delta > 0
    }
}

/// Zustand des manuellen LED-Modus
#[derive(Debug, Clone)]
pub struct LedEffectEngine {
    palette: Palette,
    /// `None`: unbekannter Effekt-Name, es wird nichts gezeichnet
    effect: Option<EffectKind>,
    manual: bool,
    dirty: bool,
    last_update_ms: u64,
    blink_on: bool,
    fade: Bounce,
    breathing: Bounce,
}

impl Default for LedEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LedEffectEngine {
    pub const fn new() -> Self {
        Self {
            palette: Palette::new(),
            effect: Some(EffectKind::Solid),
            manual: false,
            dirty: false,
            last_update_ms: 0,
            blink_on: false,
            fade: Bounce::new(),
            breathing: Bounce::new(),
        }
    }

    /// Übernimmt Palette und Effekt vom Dashboard und aktiviert den manuellen Modus
    pub fn configure(&mut self, update: &LightingUpdate) {
        self.palette = update.palette.clone();
        self.effect = update.effect;
        self.dirty = true;
        self.manual = true;
    }

    pub fn effect(&self) -> Option<EffectKind> {
        self.effect
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn is_manual(&self) -> bool {
        self.manual
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn fade(&self) -> Bounce {
        self.fade
    }

    pub fn breathing(&self) -> Bounce {
        self.breathing
    }

    /// Effekte laufen nur im manuellen Modus und ohne laufende Runde
    pub fn is_active(&self, game_running: bool) -> bool {
        self.manual && !game_running
    }

    /// Drehgeber-Schritt: schaltet den Effekt vor oder zurück
    ///
    /// Gibt den neuen Effekt zurück, oder `None` wenn der Dreh ignoriert wurde.
    pub fn rotate(&mut self, delta: i32, game_running: bool) -> Option<EffectKind> {
        if delta == 0 || !self.is_active(game_running) {
            return None;
        }

        let current = self.effect.unwrap_or(EffectKind::Solid);
        let effect = if delta > 0 {
            current.next()
        } else {
            current.previous()
        };

        self.effect = Some(effect);
        self.dirty = true;
        Some(effect)
    }

    /// Zeichnet den aktuellen Effekt, wenn sein Takt fällig ist
    pub fn render<L: LedStrip + ?Sized>(
        &mut self,
        now_ms: u64,
        game_running: bool,
        strip: &mut L,
    ) -> Result<(), LedError> {
        if !self.is_active(game_running) {
            return Ok(());
        }

        let elapsed = now_ms.saturating_sub(self.last_update_ms);

        match self.effect {
            Some(EffectKind::Solid) if self.dirty => {
                fill_palette(strip, &self.palette);
                strip.set_brightness(SOLID_BRIGHTNESS);
                self.dirty = false;
                strip.show()
            }
            Some(EffectKind::Blink) if elapsed > BLINK_INTERVAL_MS => {
                self.blink_on = !self.blink_on;
                if self.blink_on {
                    fill_palette(strip, &self.palette);
                } else {
                    fill(strip, RGB8::default());
                }
                self.last_update_ms = now_ms;
                strip.show()
            }
            Some(EffectKind::Fade) if elapsed > FADE_INTERVAL_MS => {
                let level = self.fade.step();
                self.last_update_ms = now_ms;
                paint_at_brightness(strip, &self.palette, level)
            }
            Some(EffectKind::Breathing) if elapsed > BREATHING_INTERVAL_MS => {
                let level = self.breathing.step();
                self.last_update_ms = now_ms;
                paint_at_brightness(strip, &self.palette, level)
            }
            _ => Ok(()),
        }
    }
}

fn paint_at_brightness<L: LedStrip + ?Sized>(
    strip: &mut L,
    palette: &Palette,
    level: u8,
) -> Result<(), LedError> {
    strip.set_brightness(level);
    fill_palette(strip, palette);
    strip.show()
}

fn fill<L: LedStrip + ?Sized>(strip: &mut L, color: RGB8) {
    for index in 0..strip.pixel_count() {
        strip.set_pixel(index, color);
    }
}

/// Pixel i bekommt Palettenfarbe i mod len; leere Palette schaltet aus
fn fill_palette<L: LedStrip + ?Sized>(strip: &mut L, palette: &Palette) {
    if palette.is_empty() {
        fill(strip, RGB8::default());
        return;
    }

    for index in 0..strip.pixel_count() {
        strip.set_pixel(index, palette[index % palette.len()]);
    }
}

/// Füllt den ganzen Strip synchron mit einer Farbe
pub fn paint_solid<L: LedStrip + ?Sized>(strip: &mut L, color: RGB8) -> Result<(), LedError> {
    fill(strip, color);
    strip.show()
}

/// Füllt den Strip mit der Farbe des Wortes an Position `index`
pub fn paint_word_hue<L: LedStrip + ?Sized>(strip: &mut L, index: usize) -> Result<(), LedError> {
    paint_solid(strip, word_hue(index))
}
