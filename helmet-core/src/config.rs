//! Spiel-Konfiguration: Schwellwerte, Takte und Kapazitäten
//!
//! Alle Zeitangaben in Millisekunden, sofern nicht anders benannt.

// ============================================================================
// Wortliste
// ============================================================================

/// Maximale Anzahl Wörter in der Wortliste
pub const MAX_WORDS: usize = 10;

/// Maximale Länge eines Wortes in Bytes (längere Wörter werden verworfen)
pub const WORD_CAPACITY: usize = 32;

/// Scratch-Buffer zum Entschlüsseln eines JSON-Strings (`\"`, `\\`, `\u00e9`)
pub const UNESCAPE_BUFFER_SIZE: usize = WORD_CAPACITY;

// ============================================================================
// LED-Effekte
// ============================================================================

/// Maximale Anzahl Farben in einer Palette
pub const MAX_PALETTE_COLORS: usize = 16;

/// Helligkeit beim Booten (wie Adafruit NeoPixel `setBrightness(40)`)
pub const STARTUP_BRIGHTNESS: u8 = 40;

/// Helligkeit für den Solid-Effekt
pub const SOLID_BRIGHTNESS: u8 = 255;

/// Blink-Takt
pub const BLINK_INTERVAL_MS: u64 = 300;

/// Fade-Takt
pub const FADE_INTERVAL_MS: u64 = 20;

/// Breathing-Takt
pub const BREATHING_INTERVAL_MS: u64 = 30;

/// Helligkeits-Schritt für Fade und Breathing
pub const BRIGHTNESS_STEP: i16 = 5;

/// Farbton-Abstand zwischen zwei aufeinanderfolgenden Wörtern (8-Bit Hue)
pub const WORD_HUE_STEP: u32 = 40;

// ============================================================================
// Melodie
// ============================================================================

/// Feste Pause zwischen zwei Noten
pub const MELODY_NOTE_GAP_MS: u64 = 50;

// ============================================================================
// Sensoren
// ============================================================================

/// Helm gilt als aufgesetzt bei Distanz in (0, HELMET_DISTANCE_MAX_CM]
pub const HELMET_DISTANCE_MAX_CM: u32 = 2;

/// Anzahl Grün/Aus-Blitze bei Helm-Erkennung
pub const HELMET_FLASH_COUNT: usize = 2;

/// Dauer jeder Blitz-Phase (harte Pause)
pub const HELMET_FLASH_MS: u32 = 200;

/// Mindestabstand zwischen zwei Nick-Prüfungen
pub const NOD_CHECK_INTERVAL_MS: u64 = 1000;

/// Z-Achse (roh) muss diesen Betrag überschreiten, damit ein Nicken zählt
pub const NOD_ACCEL_THRESHOLD: u16 = 15000;

/// Mikrofon-Pegel (roher 12-Bit ADC-Wert) für einen Schrei
pub const SHOUT_MIC_THRESHOLD: u16 = 3000;

/// Harte Pause nach einem Schrei
pub const SHOUT_PAUSE_MS: u32 = 500;

// ============================================================================
// Countdown
// ============================================================================

/// Ab dieser Restzeit (Sekunden) wird bei jedem Tick gewarnt
pub const ALERT_WINDOW_SECS: i64 = 10;

/// Restzeit-Grenze für rote Warnfarbe
pub const ALERT_RED_SECS: i64 = 3;

/// Restzeit-Grenze für orange Warnfarbe
pub const ALERT_ORANGE_SECS: i64 = 6;

/// Frequenz aller Warn- und Ablauf-Töne
pub const ALERT_TONE_HZ: u32 = 1000;

/// Warnton-Dauer (harte Pause)
pub const ALERT_TONE_MS: u32 = 200;

/// Stille nach dem Warnton (harte Pause)
pub const ALERT_SILENCE_MS: u32 = 800;

/// Dauer des einmaligen Ablauf-Tons (harte Pause)
pub const EXPIRY_TONE_MS: u32 = 1000;
