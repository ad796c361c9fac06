//! Kooperativer Scheduler und Control-Channel-Adapter
//!
//! [`HelmetGame`] besitzt den kompletten Gerätezustand. Ein Aufruf von
//! [`HelmetGame::tick`] ist ein Durchlauf der Hauptschleife in fester
//! Reihenfolge:
//!
//! 1. Control Channel: alle wartenden Kommandos anwenden
//! 2. Melodie weiterspielen
//! 3. Drehgeber + LED-Effekt
//! 4. Helm-Erkennung
//! 5. Countdown
//! 6. Nicken
//! 7. Schreien
//!
//! Spätere Schritte sehen den Zustand, den frühere Schritte im selben
//! Tick verändert haben. Blockierende Stellen laufen ausschließlich über
//! [`Clock::hard_pause`](crate::traits::Clock::hard_pause) und sind unten als eigene Methoden benannt.

use rgb::RGB8;

use crate::config::{
    ALERT_SILENCE_MS, ALERT_TONE_HZ, ALERT_TONE_MS, EXPIRY_TONE_MS, HELMET_FLASH_COUNT,
    HELMET_FLASH_MS, SHOUT_PAUSE_MS, STARTUP_BRIGHTNESS,
};
use crate::countdown::{AlertBand, Countdown, CountdownTick};
use crate::game::{Advance, Game};
use crate::led_effects::{LedEffectEngine, paint_solid, paint_word_hue};
use crate::melody::MelodyPlayer;
use crate::sensors::{SensorAggregator, ShoutGate};
use crate::traits::{Board, ControlChannel, LedError, LedStrip};
use crate::types::{ControlCommand, LogEvent, Notification, Word};

const HELMET_GREEN: RGB8 = RGB8 { r: 0, g: 255, b: 0 };
const OFF: RGB8 = RGB8 { r: 0, g: 0, b: 0 };

/// Gesamter Gerätezustand (eine Session, ein Gerät)
#[derive(Debug, Clone, Default)]
pub struct HelmetGame {
    game: Game,
    countdown: Countdown,
    melody: MelodyPlayer,
    leds: LedEffectEngine,
    sensors: SensorAggregator,
}

impl HelmetGame {
    pub const fn new() -> Self {
        Self {
            game: Game::new(),
            countdown: Countdown::new(),
            melody: MelodyPlayer::new(),
            leds: LedEffectEngine::new(),
            sensors: SensorAggregator::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn melody(&self) -> &MelodyPlayer {
        &self.melody
    }

    pub fn leds(&self) -> &LedEffectEngine {
        &self.leds
    }

    pub fn sensors(&self) -> &SensorAggregator {
        &self.sensors
    }

    /// Einmal nach dem Booten: Strip gedimmt und aus, Anzeige auf 0000,
    /// Drehgeber-Stellung als Nullpunkt übernehmen
    pub fn power_on<B: Board + ?Sized>(&mut self, board: &mut B) {
        board.set_brightness(STARTUP_BRIGHTNESS);
        report_led(paint_solid(board, OFF));
        board.no_tone();
        board.show_number(0);
        self.sensors.zero_rotary(board);
        info!("Game: powered on");
    }

    /// Ein Durchlauf der Hauptschleife
    pub fn tick<B: Board + ?Sized>(&mut self, board: &mut B) {
        while let Some(command) = board.poll_command() {
            self.apply_command(&command, board);
        }

        let now = board.now_ms();
        self.melody.advance(now, self.game.is_running(), board);

        self.poll_rotary(board);
        report_led(self.leds.render(now, self.game.is_running(), board));

        if self.sensors.poll_helmet(board) {
            info!("Game: helmet worn detected");
            board.broadcast(&Notification::Log(LogEvent::HelmetWorn));
            self.flash_helmet(board);
        }

        self.tick_countdown(board);

        let now = board.now_ms();
        if self.sensors.poll_nod(now, self.game.is_running(), board) {
            info!("Game: head nod detected");
            board.broadcast(&Notification::Log(LogEvent::HeadNod));
            self.advance_word(board);
        }

        let gate = ShoutGate {
            game_running: self.game.is_running(),
            timer_running: self.countdown.is_running(),
            has_words: !self.game.words().is_empty(),
        };
        if self.sensors.poll_shout(gate, board) {
            info!("Game: shout detected");
            self.advance_word(board);
            self.pause_after_shout(board);
        }
    }

    /// Wendet ein Kommando vom Dashboard sofort an
    ///
    /// Reihenfolge der Felder: timer, word, remove, melody, start, lighting.
    pub fn apply_command<B: Board + ?Sized>(&mut self, command: &ControlCommand, board: &mut B) {
        debug!("Game: applying command");

        if let Some(secs) = command.timer_secs {
            info!("Game: countdown armed with {}s", secs);
            self.countdown.arm(board.now_ms(), secs);
            board.show_number(secs);
        }

        if let Some(word) = &command.add_word {
            if !self.game.add_word(word.clone()) {
                info!("Game: word list full, dropping '{}'", word.as_str());
            }
        }

        if let Some(word) = &command.remove_word {
            if self.game.remove_word(word.as_str()) {
                warn!("Game: active word removed, ending round");
                self.finish_round(board);
            }
        }

        if let Some(choice) = command.melody {
            info!("Game: melody selected: {}", choice);
            self.melody.select(choice);
        }

        if command.start {
            self.start_round(board);
        }

        if let Some(update) = &command.lighting {
            info!("Game: lighting update, {} colors", update.palette.len());
            self.leds.configure(update);
        }
    }

    fn start_round<B: Board + ?Sized>(&mut self, board: &mut B) {
        let Some(word) = self.game.start().cloned() else {
            info!("Game: start ignored, word list is empty");
            return;
        };

        info!("Game: round started with '{}'", word.as_str());
        announce_word(board, word, 0);
    }

    fn poll_rotary<B: Board + ?Sized>(&mut self, board: &mut B) {
        let Some(delta) = self.sensors.poll_rotary(board) else {
            return;
        };

        if let Some(effect) = self.leds.rotate(delta, self.game.is_running()) {
            info!("Game: LED effect changed to {}", effect.as_str());
            board.broadcast(&Notification::Log(LogEvent::EffectChanged(effect)));
        }
    }

    fn tick_countdown<B: Board + ?Sized>(&mut self, board: &mut B) {
        match self.countdown.tick(board.now_ms()) {
            CountdownTick::Stopped => {}
            CountdownTick::Remaining { secs, alert } => {
                board.show_number(secs);
                if let Some(band) = alert {
                    self.sound_alert(board, band);
                }
            }
            CountdownTick::Expired { beep } => {
                info!("Game: countdown expired");
                self.game.stop();
                self.melody.clear();
                board.no_tone();
                board.show_number(0);
                board.broadcast(&Notification::GameOver);
                report_led(paint_solid(board, AlertBand::Red.color()));
                if beep {
                    self.sound_expiry(board);
                }
            }
        }
    }

    /// Nicken oder Schrei: nächstes Wort oder Rundenende
    fn advance_word<B: Board + ?Sized>(&mut self, board: &mut B) {
        match self.game.advance() {
            Advance::Next { index, word } => {
                info!("Game: next word '{}' ({})", word.as_str(), index);
                announce_word(board, word, index);
            }
            Advance::Finished => {
                info!("Game: word list exhausted");
                self.finish_round(board);
            }
            Advance::Ignored => {}
        }
    }

    /// Rundenende ohne Timeout: Melodie weg, Countdown angehalten, "Game Over"
    fn finish_round<B: Board + ?Sized>(&mut self, board: &mut B) {
        self.game.stop();
        self.melody.clear();
        self.countdown.stop();
        board.no_tone();
        board.broadcast(&Notification::GameOver);
    }

    // ------------------------------------------------------------------------
    // Harte Pausen: blockieren die gesamte Verarbeitung
    // ------------------------------------------------------------------------

    /// Zweimal grün/aus blinken, je 200 ms
    fn flash_helmet<B: Board + ?Sized>(&mut self, board: &mut B) {
        for _ in 0..HELMET_FLASH_COUNT {
            report_led(paint_solid(board, HELMET_GREEN));
            board.hard_pause(HELMET_FLASH_MS);
            report_led(paint_solid(board, OFF));
            board.hard_pause(HELMET_FLASH_MS);
        }
    }

    /// Warnfarbe setzen, 200 ms Ton, 800 ms Stille
    fn sound_alert<B: Board + ?Sized>(&mut self, board: &mut B, band: AlertBand) {
        report_led(paint_solid(board, band.color()));
        board.tone(ALERT_TONE_HZ);
        board.hard_pause(ALERT_TONE_MS);
        board.no_tone();
        board.hard_pause(ALERT_SILENCE_MS);
    }

    /// Einmaliger Ablauf-Ton, 1000 ms
    fn sound_expiry<B: Board + ?Sized>(&mut self, board: &mut B) {
        board.tone(ALERT_TONE_HZ);
        board.hard_pause(EXPIRY_TONE_MS);
        board.no_tone();
    }

    fn pause_after_shout<B: Board + ?Sized>(&mut self, board: &mut B) {
        board.hard_pause(SHOUT_PAUSE_MS);
    }
}

fn announce_word<B: ControlChannel + LedStrip + ?Sized>(board: &mut B, word: Word, index: usize) {
    board.broadcast(&Notification::Word(word));
    report_led(paint_word_hue(board, index));
}

fn report_led(result: Result<(), LedError>) {
    if let Err(e) = result {
        error!("Game: LED strip write failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{
        Accelerometer, Buzzer, Clock, CountdownDisplay, DistanceSensor, Microphone, RotaryEncoder,
        SensorError,
    };
    use crate::types::Acceleration;

    extern crate std;
    use std::vec::Vec;

    /// Minimaler Board-Mock, ausführliche Szenarien liegen in helmet-tests
    #[derive(Default)]
    struct TinyBoard {
        now: u64,
        inbox: Vec<ControlCommand>,
        sent: Vec<Notification>,
        pauses: Vec<u32>,
    }

    impl LedStrip for TinyBoard {
        fn pixel_count(&self) -> usize {
            4
        }
        fn set_pixel(&mut self, _index: usize, _color: RGB8) {}
        fn set_brightness(&mut self, _brightness: u8) {}
        fn show(&mut self) -> Result<(), LedError> {
            Err(LedError::WriteFailed)
        }
    }

    impl Buzzer for TinyBoard {
        fn tone(&mut self, _freq_hz: u32) {}
        fn no_tone(&mut self) {}
    }

    impl CountdownDisplay for TinyBoard {
        fn show_number(&mut self, _value: u32) {}
    }

    impl RotaryEncoder for TinyBoard {
        fn position(&mut self) -> i32 {
            0
        }
    }

    impl DistanceSensor for TinyBoard {
        fn distance_cm(&mut self) -> u32 {
            0
        }
    }

    impl Accelerometer for TinyBoard {
        fn acceleration(&mut self) -> Result<Acceleration, SensorError> {
            Ok(Acceleration::default())
        }
    }

    impl Microphone for TinyBoard {
        fn level(&mut self) -> u16 {
            0
        }
    }

    impl ControlChannel for TinyBoard {
        fn poll_command(&mut self) -> Option<ControlCommand> {
            if self.inbox.is_empty() {
                None
            } else {
                Some(self.inbox.remove(0))
            }
        }
        fn broadcast(&mut self, notification: &Notification) {
            self.sent.push(notification.clone());
        }
    }

    impl Clock for TinyBoard {
        fn now_ms(&self) -> u64 {
            self.now
        }
        fn hard_pause(&mut self, ms: u32) {
            self.pauses.push(ms);
            self.now += ms as u64;
        }
    }

    #[test]
    fn test_led_failure_does_not_stop_the_round() {
        let mut board = TinyBoard::default();
        board.inbox.push(ControlCommand {
            add_word: Some(Word::try_from("cat").unwrap()),
            ..Default::default()
        });
        board.inbox.push(ControlCommand {
            start: true,
            ..Default::default()
        });

        let mut game = HelmetGame::new();
        game.tick(&mut board);

        assert!(game.game().is_running());
        assert_eq!(
            board.sent,
            [Notification::Word(Word::try_from("cat").unwrap())]
        );
    }

    #[test]
    fn test_quiet_tick_has_no_side_effects() {
        let mut board = TinyBoard::default();
        let mut game = HelmetGame::new();
        board.now = 5000;
        game.tick(&mut board);
        assert!(board.sent.is_empty());
        assert!(board.pauses.is_empty());
    }
}
