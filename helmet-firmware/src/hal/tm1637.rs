// TM1637 4-stellige 7-Segment-Anzeige (bit-banged)
//
// Zweidraht-Protokoll ähnlich I2C, aber LSB zuerst und ohne Adresse.
// Das ACK-Bit wird getaktet aber nicht ausgewertet.

use esp_hal::delay::Delay;
use esp_hal::gpio::{DriveMode, Level, Output, OutputConfig, OutputPin, Pull};
use helmet_core::CountdownDisplay;

/// Daten schreiben, Adresse automatisch erhöhen
const CMD_DATA_AUTO_INCREMENT: u8 = 0x40;
/// Startadresse = erste Stelle
const CMD_ADDRESS_FIRST_DIGIT: u8 = 0xC0;
/// Anzeige an, untere 3 Bit = Helligkeit
const CMD_DISPLAY_ON: u8 = 0x88;

/// Segmente a-g für die Ziffern 0-9
const DIGIT_SEGMENTS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

const BIT_DELAY_US: u32 = 5;

/// Zerlegt einen Wert in 4 Stellen mit führenden Nullen (gekappt bei 9999)
fn encode_digits(value: u32) -> [u8; 4] {
    let mut value = value.min(9999);
    let mut segments = [0u8; 4];
    for slot in segments.iter_mut().rev() {
        *slot = DIGIT_SEGMENTS[(value % 10) as usize];
        value /= 10;
    }
    segments
}

pub struct Tm1637 {
    clk: Output<'static>,
    dio: Output<'static>,
    brightness: u8,
    delay: Delay,
}

impl Tm1637 {
    pub fn new(
        clk: impl OutputPin + 'static,
        dio: impl OutputPin + 'static,
        brightness: u8,
    ) -> Self {
        let open_drain = OutputConfig::default()
            .with_drive_mode(DriveMode::OpenDrain)
            .with_pull(Pull::Up);

        Self {
            clk: Output::new(clk, Level::High, open_drain),
            dio: Output::new(dio, Level::High, open_drain),
            brightness: brightness & 0x07,
            delay: Delay::new(),
        }
    }

    fn bit_delay(&self) {
        self.delay.delay_micros(BIT_DELAY_US);
    }

    fn start(&mut self) {
        self.dio.set_low();
        self.bit_delay();
    }

    fn stop(&mut self) {
        self.dio.set_low();
        self.bit_delay();
        self.clk.set_high();
        self.bit_delay();
        self.dio.set_high();
        self.bit_delay();
    }

    fn write_byte(&mut self, byte: u8) {
        for bit in 0..8 {
            self.clk.set_low();
            self.bit_delay();
            self.dio.set_level(Level::from(byte & (1 << bit) != 0));
            self.bit_delay();
            self.clk.set_high();
            self.bit_delay();
        }

        // ACK-Takt, DIO freigeben
        self.clk.set_low();
        self.dio.set_high();
        self.bit_delay();
        self.clk.set_high();
        self.bit_delay();
        self.clk.set_low();
        self.bit_delay();
    }

    fn command(&mut self, bytes: &[u8]) {
        self.start();
        for &byte in bytes {
            self.write_byte(byte);
        }
        self.stop();
    }

    pub fn show_segments(&mut self, segments: [u8; 4]) {
        self.command(&[CMD_DATA_AUTO_INCREMENT]);
        self.command(&[
            CMD_ADDRESS_FIRST_DIGIT,
            segments[0],
            segments[1],
            segments[2],
            segments[3],
        ]);
        self.command(&[CMD_DISPLAY_ON | self.brightness]);
    }
}

impl CountdownDisplay for Tm1637 {
    fn show_number(&mut self, value: u32) {
        self.show_segments(encode_digits(value));
    }
}
