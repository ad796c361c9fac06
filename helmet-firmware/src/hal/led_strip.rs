// WS2812 LED-Strip über das RMT Peripheral
//
// Pixel werden in einem Framebuffer gesammelt und erst bei show()
// übertragen. Die globale Helligkeit wird beim Übertragen eingerechnet,
// der Framebuffer behält die vollen Farben.

use esp_hal::Blocking;
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::rmt::{PulseCode, Rmt};
use esp_hal::time::Rate;
use esp_hal_smartled::SmartLedsAdapter;
use helmet_core::config::STARTUP_BRIGHTNESS;
use helmet_core::{LedError, LedStrip, scale_brightness};
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::config::{LED_BUFFER_SIZE, LED_COUNT};

/// Real Hardware LED-Strip
///
/// Hinweis: Der RMT-Buffer muss 'static sein, daher wird er in main.rs
/// über eine StaticCell erstellt und als Parameter übergeben.
pub struct RmtLedStrip<'a> {
    led: SmartLedsAdapter<'a, LED_BUFFER_SIZE>,
    pixels: [RGB8; LED_COUNT],
    brightness: u8,
}

impl<'a> RmtLedStrip<'a> {
    /// Erstellt einen neuen RmtLedStrip
    ///
    /// # Parameter
    /// - `pin`: GPIO für die Datenleitung
    /// - `rmt_peripheral`: RMT Peripheral
    /// - `rmt_clock_mhz`: RMT Clock Frequenz in MHz (z.B. 80)
    /// - `buffer`: Buffer für Pulse-Codes (erstellt mit smart_led_buffer! Macro)
    pub fn new(
        pin: impl PeripheralOutput<'a>,
        rmt_peripheral: esp_hal::peripherals::RMT<'a>,
        rmt_clock_mhz: u32,
        buffer: &'a mut [PulseCode; LED_BUFFER_SIZE],
    ) -> Result<Self, esp_hal::rmt::Error> {
        let rmt: Rmt<'a, Blocking> = Rmt::new(rmt_peripheral, Rate::from_mhz(rmt_clock_mhz))?;
        let led = SmartLedsAdapter::new(rmt.channel0, pin, buffer);

        Ok(Self {
            led,
            pixels: [RGB8::default(); LED_COUNT],
            brightness: STARTUP_BRIGHTNESS,
        })
    }
}

impl LedStrip for RmtLedStrip<'_> {
    fn pixel_count(&self) -> usize {
        LED_COUNT
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    fn show(&mut self) -> Result<(), LedError> {
        let brightness = self.brightness;
        self.led
            .write(self.pixels.iter().map(|&color| scale_brightness(color, brightness)))
            .map_err(|_| LedError::WriteFailed)
    }
}
