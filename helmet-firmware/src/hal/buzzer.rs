// Passiver Buzzer über LEDC PWM
//
// Ein Kanal an Timer0. Für jeden Ton wird nur die Timer-Frequenz neu
// gesetzt, der Kanal bleibt verbunden. Stille = Tastverhältnis 0.

use defmt::{Debug2Format, warn};
use esp_hal::gpio::DriveMode;
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::ledc::channel::{self, ChannelIFace};
use esp_hal::ledc::timer::{self, TimerIFace};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::time::Rate;
use helmet_core::Buzzer;
use static_cell::StaticCell;

use crate::config::BUZZER_DUTY_PCT;

/// Frequenz, mit der Timer0 beim Booten konfiguriert wird
const IDLE_FREQUENCY_HZ: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum BuzzerError {
    Timer,
    Channel,
}

fn timer_config(freq_hz: u32) -> timer::config::Config {
    timer::config::Config {
        // 13 Bit: bei 80 MHz APB reicht das von ~10 Hz bis ~9.7 kHz
        duty: timer::config::Duty::Duty13Bit,
        clock_source: timer::LSClockSource::APBClk,
        frequency: Rate::from_hz(freq_hz),
    }
}

pub struct LedcBuzzer {
    ledc: &'static Ledc<'static>,
    channel: channel::Channel<'static, LowSpeed>,
}

impl LedcBuzzer {
    /// Initialisiert LEDC, Timer0 und Kanal 0 (darf nur einmal aufgerufen werden)
    pub fn new(
        ledc_peripheral: esp_hal::peripherals::LEDC<'static>,
        pin: impl PeripheralOutput<'static>,
    ) -> Result<Self, BuzzerError> {
        static LEDC: StaticCell<Ledc<'static>> = StaticCell::new();
        static TIMER: StaticCell<timer::Timer<'static, LowSpeed>> = StaticCell::new();

        let ledc = LEDC.init(Ledc::new(ledc_peripheral));
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);
        let ledc: &'static Ledc<'static> = ledc;

        let timer = TIMER.init(ledc.timer::<LowSpeed>(timer::Number::Timer0));
        timer
            .configure(timer_config(IDLE_FREQUENCY_HZ))
            .map_err(|_| BuzzerError::Timer)?;

        let mut channel = ledc.channel(channel::Number::Channel0, pin);
        channel
            .configure(channel::config::Config {
                timer: &*timer,
                duty_pct: 0,
                drive_mode: DriveMode::PushPull,
            })
            .map_err(|_| BuzzerError::Channel)?;

        Ok(Self { ledc, channel })
    }
}

impl Buzzer for LedcBuzzer {
    fn tone(&mut self, freq_hz: u32) {
        // Zweites Handle auf denselben Hardware-Timer, der Kanal hält das erste
        let mut timer = self.ledc.timer::<LowSpeed>(timer::Number::Timer0);
        if let Err(e) = timer.configure(timer_config(freq_hz)) {
            warn!("Buzzer: {} Hz not reachable: {}", freq_hz, Debug2Format(&e));
            return;
        }

        if let Err(e) = self.channel.set_duty(BUZZER_DUTY_PCT) {
            warn!("Buzzer: set duty failed: {}", Debug2Format(&e));
        }
    }

    fn no_tone(&mut self) {
        if let Err(e) = self.channel.set_duty(0) {
            warn!("Buzzer: mute failed: {}", Debug2Format(&e));
        }
    }
}
