// Analoges Mikrofon an ADC1

use defmt::warn;
use esp_hal::Blocking;
use esp_hal::analog::adc::{Adc, AdcConfig, AdcPin, Attenuation};
use esp_hal::peripherals::{ADC1, GPIO5};
use helmet_core::Microphone;

pub struct AdcMicrophone {
    adc: Adc<'static, ADC1<'static>, Blocking>,
    pin: AdcPin<GPIO5<'static>, ADC1<'static>>,
}

impl AdcMicrophone {
    pub fn new(adc: ADC1<'static>, pin: GPIO5<'static>) -> Self {
        let mut config = AdcConfig::new();
        // 11 dB: voller Bereich bis ~3.1 V
        let pin = config.enable_pin(pin, Attenuation::_11dB);

        Self {
            adc: Adc::new(adc, config),
            pin,
        }
    }
}

impl Microphone for AdcMicrophone {
    fn level(&mut self) -> u16 {
        match nb::block!(self.adc.read_oneshot(&mut self.pin)) {
            Ok(level) => level,
            Err(()) => {
                warn!("Mic: ADC read failed");
                0
            }
        }
    }
}
