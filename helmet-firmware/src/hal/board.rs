// HelmetBoard: alle Treiber hinter den helmet-core Traits
//
// Der Scheduler sieht nur `Board`. Jede Trait-Methode delegiert an den
// passenden Treiber; Zeit und harte Pausen kommen von embassy-time.

use defmt::warn;
use embassy_time::{Duration, Instant, block_for};
use esp_hal::Blocking;
use esp_hal::i2c::master::I2c;
use helmet_core::{
    Acceleration, Accelerometer, Buzzer, Clock, ControlChannel, ControlCommand, CountdownDisplay,
    DistanceSensor, LedError, LedStrip, Microphone, Notification, RotaryEncoder, SensorError,
};
use rgb::RGB8;

use super::{AdcMicrophone, LedcBuzzer, Mpu6050, QuadratureEncoder, RmtLedStrip, Sonar, Tm1637};
use crate::{ControlCommandReceiver, NotificationPublisher};

/// Accelerometer am blockierenden I2C0
pub type HelmetImu = Mpu6050<I2c<'static, Blocking>>;

/// Verbindung zwischen Game Loop und WebSocket-Handlern
///
/// Kommandos kommen über den Channel, Benachrichtigungen gehen über
/// den PubSubChannel an alle verbundenen Dashboards.
pub struct ChannelLink {
    commands: ControlCommandReceiver,
    notifications: NotificationPublisher,
}

impl ChannelLink {
    pub fn new(commands: ControlCommandReceiver, notifications: NotificationPublisher) -> Self {
        Self {
            commands,
            notifications,
        }
    }
}

impl ControlChannel for ChannelLink {
    fn poll_command(&mut self) -> Option<ControlCommand> {
        self.commands.try_receive().ok()
    }

    fn broadcast(&mut self, notification: &Notification) {
        // Fire-and-forget: bei vollem Queue fliegt die älteste Nachricht raus
        self.notifications.publish_immediate(notification.clone());
    }
}

pub struct HelmetBoard {
    pub strip: RmtLedStrip<'static>,
    pub buzzer: LedcBuzzer,
    pub display: Tm1637,
    pub encoder: QuadratureEncoder,
    pub sonar: Sonar,
    pub imu: HelmetImu,
    pub mic: AdcMicrophone,
    pub link: ChannelLink,
}

impl LedStrip for HelmetBoard {
    fn pixel_count(&self) -> usize {
        self.strip.pixel_count()
    }

    fn set_pixel(&mut self, index: usize, color: RGB8) {
        self.strip.set_pixel(index, color);
    }

    fn set_brightness(&mut self, brightness: u8) {
        self.strip.set_brightness(brightness);
    }

    fn show(&mut self) -> Result<(), LedError> {
        self.strip.show()
    }
}

impl Buzzer for HelmetBoard {
    fn tone(&mut self, freq_hz: u32) {
        self.buzzer.tone(freq_hz);
    }

    fn no_tone(&mut self) {
        self.buzzer.no_tone();
    }
}

impl CountdownDisplay for HelmetBoard {
    fn show_number(&mut self, value: u32) {
        self.display.show_number(value);
    }
}

impl RotaryEncoder for HelmetBoard {
    fn position(&mut self) -> i32 {
        self.encoder.position()
    }
}

impl DistanceSensor for HelmetBoard {
    fn distance_cm(&mut self) -> u32 {
        self.sonar.distance_cm()
    }
}

impl Accelerometer for HelmetBoard {
    fn acceleration(&mut self) -> Result<Acceleration, SensorError> {
        self.imu.acceleration()
    }
}

impl Microphone for HelmetBoard {
    fn level(&mut self) -> u16 {
        self.mic.level()
    }
}

impl ControlChannel for HelmetBoard {
    fn poll_command(&mut self) -> Option<ControlCommand> {
        self.link.poll_command()
    }

    fn broadcast(&mut self, notification: &Notification) {
        self.link.broadcast(notification);
    }
}

impl Clock for HelmetBoard {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn hard_pause(&mut self, ms: u32) {
        // Blockiert den ganzen Executor, auch WiFi und HTTP
        block_for(Duration::from_millis(ms as u64));
    }
}

/// Loggt einen fehlgeschlagenen I2C-Start, das Spiel läuft ohne Nicken weiter
pub fn report_imu_init(result: Result<(), SensorError>) {
    if let Err(e) = result {
        warn!("Board: MPU6050 wake failed: {}", e);
    }
}
