// Hardware Abstraction Layer (HAL) Module
//
// Ein Treiber pro Bauteil, jeder implementiert einen helmet-core Trait.
// `HelmetBoard` fasst alle zusammen und ist das `Board` des Schedulers.

pub mod board;
pub mod buzzer;
pub mod led_strip;
pub mod microphone;
pub mod mpu6050;
pub mod rotary;
pub mod sonar;
pub mod tm1637;

pub use board::{ChannelLink, HelmetBoard, HelmetImu, report_imu_init};
pub use buzzer::{BuzzerError, LedcBuzzer};
pub use led_strip::RmtLedStrip;
pub use microphone::AdcMicrophone;
pub use mpu6050::Mpu6050;
pub use rotary::QuadratureEncoder;
pub use sonar::Sonar;
pub use tm1637::Tm1637;
