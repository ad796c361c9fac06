// MPU6050 Beschleunigungssensor über I2C
//
// Generisch über embedded_hal::i2c::I2c, damit der Treiber nicht an
// einen bestimmten Bus-Typ gebunden ist.

use embedded_hal::i2c::I2c;
use helmet_core::{Acceleration, Accelerometer, SensorError};

/// Standard-Adresse (AD0 auf GND)
pub const MPU6050_ADDRESS: u8 = 0x68;

const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_ACCEL_XOUT_H: u8 = 0x3B;

pub struct Mpu6050<I> {
    i2c: I,
    address: u8,
}

impl<I: I2c> Mpu6050<I> {
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            address: MPU6050_ADDRESS,
        }
    }

    /// Weckt den Sensor aus dem Sleep-Modus (interner Oszillator, ±2 g)
    pub fn wake(&mut self) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &[REG_PWR_MGMT_1, 0x00])
            .map_err(|_| SensorError::Bus)
    }
}

impl<I: I2c> Accelerometer for Mpu6050<I> {
    fn acceleration(&mut self) -> Result<Acceleration, SensorError> {
        let mut raw = [0u8; 6];
        self.i2c
            .write_read(self.address, &[REG_ACCEL_XOUT_H], &mut raw)
            .map_err(|_| SensorError::Bus)?;

        Ok(Acceleration {
            x: i16::from_be_bytes([raw[0], raw[1]]),
            y: i16::from_be_bytes([raw[2], raw[3]]),
            z: i16::from_be_bytes([raw[4], raw[5]]),
        })
    }
}
