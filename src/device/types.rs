use std::fmt;

use crate::device::constants::{
    LOW_BATTERY_LEVEL, PRODUCT_FIRMWARE, PRODUCT_NAME, PRODUCT_SERIAL,
};

/// Opaque device identifier, unique within a device collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        DeviceId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryIndicator {
    Normal,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub serial: String,
    pub firmware: String,
    pub battery_level: u8, // [0, 100]
    pub connected: bool,
    pub binding_failed: Option<bool>,
}

impl Device {
    /// A freshly paired NotePins unit, as reported right after a successful connection.
    pub fn paired(id: DeviceId) -> Self {
        Device {
            id,
            name: PRODUCT_NAME.to_string(),
            serial: PRODUCT_SERIAL.to_string(),
            firmware: PRODUCT_FIRMWARE.to_string(),
            battery_level: 100,
            connected: true,
            binding_failed: None,
        }
    }

    fn seed(id: &str, battery_level: u8, connected: bool) -> Self {
        Device {
            battery_level,
            connected,
            ..Device::paired(DeviceId::new(id))
        }
    }

    pub fn is_binding_failed(&self) -> bool {
        self.binding_failed.unwrap_or(false)
    }

    /// The battery indicator is only shown for connected devices, so a disconnected device with an
    /// empty battery has no indicator at all.
    pub fn battery_indicator(&self) -> Option<BatteryIndicator> {
        if !self.connected {
            return None;
        }

        if self.battery_level > LOW_BATTERY_LEVEL {
            Some(BatteryIndicator::Normal)
        } else {
            Some(BatteryIndicator::Low)
        }
    }
}

/// Devices that are known when the application starts, in display order.
pub fn seed_devices() -> Vec<Device> {
    vec![
        Device::seed("1", 80, true),
        Device::seed("2", 15, true),
        Device::seed("3", 0, false),
    ]
}

/// A card that demonstrates the binding failed presentation. It is not part of the device
/// collection.
pub fn binding_failed_sample() -> Device {
    Device {
        binding_failed: Some(true),
        ..Device::seed("failed-sample", 0, false)
    }
}
