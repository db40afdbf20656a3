/**
 * How long (milliseconds) a simulated search takes before its outcome is drawn.
 */
pub const SEARCH_DELAY: u64 = 3000;

/**
 * How long (milliseconds) a simulated connection attempt takes before its outcome is drawn.
 */
pub const CONNECT_DELAY: u64 = 2500;

/**
 * How long (milliseconds) the success screen is shown before returning to the device list.
 */
pub const SUCCESS_DELAY: u64 = 2000;

/**
 * A draw in [0, 1) strictly above this value is a success, anything else is a failure.
 */
pub const SUCCESS_THRESHOLD: f64 = 0.3;

/**
 * Battery levels at or below this percentage show the low battery warning.
 */
pub const LOW_BATTERY_LEVEL: u8 = 20;

pub const PRODUCT_NAME: &str = "Memoket NotePins";
pub const PRODUCT_SERIAL: &str = "84748595976";
pub const PRODUCT_FIRMWARE: &str = "0207";
