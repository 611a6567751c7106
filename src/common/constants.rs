//! Application-wide constants: defaults, validation limits and wire formats.

// # Temperature Defaults

/// Color temperature held across the midday plateau (Kelvin).
pub const DEFAULT_DAY_TEMP: u32 = 6000;

/// Color temperature outside the civil twilight window (Kelvin).
pub const DEFAULT_NIGHT_TEMP: u32 = 2700;

pub const MINIMUM_TEMP: u32 = 1000;
pub const MAXIMUM_TEMP: u32 = 20000;

// # Provider Defaults

pub const DEFAULT_API_BASE_URL: &str = "https://api.sunrise-sunset.org/json";

/// Seconds to wait for the sun-times provider before giving up.
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 20;
pub const MINIMUM_REQUEST_TIMEOUT: u64 = 1;
pub const MAXIMUM_REQUEST_TIMEOUT: u64 = 120;

/// Time-of-day format used by sunrise-sunset.org, e.g. `6:04:12 AM`.
pub const PROVIDER_TIME_FORMAT: &str = "%I:%M:%S %p";

/// 24-hour fallback accepted on the command line, e.g. `18:30:00`.
pub const CLOCK_TIME_FORMAT: &str = "%H:%M:%S";

/// Response keys read from the provider payload.
pub const KEY_SUNRISE: &str = "sunrise";
pub const KEY_SUNSET: &str = "sunset";
pub const KEY_TWILIGHT_BEGIN: &str = "civil_twilight_begin";
pub const KEY_TWILIGHT_END: &str = "civil_twilight_end";

// # Mock Provider Phases (UTC, 24-hour)

pub const MOCK_TWILIGHT_BEGIN: (u32, u32) = (5, 30);
pub const MOCK_SUNRISE: (u32, u32) = (6, 0);
pub const MOCK_SUNSET: (u32, u32) = (18, 0);
pub const MOCK_TWILIGHT_END: (u32, u32) = (18, 30);

// # Server Defaults

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const TEMPERATURE_ROUTE: &str = "/night-time-temperature";

// # Configuration

pub const CONFIG_DIR_NAME: &str = "nighttemp";
pub const CONFIG_FILE_NAME: &str = "nighttemp.toml";

/// Environment variable selecting the `dev` or `pr` profile.
pub const PROFILE_ENV_VAR: &str = "PROFILE";

// # Coordinate Limits

pub const MINIMUM_LATITUDE: f64 = -90.0;
pub const MAXIMUM_LATITUDE: f64 = 90.0;
pub const MINIMUM_LONGITUDE: f64 = -180.0;
pub const MAXIMUM_LONGITUDE: f64 = 180.0;

// # Exit Codes

pub const EXIT_FAILURE: i32 = 1;
