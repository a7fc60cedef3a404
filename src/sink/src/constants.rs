pub const HONEYCOMB_DATASET_ENV: &str = "HONEYCOMB_DATASET";
pub const HONEYCOMB_API_KEY_ENV: &str = "HONEYCOMB_API_KEY";

pub const HONEYCOMB_API_HOST: &str = "https://api.honeycomb.io:443";
pub const HONEYCOMB_EVENTS_PATH: &str = "/1/events/";
pub const HONEYCOMB_TEAM_HEADER: &str = "X-Honeycomb-Team";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_FUNCTION_TARGET: &str = "HoneycombSinkHandler";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const EVENT_ENDPOINT: &str = "/";
