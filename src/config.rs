use std::env;
use dotenvy::dotenv;
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,

    /// Fixed office UTC offset in minutes; +330 is UTC+05:30
    pub tz_offset_minutes: i32,

    // Rate limiting
    pub rate_protected_per_min: u32,
    pub rate_workmode_per_min: u32,

    pub api_prefix: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_addr: env::var("SERVER_ADDR").expect("SERVER_ADDR must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),

            tz_offset_minutes: env::var("TZ_OFFSET_MINUTES")
                .unwrap_or_else(|_| "330".to_string()) // default UTC+05:30
                .parse()
                .unwrap(),

            rate_protected_per_min: env::var("RATE_PROTECTED_PER_MIN")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .unwrap(),
            rate_workmode_per_min: env::var("RATE_WORKMODE_PER_MIN")
                .unwrap_or_else(|_| "120".to_string())
                .parse()
                .unwrap(),

            api_prefix: env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string()),
        }
    }
}
