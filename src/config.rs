use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub http_host: String,
    pub http_port: u16,
    pub jwt: JwtConfig,
    pub password_min_len: usize,
    pub mood_description_max: usize,
    pub mood_emotions_max: usize,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            cookie_name: std::env::var("JWT_COOKIE_NAME")
                .unwrap_or_else(|_| "access_token".into()),
            cookie_secure: std::env::var("JWT_COOKIE_SECURE")
                .map(|v| v == "true")
                .unwrap_or(false),
            ttl_days: std::env::var("JWT_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(30),
        };
        Ok(Self {
            database_url,
            http_host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            jwt,
            password_min_len: std::env::var("PASSWORD_LENGTH_MIN")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(8),
            mood_description_max: std::env::var("MOOD_DESC_LENGTH_MAX")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(2000),
            mood_emotions_max: std::env::var("MOOD_EMOTIONS_LENGTH_MAX")
                .ok()
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(200),
        })
    }
}
