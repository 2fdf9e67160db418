use stockroom_core::DuplicateLocationPolicy;

/// Process configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub jwt_secret: String,
    pub duplicate_location_policy: DuplicateLocationPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let duplicate_location_policy = std::env::var("DUPLICATE_LOCATION_POLICY")
            .ok()
            .and_then(|value| DuplicateLocationPolicy::parse(&value))
            .unwrap_or_default();

        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string()),
            mongodb_db: std::env::var("MONGODB_DB").unwrap_or_else(|_| "stockroom".to_string()),
            jwt_secret,
            duplicate_location_policy,
        }
    }
}
