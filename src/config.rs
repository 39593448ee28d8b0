use std::env;

/// Application configuration, built once at startup from environment
/// variables and injected into the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Deployment environment name ("DEV" or "PROD").
    pub env: String,
    pub database_url: String,
    /// Lifetime of issued access tokens, in minutes.
    pub access_token_expire_minutes: i64,
    /// Secret key used to sign and verify access tokens.
    pub secret_key: String,
    /// Signing algorithm identifier (e.g. "HS256").
    pub algorithm: String,
    pub server_port: u16,
    pub server_host: String,
}

impl Config {
    pub fn from_env() -> Self {
        let env_name = env::var("ENV").unwrap_or_else(|_| "DEV".to_string());
        // PROD deployments read a separate connection string.
        let database_url = if env_name == "PROD" {
            env::var("PROD_DATABASE_URL").expect("PROD_DATABASE_URL must be set")
        } else {
            env::var("DATABASE_URL").expect("DATABASE_URL must be set")
        };

        Self {
            env: env_name,
            database_url,
            access_token_expire_minutes: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or_else(|_| "60".to_string())
                .parse()
                .expect("ACCESS_TOKEN_EXPIRE_MINUTES must be a number"),
            secret_key: env::var("SECRET_KEY").expect("SECRET_KEY must be set"),
            algorithm: env::var("ALGORITHM").unwrap_or_else(|_| "HS256".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("SERVER_PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
