use std::net::{IpAddr, SocketAddr};

use envconfig::Envconfig;
use sqlx::mysql::MySqlConnectOptions;

/// Runtime settings, read from the process environment (and `.env` if present).
#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    #[envconfig(from = "DB_HOST", default = "localhost")]
    pub db_host: String,

    #[envconfig(from = "DB_PORT", default = "3306")]
    pub db_port: u16,

    #[envconfig(from = "DB_USER", default = "root")]
    pub db_user: String,

    #[envconfig(from = "DB_PASS", default = "")]
    pub db_pass: String,

    #[envconfig(from = "DB_NAME", default = "clinic")]
    pub db_name: String,

    #[envconfig(from = "DB_POOL_SIZE", default = "10")]
    pub db_pool_size: u32,

    /// Six-field cron expression (seconds first) driving the pool keepalive.
    #[envconfig(from = "KEEPALIVE_SCHEDULE", default = "0 */5 * * * *")]
    pub keepalive_schedule: String,

    #[envconfig(from = "LISTEN_HOST", default = "0.0.0.0")]
    pub host: IpAddr,

    #[envconfig(from = "PORT", default = "3000")]
    pub port: u16,
}

impl Config {
    /// Connection options for the server itself, without selecting a database.
    pub fn server_options(&self) -> MySqlConnectOptions {
        let options = MySqlConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user);

        if self.db_pass.is_empty() {
            options
        } else {
            options.password(&self.db_pass)
        }
    }

    /// Connection options pointing at the application database.
    pub fn database_options(&self) -> MySqlConnectOptions {
        self.server_options().database(&self.db_name)
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = Config::init_from_hashmap(&HashMap::new()).unwrap();

        assert_eq!(config.db_host, "localhost");
        assert_eq!(config.db_port, 3306);
        assert_eq!(config.db_pool_size, 10);
        assert_eq!(config.port, 3000);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn overrides_are_read_from_the_environment() {
        let vars = HashMap::from([
            ("DB_HOST".to_string(), "db.internal".to_string()),
            ("DB_NAME".to_string(), "intake".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("LISTEN_HOST".to_string(), "127.0.0.1".to_string()),
        ]);
        let config = Config::init_from_hashmap(&vars).unwrap();

        assert_eq!(config.db_host, "db.internal");
        assert_eq!(config.db_name, "intake");
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn rejects_non_numeric_port() {
        let vars = HashMap::from([("PORT".to_string(), "http".to_string())]);
        assert!(Config::init_from_hashmap(&vars).is_err());
    }
}
