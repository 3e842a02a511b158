use super::RequestsLoggingLevel;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub bind_address: String,
    pub port: u16,
    /// Number of artists returned by the top-length ranking when the
    /// request does not say.
    pub default_top_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            bind_address: "127.0.0.1".to_string(),
            port: 3001,
            default_top_length: 10,
        }
    }
}
