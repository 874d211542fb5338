use serde::Deserialize;

/// Gateway configuration, loaded once at startup.
///
/// Sources, in order of precedence:
/// 1. `LISTEN` environment variable (address override)
/// 2. YAML file pointed at by `PORTICO_CONFIG`
/// 3. Built-in defaults
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the accept loop binds to, e.g. "127.0.0.1:8080".
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut cfg = match std::env::var("PORTICO_CONFIG") {
            Ok(path) => match std::fs::read_to_string(&path) {
                Ok(raw) => Self::from_yaml(&raw).unwrap_or_else(|e| {
                    tracing::warn!("Invalid config file {}: {}", path, e);
                    Self::default()
                }),
                Err(e) => {
                    tracing::warn!("Cannot read config file {}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }

        cfg
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// The static host/port identity advertised to applications.
    pub fn identity(&self) -> ServerIdentity {
        ServerIdentity::from_addr(&self.server.listen_addr)
    }
}

/// Static server identity configured at bind time and reported to every
/// application through the environment.
#[derive(Clone, Debug, PartialEq)]
pub struct ServerIdentity {
    pub name: String,
    pub port: u16,
}

impl ServerIdentity {
    pub fn from_addr(addr: &str) -> Self {
        match addr.rsplit_once(':') {
            Some((host, port)) => Self {
                name: host.to_string(),
                port: port.parse().unwrap_or(80),
            },
            None => Self {
                name: addr.to_string(),
                port: 80,
            },
        }
    }
}
