//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `roomhub.toml` in the working directory. Every field has a
//! sensible default so the file is optional; the default room table mirrors
//! a two-room demo flat. Environment variables take precedence over file
//! values.

use std::time::Duration;

use serde::Deserialize;

use roomhub_app::registry::StatusLeds;
use roomhub_domain::error::RoomHubError;
use roomhub_domain::room::{
    ClimateWiring, InputPin, OutputPin, PwmChannel, Room, RoomId, SensorId,
};

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Static UI bundle location.
    pub ui: UiConfig,
    /// Task intervals.
    pub poll: PollConfig,
    /// System-status LED pins.
    pub leds: LedConfig,
    /// Room wiring table; index = room id.
    pub rooms: Vec<RoomConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Static asset configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Directory served for non-API routes.
    pub static_dir: String,
}

/// Task interval configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Switch poller tick (milliseconds).
    pub switch_ms: u64,
    /// Thermostat poller tick (seconds).
    pub thermostat_secs: u64,
    /// Power LED blink half-period (seconds).
    pub heartbeat_secs: u64,
    /// Web notifier idle wait (milliseconds).
    pub notifier_idle_ms: u64,
}

/// System-status LED pin assignment.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LedConfig {
    pub power: u8,
    pub info: u8,
    pub error: u8,
}

/// One room's wiring. Exactly one of `pwm_channel` and `light_pin` must be
/// set; the builder rejects everything else.
#[derive(Debug, Deserialize)]
pub struct RoomConfig {
    pub name: String,
    pub switch_pin: u8,
    /// Dimmable output: PWM channel number.
    pub pwm_channel: Option<u8>,
    /// Dimmable output: PWM period.
    #[serde(default = "default_pwm_period")]
    pub pwm_period: u32,
    /// Binary output pin.
    pub light_pin: Option<u8>,
    /// Percentage of the period applied when the switch turns on.
    #[serde(default = "default_light_percent")]
    pub light_percent: u32,
    /// Climate sensor id; requires `relay_pin`.
    pub sensor: Option<u8>,
    /// Heat relay output pin; requires `sensor`.
    pub relay_pin: Option<u8>,
    #[serde(default = "default_desired_temp")]
    pub desired_temp: i32,
    #[serde(default = "default_deadband")]
    pub deadband: i32,
}

fn default_pwm_period() -> u32 {
    20_000
}

fn default_light_percent() -> u32 {
    50
}

fn default_desired_temp() -> i32 {
    21
}

fn default_deadband() -> i32 {
    1
}

impl Config {
    /// Load configuration from `roomhub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is semantically invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("roomhub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("ROOMHUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("ROOMHUB_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("ROOMHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("ROOMHUB_STATIC_DIR") {
            self.ui.static_dir = val;
        }
        if let Ok(val) = std::env::var("ROOMHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.rooms.is_empty() {
            return Err(ConfigError::Validation(
                "at least one room must be configured".to_string(),
            ));
        }
        if self.poll.switch_ms == 0 || self.poll.thermostat_secs == 0 {
            return Err(ConfigError::Validation(
                "poll intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Status LED pins as the registry expects them.
    #[must_use]
    pub fn status_leds(&self) -> StatusLeds {
        StatusLeds {
            power: OutputPin(self.leds.power),
            info: OutputPin(self.leds.info),
            error: OutputPin(self.leds.error),
        }
    }

    /// Build the room table from the `[[rooms]]` entries.
    ///
    /// # Errors
    ///
    /// Returns [`RoomHubError::Validation`] when an entry breaks a room
    /// invariant (no light output, both outputs, empty name, …).
    pub fn build_rooms(&self) -> Result<Vec<Room>, RoomHubError> {
        self.rooms
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let mut builder = Room::builder()
                    .id(RoomId(u8::try_from(index).unwrap_or(u8::MAX)))
                    .name(entry.name.as_str())
                    .light_switch(InputPin(entry.switch_pin))
                    .light_percent(entry.light_percent)
                    .desired_temperature(entry.desired_temp)
                    .deadband(entry.deadband);
                if let Some(channel) = entry.pwm_channel {
                    builder = builder.dimmable_output(PwmChannel {
                        channel,
                        period: entry.pwm_period,
                    });
                }
                if let Some(pin) = entry.light_pin {
                    builder = builder.binary_output(OutputPin(pin));
                }
                if let (Some(sensor), Some(relay)) = (entry.sensor, entry.relay_pin) {
                    builder = builder.climate(ClimateWiring {
                        sensor: SensorId(sensor),
                        heat_relay: OutputPin(relay),
                    });
                }
                builder.build()
            })
            .collect()
    }

    /// Switch poller tick interval.
    #[must_use]
    pub fn switch_interval(&self) -> Duration {
        Duration::from_millis(self.poll.switch_ms)
    }

    /// Thermostat poller tick interval.
    #[must_use]
    pub fn thermostat_interval(&self) -> Duration {
        Duration::from_secs(self.poll.thermostat_secs)
    }

    /// Heartbeat blink interval.
    #[must_use]
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.poll.heartbeat_secs)
    }

    /// Web notifier idle wait.
    #[must_use]
    pub fn notifier_idle(&self) -> Duration {
        Duration::from_millis(self.poll.notifier_idle_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            ui: UiConfig::default(),
            poll: PollConfig::default(),
            leds: LedConfig::default(),
            rooms: vec![
                RoomConfig {
                    name: "Living Room".to_string(),
                    switch_pin: 4,
                    pwm_channel: Some(0),
                    pwm_period: default_pwm_period(),
                    light_pin: None,
                    light_percent: default_light_percent(),
                    sensor: Some(0),
                    relay_pin: Some(10),
                    desired_temp: default_desired_temp(),
                    deadband: default_deadband(),
                },
                RoomConfig {
                    name: "Kitchen".to_string(),
                    switch_pin: 5,
                    pwm_channel: None,
                    pwm_period: default_pwm_period(),
                    light_pin: Some(3),
                    light_percent: default_light_percent(),
                    sensor: None,
                    relay_pin: None,
                    desired_temp: default_desired_temp(),
                    deadband: default_deadband(),
                },
            ],
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "roomhubd=info,roomhub_app=info,roomhub_adapter_http_axum=info,tower_http=debug"
                .to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            switch_ms: 200,
            thermostat_secs: 10,
            heartbeat_secs: 2,
            notifier_idle_ms: 100,
        }
    }
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            power: 0,
            info: 1,
            error: 2,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
