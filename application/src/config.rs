//! [`Config`]-related definitions.

use std::{num::NonZeroU32, time};

use common::poll;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::Deserialize;
use service::{
    domain::session,
    infra::{parking::paybyphone, texting::textbelt},
};
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// [PayByPhone] configuration.
    ///
    /// [PayByPhone]: https://www.paybyphone.com
    pub paybyphone: PayByPhone,

    /// [Textbelt] configuration.
    ///
    /// [Textbelt]: https://textbelt.com
    #[serde(default)]
    pub textbelt: Textbelt,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing optional fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }

    /// Returns [`service::Config`] described by this [`Config`].
    #[must_use]
    pub fn service(&self) -> service::Config {
        service::Config {
            target: self.paybyphone.target(),
            workflow: self.paybyphone.workflow.into(),
            delivery: self.textbelt.delivery.into(),
        }
    }
}

/// [PayByPhone] configuration.
///
/// [PayByPhone]: https://www.paybyphone.com
#[derive(Clone, Debug, Deserialize)]
pub struct PayByPhone {
    /// License plate of the parked vehicle.
    pub plate_nr: String,

    /// Zip code of the parking zone, used as its location ID.
    pub zip_code: String,

    /// ID of the (free) rate option to park with.
    pub rate_option: String,

    /// Login of the user.
    pub username: String,

    /// Password of the user.
    pub password: String,

    /// API configuration.
    #[serde(default)]
    pub api: Api,

    /// Session workflow polling configuration.
    #[serde(default)]
    pub workflow: Workflow,
}

impl PayByPhone {
    /// Returns the [`session::Target`] every session is taken for.
    #[must_use]
    pub fn target(&self) -> session::Target {
        session::Target {
            license_plate: self.plate_nr.clone().into(),
            location_id: self.zip_code.clone().into(),
            rate_option_id: self.rate_option.clone().into(),
        }
    }

    /// Returns [`paybyphone::Credentials`] of the user.
    #[must_use]
    pub fn credentials(&self) -> paybyphone::Credentials {
        paybyphone::Credentials {
            username: self.username.clone(),
            password: SecretString::from(self.password.clone()),
        }
    }
}

/// [PayByPhone] API configuration.
///
/// [PayByPhone]: https://www.paybyphone.com
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Root URL of the authentication API.
    #[default("https://auth.paybyphoneapis.com".to_owned())]
    pub auth_root: String,

    /// Root URL of the consumer API.
    #[default("https://consumer.paybyphoneapis.com".to_owned())]
    pub api_root: String,

    /// Timeout of the authentication request.
    #[default(time::Duration::from_secs(2))]
    #[serde(with = "humantime_serde")]
    pub auth_timeout: time::Duration,

    /// Timeout of a single API request.
    #[default(time::Duration::from_secs(5))]
    #[serde(with = "humantime_serde")]
    pub request_timeout: time::Duration,
}

impl From<Api> for paybyphone::Config {
    fn from(value: Api) -> Self {
        let Api {
            auth_root,
            api_root,
            auth_timeout,
            request_timeout,
        } = value;
        Self {
            auth_root,
            api_root,
            auth_timeout,
            request_timeout,
        }
    }
}

/// Session workflow polling configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Workflow {
    /// Pause between two status checks.
    #[default(time::Duration::from_secs(1))]
    #[serde(with = "humantime_serde")]
    pub interval: time::Duration,

    /// Maximum number of status checks.
    ///
    /// `null` (or `0`) waits forever.
    #[default(Some(300))]
    pub max_attempts: Option<u32>,
}

impl From<Workflow> for poll::Policy {
    fn from(value: Workflow) -> Self {
        let Workflow {
            interval,
            max_attempts,
        } = value;
        Self {
            interval,
            max_attempts: max_attempts.and_then(NonZeroU32::new),
            timeout: None,
        }
    }
}

/// [Textbelt] configuration.
///
/// [Textbelt]: https://textbelt.com
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Textbelt {
    /// Indicator whether to send a text message once a session is booked.
    pub notify: bool,

    /// Own API key, used for quota lookups.
    pub key: Option<String>,

    /// Phone number to notify.
    pub number: Option<String>,

    /// Content of the notification.
    #[default("Parking ticket booked for today!".to_owned())]
    pub message: String,

    /// Root URL of the API.
    #[default("https://textbelt.com".to_owned())]
    pub root: String,

    /// Key messages are sent with.
    #[default("textbelt".to_owned())]
    pub sending_key: String,

    /// Timeout of a single API request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,

    /// Delivery waiting configuration.
    pub delivery: Delivery,
}

impl Textbelt {
    /// Returns the own API key, if any.
    #[must_use]
    pub fn key(&self) -> Option<SecretString> {
        self.key.clone().map(SecretString::from)
    }
}

impl From<&Textbelt> for textbelt::Config {
    fn from(value: &Textbelt) -> Self {
        Self {
            root: value.root.clone(),
            sending_key: value.sending_key.clone(),
            timeout: value.timeout,
        }
    }
}

/// Text message delivery waiting configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Delivery {
    /// How long to wait for the delivery.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,

    /// Pause between two status checks.
    #[default(time::Duration::from_millis(500))]
    #[serde(with = "humantime_serde")]
    pub interval: time::Duration,
}

impl From<Delivery> for poll::Policy {
    fn from(value: Delivery) -> Self {
        let Delivery { timeout, interval } = value;
        Self {
            interval,
            max_attempts: None,
            timeout: Some(timeout),
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
