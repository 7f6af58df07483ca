//! IoT Hub connection descriptor.
//!
//! Built from a device or service connection string such as
//!
//! ```text
//! HostName=myhub.azure-devices.net;SharedAccessKeyName=service;SharedAccessKey=...
//! ```
//!
//! and convertible into the [`EventHubConnectionConfig`] used to read from the
//! hub's built-in Event Hubs compatible endpoint.
//!
//! Descriptors arrive either typed (from [`IotHubConnectionConfig::create`]) or
//! as loosely typed JSON records handed over by the owning client's
//! configuration layer. The `*_value` functions accept the latter and coerce
//! scalar fields to strings in place before use.

use crate::config::{defaults, endpoints, fields, keys};
use crate::connection_string;
use crate::error::{Error, Result};
use crate::eventhub::EventHubConnectionConfig;
use crate::validation::{coerce_optional, coerce_required, require, require_non_empty, require_object};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Required descriptor fields, in the order they are checked.
const REQUIRED_FIELDS: [&str; 4] = [
    fields::HOST_NAME,
    fields::ENTITY_PATH,
    fields::SHARED_ACCESS_KEY_NAME,
    fields::SHARED_ACCESS_KEY,
];

/// Parsed IoT Hub connection string.
///
/// Deserialized records go through the same normalization as
/// [`create`](Self::create): `host` is re-derived from `hostName` and an empty
/// `entityPath` falls back to `messages/events`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawIotHubConnectionConfig")]
pub struct IotHubConnectionConfig {
    /// Fully-qualified hub host, e.g. `myhub.azure-devices.net`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    /// First label of `host_name` (`myhub`), empty when `host_name` is absent
    pub host: String,
    /// Raw connection string, kept verbatim
    pub connection_string: String,
    /// Messaging entity path within the hub
    pub entity_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_access_key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// Wire shape of [`IotHubConnectionConfig`] before normalization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIotHubConnectionConfig {
    #[serde(default)]
    host_name: Option<String>,
    #[serde(default)]
    connection_string: String,
    #[serde(default)]
    entity_path: String,
    #[serde(default)]
    shared_access_key_name: Option<String>,
    #[serde(default)]
    shared_access_key: Option<String>,
    #[serde(default)]
    device_id: Option<String>,
}

impl From<RawIotHubConnectionConfig> for IotHubConnectionConfig {
    fn from(raw: RawIotHubConnectionConfig) -> Self {
        let host = raw.host_name.as_deref().map(short_host).unwrap_or_default().to_string();
        let entity_path = if raw.entity_path.is_empty() {
            default_entity_path()
        } else {
            raw.entity_path
        };

        Self {
            host_name: raw.host_name,
            host,
            connection_string: raw.connection_string,
            entity_path,
            shared_access_key_name: raw.shared_access_key_name,
            shared_access_key: raw.shared_access_key,
            device_id: raw.device_id,
        }
    }
}

fn default_entity_path() -> String {
    defaults::ENTITY_PATH.to_string()
}

impl IotHubConnectionConfig {
    /// Parse `connection_string` into a descriptor.
    ///
    /// `path` defaults to `messages/events` when `None` or empty. Required
    /// fields are copied as found; call [`validate`](Self::validate) to check them.
    pub fn create(connection_string: &str, path: Option<&str>) -> Result<Self> {
        require_non_empty(fields::CONNECTION_STRING, connection_string.trim())?;

        let mut parsed = connection_string::parse(connection_string)?;
        let host_name = parsed.remove(keys::HOST_NAME);
        let host = host_name.as_deref().map(short_host).unwrap_or_default().to_string();
        let entity_path = path
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .unwrap_or_else(default_entity_path);

        let config = Self {
            host_name,
            host,
            connection_string: connection_string.to_string(),
            entity_path,
            shared_access_key_name: parsed.remove(keys::SHARED_ACCESS_KEY_NAME),
            shared_access_key: parsed.remove(keys::SHARED_ACCESS_KEY),
            device_id: parsed.remove(keys::DEVICE_ID),
        };

        tracing::debug!(
            host = %config.host,
            entity_path = %config.entity_path,
            device = config.device_id.is_some(),
            "Created IoT Hub connection config"
        );
        Ok(config)
    }

    /// Check that every required field is present and non-empty.
    ///
    /// Fields are checked as `hostName`, `entityPath`, `sharedAccessKeyName`,
    /// `sharedAccessKey`; the first missing one is reported.
    pub fn validate(&self) -> Result<()> {
        self.required().map(|_| ())
    }

    /// Validate a loosely typed descriptor, coercing its fields to strings in place.
    ///
    /// `null` is reported as a missing `config`, any other non-object as a type
    /// mismatch. Numbers and booleans become their string form; `deviceId` is
    /// coerced only when present. Re-validating a coerced record changes nothing.
    pub fn validate_value(config: &mut Value) -> Result<()> {
        let map = require_object(fields::CONFIG, config)?;
        for field in REQUIRED_FIELDS {
            coerce_required(map, field)?;
        }
        coerce_optional(map, fields::DEVICE_ID)?;
        Ok(())
    }

    /// Validate and deserialize a loosely typed descriptor.
    ///
    /// `host` is always derived from `hostName`; any `host` in the record is ignored.
    pub fn from_value(mut value: Value) -> Result<Self> {
        Self::validate_value(&mut value)?;

        let map = require_object(fields::CONFIG, &mut value)?;
        coerce_optional(map, fields::CONNECTION_STRING)?;
        map.retain(|_, v| !v.is_null());

        serde_json::from_value(value)
            .map_err(|e| Error::type_mismatch(fields::CONFIG, format!("IoT Hub connection config ({})", e)))
    }

    /// Remap this descriptor onto the hub's Event Hubs compatible endpoint.
    ///
    /// The resulting `endpoint` is `sb://<hostName>/` and its `host` is the
    /// full `hostName`, not the short label kept in [`host`](Self::host).
    pub fn convert_to_event_hub_config(&self) -> Result<EventHubConnectionConfig> {
        let (host_name, entity_path, key_name, key) = self.required()?;

        tracing::debug!(host = %host_name, entity_path = %entity_path, "Converting IoT Hub config to Event Hubs config");

        EventHubConnectionConfig::create_from_connection_config(EventHubConnectionConfig {
            endpoint: endpoints::service_bus_endpoint(host_name),
            host: host_name.to_string(),
            connection_string: self.connection_string.clone(),
            entity_path: entity_path.to_string(),
            shared_access_key_name: key_name.to_string(),
            shared_access_key: key.to_string(),
        })
    }

    /// [`validate_value`](Self::validate_value) followed by conversion.
    ///
    /// The coercion applied during validation is left on `config`.
    pub fn convert_value(config: &mut Value) -> Result<EventHubConnectionConfig> {
        Self::validate_value(config)?;
        Self::from_value(config.clone())?.convert_to_event_hub_config()
    }

    fn required(&self) -> Result<(&str, &str, &str, &str)> {
        let host_name = require(fields::HOST_NAME, self.host_name.as_deref())?;
        let entity_path = require_non_empty(fields::ENTITY_PATH, &self.entity_path)?;
        let key_name = require(fields::SHARED_ACCESS_KEY_NAME, self.shared_access_key_name.as_deref())?;
        let key = require(fields::SHARED_ACCESS_KEY, self.shared_access_key.as_deref())?;
        Ok((host_name, entity_path, key_name, key))
    }
}

impl fmt::Debug for IotHubConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IotHubConnectionConfig")
            .field("host_name", &self.host_name)
            .field("host", &self.host)
            .field("connection_string", &"<redacted>")
            .field("entity_path", &self.entity_path)
            .field("shared_access_key_name", &self.shared_access_key_name)
            .field("shared_access_key", &self.shared_access_key.as_ref().map(|_| "<redacted>"))
            .field("device_id", &self.device_id)
            .finish()
    }
}

/// `myhub.azure-devices.net` -> `myhub`
fn short_host(host_name: &str) -> &str {
    host_name.split('.').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CS: &str = "HostName=a.b.c;SharedAccessKeyName=k;SharedAccessKey=s";

    #[test]
    fn test_short_host() {
        assert_eq!(short_host("a.b.c"), "a");
        assert_eq!(short_host("single"), "single");
        assert_eq!(short_host(""), "");
    }

    #[test]
    fn test_create_copies_fields() {
        let config = IotHubConnectionConfig::create(CS, None).unwrap();
        assert_eq!(config.host_name.as_deref(), Some("a.b.c"));
        assert_eq!(config.host, "a");
        assert_eq!(config.entity_path, "messages/events");
        assert_eq!(config.shared_access_key_name.as_deref(), Some("k"));
        assert_eq!(config.shared_access_key.as_deref(), Some("s"));
        assert_eq!(config.device_id, None);
        assert_eq!(config.connection_string, CS);
    }

    #[test]
    fn test_create_without_host_name() {
        let config = IotHubConnectionConfig::create("SharedAccessKey=s", None).unwrap();
        assert_eq!(config.host_name, None);
        assert_eq!(config.host, "");
        assert_eq!(config.validate().unwrap_err(), Error::missing("hostName"));
    }

    #[test]
    fn test_create_empty_path_uses_default() {
        let config = IotHubConnectionConfig::create(CS, Some("")).unwrap();
        assert_eq!(config.entity_path, defaults::ENTITY_PATH);
    }

    #[test]
    fn test_required_order() {
        let mut config = IotHubConnectionConfig::create(CS, None).unwrap();
        config.entity_path.clear();
        config.shared_access_key = None;
        assert_eq!(config.validate().unwrap_err(), Error::missing("entityPath"));
    }

    #[test]
    fn test_from_value_fills_host() {
        let config = IotHubConnectionConfig::from_value(json!({
            "hostName": "x.y",
            "entityPath": "p",
            "sharedAccessKeyName": "n",
            "sharedAccessKey": "k",
            "deviceId": null,
        }))
        .unwrap();
        assert_eq!(config.host, "x");
        assert_eq!(config.device_id, None);
        assert_eq!(config.connection_string, "");
    }

    #[test]
    fn test_deserialize_normalizes() {
        let config: IotHubConnectionConfig = serde_json::from_value(json!({
            "hostName": "a.b.c",
            "host": "stale",
            "entityPath": "",
        }))
        .unwrap();
        assert_eq!(config.host, "a");
        assert_eq!(config.entity_path, "messages/events");

        let config: IotHubConnectionConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(config.host, "");
        assert_eq!(config.entity_path, "messages/events");
        assert_eq!(config.validate().unwrap_err(), Error::missing("hostName"));
    }

    #[test]
    fn test_serde_roundtrip_keeps_created_config() {
        let config = IotHubConnectionConfig::create(CS, Some("custom/path")).unwrap();
        let back: IotHubConnectionConfig =
            serde_json::from_value(serde_json::to_value(&config).unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_serde_field_names() {
        let config = IotHubConnectionConfig::create(CS, None).unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["hostName"], "a.b.c");
        assert_eq!(value["entityPath"], "messages/events");
        assert!(value.get("deviceId").is_none());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = IotHubConnectionConfig::create(CS, None).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("SharedAccessKey=s"));
        assert!(printed.contains("<redacted>"));
    }
}
