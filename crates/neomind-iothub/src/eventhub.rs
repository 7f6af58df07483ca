//! Event Hubs connection descriptor.
//!
//! This is the shape consumed by the Event Hubs client. IoT Hub descriptors
//! are converted into it, and it can also be built directly from an Event
//! Hubs connection string (`Endpoint=sb://...;EntityPath=...`).

use crate::config::{defaults, fields, keys};
use crate::connection_string;
use crate::error::{Error, Result};
use crate::validation::{require, require_non_empty};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection descriptor for an Event Hubs compatible endpoint.
///
/// Deserialization runs through
/// [`create_from_connection_config`](Self::create_from_connection_config), so
/// records with missing fields are rejected and the endpoint is normalized.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawEventHubConnectionConfig")]
pub struct EventHubConnectionConfig {
    /// Service endpoint, e.g. `sb://myhub.azure-devices.net/`. Always ends in `/`.
    pub endpoint: String,
    /// Host the endpoint points at
    pub host: String,
    /// Raw connection string this descriptor came from
    pub connection_string: String,
    /// Event hub (or IoT Hub endpoint) path
    pub entity_path: String,
    /// Name of the shared access policy
    pub shared_access_key_name: String,
    /// Shared access policy secret
    pub shared_access_key: String,
}

/// Wire shape of [`EventHubConnectionConfig`] before validation.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawEventHubConnectionConfig {
    endpoint: String,
    host: String,
    connection_string: String,
    entity_path: String,
    shared_access_key_name: String,
    shared_access_key: String,
}

impl TryFrom<RawEventHubConnectionConfig> for EventHubConnectionConfig {
    type Error = Error;

    fn try_from(raw: RawEventHubConnectionConfig) -> Result<Self> {
        Self::create_from_connection_config(Self {
            endpoint: raw.endpoint,
            host: raw.host,
            connection_string: raw.connection_string,
            entity_path: raw.entity_path,
            shared_access_key_name: raw.shared_access_key_name,
            shared_access_key: raw.shared_access_key,
        })
    }
}

impl EventHubConnectionConfig {
    /// Parse an Event Hubs connection string.
    ///
    /// `path` overrides any `EntityPath` in the string; one of the two must be set.
    pub fn create(connection_string: &str, path: Option<&str>) -> Result<Self> {
        require_non_empty(fields::CONNECTION_STRING, connection_string.trim())?;

        let mut parsed = connection_string::parse(connection_string)?;
        let endpoint = parsed.remove(keys::ENDPOINT).unwrap_or_default();
        let host = endpoint_host(&endpoint).to_string();
        let entity_path = match path.filter(|p| !p.is_empty()) {
            Some(p) => p.to_string(),
            None => parsed.remove(keys::ENTITY_PATH).unwrap_or_default(),
        };

        Self::create_from_connection_config(Self {
            endpoint,
            host,
            connection_string: connection_string.to_string(),
            entity_path,
            shared_access_key_name: parsed.remove(keys::SHARED_ACCESS_KEY_NAME).unwrap_or_default(),
            shared_access_key: parsed.remove(keys::SHARED_ACCESS_KEY).unwrap_or_default(),
        })
    }

    /// Validate a remapped descriptor and normalize its endpoint.
    pub fn create_from_connection_config(mut config: Self) -> Result<Self> {
        config.validate()?;
        if !config.endpoint.ends_with('/') {
            config.endpoint.push('/');
        }

        tracing::debug!(
            host = %config.host,
            entity_path = %config.entity_path,
            "Created Event Hubs connection config"
        );
        Ok(config)
    }

    /// Check required fields in a fixed order; the first missing one is reported.
    pub fn validate(&self) -> Result<()> {
        require_non_empty(fields::ENDPOINT, &self.endpoint)?;
        require_non_empty(fields::HOST, &self.host)?;
        require_non_empty(fields::ENTITY_PATH, &self.entity_path)?;
        require_non_empty(fields::SHARED_ACCESS_KEY_NAME, &self.shared_access_key_name)?;
        require_non_empty(fields::SHARED_ACCESS_KEY, &self.shared_access_key)?;
        Ok(())
    }

    /// AMQP address of the management node.
    pub fn management_address(&self) -> String {
        format!("{}/$management", self.entity_path)
    }

    pub fn management_audience(&self) -> String {
        format!("{}{}", self.endpoint, self.management_address())
    }

    /// AMQP address for sending, optionally pinned to a partition. An empty
    /// partition id is treated as none.
    pub fn sender_address(&self, partition_id: Option<&str>) -> String {
        match partition_id.filter(|id| !id.is_empty()) {
            Some(id) => format!("{}/Partitions/{}", self.entity_path, id),
            None => self.entity_path.clone(),
        }
    }

    pub fn sender_audience(&self, partition_id: Option<&str>) -> String {
        format!("{}{}", self.endpoint, self.sender_address(partition_id))
    }

    /// AMQP address for receiving from a partition within a consumer group
    /// (`$default` when none is given).
    pub fn receiver_address(&self, partition_id: &str, consumer_group: Option<&str>) -> Result<String> {
        require_non_empty(fields::ENTITY_PATH, &self.entity_path)?;
        let partition_id = require("partitionId", Some(partition_id))?;
        let consumer_group = consumer_group
            .filter(|g| !g.is_empty())
            .unwrap_or(defaults::CONSUMER_GROUP);

        Ok(format!(
            "{}/ConsumerGroups/{}/Partitions/{}",
            self.entity_path, consumer_group, partition_id
        ))
    }

    pub fn receiver_audience(&self, partition_id: &str, consumer_group: Option<&str>) -> Result<String> {
        Ok(format!(
            "{}{}",
            self.endpoint,
            self.receiver_address(partition_id, consumer_group)?
        ))
    }
}

impl fmt::Debug for EventHubConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHubConnectionConfig")
            .field("endpoint", &self.endpoint)
            .field("host", &self.host)
            .field("connection_string", &"<redacted>")
            .field("entity_path", &self.entity_path)
            .field("shared_access_key_name", &self.shared_access_key_name)
            .field("shared_access_key", &"<redacted>")
            .finish()
    }
}

/// Authority part of an endpoint URI: the text between `://` and the next `/`.
fn endpoint_host(endpoint: &str) -> &str {
    match endpoint.split_once("://") {
        Some((_, rest)) => rest.split('/').next().unwrap_or_default(),
        None => "",
    }
}
