//! IoT Hub connection descriptors for NeoMind.
//!
//! Parses IoT Hub connection strings, validates the resulting descriptor and
//! remaps it onto the hub's Event Hubs compatible endpoint so telemetry can be
//! read with an Event Hubs client.
//!
//! ## Modules
//!
//! - **iothub**: `IotHubConnectionConfig`: create, validate, convert
//! - **eventhub**: `EventHubConnectionConfig` and its AMQP address helpers
//! - **connection_string**: `Key=Value;...` tokenizer
//! - **validation**: shared precondition checks
//!
//! ## Example
//!
//! ```rust
//! use neomind_iothub::IotHubConnectionConfig;
//!
//! let config = IotHubConnectionConfig::create(
//!     "HostName=myhub.azure-devices.net;SharedAccessKeyName=service;SharedAccessKey=c2VjcmV0",
//!     None,
//! )?;
//! assert_eq!(config.host, "myhub");
//! assert_eq!(config.entity_path, "messages/events");
//!
//! let eventhub = config.convert_to_event_hub_config()?;
//! assert_eq!(eventhub.endpoint, "sb://myhub.azure-devices.net/");
//! # Ok::<(), neomind_iothub::Error>(())
//! ```

pub mod config;
pub mod connection_string;
pub mod error;
pub mod eventhub;
pub mod iothub;
pub mod validation;

pub use error::{Error, Result};
pub use eventhub::EventHubConnectionConfig;
pub use iothub::IotHubConnectionConfig;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
