//! Shared constants for IoT Hub and Event Hubs descriptors.

/// Default values applied when a caller leaves a setting out.
pub mod defaults {
    /// Built-in device-to-cloud endpoint of an IoT Hub.
    pub const ENTITY_PATH: &str = "messages/events";
    /// Consumer group used when a receiver does not name one.
    pub const CONSUMER_GROUP: &str = "$default";
}

/// Endpoint construction.
pub mod endpoints {
    /// Scheme of the Service Bus compatible endpoint exposed by IoT Hub.
    pub const SERVICE_BUS_SCHEME: &str = "sb";

    /// Build `sb://<host_name>/`.
    pub fn service_bus_endpoint(host_name: &str) -> String {
        format!("{}://{}/", SERVICE_BUS_SCHEME, host_name)
    }
}

/// Key names recognized in connection strings. Matching is case-sensitive.
pub mod keys {
    pub const HOST_NAME: &str = "HostName";
    pub const SHARED_ACCESS_KEY_NAME: &str = "SharedAccessKeyName";
    pub const SHARED_ACCESS_KEY: &str = "SharedAccessKey";
    pub const DEVICE_ID: &str = "DeviceId";
    pub const ENDPOINT: &str = "Endpoint";
    pub const ENTITY_PATH: &str = "EntityPath";
}

/// Descriptor field names as they appear in serialized form and in errors.
pub mod fields {
    pub const CONFIG: &str = "config";
    pub const CONNECTION_STRING: &str = "connectionString";
    pub const HOST_NAME: &str = "hostName";
    pub const HOST: &str = "host";
    pub const ENDPOINT: &str = "endpoint";
    pub const ENTITY_PATH: &str = "entityPath";
    pub const SHARED_ACCESS_KEY_NAME: &str = "sharedAccessKeyName";
    pub const SHARED_ACCESS_KEY: &str = "sharedAccessKey";
    pub const DEVICE_ID: &str = "deviceId";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_bus_endpoint() {
        assert_eq!(endpoints::service_bus_endpoint("foo.bar"), "sb://foo.bar/");
    }
}
