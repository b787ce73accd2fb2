/// Container labels driving the startup cleanup sweep
pub mod cleanup {
    /// Label key marking a container as created by a previous test run
    /// Format: lg_cleanup={strategy}
    pub const LABEL: &str = "lg_cleanup";

    /// Strategy value: remove the container on every startup sweep.
    /// Other values are reserved for future strategies and are ignored.
    pub const AUTO: &str = "auto";

    /// Whether a container's label value selects it for automatic removal
    #[must_use]
    pub fn is_auto(value: Option<&str>) -> bool {
        value == Some(AUTO)
    }
}

/// Keys inside a container's runtime network attributes
pub mod network {
    /// Attribute holding the container's assigned IP address.
    /// Appears once per network attachment; the first non-empty match wins.
    pub const IP_ADDRESS_KEY: &str = "IPAddress";
}
