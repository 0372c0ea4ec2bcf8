use serde::Deserialize;

/// Observability settings shared by every service.
#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilitySettings {
    /// Fallback filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP gRPC collector (e.g., http://tempo:4317). Spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: ObservabilitySettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.log_level, "info");
        assert!(settings.otlp_endpoint.is_none());
    }

    #[test]
    fn otlp_endpoint_is_read_when_present() {
        let settings: ObservabilitySettings =
            serde_json::from_str(r#"{"log_level":"debug","otlp_endpoint":"http://tempo:4317"}"#)
                .unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.otlp_endpoint.as_deref(), Some("http://tempo:4317"));
    }
}
