/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub app_name: String,
    pub environment: String,
    pub level: String,
    pub json_format: bool,
    /// strftime pattern for event timestamps, rendered in local time.
    pub timestamp_format: String,
}

impl TracingConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub fn default_directives(&self) -> String {
        let level = self.level.trim().to_lowercase();
        let level = if level.is_empty() { "info" } else { level.as_str() };
        format!("{level},zipformer_asr_api={level},tower_http=info")
    }
}
