//! Runtime configuration for guarded operations.

/// Environment-level toggles, built once at startup and injected into the
/// services that need them.
///
/// `local_development` permits guarded mutations without platform-role
/// checks. In production mode those mutations are refused outright; role
/// enforcement for privileged callers happens upstream of this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeConfig {
    pub local_development: bool,
}

impl RuntimeConfig {
    /// Read the `LOCAL_DEVELOPMENT` toggle from the environment.
    ///
    /// Accepts `true`/`1` (case-insensitive); anything else is production.
    pub fn from_env() -> Self {
        let local_development = std::env::var("LOCAL_DEVELOPMENT")
            .map(|value| {
                let value = value.trim().to_ascii_lowercase();
                value == "true" || value == "1"
            })
            .unwrap_or(false);
        Self { local_development }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_production() {
        assert!(!RuntimeConfig::default().local_development);
    }
}
