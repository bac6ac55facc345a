//! Inspector configuration
//!
//! Settings are resolved once (usually from the `[class]` table of
//! `stencil.toml`) and then travel inside an [`InspectContext`] to every
//! class tool derived from the first one.
//!
//! ```toml
//! [class]
//! safe-mode = false
//! inspect = "com.acme.Widget"
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::class_metadata::OBJECT_CLASS;
use crate::diagnostics::DiagnosticSink;
use crate::registry::ClassProvider;

/// Class tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InspectorConfig {
    /// Only expose public members (default: true)
    #[serde(default = "default_safe_mode")]
    pub safe_mode: bool,

    /// Class to inspect when none is given (default: `java.lang.Object`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspect: Option<String>,
}

fn default_safe_mode() -> bool {
    true
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            safe_mode: default_safe_mode(),
            inspect: None,
        }
    }
}

impl InspectorConfig {
    pub fn with_safe_mode(mut self, safe_mode: bool) -> Self {
        self.safe_mode = safe_mode;
        self
    }

    pub fn with_inspect(mut self, name: impl Into<String>) -> Self {
        self.inspect = Some(name.into());
        self
    }

    /// Class to inspect when the caller names none
    pub fn target(&self) -> &str {
        self.inspect.as_deref().unwrap_or(OBJECT_CLASS)
    }
}

/// Everything a class tool inherits from the tool it was derived from
#[derive(Clone)]
pub struct InspectContext {
    provider: Arc<dyn ClassProvider>,
    config: InspectorConfig,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl InspectContext {
    pub fn new(provider: Arc<dyn ClassProvider>, config: InspectorConfig) -> Self {
        Self {
            provider,
            config,
            sink: None,
        }
    }

    /// Attach a diagnostic sink
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn provider(&self) -> &Arc<dyn ClassProvider> {
        &self.provider
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    pub fn safe_mode(&self) -> bool {
        self.config.safe_mode
    }

    pub fn sink(&self) -> Option<&Arc<dyn DiagnosticSink>> {
        self.sink.as_ref()
    }

    /// Report an error to the sink, if one is wired
    pub(crate) fn report(&self, message: &str) {
        if let Some(sink) = &self.sink {
            sink.error(message);
        }
    }
}

impl fmt::Debug for InspectContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InspectContext")
            .field("config", &self.config)
            .field("sink", &self.sink.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InspectorConfig::default();
        assert!(config.safe_mode);
        assert_eq!(config.target(), "java.lang.Object");
    }

    #[test]
    fn test_deserialize_kebab_case() {
        let config: InspectorConfig = toml::from_str(
            r#"
safe-mode = false
inspect = "com.acme.Widget"
"#,
        )
        .unwrap();
        assert!(!config.safe_mode);
        assert_eq!(config.target(), "com.acme.Widget");

        let empty: InspectorConfig = toml::from_str("").unwrap();
        assert_eq!(empty, InspectorConfig::default());
    }
}
