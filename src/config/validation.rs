//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route names usable as map keys (non-empty, no `/`)
//! - Extensions usable for matching (non-empty, no leading dot)
//! - Cache and log settings that would silently misbehave
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use tracing_subscriber::EnvFilter;

use crate::config::schema::RouterConfig;

/// One semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted config field path, e.g. `resolver.index_route`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check `config` for values that parse but cannot work.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.path.as_os_str().is_empty() {
        errors.push(ValidationError::new("routes.path", "must not be empty"));
    }

    if config.routes.extensions.is_empty() {
        errors.push(ValidationError::new("routes.extensions", "at least one extension is required"));
    }
    for (i, ext) in config.routes.extensions.iter().enumerate() {
        let field = format!("routes.extensions[{i}]");
        if ext.is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        } else if ext.starts_with('.') {
            errors.push(ValidationError::new(field, format!("`{ext}` must not start with a dot")));
        } else if ext.contains(['/', '\\']) {
            errors.push(ValidationError::new(field, format!("`{ext}` must not contain a path separator")));
        }
    }

    let names = [
        ("resolver.index_route", &config.resolver.index_route),
        ("resolver.catchall_route", &config.resolver.catchall_route),
        ("resolver.notfound_route", &config.resolver.notfound_route),
    ];
    for (field, name) in names {
        if name.trim().is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        } else if name.contains('/') {
            errors.push(ValidationError::new(field, format!("`{name}` must be a dotted route name, not a path")));
        }
    }

    if config.cache.enabled {
        if config.cache.ttl_secs == 0 {
            errors.push(ValidationError::new("cache.ttl_secs", "must be greater than zero when caching is enabled"));
        }
        if config.cache.namespace.is_empty() {
            errors.push(ValidationError::new("cache.namespace", "must not be empty when caching is enabled"));
        }
    } else if config.cache.watch {
        errors.push(ValidationError::new("cache.watch", "requires cache.enabled"));
    }

    if let Err(e) = EnvFilter::try_new(&config.observability.log_filter) {
        errors.push(ValidationError::new("observability.log_filter", e.to_string()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
