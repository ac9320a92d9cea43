/*!
 * Guard Configuration
 *
 * Marker set, handler tag and lookup reach, loaded from JSON with
 * environment overrides.
 *
 * Environment variables:
 * - GUARD_MARKERS: comma separated marker list
 * - GUARD_HANDLER_TAG: tag identifying request-handling types
 * - GUARD_INHERITANCE: direct | composed | hierarchical
 */

use crate::core::limits::{
    DEFAULT_HANDLER_TAG, DEFAULT_MAX_LOOKUP_DEPTH, POST_AUTHORIZE, PRE_AUTHORIZE, SECURED,
};
use crate::core::types::{GuardResult, MarkerId};
use crate::core::GuardError;
use crate::metadata::{InheritancePolicy, MetadataRegistry};
use crate::policy::MarkerSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Markers that count as an explicit access-control declaration
    pub markers: Vec<MarkerId>,

    /// Tag that marks a type as request-handling (default: Controller)
    pub handler_tag: MarkerId,

    /// How far marker lookups reach (default: hierarchical)
    pub inheritance: InheritancePolicy,

    /// Composition/hierarchy depth limit (default: 32)
    pub max_depth: usize,
}

impl GuardConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            markers: [PRE_AUTHORIZE, POST_AUTHORIZE, SECURED]
                .into_iter()
                .map(MarkerId::from)
                .collect(),
            handler_tag: MarkerId::new(DEFAULT_HANDLER_TAG),
            inheritance: InheritancePolicy::default(),
            max_depth: DEFAULT_MAX_LOOKUP_DEPTH,
        }
    }

    /// Only directly declared tags count
    pub fn strict() -> Self {
        Self {
            inheritance: InheritancePolicy::Direct,
            ..Self::new()
        }
    }

    pub fn from_json_str(json: &str) -> GuardResult<Self> {
        let config: GuardConfig = serde_json::from_str(json)
            .map_err(|e| GuardError::invalid_config(format!("malformed config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> GuardResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading guard configuration");
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GuardError::invalid_config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Apply GUARD_* environment overrides
    pub fn apply_env(self) -> GuardResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> GuardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(markers) = lookup("GUARD_MARKERS") {
            self.markers = markers
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(MarkerId::from)
                .collect();
        }
        if let Some(tag) = lookup("GUARD_HANDLER_TAG") {
            self.handler_tag = MarkerId::from(tag.trim());
        }
        if let Some(policy) = lookup("GUARD_INHERITANCE") {
            self.inheritance = policy.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> GuardResult<()> {
        if self.markers.is_empty() {
            return Err(GuardError::invalid_config("marker list is empty"));
        }
        if self.markers.iter().any(|m| m.as_str().trim().is_empty()) {
            return Err(GuardError::invalid_config("marker names must not be blank"));
        }
        if self.handler_tag.as_str().trim().is_empty() {
            return Err(GuardError::invalid_config("handler tag must not be blank"));
        }
        if self.max_depth == 0 {
            return Err(GuardError::invalid_config("max_depth must be at least 1"));
        }
        Ok(())
    }

    pub fn marker_set(&self) -> MarkerSet {
        MarkerSet::new(self.markers.iter().cloned())
    }

    /// Empty registry configured with this handler tag, policy and depth
    pub fn registry(&self) -> MetadataRegistry {
        MetadataRegistry::new(self.inheritance)
            .with_handler_tag(self.handler_tag.clone())
            .with_max_depth(self.max_depth)
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self::new()
    }
}
