/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::data_structures::InlineString;
use super::types::Entity;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Guard errors with serialization support
///
/// Collaborator failures are never folded into a decision: a classifier or
/// introspector that cannot answer surfaces here instead of as `Defer` or `DenyAll`.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum GuardError {
    #[error("Introspection failed for {entity}: {reason}")]
    #[diagnostic(
        code(guard::introspection_failed),
        help("The metadata backend could not answer a marker query. Check the introspection adapter.")
    )]
    Introspection {
        entity: InlineString,
        reason: InlineString,
    },

    #[error("Handler classification failed for {type_name}: {reason}")]
    #[diagnostic(
        code(guard::classification_failed),
        help("The handler classifier could not decide whether the type serves requests.")
    )]
    Classification {
        type_name: InlineString,
        reason: InlineString,
    },

    #[error("Invalid configuration: {reason}")]
    #[diagnostic(
        code(guard::invalid_config),
        help("Check the marker list, handler tag and inheritance settings.")
    )]
    InvalidConfig { reason: InlineString },

    #[error("Invalid manifest: {reason}")]
    #[diagnostic(
        code(guard::invalid_manifest),
        help("The handler manifest must be a JSON document with types, methods and compositions.")
    )]
    Manifest { reason: InlineString },
}

impl GuardError {
    pub fn introspection(entity: Entity<'_>, reason: impl Into<InlineString>) -> Self {
        GuardError::Introspection {
            entity: entity.to_string().into(),
            reason: reason.into(),
        }
    }

    pub fn classification(type_name: impl Into<InlineString>, reason: impl Into<InlineString>) -> Self {
        GuardError::Classification {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_config(reason: impl Into<InlineString>) -> Self {
        GuardError::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub fn manifest(reason: impl Into<InlineString>) -> Self {
        GuardError::Manifest {
            reason: reason.into(),
        }
    }

    /// Whether the error came from a collaborator query during resolution
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self,
            GuardError::Introspection { .. } | GuardError::Classification { .. }
        )
    }
}

impl From<serde_json::Error> for GuardError {
    fn from(err: serde_json::Error) -> Self {
        GuardError::manifest(err.to_string())
    }
}
