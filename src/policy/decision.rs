/*!
 * Decisions
 * Resolver output and the attributes a host framework interprets
 */

use crate::core::limits::{DENY_ALL_ATTRIBUTE, PERMIT_ALL_ATTRIBUTE};
use crate::core::InlineString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute interpreted by the host's access-decision layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ConfigAttribute {
    /// Always deny, regardless of authentication state
    DenyAll,
    /// Always permit
    PermitAll,
    /// Caller must hold the role
    Role(InlineString),
    /// Conditional rule, evaluated downstream
    Expression(InlineString),
}

impl ConfigAttribute {
    /// Attribute string as the host framework spells it
    pub fn as_attribute(&self) -> String {
        match self {
            ConfigAttribute::DenyAll => DENY_ALL_ATTRIBUTE.to_string(),
            ConfigAttribute::PermitAll => PERMIT_ALL_ATTRIBUTE.to_string(),
            ConfigAttribute::Role(role) => role.to_string(),
            ConfigAttribute::Expression(expr) => expr.to_string(),
        }
    }
}

impl fmt::Display for ConfigAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_attribute())
    }
}

/// Outcome of resolving one handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "attributes")]
pub enum Decision {
    /// No decision here; the host's normal evaluation path owns it
    Defer,
    /// Handler-bearing type with no declaration on type or method
    DenyAll,
    /// Explicit attributes. Never produced by the fallback resolver.
    PolicyAttributes(Vec<ConfigAttribute>),
}

impl Decision {
    pub fn is_defer(&self) -> bool {
        matches!(self, Decision::Defer)
    }

    pub fn is_deny_all(&self) -> bool {
        matches!(self, Decision::DenyAll)
    }

    /// Attributes the host should evaluate; `None` means defer
    pub fn attributes(&self) -> Option<Vec<ConfigAttribute>> {
        match self {
            Decision::Defer => None,
            Decision::DenyAll => Some(vec![ConfigAttribute::DenyAll]),
            Decision::PolicyAttributes(attributes) => Some(attributes.clone()),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Defer => f.write_str("defer"),
            Decision::DenyAll => f.write_str("deny_all"),
            Decision::PolicyAttributes(attributes) => {
                let names: Vec<String> = attributes.iter().map(|a| a.as_attribute()).collect();
                write!(f, "attributes[{}]", names.join(","))
            }
        }
    }
}
