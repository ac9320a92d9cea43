/*!
 * Core Types
 * Identities for handler types, methods and metadata tags
 */

use super::data_structures::InlineString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common result type for guard operations
pub type GuardResult<T> = Result<T, super::errors::GuardError>;

/// Identity of a metadata tag (annotation, decorator, attribute)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerId(InlineString);

impl MarkerId {
    pub fn new(name: impl Into<InlineString>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for MarkerId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MarkerId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a declaring type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: InlineString,
}

impl TypeRef {
    pub fn new(name: impl Into<InlineString>) -> Self {
        Self { name: name.into() }
    }

    /// Simple name without module path (`app::web::UserController` -> `UserController`)
    pub fn simple_name(&self) -> &str {
        let name = self.name.as_str();
        let tail = name.rsplit("::").next().unwrap_or(name);
        tail.rsplit('.').next().unwrap_or(tail)
    }

    /// Method declared on this type
    pub fn method(&self, name: impl Into<InlineString>) -> MethodRef {
        MethodRef::new(self.clone(), name)
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_str())
    }
}

/// Identity of a method, qualified by the type that declares it
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MethodRef {
    pub owner: TypeRef,
    pub name: InlineString,
}

impl MethodRef {
    pub fn new(owner: TypeRef, name: impl Into<InlineString>) -> Self {
        Self {
            owner,
            name: name.into(),
        }
    }

    /// Same method name declared on another type (override lookup)
    pub fn on(&self, owner: &TypeRef) -> MethodRef {
        MethodRef {
            owner: owner.clone(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for MethodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.owner, self.name)
    }
}

/// Entity whose metadata can be queried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity<'a> {
    Type(&'a TypeRef),
    Method(&'a MethodRef),
}

impl fmt::Display for Entity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Type(ty) => write!(f, "type {}", ty),
            Entity::Method(method) => write!(f, "method {}", method),
        }
    }
}

/// Callable unit reachable by external requests
///
/// Built per authorization check and dropped once a decision is produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerMethod {
    pub handler_type: TypeRef,
    /// `None` when the host could not identify the invoked method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<MethodRef>,
}

impl HandlerMethod {
    pub fn new(handler_type: TypeRef, method: MethodRef) -> Self {
        Self {
            handler_type,
            method: Some(method),
        }
    }

    /// Descriptor for a handler type whose method could not be identified
    pub fn unidentified(handler_type: TypeRef) -> Self {
        Self {
            handler_type,
            method: None,
        }
    }
}
