/*!
 * Handler Classifiers
 * Ways of recognizing request-handling components
 */

use super::traits::{HandlerClassifier, Introspector};
use crate::core::limits::DEFAULT_HANDLER_TAG;
use crate::core::types::{Entity, GuardResult, MarkerId, TypeRef};
use crate::core::InlineString;
use ahash::HashSet;
use std::sync::Arc;

/// Classifies types carrying a handler tag (composed tags included, per the introspector)
pub struct TagClassifier {
    introspector: Arc<dyn Introspector>,
    tag: MarkerId,
}

impl TagClassifier {
    pub fn new(introspector: Arc<dyn Introspector>) -> Self {
        Self::with_tag(introspector, DEFAULT_HANDLER_TAG)
    }

    pub fn with_tag(introspector: Arc<dyn Introspector>, tag: impl Into<MarkerId>) -> Self {
        Self {
            introspector,
            tag: tag.into(),
        }
    }
}

impl HandlerClassifier for TagClassifier {
    fn is_handler_component(&self, handler_type: &TypeRef) -> GuardResult<bool> {
        self.introspector.has_tag(Entity::Type(handler_type), &self.tag)
    }
}

/// Classifies an explicit, fixed list of handler types
#[derive(Debug, Clone, Default)]
pub struct RegisteredClassifier {
    types: HashSet<TypeRef>,
}

impl RegisteredClassifier {
    pub fn new<I>(types: I) -> Self
    where
        I: IntoIterator<Item = TypeRef>,
    {
        Self {
            types: types.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl HandlerClassifier for RegisteredClassifier {
    fn is_handler_component(&self, handler_type: &TypeRef) -> GuardResult<bool> {
        Ok(self.types.contains(handler_type))
    }
}

/// Classifies by naming convention on the simple type name
#[derive(Debug, Clone)]
pub struct SuffixClassifier {
    suffix: InlineString,
}

impl SuffixClassifier {
    pub fn new(suffix: impl Into<InlineString>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }
}

impl Default for SuffixClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_HANDLER_TAG)
    }
}

impl HandlerClassifier for SuffixClassifier {
    fn is_handler_component(&self, handler_type: &TypeRef) -> GuardResult<bool> {
        let name = handler_type.simple_name();
        // A type named exactly like the suffix is not a handler by convention.
        Ok(name.len() > self.suffix.len() && name.ends_with(self.suffix.as_str()))
    }
}
