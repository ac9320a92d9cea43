/*!
 * Metadata Traits
 * Capability queries the policy resolver consumes
 */

use crate::core::types::{Entity, GuardResult, MarkerId, TypeRef};
use std::sync::Arc;

/// Reports whether a type or method carries a metadata tag
///
/// Implementations decide how far a lookup reaches (direct declarations,
/// composed meta-tags, inherited declarations). Whatever that reach is, it
/// must be the same for every call with the same inputs.
pub trait Introspector: Send + Sync {
    /// Check whether `entity` carries `marker`
    fn has_tag(&self, entity: Entity<'_>, marker: &MarkerId) -> GuardResult<bool>;
}

/// Decides whether a type is a request-handling component
pub trait HandlerClassifier: Send + Sync {
    fn is_handler_component(&self, handler_type: &TypeRef) -> GuardResult<bool>;
}

impl<T: Introspector + ?Sized> Introspector for Arc<T> {
    fn has_tag(&self, entity: Entity<'_>, marker: &MarkerId) -> GuardResult<bool> {
        (**self).has_tag(entity, marker)
    }
}

impl<T: Introspector + ?Sized> Introspector for &T {
    fn has_tag(&self, entity: Entity<'_>, marker: &MarkerId) -> GuardResult<bool> {
        (**self).has_tag(entity, marker)
    }
}

impl<T: HandlerClassifier + ?Sized> HandlerClassifier for Arc<T> {
    fn is_handler_component(&self, handler_type: &TypeRef) -> GuardResult<bool> {
        (**self).is_handler_component(handler_type)
    }
}

impl<T: HandlerClassifier + ?Sized> HandlerClassifier for &T {
    fn is_handler_component(&self, handler_type: &TypeRef) -> GuardResult<bool> {
        (**self).is_handler_component(handler_type)
    }
}
