/*!
 * Policy Resolver
 * Fail-closed coverage check for request handlers
 *
 * A handler on a request-handling type is denied unless a marker from the
 * configured [`MarkerSet`] is present on the type or on the method. Types
 * that do not handle requests are never touched.
 */

use super::decision::{ConfigAttribute, Decision};
use super::markers::MarkerSet;
use crate::core::types::{Entity, GuardResult, HandlerMethod, MethodRef, TypeRef};
use crate::core::GuardError;
use crate::metadata::{HandlerClassifier, Introspector, MetadataRegistry};
use std::sync::Arc;
use tracing::debug;

/// Lookup interface a host authorization framework adapts to
///
/// The enumeration hooks report nothing. A framework layer that must
/// enumerate every attribute up front cannot be served by this source.
pub trait MethodSecurityMetadataSource: Send + Sync {
    /// Resolve the decision for one handler method
    ///
    /// `handler_method` is `None` when the host could not identify the invoked
    /// method; that counts as "no method-level declaration".
    fn resolve(
        &self,
        handler_type: &TypeRef,
        handler_method: Option<&MethodRef>,
    ) -> GuardResult<Decision>;

    fn resolve_handler(&self, handler: &HandlerMethod) -> GuardResult<Decision> {
        self.resolve(&handler.handler_type, handler.method.as_ref())
    }

    /// Every attribute configured across all handlers
    fn list_all_attributes(&self) -> Option<Vec<ConfigAttribute>>;

    /// Attributes declared directly on a type
    fn list_static_attributes(&self, handler_type: &TypeRef) -> Option<Vec<ConfigAttribute>>;
}

/// Fail-closed resolver
///
/// Holds the marker set and shared collaborators only; safe to share across
/// threads and to call concurrently.
#[derive(Clone)]
pub struct PolicyResolver {
    markers: MarkerSet,
    classifier: Arc<dyn HandlerClassifier>,
    introspector: Arc<dyn Introspector>,
}

impl PolicyResolver {
    /// Create a resolver; an empty marker set is rejected since it would deny every handler
    pub fn new(
        markers: MarkerSet,
        classifier: Arc<dyn HandlerClassifier>,
        introspector: Arc<dyn Introspector>,
    ) -> GuardResult<Self> {
        if markers.is_empty() {
            return Err(GuardError::invalid_config(
                "marker set is empty; every handler would be denied",
            ));
        }
        debug!(markers = markers.len(), "Initializing fail-closed policy resolver");
        Ok(Self {
            markers,
            classifier,
            introspector,
        })
    }

    /// Resolver whose registry acts as both classifier and introspector
    pub fn from_registry(markers: MarkerSet, registry: Arc<MetadataRegistry>) -> GuardResult<Self> {
        let classifier: Arc<dyn HandlerClassifier> = registry.clone();
        Self::new(markers, classifier, registry)
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    fn has_any_marker(&self, entity: Entity<'_>) -> GuardResult<bool> {
        for marker in &self.markers {
            if self.introspector.has_tag(entity, marker)? {
                debug!(%entity, %marker, "access control declaration found");
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn type_has_any_marker(&self, handler_type: &TypeRef) -> GuardResult<bool> {
        self.has_any_marker(Entity::Type(handler_type))
    }

    fn method_has_any_marker(&self, handler_method: &MethodRef) -> GuardResult<bool> {
        self.has_any_marker(Entity::Method(handler_method))
    }
}

impl MethodSecurityMetadataSource for PolicyResolver {
    fn resolve(
        &self,
        handler_type: &TypeRef,
        handler_method: Option<&MethodRef>,
    ) -> GuardResult<Decision> {
        if !self.classifier.is_handler_component(handler_type)? {
            return Ok(Decision::Defer);
        }

        if self.type_has_any_marker(handler_type)? {
            return Ok(Decision::Defer);
        }

        let method_covered = match handler_method {
            Some(method) => self.method_has_any_marker(method)?,
            None => false,
        };
        if method_covered {
            return Ok(Decision::Defer);
        }

        debug!(
            handler_type = %handler_type,
            method = handler_method.map(|m| m.name.as_str()).unwrap_or("<unidentified>"),
            "No access control declaration on handler, denying all access"
        );
        Ok(Decision::DenyAll)
    }

    fn list_all_attributes(&self) -> Option<Vec<ConfigAttribute>> {
        None
    }

    fn list_static_attributes(&self, _handler_type: &TypeRef) -> Option<Vec<ConfigAttribute>> {
        None
    }
}
