/*!
 * Metadata Registry
 * In-memory metadata model for types, methods and composed tags
 *
 * The registry is populated once (from a manifest or by a host adapter) and
 * then queried concurrently. How far a query reaches is fixed by the
 * registry's [`InheritancePolicy`]:
 *
 * - `Direct`: tags declared on the entity itself
 * - `Composed`: plus meta-tags, transitively (`RestController` -> `Controller`)
 * - `Hierarchical`: plus tags declared on supertypes, and for methods on the
 *   same-named method of any supertype
 */

use super::traits::{HandlerClassifier, Introspector};
use crate::core::limits::{DEFAULT_HANDLER_TAG, DEFAULT_MAX_LOOKUP_DEPTH};
use crate::core::types::{Entity, GuardResult, MarkerId, MethodRef, TypeRef};
use crate::core::GuardError;
use ahash::{HashMap, HashSet, RandomState};
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::trace;

/// How far marker lookups reach beyond direct declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InheritancePolicy {
    Direct,
    Composed,
    #[default]
    Hierarchical,
}

impl InheritancePolicy {
    pub fn follows_composition(self) -> bool {
        !matches!(self, InheritancePolicy::Direct)
    }

    pub fn follows_hierarchy(self) -> bool {
        matches!(self, InheritancePolicy::Hierarchical)
    }
}

impl FromStr for InheritancePolicy {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(InheritancePolicy::Direct),
            "composed" => Ok(InheritancePolicy::Composed),
            "hierarchical" => Ok(InheritancePolicy::Hierarchical),
            other => Err(GuardError::invalid_config(format!(
                "unknown inheritance policy '{}', expected direct, composed or hierarchical",
                other
            ))),
        }
    }
}

type TagSet = HashSet<MarkerId>;

/// Concurrent metadata registry
pub struct MetadataRegistry {
    policy: InheritancePolicy,
    handler_tag: MarkerId,
    max_depth: usize,
    type_tags: DashMap<TypeRef, TagSet, RandomState>,
    method_tags: DashMap<MethodRef, TagSet, RandomState>,
    supertypes: DashMap<TypeRef, Vec<TypeRef>, RandomState>,
    /// tag -> meta-tags it carries; read as one snapshot per query
    compositions: RwLock<HashMap<MarkerId, Vec<MarkerId>>>,
}

impl MetadataRegistry {
    pub fn new(policy: InheritancePolicy) -> Self {
        Self {
            policy,
            handler_tag: MarkerId::new(DEFAULT_HANDLER_TAG),
            max_depth: DEFAULT_MAX_LOOKUP_DEPTH,
            type_tags: DashMap::with_hasher(RandomState::new()),
            method_tags: DashMap::with_hasher(RandomState::new()),
            supertypes: DashMap::with_hasher(RandomState::new()),
            compositions: RwLock::new(HashMap::default()),
        }
    }

    /// Tag that marks a type as a request-handling component
    pub fn with_handler_tag(mut self, tag: impl Into<MarkerId>) -> Self {
        self.handler_tag = tag.into();
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn policy(&self) -> InheritancePolicy {
        self.policy
    }

    pub fn handler_tag(&self) -> &MarkerId {
        &self.handler_tag
    }

    /// Attach tags to a type (additive)
    pub fn declare_type<I, M>(&self, handler_type: TypeRef, tags: I)
    where
        I: IntoIterator<Item = M>,
        M: Into<MarkerId>,
    {
        self.type_tags
            .entry(handler_type)
            .or_default()
            .extend(tags.into_iter().map(Into::into));
    }

    /// Attach tags to a method (additive)
    pub fn declare_method<I, M>(&self, method: MethodRef, tags: I)
    where
        I: IntoIterator<Item = M>,
        M: Into<MarkerId>,
    {
        self.method_tags
            .entry(method)
            .or_default()
            .extend(tags.into_iter().map(Into::into));
    }

    /// Declare that `tag` itself carries `meta_tags`
    pub fn compose<I, M>(&self, tag: impl Into<MarkerId>, meta_tags: I)
    where
        I: IntoIterator<Item = M>,
        M: Into<MarkerId>,
    {
        let mut compositions = self.compositions.write();
        let metas = compositions.entry(tag.into()).or_default();
        for meta in meta_tags {
            let meta = meta.into();
            if !metas.contains(&meta) {
                metas.push(meta);
            }
        }
    }

    /// Declare `super_type` as a supertype (or implemented interface) of `sub_type`
    pub fn extend(&self, sub_type: TypeRef, super_type: TypeRef) {
        let mut supers = self.supertypes.entry(sub_type).or_default();
        if !supers.contains(&super_type) {
            supers.push(super_type);
        }
    }

    /// All declared types, sorted by name
    pub fn types(&self) -> Vec<TypeRef> {
        let mut types: Vec<TypeRef> = self.type_tags.iter().map(|e| e.key().clone()).collect();
        types.sort();
        types
    }

    /// All declared methods, sorted by owner then name
    pub fn methods(&self) -> Vec<MethodRef> {
        let mut methods: Vec<MethodRef> =
            self.method_tags.iter().map(|e| e.key().clone()).collect();
        methods.sort();
        methods
    }

    /// Every type the registry knows of: tagged, extended, or owning a method
    pub fn known_types(&self) -> Vec<TypeRef> {
        let mut types: HashSet<TypeRef> = self.type_tags.iter().map(|e| e.key().clone()).collect();
        types.extend(self.supertypes.iter().map(|e| e.key().clone()));
        types.extend(self.method_tags.iter().map(|e| e.key().owner.clone()));

        let mut types: Vec<TypeRef> = types.into_iter().collect();
        types.sort();
        types
    }

    /// Methods a request can invoke on `handler_type`, sorted by name
    ///
    /// Includes methods declared on supertypes when the policy follows the
    /// hierarchy. Each is reported as invoked on `handler_type`.
    pub fn callable_methods(&self, handler_type: &TypeRef) -> GuardResult<Vec<MethodRef>> {
        let lineage: HashSet<TypeRef> = self
            .lineage(Entity::Type(handler_type), handler_type)?
            .into_iter()
            .collect();

        let mut methods: Vec<MethodRef> = self
            .method_tags
            .iter()
            .filter(|e| lineage.contains(&e.key().owner))
            .map(|e| e.key().on(handler_type))
            .collect();
        methods.sort();
        methods.dedup();
        Ok(methods)
    }

    /// Whether any tag in `tags` is `marker` or composes into it
    fn tags_imply(
        &self,
        entity: Entity<'_>,
        tags: &TagSet,
        marker: &MarkerId,
    ) -> GuardResult<bool> {
        if tags.contains(marker) {
            return Ok(true);
        }
        if !self.policy.follows_composition() {
            return Ok(false);
        }

        let compositions = self.compositions.read();
        let mut visited: HashSet<&MarkerId> = tags.iter().collect();
        let mut frontier: Vec<&MarkerId> = tags.iter().collect();
        let mut depth = 0;

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for tag in frontier {
                if tag == marker {
                    return Ok(true);
                }
                if let Some(metas) = compositions.get(tag) {
                    // Revisited tags never extend the walk, so cycles end here
                    next.extend(metas.iter().filter(|meta| visited.insert(*meta)));
                }
            }
            if next.is_empty() {
                break;
            }
            depth += 1;
            if depth > self.max_depth {
                return Err(GuardError::introspection(
                    entity,
                    format!("tag composition deeper than {} levels", self.max_depth),
                ));
            }
            frontier = next;
        }

        Ok(false)
    }

    /// The type followed by its supertypes in breadth-first order
    fn lineage(&self, entity: Entity<'_>, root: &TypeRef) -> GuardResult<Vec<TypeRef>> {
        if !self.policy.follows_hierarchy() {
            return Ok(vec![root.clone()]);
        }

        let mut lineage = vec![root.clone()];
        let mut seen: HashSet<TypeRef> = HashSet::default();
        seen.insert(root.clone());
        let mut frontier = vec![root.clone()];
        let mut depth = 0;

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for ty in &frontier {
                if let Some(supers) = self.supertypes.get(ty) {
                    for sup in supers.iter() {
                        if seen.insert(sup.clone()) {
                            next.push(sup.clone());
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            depth += 1;
            if depth > self.max_depth {
                return Err(GuardError::introspection(
                    entity,
                    format!("type hierarchy deeper than {} levels", self.max_depth),
                ));
            }
            lineage.extend(next.iter().cloned());
            frontier = next;
        }

        Ok(lineage)
    }

    fn type_has_tag(&self, entity: Entity<'_>, ty: &TypeRef, marker: &MarkerId) -> GuardResult<bool> {
        for candidate in self.lineage(entity, ty)? {
            if let Some(tags) = self.type_tags.get(&candidate) {
                if self.tags_imply(entity, &tags, marker)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn method_has_tag(
        &self,
        entity: Entity<'_>,
        method: &MethodRef,
        marker: &MarkerId,
    ) -> GuardResult<bool> {
        for owner in self.lineage(entity, &method.owner)? {
            let candidate = method.on(&owner);
            if let Some(tags) = self.method_tags.get(&candidate) {
                if self.tags_imply(entity, &tags, marker)? {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

impl Default for MetadataRegistry {
    fn default() -> Self {
        Self::new(InheritancePolicy::default())
    }
}

impl Introspector for MetadataRegistry {
    fn has_tag(&self, entity: Entity<'_>, marker: &MarkerId) -> GuardResult<bool> {
        let found = match entity {
            Entity::Type(ty) => self.type_has_tag(entity, ty, marker)?,
            Entity::Method(method) => self.method_has_tag(entity, method, marker)?,
        };
        trace!(%entity, %marker, found, "marker lookup");
        Ok(found)
    }
}

impl HandlerClassifier for MetadataRegistry {
    fn is_handler_component(&self, handler_type: &TypeRef) -> GuardResult<bool> {
        self.has_tag(Entity::Type(handler_type), &self.handler_tag)
    }
}
