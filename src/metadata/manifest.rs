/*!
 * Handler Manifest
 * JSON description of handler types, methods and composed tags
 *
 * ```json
 * {
 *   "compositions": { "RestController": ["Controller"] },
 *   "types": [
 *     { "name": "app::UserController", "tags": ["RestController"], "supertypes": ["app::UserApi"] }
 *   ],
 *   "methods": [
 *     { "owner": "app::UserController", "name": "list", "tags": ["PreAuthorize"] }
 *   ]
 * }
 * ```
 */

use super::registry::{InheritancePolicy, MetadataRegistry};
use crate::core::types::{GuardResult, MarkerId, TypeRef};
use crate::core::{GuardError, InlineString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: InlineString,
    #[serde(default)]
    pub tags: Vec<MarkerId>,
    #[serde(default)]
    pub supertypes: Vec<InlineString>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodEntry {
    pub owner: InlineString,
    pub name: InlineString,
    #[serde(default)]
    pub tags: Vec<MarkerId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub compositions: BTreeMap<MarkerId, Vec<MarkerId>>,
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    #[serde(default)]
    pub methods: Vec<MethodEntry>,
}

impl Manifest {
    pub fn from_json_str(json: &str) -> GuardResult<Self> {
        let manifest: Manifest = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: impl AsRef<Path>) -> GuardResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            GuardError::manifest(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    fn validate(&self) -> GuardResult<()> {
        if let Some(entry) = self.types.iter().find(|t| t.name.trim().is_empty()) {
            return Err(GuardError::manifest(format!(
                "type entry with blank name (tags: {:?})",
                entry.tags
            )));
        }
        if let Some(entry) = self
            .methods
            .iter()
            .find(|m| m.owner.trim().is_empty() || m.name.trim().is_empty())
        {
            return Err(GuardError::manifest(format!(
                "method entry '{}::{}' has a blank owner or name",
                entry.owner, entry.name
            )));
        }
        Ok(())
    }

    /// Populate a fresh registry with everything this manifest declares
    pub fn into_registry(self, policy: InheritancePolicy) -> MetadataRegistry {
        let registry = MetadataRegistry::new(policy);
        self.populate(&registry);
        registry
    }

    pub fn populate(self, registry: &MetadataRegistry) {
        for (tag, metas) in self.compositions {
            registry.compose(tag, metas);
        }
        for entry in self.types {
            let ty = TypeRef::new(entry.name);
            for sup in entry.supertypes {
                registry.extend(ty.clone(), TypeRef::new(sup));
            }
            registry.declare_type(ty, entry.tags);
        }
        for entry in self.methods {
            let owner = TypeRef::new(entry.owner);
            registry.declare_method(owner.method(entry.name), entry.tags);
        }
    }
}
