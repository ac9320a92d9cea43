/*!
 * Marker Set
 * The access-control tags that count as an explicit declaration
 */

use crate::core::limits::{POST_AUTHORIZE, PRE_AUTHORIZE, SECURED};
use crate::core::types::MarkerId;
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free set of marker identities
///
/// Fixed once handed to a resolver. Iteration follows insertion order so
/// introspection queries run in a stable sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerSet {
    markers: Vec<MarkerId>,
}

impl MarkerSet {
    pub fn new<I, M>(markers: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MarkerId>,
    {
        let mut set = Self {
            markers: Vec::new(),
        };
        for marker in markers {
            set.insert(marker.into());
        }
        set
    }

    /// Pre-authorization, post-authorization and role-restriction markers
    pub fn standard() -> Self {
        Self::new([PRE_AUTHORIZE, POST_AUTHORIZE, SECURED])
    }

    /// Add a marker kind (e.g. `RolesAllowed`, `PermitAll`)
    pub fn with_marker(mut self, marker: impl Into<MarkerId>) -> Self {
        self.insert(marker.into());
        self
    }

    fn insert(&mut self, marker: MarkerId) {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
    }

    pub fn contains(&self, marker: &MarkerId) -> bool {
        self.markers.contains(marker)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarkerId> {
        self.markers.iter()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a MarkerSet {
    type Item = &'a MarkerId;
    type IntoIter = std::slice::Iter<'a, MarkerId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
