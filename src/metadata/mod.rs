/*!
 * Metadata Module
 * Handler classification and marker introspection
 *
 * The policy resolver never inspects a runtime's reflection API directly. It
 * asks two injected collaborators:
 * - a [`HandlerClassifier`]: is this type exposed to requests at all?
 * - an [`Introspector`]: does this type or method carry a given marker?
 *
 * [`MetadataRegistry`] implements both over an in-memory model that hosts
 * populate from a [`Manifest`] or from their own adapter.
 */

pub mod classifier;
pub mod manifest;
pub mod registry;
pub mod traits;

pub use classifier::{RegisteredClassifier, SuffixClassifier, TagClassifier};
pub use manifest::{Manifest, MethodEntry, TypeEntry};
pub use registry::{InheritancePolicy, MetadataRegistry};
pub use traits::{HandlerClassifier, Introspector};
