/*!
 * Handler Guard Library
 * Fail-closed method security for request handlers
 *
 * Handlers on request-handling types are denied unless the type or the
 * method carries an access-control marker. Everything else passes through
 * to the host's normal authorization path.
 */

pub mod config;
pub mod core;
pub mod metadata;
pub mod monitoring;
pub mod policy;
pub mod report;

// Re-exports
pub use config::GuardConfig;
pub use crate::core::{Entity, GuardError, GuardResult, HandlerMethod, MarkerId, MethodRef, TypeRef};
pub use metadata::{HandlerClassifier, InheritancePolicy, Introspector, Manifest, MetadataRegistry};
pub use monitoring::init_tracing;
pub use policy::{
    AccessDecisionManager, ConfigAttribute, Decision, MarkerSet, MethodSecurityMetadataSource,
    PolicyResolver, Verdict,
};
pub use report::CoverageReport;
