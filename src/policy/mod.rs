/*!
 * Policy Module
 * Fail-closed resolution of handler access policies
 *
 * ## Usage
 * ```
 * use handler_guard::core::TypeRef;
 * use handler_guard::metadata::MetadataRegistry;
 * use handler_guard::policy::{Decision, MarkerSet, MethodSecurityMetadataSource, PolicyResolver};
 * use std::sync::Arc;
 *
 * let registry = Arc::new(MetadataRegistry::default());
 * let controller = TypeRef::new("app::UserController");
 * registry.declare_type(controller.clone(), ["Controller"]);
 * registry.declare_method(controller.method("list"), ["PreAuthorize"]);
 *
 * let resolver = PolicyResolver::from_registry(MarkerSet::standard(), registry).unwrap();
 * let list = controller.method("list");
 * let delete = controller.method("delete");
 * assert_eq!(resolver.resolve(&controller, Some(&list)).unwrap(), Decision::Defer);
 * assert_eq!(resolver.resolve(&controller, Some(&delete)).unwrap(), Decision::DenyAll);
 * ```
 */

mod decision;
mod markers;
mod resolver;
mod voter;

pub use decision::{ConfigAttribute, Decision};
pub use markers::MarkerSet;
pub use resolver::{MethodSecurityMetadataSource, PolicyResolver};
pub use voter::{AccessDecisionManager, AccessVoter, DenyAllVoter, Verdict, Vote};
