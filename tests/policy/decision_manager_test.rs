/*!
 * Access Decision Integration Tests
 * Resolver decisions translated into transport verdicts
 */

use handler_guard::metadata::MetadataRegistry;
use handler_guard::policy::{AccessVoter, Vote};
use handler_guard::{
    AccessDecisionManager, ConfigAttribute, HandlerMethod, MarkerSet, PolicyResolver, TypeRef,
    Verdict,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn manager() -> (AccessDecisionManager, TypeRef) {
    let registry = Arc::new(MetadataRegistry::default());
    let controller = TypeRef::new("app::AccountController");
    registry.declare_type(controller.clone(), ["Controller"]);
    registry.declare_method(controller.method("balance"), ["PreAuthorize"]);

    let resolver = PolicyResolver::from_registry(MarkerSet::standard(), registry).unwrap();
    let manager = AccessDecisionManager::new(Arc::new(resolver)).with_downstream(|handler| {
        Verdict::Granted {
            reason: format!("downstream evaluated {}", handler.handler_type),
        }
    });
    (manager, controller)
}

#[test]
fn test_unmarked_method_forbidden() {
    let (manager, controller) = manager();
    let handler = HandlerMethod::new(controller.clone(), controller.method("transfer"));

    let verdict = manager.decide(&handler).unwrap();
    assert!(verdict.is_denied());
    assert_eq!(verdict.status_code(), Some(403));
}

#[test]
fn test_marked_method_reaches_downstream() {
    let (manager, controller) = manager();
    let handler = HandlerMethod::new(controller.clone(), controller.method("balance"));

    let verdict = manager.decide(&handler).unwrap();
    assert_eq!(
        verdict,
        Verdict::Granted {
            reason: "downstream evaluated app::AccountController".to_string()
        }
    );
}

#[test]
fn test_unidentified_method_forbidden() {
    let (manager, controller) = manager();
    let verdict = manager.decide(&HandlerMethod::unidentified(controller)).unwrap();
    assert!(verdict.is_denied());
}

struct AuditVoter(Arc<AtomicUsize>);

impl AccessVoter for AuditVoter {
    fn vote(&self, _: &HandlerMethod, _: &[ConfigAttribute]) -> Vote {
        self.0.fetch_add(1, Ordering::Relaxed);
        Vote::Abstain
    }

    fn name(&self) -> &str {
        "audit"
    }
}

#[test]
fn test_deny_all_short_circuits_later_voters() {
    let (mut manager, controller) = manager();
    let calls = Arc::new(AtomicUsize::new(0));
    manager.add_voter(Box::new(AuditVoter(calls.clone())));

    let handler = HandlerMethod::new(controller.clone(), controller.method("transfer"));
    assert!(manager.decide(&handler).unwrap().is_denied());
    assert_eq!(calls.load(Ordering::Relaxed), 0);
}

#[test]
fn test_verdict_serialization() {
    let json = serde_json::to_value(Verdict::Denied {
        reason: "Denied by voter 'deny_all'".to_string(),
    })
    .unwrap();
    assert_eq!(json["verdict"], "denied");
    assert_eq!(json["reason"], "Denied by voter 'deny_all'");
}
