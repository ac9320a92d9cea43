/*!
 * Policy Resolver Integration Tests
 * Fail-closed scenarios against the metadata registry
 */

use handler_guard::metadata::{InheritancePolicy, MetadataRegistry, SuffixClassifier};
use handler_guard::{
    Decision, Entity, GuardError, GuardResult, HandlerClassifier, HandlerMethod, Introspector,
    MarkerId, MarkerSet, MethodSecurityMetadataSource, PolicyResolver, TypeRef,
};
use std::sync::Arc;
use std::thread;

fn resolver(registry: &Arc<MetadataRegistry>) -> PolicyResolver {
    PolicyResolver::from_registry(MarkerSet::standard(), registry.clone()).unwrap()
}

#[test]
fn test_unmarked_controller_denied() {
    let registry = Arc::new(MetadataRegistry::default());
    let controller = TypeRef::new("app::UserController");
    registry.declare_type(controller.clone(), ["Controller"]);

    let decision = resolver(&registry)
        .resolve(&controller, Some(&controller.method("list")))
        .unwrap();
    assert_eq!(decision, Decision::DenyAll, "Unmarked handler must be denied");
}

#[test]
fn test_secured_controller_defers() {
    let registry = Arc::new(MetadataRegistry::default());
    let controller = TypeRef::new("app::AdminController");
    registry.declare_type(controller.clone(), ["Controller", "Secured"]);

    let decision = resolver(&registry)
        .resolve(&controller, Some(&controller.method("dashboard")))
        .unwrap();
    assert_eq!(decision, Decision::Defer);
}

#[test]
fn test_pre_authorized_method_defers() {
    let registry = Arc::new(MetadataRegistry::default());
    let controller = TypeRef::new("app::UserController");
    registry.declare_type(controller.clone(), ["Controller"]);
    registry.declare_method(controller.method("profile"), ["PreAuthorize"]);

    let resolver = resolver(&registry);
    assert_eq!(
        resolver
            .resolve(&controller, Some(&controller.method("profile")))
            .unwrap(),
        Decision::Defer
    );
    assert_eq!(
        resolver
            .resolve(&controller, Some(&controller.method("settings")))
            .unwrap(),
        Decision::DenyAll,
        "Sibling method without a marker stays denied"
    );
}

#[test]
fn test_plain_service_defers() {
    let registry = Arc::new(MetadataRegistry::default());
    let service = TypeRef::new("app::UserService");
    registry.declare_type(service.clone(), ["Service"]);

    let decision = resolver(&registry)
        .resolve(&service, Some(&service.method("load")))
        .unwrap();
    assert_eq!(decision, Decision::Defer);
}

struct FailingIntrospector;

impl Introspector for FailingIntrospector {
    fn has_tag(&self, entity: Entity<'_>, _marker: &MarkerId) -> GuardResult<bool> {
        match entity {
            Entity::Type(_) => Ok(false),
            Entity::Method(_) => Err(GuardError::introspection(entity, "metadata unavailable")),
        }
    }
}

#[test]
fn test_introspection_failure_is_not_a_decision() {
    let controller = TypeRef::new("app::UserController");
    let resolver = PolicyResolver::new(
        MarkerSet::standard(),
        Arc::new(SuffixClassifier::default()),
        Arc::new(FailingIntrospector),
    )
    .unwrap();

    let result = resolver.resolve(&controller, Some(&controller.method("list")));
    match result {
        Err(GuardError::Introspection { entity, reason }) => {
            assert_eq!(entity.as_str(), "method app::UserController::list");
            assert_eq!(reason.as_str(), "metadata unavailable");
        }
        other => panic!("expected introspection error, got {:?}", other),
    }
}

struct FailingClassifier;

impl HandlerClassifier for FailingClassifier {
    fn is_handler_component(&self, handler_type: &TypeRef) -> GuardResult<bool> {
        Err(GuardError::classification(handler_type.name.as_str(), "registry offline"))
    }
}

#[test]
fn test_classification_failure_is_not_a_decision() {
    let registry = Arc::new(MetadataRegistry::default());
    let controller = TypeRef::new("app::UserController");
    registry.declare_type(controller.clone(), ["Controller", "Secured"]);
    let resolver =
        PolicyResolver::new(MarkerSet::standard(), Arc::new(FailingClassifier), registry).unwrap();

    for method in [None, Some(controller.method("list"))] {
        match resolver.resolve(&controller, method.as_ref()) {
            Err(GuardError::Classification { type_name, reason }) => {
                assert_eq!(type_name.as_str(), "app::UserController");
                assert_eq!(reason.as_str(), "registry offline");
            }
            other => panic!("expected classification error, got {:?}", other),
        }
    }
}

struct TypeLookupFailure;

impl Introspector for TypeLookupFailure {
    fn has_tag(&self, entity: Entity<'_>, _marker: &MarkerId) -> GuardResult<bool> {
        match entity {
            Entity::Type(_) => Err(GuardError::introspection(entity, "type metadata unavailable")),
            Entity::Method(_) => Ok(true),
        }
    }
}

#[test]
fn test_type_level_introspection_failure_is_not_a_decision() {
    let controller = TypeRef::new("app::UserController");
    let resolver = PolicyResolver::new(
        MarkerSet::standard(),
        Arc::new(SuffixClassifier::default()),
        Arc::new(TypeLookupFailure),
    )
    .unwrap();

    let result = resolver.resolve(&controller, Some(&controller.method("list")));
    match result {
        Err(GuardError::Introspection { entity, .. }) => {
            assert_eq!(entity.as_str(), "type app::UserController");
        }
        other => panic!("expected introspection error, got {:?}", other),
    }
    assert!(resolver.resolve(&controller, None).is_err());
}

#[test]
fn test_composed_controller_and_custom_marker() {
    let registry = Arc::new(MetadataRegistry::new(InheritancePolicy::Composed));
    registry.compose("RestController", ["Controller"]);
    registry.compose("AdminOnly", ["Secured"]);

    let api = TypeRef::new("app::ApiController");
    registry.declare_type(api.clone(), ["RestController"]);
    registry.declare_method(api.method("purge"), ["AdminOnly"]);

    let resolver = resolver(&registry);
    assert_eq!(
        resolver.resolve(&api, Some(&api.method("purge"))).unwrap(),
        Decision::Defer
    );
    assert_eq!(
        resolver.resolve(&api, Some(&api.method("status"))).unwrap(),
        Decision::DenyAll
    );
}

#[test]
fn test_direct_policy_ignores_composed_markers() {
    let registry = Arc::new(MetadataRegistry::new(InheritancePolicy::Direct));
    registry.compose("AdminOnly", ["Secured"]);
    let controller = TypeRef::new("app::AdminController");
    registry.declare_type(controller.clone(), ["Controller"]);
    registry.declare_method(controller.method("purge"), ["AdminOnly"]);

    let decision = resolver(&registry)
        .resolve(&controller, Some(&controller.method("purge")))
        .unwrap();
    assert_eq!(decision, Decision::DenyAll);
}

#[test]
fn test_inherited_interface_marker() {
    let registry = Arc::new(MetadataRegistry::default());
    let api = TypeRef::new("app::UserApi");
    let controller = TypeRef::new("app::UserController");
    registry.declare_type(controller.clone(), ["Controller"]);
    registry.extend(controller.clone(), api.clone());
    registry.declare_method(api.method("list"), ["PostAuthorize"]);

    let resolver = resolver(&registry);
    let handler = HandlerMethod::new(controller.clone(), controller.method("list"));
    assert_eq!(resolver.resolve_handler(&handler).unwrap(), Decision::Defer);
}

#[test]
fn test_concurrent_resolution() {
    let registry = Arc::new(MetadataRegistry::default());
    let controller = TypeRef::new("app::UserController");
    registry.declare_type(controller.clone(), ["Controller"]);
    registry.declare_method(controller.method("list"), ["Secured"]);
    let resolver = Arc::new(resolver(&registry));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let resolver = resolver.clone();
            let controller = controller.clone();
            thread::spawn(move || {
                let method = if i % 2 == 0 { "list" } else { "delete" };
                (0..500)
                    .map(|_| {
                        resolver
                            .resolve(&controller, Some(&controller.method(method)))
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = if i % 2 == 0 {
            Decision::Defer
        } else {
            Decision::DenyAll
        };
        let decisions = handle.join().unwrap();
        assert!(decisions.iter().all(|d| *d == expected));
    }
}
