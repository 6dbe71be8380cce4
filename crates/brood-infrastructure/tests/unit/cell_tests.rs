//! Parent reference cell tests

use brood_domain::{BindPolicy, ChildId, Error, ServiceLifetime};
use brood_infrastructure::children::{ScopedParentCell, SingletonParentCell};
use brood_infrastructure::di::ServiceCollection;

#[test]
fn test_unbound_cell_reports_unbound_parent_reference() {
    let cell = SingletonParentCell::new(ChildId::new(), BindPolicy::Strict);

    assert!(!cell.is_bound());
    match cell.get() {
        Err(Error::UnboundParentReference { lifetime }) => {
            assert_eq!(lifetime, ServiceLifetime::Singleton);
        }
        other => panic!("Expected UnboundParentReference, got {other:?}"),
    }
}

#[test]
fn test_scoped_cell_reports_its_lifetime() {
    let cell = ScopedParentCell::new(ChildId::new(), BindPolicy::Strict);

    assert_eq!(cell.lifetime(), ServiceLifetime::Scoped);
    assert!(matches!(
        cell.get(),
        Err(Error::UnboundParentReference {
            lifetime: ServiceLifetime::Scoped
        })
    ));
}

#[test]
fn test_bound_cell_returns_parent() {
    let parent = ServiceCollection::new().build();
    let cell = SingletonParentCell::new(ChildId::new(), BindPolicy::Strict);

    cell.bind(&parent).unwrap();

    assert!(cell.is_bound());
    assert!(cell.get().unwrap().same_as(&parent));
}

#[test]
fn test_rebinding_same_parent_is_idempotent() {
    let parent = ServiceCollection::new().build();
    let cell = SingletonParentCell::new(ChildId::new(), BindPolicy::Strict);

    cell.bind(&parent).unwrap();
    cell.bind(&parent.clone()).unwrap();

    assert!(cell.get().unwrap().same_as(&parent));
}

#[test]
fn test_strict_policy_rejects_different_parent() {
    let id = ChildId::new();
    let first = ServiceCollection::new().build();
    let second = ServiceCollection::new().build();
    let cell = SingletonParentCell::new(id, BindPolicy::Strict);

    cell.bind(&first).unwrap();
    let err = cell.bind(&second).unwrap_err();

    match err {
        Error::ParentMismatch { id: child, lifetime } => {
            assert_eq!(child, id);
            assert_eq!(lifetime, ServiceLifetime::Singleton);
        }
        other => panic!("Expected ParentMismatch, got {other:?}"),
    }
    assert!(cell.get().unwrap().same_as(&first));
}

#[test]
fn test_strict_policy_rejects_sibling_scope() {
    let root = ServiceCollection::new().build();
    let scope_1 = root.create_scope().unwrap();
    let scope_2 = root.create_scope().unwrap();
    let cell = ScopedParentCell::new(ChildId::new(), BindPolicy::Strict);

    cell.bind(&scope_1).unwrap();

    assert!(cell.bind(&scope_2).is_err());
    assert!(cell.bind(&root).is_err());
}

#[test]
fn test_last_wins_policy_replaces_parent() {
    let first = ServiceCollection::new().build();
    let second = ServiceCollection::new().build();
    let cell = SingletonParentCell::new(ChildId::new(), BindPolicy::LastWins);

    cell.bind(&first).unwrap();
    cell.bind(&second).unwrap();

    assert!(cell.get().unwrap().same_as(&second));
}

#[test]
fn test_cell_does_not_keep_parent_alive() {
    let cell = SingletonParentCell::new(ChildId::new(), BindPolicy::Strict);
    {
        let parent = ServiceCollection::new().build();
        cell.bind(&parent).unwrap();
    }

    assert!(matches!(cell.get(), Err(Error::Disposed)));

    // A dropped parent may be replaced even under the strict policy
    let replacement = ServiceCollection::new().build();
    cell.bind(&replacement).unwrap();
    assert!(cell.get().unwrap().same_as(&replacement));
}
