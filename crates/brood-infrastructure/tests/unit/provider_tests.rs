//! Service provider tests

use brood_domain::{Error, ServiceKey, ServiceLifetime};
use brood_infrastructure::di::{Instance, ProviderOptions, ServiceCollection, ServiceDescriptor};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

struct Clock;

struct Session;

struct Request;

#[derive(Debug)]
struct Alpha;

#[derive(Debug)]
struct Beta;

struct Wrong;

#[test]
fn test_singleton_is_shared_across_scopes() {
    let mut services = ServiceCollection::new();
    services.add_singleton(|_| Ok(Clock));
    let provider = services.build();

    let from_root = provider.get::<Clock>().unwrap();
    let from_scope = provider.create_scope().unwrap().get::<Clock>().unwrap();

    assert!(Arc::ptr_eq(&from_root, &from_scope));
}

#[test]
fn test_scoped_is_shared_within_scope_only() {
    let mut services = ServiceCollection::new();
    services.add_scoped(|_| Ok(Session));
    let provider = services.build();

    let scope_1 = provider.create_scope().unwrap();
    let scope_2 = provider.create_scope().unwrap();

    let first = scope_1.get::<Session>().unwrap();
    let again = scope_1.get::<Session>().unwrap();
    let other = scope_2.get::<Session>().unwrap();

    assert!(Arc::ptr_eq(&first, &again));
    assert!(!Arc::ptr_eq(&first, &other));
}

#[test]
fn test_transient_is_never_shared() {
    let mut services = ServiceCollection::new();
    services.add_transient(|_| Ok(Request));
    let provider = services.build();

    let first = provider.get::<Request>().unwrap();
    let second = provider.get::<Request>().unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_unregistered_service() {
    let provider = ServiceCollection::new().build();

    let err = provider.get::<Clock>().err().unwrap();
    assert!(err.is_not_registered());
    assert!(provider.try_get::<Clock>().unwrap().is_none());
    assert!(!provider.is_registered::<Clock>());
}

#[test]
fn test_scoped_from_root_is_rejected_by_default() {
    let mut services = ServiceCollection::new();
    services.add_scoped(|_| Ok(Session));
    let provider = services.build();

    assert!(matches!(
        provider.get::<Session>(),
        Err(Error::ScopedFromRoot { .. })
    ));
}

#[test]
fn test_scoped_from_root_allowed_without_validation() {
    let mut services = ServiceCollection::with_options(ProviderOptions {
        validate_scopes: false,
    });
    services.add_scoped(|_| Ok(Session));
    let provider = services.build();

    let first = provider.get::<Session>().unwrap();
    let second = provider.get::<Session>().unwrap();
    let scoped = provider.create_scope().unwrap().get::<Session>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(!Arc::ptr_eq(&first, &scoped));
}

#[test]
fn test_singleton_factory_receives_root() {
    let mut services = ServiceCollection::new();
    services
        .add_scoped(|_| Ok(Session))
        .add_singleton(|sp| {
            sp.get::<Session>()?;
            Ok(Clock)
        });
    let provider = services.build();
    let scope = provider.create_scope().unwrap();

    // A singleton cannot capture a scoped dependency through its scope
    assert!(matches!(
        scope.get::<Clock>(),
        Err(Error::ScopedFromRoot { .. })
    ));
}

#[test]
fn test_circular_dependency_is_detected() {
    let mut services = ServiceCollection::new();
    services
        .add_singleton(|sp| {
            sp.get::<Beta>()?;
            Ok(Alpha)
        })
        .add_singleton(|sp| {
            sp.get::<Alpha>()?;
            Ok(Beta)
        });
    let provider = services.build();

    match provider.get::<Alpha>() {
        Err(Error::CircularDependency { path }) => {
            assert_eq!(path.len(), 3);
            assert!(path[0].ends_with("Alpha"));
            assert!(path[1].ends_with("Beta"));
            assert!(path[2].ends_with("Alpha"));
        }
        other => panic!("Expected CircularDependency, got {other:?}"),
    }

    // The failed resolution caches nothing and leaves no frame behind
    assert_eq!(provider.cached_instances(), 0);
    assert!(provider.get::<Beta>().unwrap_err().is_circular_dependency());
}

#[test]
fn test_failed_factory_is_retried() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let mut services = ServiceCollection::new();
    services.add_singleton(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(Error::factory("Clock", "not ready"))
        } else {
            Ok(Clock)
        }
    });
    let provider = services.build();

    assert!(matches!(provider.get::<Clock>(), Err(Error::Factory { .. })));
    assert!(provider.get::<Clock>().is_ok());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_type_mismatch_is_reported() {
    let mut services = ServiceCollection::new();
    services.add(ServiceDescriptor::describe(
        ServiceKey::of::<Clock>(),
        ServiceLifetime::Transient,
        |_| Ok(Arc::new(Wrong) as Instance),
    ));
    let provider = services.build();

    assert!(matches!(
        provider.get::<Clock>(),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_get_instance_by_key() {
    let mut services = ServiceCollection::new();
    services.add_singleton(|_| Ok(Clock));
    let provider = services.build();

    let key = ServiceKey::of::<Clock>();
    let erased = provider.get_instance(key).unwrap();

    assert!(erased.downcast::<Clock>().is_ok());
    assert_eq!(provider.lifetime_of(key), Some(ServiceLifetime::Singleton));
    assert_eq!(provider.lifetime_of(ServiceKey::of::<Beta>()), None);
}

#[test]
fn test_scope_identity() {
    let provider = ServiceCollection::new().build();
    let scope = provider.create_scope().unwrap();
    let sibling = scope.create_scope().unwrap();

    assert!(provider.is_root());
    assert!(!scope.is_root());
    assert!(scope.same_root(&provider));
    assert!(scope.root().same_as(&provider));
    assert!(!sibling.same_as(&scope));
    assert_ne!(scope.id(), provider.id());
    assert_eq!(scope.root_id(), provider.id());
}

#[test]
fn test_dispose_hooks_run_in_reverse_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let provider = ServiceCollection::new().build();

    for step in 1..=3 {
        let order = Arc::clone(&order);
        provider
            .on_dispose(move || order.lock().unwrap().push(step))
            .unwrap();
    }
    provider.dispose();
    provider.dispose();

    assert_eq!(*order.lock().unwrap(), vec![3, 2, 1]);
}

#[test]
fn test_disposed_provider_rejects_resolution() {
    let mut services = ServiceCollection::new();
    services
        .add_singleton(|_| Ok(Clock))
        .add_scoped(|_| Ok(Session));
    let provider = services.build();
    let scope = provider.create_scope().unwrap();
    scope.get::<Session>().unwrap();
    provider.get::<Clock>().unwrap();

    scope.dispose();
    assert!(scope.is_disposed());
    assert!(!provider.is_disposed());
    assert_eq!(scope.cached_instances(), 0);
    assert!(matches!(scope.get::<Session>(), Err(Error::Disposed)));

    provider.dispose();
    assert_eq!(provider.cached_instances(), 0);
    assert!(matches!(provider.get::<Clock>(), Err(Error::Disposed)));
    assert!(matches!(provider.create_scope(), Err(Error::Disposed)));
    assert!(matches!(provider.on_dispose(|| {}), Err(Error::Disposed)));
}

#[test]
fn test_dropping_last_scope_handle_disposes() {
    let disposed = Arc::new(AtomicUsize::new(0));
    let provider = ServiceCollection::new().build();
    let scope = provider.create_scope().unwrap();
    let weak = scope.downgrade();

    let counter = Arc::clone(&disposed);
    scope
        .on_dispose(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    drop(scope);

    assert_eq!(disposed.load(Ordering::SeqCst), 1);
    assert!(weak.upgrade().is_none());
}

#[test]
fn test_concurrent_singleton_is_created_once() {
    const THREADS: usize = 8;

    let created = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&created);
    let mut services = ServiceCollection::new();
    services.add_singleton(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        thread::sleep(std::time::Duration::from_millis(10));
        Ok(Clock)
    });
    let provider = services.build();
    let barrier = Barrier::new(THREADS);

    let instances: Vec<Arc<Clock>> = thread::scope(|s| {
        let mut handles = Vec::with_capacity(THREADS);
        for _ in 0..THREADS {
            handles.push(s.spawn(|| {
                barrier.wait();
                provider.get::<Clock>().unwrap()
            }));
        }
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(created.load(Ordering::SeqCst), 1);
    assert!(instances.iter().all(|i| Arc::ptr_eq(i, &instances[0])));
}
