//! Tests for domain value objects

use brood_domain::{BindPolicy, ChildId, ServiceKey, ServiceLifetime};
use std::collections::HashSet;
use uuid::Uuid;

struct Mailer;

struct Session;

#[test]
fn test_lifetime_names() {
    assert_eq!(ServiceLifetime::Singleton.to_string(), "singleton");
    assert_eq!(ServiceLifetime::Scoped.as_str(), "scoped");
    assert_eq!(ServiceLifetime::Transient.as_str(), "transient");
}

#[test]
fn test_lifetime_caching() {
    assert!(ServiceLifetime::Singleton.is_cached());
    assert!(ServiceLifetime::Scoped.is_cached());
    assert!(!ServiceLifetime::Transient.is_cached());
}

#[test]
fn test_child_ids_are_unique() {
    let ids: HashSet<ChildId> = (0..100).map(|_| ChildId::new()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_child_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = ChildId::from(uuid);

    assert_eq!(id.as_uuid(), &uuid);
    assert_eq!(id.to_string(), uuid.to_string());
}

#[test]
fn test_service_key_identity() {
    assert_eq!(ServiceKey::of::<Mailer>(), ServiceKey::of::<Mailer>());
    assert_ne!(ServiceKey::of::<Mailer>(), ServiceKey::of::<Session>());

    let keys: HashSet<ServiceKey> = [
        ServiceKey::of::<Mailer>(),
        ServiceKey::of::<Mailer>(),
        ServiceKey::of::<Session>(),
    ]
    .into_iter()
    .collect();
    assert_eq!(keys.len(), 2);
}

#[test]
fn test_service_key_names_type() {
    let key = ServiceKey::of::<Mailer>();

    assert!(key.type_name().ends_with("Mailer"));
    assert_eq!(key.to_string(), key.type_name());
}

#[test]
fn test_bind_policy_default_is_strict() {
    assert_eq!(BindPolicy::default(), BindPolicy::Strict);
}
