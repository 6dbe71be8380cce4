//! Independent Composition Root Tests
//!
//! Roots built from one collection, or from clones of it, share child
//! recipes but never built children.

use brood_infrastructure::children::{ChildContainerExt, ChildProviderFactory};
use brood_infrastructure::di::ServiceCollection;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct Settings {
    region: String,
}

struct Mailer {
    region: String,
}

fn mailer_services(configured: &Arc<AtomicUsize>) -> ServiceCollection {
    let counter = Arc::clone(configured);
    let mut services = ServiceCollection::new();
    services
        .add_child_container(move |child, parent| {
            counter.fetch_add(1, Ordering::SeqCst);
            let settings = parent.get::<Settings>()?;
            child.add_singleton(move |_| {
                Ok(Mailer {
                    region: settings.region.clone(),
                })
            });
            Ok(())
        })
        .forward_singleton::<Mailer>();
    services
}

fn with_region(services: &ServiceCollection, region: &str) -> ServiceCollection {
    let mut services = services.clone();
    let region = region.to_string();
    services.add_singleton(move |_| {
        Ok(Settings {
            region: region.clone(),
        })
    });
    services
}

#[test]
fn test_two_builds_materialize_separate_children() {
    let configured = Arc::new(AtomicUsize::new(0));
    let services = with_region(&mailer_services(&configured), "eu-west");

    let first = services.build();
    let second = services.build();
    let a = first.get::<Mailer>().unwrap();
    let b = second.get::<Mailer>().unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(configured.load(Ordering::SeqCst), 2);
    assert_eq!(first.get::<ChildProviderFactory>().unwrap().registry().len(), 1);
    assert_eq!(second.get::<ChildProviderFactory>().unwrap().registry().len(), 1);
}

#[test]
fn test_each_root_configures_child_with_its_own_singletons() {
    let configured = Arc::new(AtomicUsize::new(0));
    let declared = mailer_services(&configured);

    let eu = with_region(&declared, "eu-west").build();
    let us = with_region(&declared, "us-east").build();

    assert_eq!(eu.get::<Mailer>().unwrap().region, "eu-west");
    assert_eq!(us.get::<Mailer>().unwrap().region, "us-east");
}

#[test]
fn test_rebuild_after_dispose_yields_live_child() {
    let configured = Arc::new(AtomicUsize::new(0));
    let services = with_region(&mailer_services(&configured), "eu-west");

    let first = services.build();
    first.get::<Mailer>().unwrap();
    first.dispose();

    let second = services.build();

    assert!(second.get::<Mailer>().is_ok());
    assert_eq!(configured.load(Ordering::SeqCst), 2);
}

#[test]
fn test_cloned_collection_outlives_dropped_root() {
    let configured = Arc::new(AtomicUsize::new(0));
    let services = with_region(&mailer_services(&configured), "eu-west");
    let cloned = services.clone();

    let first = services.build();
    first.get::<Mailer>().unwrap();
    drop(first);

    let provider = cloned.build();

    assert_eq!(provider.get::<Mailer>().unwrap().region, "eu-west");
}
