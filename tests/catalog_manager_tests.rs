//! Integration tests for the catalog managers through the public API.

use std::{collections::HashMap, sync::Arc};

use scuttle_catalog::{
    CatalogContext, CatalogError, CatalogManager, EmptyCatalogManager, InMemoryCatalogManager,
    MemoryTableProvider, TableProvider,
};

fn no_properties() -> HashMap<String, String> {
    HashMap::new()
}

#[test]
fn test_read_only_current_catalog_is_default() {
    let manager = EmptyCatalogManager::new();

    assert_eq!(manager.current_catalog().name(), "default");
}

#[test]
fn test_read_only_use_default_has_no_effect() {
    let manager = EmptyCatalogManager::new();
    let before = manager.current_catalog();

    assert!(manager.use_catalog("default").is_ok());

    assert!(Arc::ptr_eq(&before, &manager.current_catalog()));
    assert_eq!(manager.catalog_names(), vec!["default"]);
}

#[test]
fn test_read_only_use_unknown_catalog() {
    let manager = EmptyCatalogManager::new();

    let err = manager.use_catalog("prod").unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(_)));
    assert!(err.to_string().contains("prod"));
}

#[test]
fn test_read_only_drop_default_unsupported() {
    let manager = EmptyCatalogManager::new();

    let err = manager.drop_catalog("default").unwrap_err();

    assert!(matches!(err, CatalogError::Unsupported(_)));
    assert!(manager.get_catalog("default").is_some());
}

#[test]
fn test_read_only_rejects_every_mutation() {
    let manager = EmptyCatalogManager::new();
    let provider: Arc<dyn TableProvider> = Arc::new(MemoryTableProvider::new("local"));

    for name in ["default", "DEFAULT", "other", ""] {
        assert!(matches!(
            manager.create_catalog(name, "memory", &no_properties()),
            Err(CatalogError::Unsupported(_))
        ));
        assert!(matches!(
            manager.drop_catalog(name),
            Err(CatalogError::Unsupported(_))
        ));
        assert!(matches!(
            manager.register_table_provider(name, Arc::clone(&provider)),
            Err(CatalogError::Unsupported(_))
        ));
    }

    assert!(manager.get_catalog("other").is_none());
    assert!(manager.current_catalog().table_providers().is_empty());
}

#[test]
fn test_full_create_use_current() {
    let manager = InMemoryCatalogManager::new();

    manager
        .create_catalog("prod", "memory", &no_properties())
        .unwrap();
    manager.use_catalog("prod").unwrap();

    assert_eq!(manager.current_catalog().name(), "prod");
}

#[test]
fn test_use_after_create_ignores_case() {
    let manager = InMemoryCatalogManager::new();
    let names = ["Foo", "bar_2", "Ümlaut"];

    for name in names {
        manager
            .create_catalog(name, "memory", &no_properties())
            .unwrap();
    }

    for name in names {
        manager.use_catalog(&name.to_uppercase()).unwrap();
        assert_eq!(manager.current_catalog().name(), name);

        manager.use_catalog(&name.to_lowercase()).unwrap();
        assert_eq!(manager.current_catalog().name(), name);
    }
}

#[test]
fn test_lookup_ignores_final_sigma() {
    let manager = InMemoryCatalogManager::new();
    manager
        .create_catalog("ΟΔΟΣ", "memory", &no_properties())
        .unwrap();

    for name in ["οδοσ", "οδος", "Οδος", "ΟΔΟΣ"] {
        let catalog = manager.get_catalog(name).unwrap();
        assert_eq!(catalog.name(), "ΟΔΟΣ");
    }

    let err = manager
        .create_catalog("οδοσ", "memory", &no_properties())
        .unwrap_err();
    assert_eq!(err, CatalogError::AlreadyExists("οδοσ".to_string()));
}

#[test]
fn test_use_nonexistent_never_changes_current() {
    let manager = InMemoryCatalogManager::new();
    manager
        .create_catalog("prod", "memory", &no_properties())
        .unwrap();
    manager.use_catalog("prod").unwrap();

    for _ in 0..3 {
        let err = manager.use_catalog("nonexistent").unwrap_err();
        assert_eq!(err, CatalogError::NotFound("nonexistent".to_string()));
        assert_eq!(manager.current_catalog().name(), "prod");
    }
}

#[test]
fn test_managers_are_interchangeable() {
    let managers: Vec<Arc<dyn CatalogManager>> = vec![
        Arc::new(InMemoryCatalogManager::new()),
        Arc::new(EmptyCatalogManager::new()),
    ];

    for manager in managers {
        let context = CatalogContext::new(manager.as_ref());

        assert_eq!(context.resolve_catalog(None).unwrap().name(), "default");
        assert!(context.resolve_catalog(Some("Default")).is_ok());
        assert!(manager.get_catalog("other").is_none());
    }
}

#[test]
fn test_provider_registration_visible_through_context() {
    let manager = InMemoryCatalogManager::new();
    manager
        .create_catalog("lake", "memory", &no_properties())
        .unwrap();
    manager
        .register_table_provider(
            "LAKE",
            Arc::new(MemoryTableProvider::new("Parquet").with_table("trips")),
        )
        .unwrap();

    let context = CatalogContext::new(&manager);
    let provider = context.table_provider(Some("lake"), "parquet").unwrap();
    assert_eq!(provider.table_names(), vec!["trips"]);

    let err = context.table_provider(None, "parquet").unwrap_err();
    assert_eq!(
        err,
        CatalogError::TableProviderNotFound {
            catalog: "default".to_string(),
            provider: "parquet".to_string(),
        }
    );
}

#[test]
fn test_concurrent_sessions() {
    let manager = Arc::new(InMemoryCatalogManager::new());

    std::thread::scope(|scope| {
        for worker in 0..8 {
            let manager = Arc::clone(&manager);
            scope.spawn(move || {
                let name = format!("catalog_{worker}");
                manager
                    .create_catalog(&name, "memory", &HashMap::new())
                    .unwrap();

                for round in 0..50 {
                    let provider = MemoryTableProvider::new(format!("p{}", round % 5));
                    manager
                        .register_table_provider(&name, Arc::new(provider))
                        .unwrap();

                    // The current catalog always resolves, whoever switched last.
                    let current = manager.current_catalog();
                    assert!(manager.get_catalog(current.name()).is_some());
                    manager.use_catalog(&name).unwrap();
                }
            });
        }
    });

    assert_eq!(manager.catalog_names().len(), 9);
    for worker in 0..8 {
        let catalog = manager.get_catalog(&format!("CATALOG_{worker}")).unwrap();
        assert_eq!(catalog.provider_names(), vec!["p0", "p1", "p2", "p3", "p4"]);
    }
}

#[test]
fn test_concurrent_drop_and_read() {
    let manager = Arc::new(InMemoryCatalogManager::new());
    for idx in 0..20 {
        manager
            .create_catalog(&format!("tmp{idx}"), "memory", &no_properties())
            .unwrap();
    }

    std::thread::scope(|scope| {
        let dropper = Arc::clone(&manager);
        scope.spawn(move || {
            for idx in 0..20 {
                let name = format!("tmp{idx}");
                // Either dropped, or refused because a reader made it current.
                match dropper.drop_catalog(&name) {
                    Ok(()) | Err(CatalogError::CatalogInUse(_)) => {}
                    Err(err) => panic!("unexpected error: {err}"),
                }
            }
        });

        let reader = Arc::clone(&manager);
        scope.spawn(move || {
            for idx in 0..20 {
                let _ = reader.use_catalog(&format!("tmp{idx}"));
                let current = reader.current_catalog();
                assert!(reader.get_catalog(current.name()).is_some());
            }
        });
    });

    let current = manager.current_catalog();
    assert!(manager.get_catalog(current.name()).is_some());
}
