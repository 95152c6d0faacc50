use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sword_core::accessor::{InMemoryRepository, RepositoryAccessor};
use sword_core::config::{SwordConfiguration, METS_DSPACE_SIP};
use sword_core::models::{CollectionTarget, ItemTarget, ObjectKind, TargetId};
use sword_core::{ErrorClass, Result, SwordError};
use sword_service::SwordService;

const CONFIG: &str = r#"
    deposit_url = "https://repo.example.org/sword/deposit"
    servicedocument_url = "https://repo.example.org/sword/servicedocument"
    mediated = true
    accepts = ["application/zip"]
    item_accepts = ["application/zip", "application/pdf"]
    max_upload_size = 16384
    upstream_timeout_ms = 50

    [[item_accept_packaging]]
    identifier = "http://purl.org/net/sword/package/SimpleZip"
    q = 0.5
"#;

fn config(expose_items: bool) -> SwordConfiguration {
    let mut config = SwordConfiguration::from_toml_str(CONFIG).unwrap();
    config.expose_items = expose_items;
    config
}

fn repository() -> InMemoryRepository {
    InMemoryRepository::new()
        .with_community("com-1")
        .with_collection(CollectionTarget {
            id: TargetId::from("col-42"),
            name: Some("Physics Papers".into()),
            license: Some(String::new()),
            short_description: Some("Preprints in physics".into()),
        })
        .with_collection(CollectionTarget {
            id: TargetId::from("col-empty"),
            name: None,
            license: None,
            short_description: None,
        })
        .with_item(
            "col-42",
            ItemTarget {
                id: TargetId::from("col-42-item-1"),
                title: Some("Dark matter constraints".into()),
                description: None,
            },
        )
}

fn service(expose_items: bool) -> SwordService {
    SwordService::new(Arc::new(repository()), config(expose_items)).unwrap()
}

/// Answers every lookup slower than the configured deadline.
struct SlowRepository;

#[async_trait]
impl RepositoryAccessor for SlowRepository {
    async fn object_kind(&self, _target: &TargetId) -> Result<Option<ObjectKind>> {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(Some(ObjectKind::Collection))
    }
    async fn name(&self, _target: &TargetId) -> Result<Option<String>> {
        Ok(None)
    }
    async fn license_text(&self, _target: &TargetId) -> Result<Option<String>> {
        Ok(None)
    }
    async fn short_description(&self, _target: &TargetId) -> Result<Option<String>> {
        Ok(None)
    }
    async fn deposit_eligible_items(&self, _collection: &TargetId) -> Result<Vec<ItemTarget>> {
        Ok(vec![])
    }
}

/// A collection whose licence cannot be read.
struct BrokenLicenseRepository;

#[async_trait]
impl RepositoryAccessor for BrokenLicenseRepository {
    async fn object_kind(&self, _target: &TargetId) -> Result<Option<ObjectKind>> {
        Ok(Some(ObjectKind::Collection))
    }
    async fn name(&self, _target: &TargetId) -> Result<Option<String>> {
        Ok(Some("Physics Papers".into()))
    }
    async fn license_text(&self, _target: &TargetId) -> Result<Option<String>> {
        Err(SwordError::upstream("license text lookup", "connection reset"))
    }
    async fn short_description(&self, _target: &TargetId) -> Result<Option<String>> {
        Ok(None)
    }
    async fn deposit_eligible_items(&self, _collection: &TargetId) -> Result<Vec<ItemTarget>> {
        Ok(vec![])
    }
}

#[tokio::test]
async fn test_collection_document_for_physics_papers() {
    let d = service(false)
        .collection_document(&TargetId::from("col-42"))
        .await
        .unwrap();

    assert_eq!(d.location, "https://repo.example.org/sword/deposit/col-42");
    assert_eq!(d.title.as_deref(), Some("Physics Papers"));
    assert_eq!(d.policy, None);
    assert_eq!(d.dc_abstract.as_deref(), Some("Preprints in physics"));
    assert!(d.mediation);
    assert_eq!(d.accepts, vec!["application/zip"]);
    assert_eq!(d.accept_packaging.get(METS_DSPACE_SIP), Some(&1.0));
    assert_eq!(d.sub_service, None);
}

#[tokio::test]
async fn test_sub_service_is_advertised_when_items_are_exposed() {
    let service = service(true);

    let d = service
        .collection_document(&TargetId::from("col-42"))
        .await
        .unwrap();
    assert_eq!(
        d.sub_service.as_deref(),
        Some("https://repo.example.org/sword/servicedocument/col-42")
    );

    // Advertised even when the collection has no items yet
    let empty = service
        .collection_document(&TargetId::from("col-empty"))
        .await
        .unwrap();
    assert!(empty.sub_service.is_some());
}

#[tokio::test]
async fn test_non_collections_are_rejected() {
    let service = service(true);

    for id in ["com-1", "col-42-item-1"] {
        let err = service
            .collection_document(&TargetId::from(id))
            .await
            .unwrap_err();
        assert!(matches!(err, SwordError::TypeMismatch { .. }), "{}: {:?}", id, err);
        assert_eq!(err.class(), ErrorClass::Client);
    }
}

#[tokio::test]
async fn test_unknown_target_is_not_found() {
    let err = service(false)
        .collection_document(&TargetId::from("col-404"))
        .await
        .unwrap_err();
    assert_eq!(err, SwordError::NotFound { id: "col-404".into() });
}

#[tokio::test]
async fn test_slow_accessor_fails_the_request() {
    let service = SwordService::new(Arc::new(SlowRepository), config(false)).unwrap();

    let err = service
        .collection_document(&TargetId::from("col-42"))
        .await
        .unwrap_err();
    match &err {
        SwordError::UpstreamUnavailable { operation, reason } => {
            assert_eq!(operation, "object kind lookup");
            assert!(reason.contains("50ms"));
        }
        other => panic!("expected UpstreamUnavailable, got {:?}", other),
    }
    assert_eq!(err.class(), ErrorClass::Server);
}

#[tokio::test]
async fn test_upstream_failure_is_not_masked() {
    let service = SwordService::new(Arc::new(BrokenLicenseRepository), config(false)).unwrap();

    let err = service
        .collection_document(&TargetId::from("col-42"))
        .await
        .unwrap_err();
    assert!(matches!(err, SwordError::UpstreamUnavailable { .. }));
}

#[tokio::test]
async fn test_sub_service_document_lists_items() {
    let doc = service(true)
        .sub_service_document(&TargetId::from("col-42"))
        .await
        .unwrap();

    assert_eq!(doc.version, "1.3");
    assert_eq!(doc.max_upload_size, Some(16384));
    assert_eq!(doc.workspace.title, "Physics Papers");
    assert_eq!(doc.workspace.collections.len(), 1);

    let item = &doc.workspace.collections[0];
    assert_eq!(
        item.location,
        "https://repo.example.org/sword/deposit/col-42-item-1"
    );
    assert_eq!(item.accepts, vec!["application/zip", "application/pdf"]);
    assert_eq!(
        item.accept_packaging
            .get("http://purl.org/net/sword/package/SimpleZip"),
        Some(&0.5)
    );
    assert_eq!(item.sub_service, None);

    let xml = doc.to_xml().unwrap();
    assert!(xml.contains("<sword:version>1.3</sword:version>"));
    assert!(xml.contains("<sword:maxUploadSize>16384</sword:maxUploadSize>"));
    assert!(xml.contains("<atom:title>Physics Papers</atom:title>"));
    assert!(xml.contains(
        r#"<app:collection href="https://repo.example.org/sword/deposit/col-42-item-1">"#
    ));
    assert!(!xml.contains("sword:service"));
}

#[tokio::test]
async fn test_empty_collection_gives_empty_workspace() {
    let doc = service(true)
        .sub_service_document(&TargetId::from("col-empty"))
        .await
        .unwrap();
    assert_eq!(doc.workspace.title, "Deposit targets");
    assert!(doc.workspace.collections.is_empty());
}

#[tokio::test]
async fn test_sub_service_requires_item_exposure() {
    let err = service(false)
        .sub_service_document(&TargetId::from("col-42"))
        .await
        .unwrap_err();
    assert!(matches!(err, SwordError::NotFound { .. }));

    let err = service(true)
        .sub_service_document(&TargetId::from("com-1"))
        .await
        .unwrap_err();
    assert!(matches!(err, SwordError::TypeMismatch { .. }));
}
