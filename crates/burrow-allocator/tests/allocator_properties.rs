use std::sync::Arc;

use burrow_allocator::{
    Allocator, AllocatorError, AllocatorService, AllocatorSettings, Fingerprint, Fingerprinter,
    Sha256Fingerprinter, ShortCode,
};
use burrow_storage::{InMemoryRepository, Repository, UrlRecord};

/// Gives every URL the same unsalted fingerprint; salted ones stay distinct.
struct CollidingFingerprinter;

impl Fingerprinter for CollidingFingerprinter {
    fn fingerprint(&self, url: &str, salt: u32) -> Fingerprint {
        if salt == 0 {
            Fingerprint::from_bytes([7; 32])
        } else {
            Sha256Fingerprinter.fingerprint(url, salt)
        }
    }
}

fn service() -> AllocatorService<InMemoryRepository> {
    AllocatorService::new(InMemoryRepository::new(), AllocatorSettings::default()).unwrap()
}

#[tokio::test]
async fn resolve_returns_allocated_url() {
    let service = service();
    let urls = [
        "https://example.com",
        "http://example.com/path?q=1#frag",
        "https://例え.jp/ページ",
        "https://example.com:8443/a/b/c/",
    ];

    for url in urls {
        let code = service.allocate(url).await.unwrap();
        assert_eq!(service.resolve(code.as_str()).await.unwrap(), url);
    }
}

#[tokio::test]
async fn repeated_allocation_reuses_code() {
    let service = service();

    let first = service.allocate("https://example.com").await.unwrap();
    let second = service.allocate("https://example.com").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(service.repository().len(), 1);
}

#[tokio::test]
async fn fingerprint_collision_yields_distinct_codes() {
    let service = AllocatorService::with_fingerprinter(
        InMemoryRepository::new(),
        CollidingFingerprinter,
        AllocatorSettings::default(),
    )
    .unwrap();

    let u1 = "https://one.example/landing";
    let u2 = "https://two.example/landing";

    let c1 = service.allocate(u1).await.unwrap();
    let c2 = service.allocate(u2).await.unwrap();

    assert_ne!(c1, c2);
    assert_eq!(c1.width(), 6);
    assert_eq!(c2.width(), 6);
    assert_eq!(service.resolve(c1.as_str()).await.unwrap(), u1);
    assert_eq!(service.resolve(c2.as_str()).await.unwrap(), u2);

    // Both URLs keep their codes on a second request.
    assert_eq!(service.allocate(u1).await.unwrap(), c1);
    assert_eq!(service.allocate(u2).await.unwrap(), c2);
    assert_eq!(service.repository().len(), 2);
}

#[tokio::test]
async fn exhausted_without_retries() {
    let settings = AllocatorSettings::builder()
        .max_collision_retries(0)
        .build();
    let service = AllocatorService::new(InMemoryRepository::new(), settings).unwrap();

    let url = "https://example.com";
    let taken = Sha256Fingerprinter.fingerprint(url, 0).to_code(6);
    service
        .repository()
        .insert_if_absent(&taken, UrlRecord::new("https://squatter.example"))
        .await
        .unwrap();

    let err = service.allocate(url).await.unwrap_err();
    assert!(
        matches!(
            err,
            AllocatorError::AllocationExhausted {
                attempts: 1,
                width: 6
            }
        ),
        "unexpected error: {err:?}"
    );

    // The squatter's mapping is untouched.
    assert_eq!(
        service.resolve(taken.as_str()).await.unwrap(),
        "https://squatter.example"
    );
    assert_eq!(service.repository().len(), 1);
}

#[tokio::test]
async fn concurrent_allocations_of_one_url_converge() {
    let service = Arc::new(service());
    let mut handles = vec![];

    for _ in 0..64 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.allocate("https://example.com/hot").await.unwrap()
        }));
    }

    let mut codes: Vec<ShortCode> = vec![];
    for handle in handles {
        codes.push(handle.await.unwrap());
    }

    assert!(codes.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(service.repository().len(), 1);
}

#[tokio::test]
async fn concurrent_colliding_urls_get_distinct_codes() {
    let service = Arc::new(
        AllocatorService::with_fingerprinter(
            InMemoryRepository::new(),
            CollidingFingerprinter,
            AllocatorSettings::default(),
        )
        .unwrap(),
    );
    let mut handles = vec![];

    for i in 0..4 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let url = format!("https://site{i}.example");
            let code = service.allocate(&url).await.unwrap();
            (url, code)
        }));
    }

    let mut results = vec![];
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    for (url, code) in &results {
        assert_eq!(&service.resolve(code.as_str()).await.unwrap(), url);
    }
    let unique: std::collections::HashSet<_> = results.iter().map(|(_, c)| c.clone()).collect();
    assert_eq!(unique.len(), results.len());
    assert_eq!(service.repository().len(), results.len());
}

#[tokio::test]
async fn resolve_unknown_code_is_not_found() {
    let service = service();

    let err = service.resolve("doesnotexist").await.unwrap_err();
    assert!(matches!(err, AllocatorError::NotFound(code) if code == "doesnotexist"));
}

#[tokio::test]
async fn services_sharing_a_repository_agree() {
    let repository = Arc::new(InMemoryRepository::new());
    let a = AllocatorService::new(Arc::clone(&repository), AllocatorSettings::default()).unwrap();
    let b = AllocatorService::new(Arc::clone(&repository), AllocatorSettings::default()).unwrap();

    let code = a.allocate("https://example.com").await.unwrap();
    assert_eq!(b.allocate("https://example.com").await.unwrap(), code);
    assert_eq!(b.resolve(code.as_str()).await.unwrap(), "https://example.com");
    assert_eq!(repository.len(), 1);
}
