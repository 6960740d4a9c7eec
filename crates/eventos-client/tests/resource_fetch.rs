//! Protected image resolution integration tests.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use eventos_client::EventosClient;
use eventos_client::config::ClientConfig;
use eventos_client::credentials::{CredentialStore, MemoryCredentialStore};
use eventos_client::resource::ImageAsset;
use eventos_client::session::SessionStatus;

use common::{ADMIN_EMAIL, ADMIN_PASSWORD, IMAGE_BYTES, spawn_backend};

async fn signed_in_client(base: &str, cache_dir: Option<&std::path::Path>) -> EventosClient {
    let mut config = ClientConfig::new(base).expect("valid base");
    if let Some(dir) = cache_dir {
        config = config.with_image_cache_dir(dir);
    }

    let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
    let client = EventosClient::new(config, store).expect("client builds");
    client.session().initialize().await.unwrap();
    client.session().login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
    client
}

#[tokio::test]
async fn test_absent_reference_yields_placeholder() {
    let (base, state) = spawn_backend().await;
    let client = signed_in_client(&base, None).await;
    let cancel = CancellationToken::new();

    assert!(client.images().resolve(None, &cancel).await.is_placeholder());
    assert!(client.images().resolve(Some("   "), &cancel).await.is_placeholder());
    assert_eq!(state.image_request_count(), 0);
}

#[tokio::test]
async fn test_absolute_url_used_verbatim_with_zero_fetches() {
    let (base, state) = spawn_backend().await;
    let client = signed_in_client(&base, None).await;
    let cancel = CancellationToken::new();

    let asset = client
        .images()
        .resolve(Some("https://cdn.example.com/a.jpg"), &cancel)
        .await;

    match asset {
        ImageAsset::Remote(url) => assert_eq!(url, "https://cdn.example.com/a.jpg"),
        other => panic!("expected remote asset, got {other:?}"),
    }
    assert_eq!(state.image_request_count(), 0);
}

#[tokio::test]
async fn test_protected_path_fetched_once_into_memory() {
    let (base, state) = spawn_backend().await;
    let client = signed_in_client(&base, None).await;
    let cancel = CancellationToken::new();

    let asset = client
        .images()
        .resolve(Some("/eventos/2/imagem"), &cancel)
        .await;

    match asset {
        ImageAsset::Cached(image) => {
            assert_eq!(image.source_ref, "/eventos/2/imagem");
            assert_eq!(image.bytes().unwrap().as_ref(), IMAGE_BYTES);
            assert!(image.path().is_none());
        }
        other => panic!("expected cached asset, got {other:?}"),
    }
    assert_eq!(state.image_request_count(), 1);
}

#[tokio::test]
async fn test_protected_path_materializes_cache_file_released_on_drop() {
    let (base, _state) = spawn_backend().await;
    let cache_dir = tempfile::tempdir().unwrap();
    let client = signed_in_client(&base, Some(cache_dir.path())).await;
    let cancel = CancellationToken::new();

    let asset = client
        .images()
        .resolve(Some("/eventos/2/imagem"), &cancel)
        .await;

    let path = match &asset {
        ImageAsset::Cached(image) => {
            let path = image.path().expect("file-backed").to_path_buf();
            assert_eq!(
                tokio::fs::read(&path).await.unwrap(),
                IMAGE_BYTES.to_vec()
            );
            path
        }
        other => panic!("expected cached asset, got {other:?}"),
    };

    // Tearing down the owning element releases the local handle.
    drop(asset);
    assert!(!path.exists());
}

#[tokio::test]
async fn test_localhost_reference_is_rebased_onto_configured_backend() {
    let (base, state) = spawn_backend().await;
    let client = signed_in_client(&base, None).await;
    let cancel = CancellationToken::new();

    // References minted against a developer backend must not be fetched
    // from localhost verbatim.
    let asset = client
        .images()
        .resolve(Some("http://localhost:8080/eventos/2/imagem"), &cancel)
        .await;

    assert!(matches!(asset, ImageAsset::Cached(_)));
    assert_eq!(state.image_request_count(), 1);
}

#[tokio::test]
async fn test_backend_failure_yields_placeholder_and_keeps_session() {
    let (base, _state) = spawn_backend().await;
    let client = signed_in_client(&base, None).await;
    let cancel = CancellationToken::new();

    // Id 500 makes the backend fail server-side.
    let asset = client
        .images()
        .resolve(Some("/eventos/500/imagem"), &cancel)
        .await;

    assert!(asset.is_placeholder());
    assert_eq!(client.session().status(), SessionStatus::Authenticated);
}

#[tokio::test]
async fn test_rejected_image_fetch_never_triggers_sign_out() {
    let (base, state) = spawn_backend().await;
    let client = signed_in_client(&base, None).await;
    let cancel = CancellationToken::new();

    // Revoked token: the image fetch comes back 401, but a broken image
    // must not log the user out.
    state.revoke_tokens();
    let asset = client
        .images()
        .resolve(Some("/eventos/2/imagem"), &cancel)
        .await;

    assert!(asset.is_placeholder());
    assert_eq!(client.session().status(), SessionStatus::Authenticated);
}

#[tokio::test]
async fn test_network_failure_yields_placeholder() {
    let (base, _state) = spawn_backend().await;
    let client = signed_in_client(&base, None).await;

    // Re-point at a dead port after signing in.
    let dead = {
        let mut config = ClientConfig::new("http://127.0.0.1:1").unwrap();
        config.request_timeout = Duration::from_millis(500);
        config.connect_timeout = Duration::from_millis(500);
        let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
        EventosClient::new(config, store).unwrap()
    };
    let cancel = CancellationToken::new();

    let asset = dead
        .images()
        .resolve(Some("/eventos/2/imagem"), &cancel)
        .await;
    assert!(asset.is_placeholder());

    // The original client's session is unaffected.
    assert_eq!(client.session().status(), SessionStatus::Authenticated);
}

#[tokio::test]
async fn test_cancellation_discards_in_flight_fetch() {
    let (base, _state) = spawn_backend().await;
    let cache_dir = tempfile::tempdir().unwrap();
    let client = signed_in_client(&base, Some(cache_dir.path())).await;

    let cancel = CancellationToken::new();
    let teardown = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        teardown.cancel();
    });

    let started = std::time::Instant::now();
    let asset = client
        .images()
        .resolve(Some("/eventos/slow/imagem-lenta"), &cancel)
        .await;

    // The slow route takes 2s; cancellation must win long before that
    // and leave nothing behind in the cache directory.
    assert!(asset.is_placeholder());
    assert!(started.elapsed() < Duration::from_secs(1));

    let mut entries = tokio::fs::read_dir(cache_dir.path()).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}
