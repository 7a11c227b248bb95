use base64::Engine;
use bytes::Bytes;
use tracing::info;

use crate::{generated_asset_key, ObjectStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("failed to fetch image: {0}")]
    Fetch(String),

    #[error("source returned status {0}")]
    SourceStatus(u16),

    #[error("invalid data url: {0}")]
    DataUrl(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Re-host a generated image under a stable name.
///
/// The source is either a remote URL (downloaded) or an inline `data:`
/// reference (decoded). The bytes land at `generated/{file_name}`,
/// overwriting any previous object, and the store's public URL for that key
/// is returned. Failures propagate; callers keep their original reference
/// as the degradation path.
pub async fn relay_image(
    http: &reqwest::Client,
    store: &dyn ObjectStore,
    source: &str,
    file_name: &str,
) -> Result<String, RelayError> {
    let (data, content_type) = match source.strip_prefix("data:") {
        Some(rest) => decode_data_url(rest)?,
        None => fetch(http, source).await?,
    };

    let key = generated_asset_key(file_name);
    info!("relaying image to {key} ({} bytes)", data.len());
    store.put(&key, data, &content_type).await?;
    Ok(store.public_url(&key))
}

async fn fetch(http: &reqwest::Client, source: &str) -> Result<(Bytes, String), RelayError> {
    let resp = http
        .get(source)
        .send()
        .await
        .map_err(|e| RelayError::Fetch(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(RelayError::SourceStatus(status.as_u16()));
    }

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("image/jpeg")
        .to_string();
    let data = resp
        .bytes()
        .await
        .map_err(|e| RelayError::Fetch(e.to_string()))?;
    Ok((data, content_type))
}

/// `rest` is everything after the `data:` scheme,
/// e.g. `image/png;base64,iVBOR...`.
fn decode_data_url(rest: &str) -> Result<(Bytes, String), RelayError> {
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| RelayError::DataUrl("missing payload separator".into()))?;
    if !meta.ends_with(";base64") {
        return Err(RelayError::DataUrl("unsupported encoding".into()));
    }
    let content_type = match meta.trim_end_matches(";base64") {
        "" => "image/png".to_string(),
        mime => mime.to_string(),
    };
    let data = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| RelayError::DataUrl(e.to_string()))?;
    Ok((Bytes::from(data), content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LocalStore, StoreConfig};

    fn local_store(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::new(&StoreConfig {
            endpoint_url: None,
            region: None,
            bucket: None,
            access_key_id: None,
            secret_access_key: None,
            local_data_dir: Some(dir.path().to_string_lossy().to_string()),
        })
    }

    #[tokio::test]
    async fn relays_an_inline_data_url() {
        let tmp = tempfile::tempdir().unwrap();
        let store = local_store(&tmp);
        let http = reqwest::Client::new();

        // "poster bytes" in base64
        let source = "data:image/png;base64,cG9zdGVyIGJ5dGVz";
        let url = relay_image(&http, &store, source, "poster.png")
            .await
            .unwrap();

        assert!(url.ends_with("generated/poster.png"));
        let data = store.get("generated/poster.png").await.unwrap();
        assert_eq!(data.as_ref(), b"poster bytes");
    }

    #[tokio::test]
    async fn unreachable_source_surfaces_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = local_store(&tmp);
        let http = reqwest::Client::new();

        let err = relay_image(
            &http,
            &store,
            "http://127.0.0.1:9/never-there.png",
            "poster.png",
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            RelayError::Fetch(_) | RelayError::SourceStatus(_)
        ));
        assert!(!store.exists("generated/poster.png").await.unwrap());
    }

    #[tokio::test]
    async fn overwrites_an_existing_asset() {
        let tmp = tempfile::tempdir().unwrap();
        let store = local_store(&tmp);
        let http = reqwest::Client::new();

        relay_image(&http, &store, "data:image/png;base64,Zmlyc3Q=", "p.png")
            .await
            .unwrap();
        relay_image(&http, &store, "data:image/png;base64,c2Vjb25k", "p.png")
            .await
            .unwrap();
        let data = store.get("generated/p.png").await.unwrap();
        assert_eq!(data.as_ref(), b"second");
    }

    #[test]
    fn data_url_decoding_rules() {
        let (data, mime) = decode_data_url("image/jpeg;base64,aGk=").unwrap();
        assert_eq!(data.as_ref(), b"hi");
        assert_eq!(mime, "image/jpeg");

        let (_, mime) = decode_data_url(";base64,aGk=").unwrap();
        assert_eq!(mime, "image/png");

        assert!(decode_data_url("image/png,plain-not-base64").is_err());
        assert!(decode_data_url("no-separator").is_err());
        assert!(decode_data_url("image/png;base64,!!!not-base64!!!").is_err());
    }
}
