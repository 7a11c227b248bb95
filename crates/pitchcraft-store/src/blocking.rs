use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::relay::{relay_image, RelayError};
use crate::ObjectStore;

/// Blocking wrapper around [`relay_image`] for sync callers like the TUI.
/// Owns the HTTP client and a dedicated tokio runtime.
pub struct BlockingRelay {
    store: Arc<dyn ObjectStore>,
    http: reqwest::Client,
    rt: Runtime,
}

impl BlockingRelay {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            http: reqwest::Client::new(),
            rt: Runtime::new().expect("failed to create tokio runtime"),
        }
    }

    pub fn relay_image(&self, source: &str, file_name: &str) -> Result<String, RelayError> {
        self.rt
            .block_on(relay_image(&self.http, self.store.as_ref(), source, file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LocalStore, StoreConfig};

    #[test]
    fn blocking_relay_round_trips_a_data_url() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Arc::new(LocalStore::new(&StoreConfig {
            endpoint_url: None,
            region: None,
            bucket: None,
            access_key_id: None,
            secret_access_key: None,
            local_data_dir: Some(tmp.path().to_string_lossy().to_string()),
        }));
        let relay = BlockingRelay::new(store);

        let url = relay
            .relay_image("data:image/png;base64,aGVsbG8=", "hello.png")
            .unwrap();
        assert!(url.ends_with("generated/hello.png"));
    }
}
