//! Object storage adapter for structure logos.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;

use super::client::{HttpFailure, SupabaseClient, execute};
use crate::domain::ports::{LogoStorage, LogoStorageError};

fn map_storage_error(failure: HttpFailure) -> LogoStorageError {
    if failure.is_unavailable() {
        LogoStorageError::connection(failure.message())
    } else {
        LogoStorageError::rejected(failure.message())
    }
}

/// Uploads logos into one bucket and returns their public URL.
#[derive(Clone)]
pub struct SupabaseLogoStorage {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseLogoStorage {
    pub fn new(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    fn object_endpoint(&self, object_path: &str) -> String {
        format!("storage/v1/object/{}/{object_path}", self.bucket)
    }

    /// `{base}/storage/v1/object/public/{bucket}/{path}`
    pub fn public_url(&self, object_path: &str) -> Result<String, LogoStorageError> {
        self.client
            .endpoint(&format!("storage/v1/object/public/{}/{object_path}", self.bucket))
            .map(|url| url.to_string())
            .map_err(map_storage_error)
    }
}

#[async_trait]
impl LogoStorage for SupabaseLogoStorage {
    async fn upload(
        &self,
        object_path: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, LogoStorageError> {
        let url = self
            .client
            .endpoint(&self.object_endpoint(object_path))
            .map_err(map_storage_error)?;
        execute(
            self.client
                .request(Method::POST, url)
                .header(CONTENT_TYPE, content_type)
                .header("x-upsert", "false")
                .body(bytes.to_vec()),
        )
        .await
        .map_err(map_storage_error)?;
        self.public_url(object_path)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::time::Duration;

    use reqwest::Url;

    use super::*;
    use crate::outbound::supabase::SupabaseConfig;

    #[test]
    fn public_url_points_at_the_public_bucket_path() {
        let client = SupabaseClient::new(&SupabaseConfig {
            base_url: Url::parse("https://project.example/").expect("valid url"),
            anon_key: "anon".to_owned(),
            service_key: None,
            timeout: Duration::from_secs(1),
        })
        .expect("client builds");
        let storage = SupabaseLogoStorage::new(client, "structures");

        assert_eq!(
            storage.public_url("logos/abc.png").expect("valid url"),
            "https://project.example/storage/v1/object/public/structures/logos/abc.png"
        );
    }
}
