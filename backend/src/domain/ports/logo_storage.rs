//! Port for the object storage bucket holding structure logos.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by logo storage adapters.
    pub enum LogoStorageError {
        /// Storage could not be reached.
        Connection { message: String } =>
            "logo storage connection failed: {message}",
        /// Storage refused the upload.
        Rejected { message: String } =>
            "logo upload rejected: {message}",
    }
}

/// Object storage for uploaded logos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogoStorage: Send + Sync {
    /// Store `bytes` at `object_path` and return the object's public URL.
    async fn upload(
        &self,
        object_path: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, LogoStorageError>;
}
