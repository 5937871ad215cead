//! Hosted authentication adapter.
//!
//! Sign-up and sign-in use the public endpoints; metadata updates and
//! deletions use the admin API and need the service key.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::client::{HttpFailure, SupabaseClient, execute};
use crate::domain::StaffId;
use crate::domain::ports::{
    IdentityProvider, IdentityProviderError, SignUpRequest, StaffMetadataUpdate,
};

#[derive(Debug, Deserialize)]
struct UserDto {
    id: StaffId,
}

/// Sign-up answers with the user either at the top level or under `user`.
#[derive(Debug, Deserialize)]
struct SignUpResponseDto {
    id: Option<StaffId>,
    user: Option<UserDto>,
}

#[derive(Debug, Deserialize)]
struct TokenResponseDto {
    user: UserDto,
}

fn map_auth_error(failure: HttpFailure) -> IdentityProviderError {
    if failure.is_unavailable() {
        return IdentityProviderError::connection(failure.message());
    }
    IdentityProviderError::rejected(failure.message())
}

fn map_sign_up_error(email: &str, failure: HttpFailure) -> IdentityProviderError {
    let duplicate = matches!(
        &failure,
        HttpFailure::Status { status, message }
            if *status == StatusCode::UNPROCESSABLE_ENTITY
                || message.to_lowercase().contains("already registered")
    );
    if duplicate {
        IdentityProviderError::already_registered(email)
    } else {
        map_auth_error(failure)
    }
}

fn map_sign_in_error(failure: HttpFailure) -> IdentityProviderError {
    match failure {
        HttpFailure::Status {
            status: StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED,
            ..
        } => IdentityProviderError::invalid_credentials(),
        other => map_auth_error(other),
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, IdentityProviderError> {
    serde_json::from_slice(body).map_err(|error| {
        IdentityProviderError::rejected(format!("unexpected auth payload: {error}"))
    })
}

fn metadata_payload(update: StaffMetadataUpdate) -> Value {
    let mut metadata = Map::new();
    if let Some(role) = update.role {
        metadata.insert("role".to_owned(), json!(role.as_str()));
    }
    if let Some(mode) = update.mode {
        metadata.insert("mode".to_owned(), json!(mode.as_str()));
    }
    json!({ "user_metadata": metadata })
}

/// Identity provider backed by the hosted auth API.
#[derive(Clone)]
pub struct SupabaseIdentityProvider {
    client: SupabaseClient,
}

impl SupabaseIdentityProvider {
    pub const fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityProvider for SupabaseIdentityProvider {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<StaffId, IdentityProviderError> {
        let url = self.client.endpoint("auth/v1/signup").map_err(map_auth_error)?;
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": {
                "first_name": request.first_name,
                "last_name": request.last_name,
                "structure_id": request.structure_id,
                "role": request.role.as_str(),
            },
        });
        let raw = execute(self.client.public_request(Method::POST, url).json(&body))
            .await
            .map_err(|failure| map_sign_up_error(&request.email, failure))?;
        let decoded: SignUpResponseDto = decode(&raw.body)?;
        decoded
            .id
            .or(decoded.user.map(|user| user.id))
            .ok_or_else(|| IdentityProviderError::rejected("sign-up response carried no user id"))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<StaffId, IdentityProviderError> {
        let mut url = self.client.endpoint("auth/v1/token").map_err(map_auth_error)?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let raw = execute(
            self.client
                .public_request(Method::POST, url)
                .json(&json!({ "email": email, "password": password })),
        )
        .await
        .map_err(map_sign_in_error)?;
        let decoded: TokenResponseDto = decode(&raw.body)?;
        Ok(decoded.user.id)
    }

    async fn update_metadata(
        &self,
        id: &StaffId,
        update: StaffMetadataUpdate,
    ) -> Result<(), IdentityProviderError> {
        let url = self
            .client
            .endpoint(&format!("auth/v1/admin/users/{id}"))
            .map_err(map_auth_error)?;
        let builder = self
            .client
            .admin_request(Method::PUT, url)
            .map_err(map_auth_error)?;
        execute(builder.json(&metadata_payload(update)))
            .await
            .map_err(map_auth_error)?;
        Ok(())
    }

    async fn delete_user(&self, id: &StaffId) -> Result<(), IdentityProviderError> {
        let url = self
            .client
            .endpoint(&format!("auth/v1/admin/users/{id}"))
            .map_err(map_auth_error)?;
        let builder = self
            .client
            .admin_request(Method::DELETE, url)
            .map_err(map_auth_error)?;
        execute(builder).await.map_err(map_auth_error)?;
        Ok(())
    }
}
