//! Quick-command execution endpoints

use hive_core::domain::execution::{ExecutionHandle, ExecutionRequest, ExecutionResult};
use hive_core::domain::token::AccessToken;
use hive_core::dto::execution::{CONVERSATION_ID_HEADER, CallbackResponse, CreateExecution};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{StackSpotClient, endpoint, error_body};

impl StackSpotClient {
    // =============================================================================
    // Execution Lifecycle
    // =============================================================================

    /// Create a remote execution of a quick command
    ///
    /// The response body is the plain-text execution id, sometimes wrapped in
    /// quotes; it is normalized into an [`ExecutionHandle`].
    ///
    /// # Arguments
    /// * `request` - Slug, input payload and optional conversation id
    /// * `token` - Bearer token for the call
    ///
    /// # Returns
    /// The handle used to poll the execution
    pub async fn submit(
        &self,
        request: &ExecutionRequest,
        token: &AccessToken,
    ) -> Result<ExecutionHandle> {
        let url = endpoint(
            &self.api_base_url,
            &["v1", "quick-commands", "create-execution", request.slug.as_str()],
        )?;

        let mut builder = self
            .client
            .post(url)
            .bearer_auth(token.value.expose_secret())
            .json(&CreateExecution {
                input_data: &request.input,
            });

        if let Some(conversation_id) = &request.conversation_id {
            builder = builder.header(CONVERSATION_ID_HEADER, conversation_id);
        }

        let response = builder.send().await?;

        if !response.status().is_success() {
            let (status, body) = error_body(response).await;
            return Err(ClientError::Submission {
                slug: request.slug.clone(),
                status,
                body,
            });
        }

        let body = response.text().await?;
        let handle = ExecutionHandle::from_response_body(&body).ok_or_else(|| {
            ClientError::ParseError(format!(
                "create-execution for '{}' returned an empty execution id",
                request.slug
            ))
        })?;

        debug!("Created execution {} for '{}'", handle, request.slug);
        Ok(handle)
    }

    /// Query the callback endpoint of an execution once
    ///
    /// # Arguments
    /// * `execution_id` - Id returned by [`StackSpotClient::submit`]
    /// * `token` - Bearer token for the call
    ///
    /// # Returns
    /// The current status, progress and result payload
    pub async fn poll_once(&self, execution_id: &str, token: &AccessToken) -> Result<ExecutionResult> {
        let url = endpoint(
            &self.api_base_url,
            &["v1", "quick-commands", "callback", execution_id],
        )?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token.value.expose_secret())
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, body) = error_body(response).await;
            return Err(ClientError::Poll {
                execution_id: execution_id.to_string(),
                status,
                body,
            });
        }

        let body: CallbackResponse = response.json().await.map_err(|e| {
            ClientError::ParseError(format!(
                "Invalid callback response for execution {}: {}",
                execution_id, e
            ))
        })?;

        Ok(body.into())
    }
}
