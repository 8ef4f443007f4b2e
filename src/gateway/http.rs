//! JSON/HTTP implementation of the remote gateway.

use reqwest::{Client, Response, StatusCode};

use super::{GatewayError, RemoteGateway};
use crate::types::{DfgFilters, FuzzyFilters, Graph, GraphParameter, ViewDraft};
use async_trait::async_trait;

/// [`RemoteGateway`] over a JSON REST service.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured client (timeouts, proxies, auth middleware).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn ensure_ok(response: Response) -> Result<Response, GatewayError> {
        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => Err(GatewayError::Unauthorized),
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound),
            _ if status.is_server_error() => Err(GatewayError::Server {
                status: status.as_u16(),
            }),
            _ if !status.is_success() => {
                Err(GatewayError::Transport(format!("unexpected status {status}")))
            }
            _ => Ok(response),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn fetch_draft(&self, view_id: &str) -> Result<ViewDraft, GatewayError> {
        let response = self
            .client
            .post(self.url(&format!("views/{view_id}/draft")))
            .send()
            .await?;
        Ok(Self::ensure_ok(response)?.json().await?)
    }

    async fn commit_draft(&self, draft_id: &str) -> Result<(), GatewayError> {
        let response = self
            .client
            .post(self.url(&format!("drafts/{draft_id}/commit")))
            .send()
            .await?;
        Self::ensure_ok(response)?;
        Ok(())
    }

    async fn fetch_draft_parameters(
        &self,
        draft_id: &str,
    ) -> Result<Vec<GraphParameter>, GatewayError> {
        let response = self
            .client
            .get(self.url(&format!("drafts/{draft_id}/parameters")))
            .send()
            .await?;
        Ok(Self::ensure_ok(response)?.json().await?)
    }

    async fn update_parameter(
        &self,
        param_id: &str,
        param: &GraphParameter,
    ) -> Result<(), GatewayError> {
        let response = self
            .client
            .put(self.url(&format!("parameters/{param_id}")))
            .json(param)
            .send()
            .await?;
        Self::ensure_ok(response)?;
        Ok(())
    }

    async fn compute_graph_dfg(
        &self,
        draft_id: &str,
        filters: &DfgFilters,
    ) -> Result<Graph, GatewayError> {
        let response = self
            .client
            .post(self.url(&format!("drafts/{draft_id}/graph/dfg")))
            .json(filters)
            .send()
            .await?;
        Ok(Self::ensure_ok(response)?.json().await?)
    }

    async fn compute_graph_fuzzy(
        &self,
        draft_id: &str,
        filters: &FuzzyFilters,
    ) -> Result<Graph, GatewayError> {
        let response = self
            .client
            .post(self.url(&format!("drafts/{draft_id}/graph/fuzzy")))
            .json(filters)
            .send()
            .await?;
        Ok(Self::ensure_ok(response)?.json().await?)
    }
}
