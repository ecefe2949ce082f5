//! HTTP client helpers (REST).

use crate::core::logic::join_url;
use crate::models::{ApiEnvelope, PromResponse};
use crate::services::error::ApiError;
use gloo_net::http::{Request, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Backend client shared through the app context.
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    /// Build a client for `base_url`, optionally authenticated.
    pub(crate) fn new(base_url: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token,
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    fn authorize(&self, req: Request) -> Request {
        match self.access_token.as_deref() {
            Some(token) if !token.trim().is_empty() => {
                req.header("Authorization", &format!("Bearer {token}"))
            }
            _ => req,
        }
    }

    async fn send(&self, path: &str, req: Request) -> Result<Response, ApiError> {
        self.authorize(req)
            .send()
            .await
            .map_err(|err| ApiError::Transport {
                path: path.to_string(),
                detail: err.to_string(),
            })
    }

    async fn decode<T: DeserializeOwned>(path: &str, resp: Response) -> Result<T, ApiError> {
        if !resp.ok() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: resp.status(),
            });
        }
        resp.json::<T>().await.map_err(|err| ApiError::Decode {
            path: path.to_string(),
            detail: err.to_string(),
        })
    }

    /// `GET` an enveloped payload.
    pub(crate) async fn get_envelope<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send(path, Request::get(&self.url(path))).await?;
        let envelope: ApiEnvelope<T> = Self::decode(path, resp).await?;
        envelope
            .into_result()
            .map_err(|err| ApiError::backend(path, err))
    }

    /// `PUT` a JSON body and check the envelope's error field.
    pub(crate) async fn put_envelope<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let req = Request::put(&self.url(path))
            .json(body)
            .map_err(|err| ApiError::Payload(err.to_string()))?;
        let resp = self.send(path, req).await?;
        let envelope: ApiEnvelope<serde_json::Value> = Self::decode(path, resp).await?;
        match envelope.into_result() {
            Ok(_) | Err(crate::models::EnvelopeError::MissingData) => Ok(()),
            Err(err) => Err(ApiError::backend(path, err)),
        }
    }

    /// `GET` a Prometheus API payload. Error bodies are decoded too, since
    /// Prometheus reports query errors with a 4xx/5xx status and a JSON body.
    pub(crate) async fn get_prometheus(&self, path: &str) -> Result<PromResponse, ApiError> {
        let resp = self.send(path, Request::get(&self.url(path))).await?;
        let status = resp.status();
        match resp.json::<PromResponse>().await {
            Ok(body) => Ok(body),
            Err(_) if !(200..300).contains(&status) => Err(ApiError::Status {
                path: path.to_string(),
                status,
            }),
            Err(err) => Err(ApiError::Decode {
                path: path.to_string(),
                detail: err.to_string(),
            }),
        }
    }
}
