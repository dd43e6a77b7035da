use std::sync::Arc;

use edunexia_core::{is_auth_page, LOGIN, SESSION_EXPIRED_DETAIL, UNAUTHORIZED_ERROR};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{ApiError, Navigator};
use crate::modules::storage::TokenStore;

/// Single gateway for backend calls.
///
/// The bearer token is read from storage right before each request, so a
/// token written by any part of the client is picked up by the next call.
#[derive(Clone)]
pub(crate) struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: TokenStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub(crate) fn new(
        http: reqwest::Client,
        base_url: &str,
        store: TokenStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            navigator,
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn store(&self) -> &TokenStore {
        &self.store
    }

    pub(crate) fn set_token(&self, token: &str) {
        self.store.set_token(token);
    }

    pub(crate) fn clear_token(&self) {
        self.store.clear_token();
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Ok(response.json::<T>().await?)
    }

    pub(crate) async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        let builder = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        let builder = self.authorize(builder);

        debug!(method = %method, url = %url, "http request");
        let start = std::time::Instant::now();
        let response = builder.send().await?;
        debug!(
            method = %method,
            url = %url,
            status = %response.status(),
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );
        self.intercept(response).await
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let Some(token) = self.store.token() else {
            return builder;
        };
        match HeaderValue::from_str(&format!("Bearer {token}")) {
            Ok(value) => builder.header(AUTHORIZATION, value),
            Err(err) => {
                warn!("stored token is not a valid header value: {err}");
                builder
            }
        }
    }

    async fn intercept(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let payload = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));

        if status != StatusCode::UNAUTHORIZED {
            return Err(ApiError::Status { status, payload });
        }

        let detail = payload
            .get("detail")
            .and_then(Value::as_str)
            .filter(|detail| !detail.trim().is_empty())
            .unwrap_or(SESSION_EXPIRED_DETAIL)
            .to_string();

        let current = self.navigator.current_path();
        let signed_out = !is_auth_page(&current);
        if signed_out {
            info!(path = %current, detail = %detail, "session rejected by server; signing out");
            self.store.clear_session();
            self.navigator.redirect(&unauthorized_location(&detail));
        } else {
            debug!(path = %current, "unauthorized on auth page; not redirecting");
        }
        Err(ApiError::Unauthorized {
            detail,
            payload,
            signed_out,
        })
    }
}

fn unauthorized_location(detail: &str) -> String {
    format!(
        "{LOGIN}?error={UNAUTHORIZED_ERROR}&details={}",
        urlencoding::encode(detail)
    )
}
