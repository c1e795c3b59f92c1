// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio: construye URLs, envía y traduce respuestas
// no-2xx a `ApiError`. Los contratos por recurso están en auth_service.rs y
// resultado_service.rs.
// ============================================================================

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::CONFIG;
use crate::models::Id;
use super::error::ApiError;

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    usuarios_url: String,
    resultados_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_urls(&CONFIG.api_usuarios_url, &CONFIG.api_resultados_url)
    }

    pub fn with_base_urls(usuarios_url: &str, resultados_url: &str) -> Self {
        Self {
            usuarios_url: usuarios_url.trim_end_matches('/').to_string(),
            resultados_url: resultados_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn usuarios_url(&self, suffix: &str) -> String {
        format!("{}{}", self.usuarios_url, suffix)
    }

    pub(crate) fn resultados_url(&self, suffix: &str) -> String {
        format!("{}{}", self.resultados_url, suffix)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn id_suffix(id: Id) -> String {
    format!("/{}", id)
}

pub(crate) fn build_get(url: &str) -> Result<Request, ApiError> {
    Request::get(url)
        .build()
        .map_err(|e| ApiError::Serialization(e.to_string()))
}

pub(crate) fn build_delete(url: &str) -> Result<Request, ApiError> {
    Request::delete(url)
        .build()
        .map_err(|e| ApiError::Serialization(e.to_string()))
}

pub(crate) fn build_post<B: Serialize>(url: &str, body: &B) -> Result<Request, ApiError> {
    Request::post(url)
        .json(body)
        .map_err(|e| ApiError::Serialization(e.to_string()))
}

pub(crate) fn build_put<B: Serialize>(url: &str, body: &B) -> Result<Request, ApiError> {
    Request::put(url)
        .json(body)
        .map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Envía y devuelve la respuesta solo si es 2xx
pub(crate) async fn send(request: Request) -> Result<Response, ApiError> {
    let method = request.method();
    let url = request.url();
    let response = request.send().await.map_err(|e| {
        log::error!("❌ {:?} {} sin respuesta: {}", method, url, e);
        ApiError::Network(e.to_string())
    })?;

    if response.ok() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    log::error!("❌ {:?} {} → HTTP {} {}", method, url, status, response.status_text());
    Err(ApiError::from_response(status, &body))
}

pub(crate) async fn send_json<T: DeserializeOwned>(request: Request) -> Result<T, ApiError> {
    send(request)
        .await?
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}
