// ============================================================================
// AUTH SERVICE - Recurso /usuarios (login, registro, administración)
// ============================================================================

use crate::models::{Id, LoginCredentials, LoginResponse, NuevoUsuario, Usuario, VerificacionCorreo};
use super::api_client::{self, ApiClient};
use super::error::ApiError;

/// Contrato del recurso `/usuarios`
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError>;
    async fn verificar_correo(&self, correo: &str) -> Result<VerificacionCorreo, ApiError>;
    async fn registrar_usuario(&self, usuario: &NuevoUsuario) -> Result<Usuario, ApiError>;
    async fn obtener_usuario(&self, id: Id) -> Result<Usuario, ApiError>;
    async fn actualizar_usuario(&self, id: Id, usuario: &Usuario) -> Result<Usuario, ApiError>;
    async fn listar_usuarios(&self) -> Result<Vec<Usuario>, ApiError>;
}

impl AuthApi for ApiClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        log::info!("🔐 Login para: {}", credentials.correo);
        let request = api_client::build_post(&self.usuarios_url("/login"), credentials)?;
        api_client::send_json(request).await
    }

    async fn verificar_correo(&self, correo: &str) -> Result<VerificacionCorreo, ApiError> {
        let request = gloo_net::http::Request::get(&self.usuarios_url("/verificar-correo"))
            .query([("correo", correo)])
            .build()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        api_client::send_json(request).await
    }

    async fn registrar_usuario(&self, usuario: &NuevoUsuario) -> Result<Usuario, ApiError> {
        log::info!("📝 Registrando usuario: {}", usuario.correo);
        let request = api_client::build_post(&self.usuarios_url(""), usuario)?;
        api_client::send_json(request).await
    }

    async fn obtener_usuario(&self, id: Id) -> Result<Usuario, ApiError> {
        let request = api_client::build_get(&self.usuarios_url(&api_client::id_suffix(id)))?;
        api_client::send_json(request).await
    }

    async fn actualizar_usuario(&self, id: Id, usuario: &Usuario) -> Result<Usuario, ApiError> {
        log::info!("📝 Actualizando usuario {}", id);
        let request = api_client::build_put(&self.usuarios_url(&api_client::id_suffix(id)), usuario)?;
        api_client::send_json(request).await
    }

    async fn listar_usuarios(&self) -> Result<Vec<Usuario>, ApiError> {
        let request = api_client::build_get(&self.usuarios_url(""))?;
        let usuarios: Vec<Usuario> = api_client::send_json(request).await?;
        log::info!("✅ {} usuarios obtenidos", usuarios.len());
        Ok(usuarios)
    }
}
