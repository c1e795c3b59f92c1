// ============================================================================
// RESULTADO SERVICE - Recurso /resultados (CRUD)
// ============================================================================

use crate::models::{Id, Resultado};
use super::api_client::{self, ApiClient};
use super::error::ApiError;

/// Contrato del recurso `/resultados`
#[allow(async_fn_in_trait)]
pub trait ResultadoApi {
    async fn obtener_resultados(&self) -> Result<Vec<Resultado>, ApiError>;
    async fn obtener_por_id(&self, id: Id) -> Result<Resultado, ApiError>;
    async fn crear(&self, resultado: &Resultado) -> Result<Resultado, ApiError>;
    async fn actualizar(&self, id: Id, resultado: &Resultado) -> Result<Resultado, ApiError>;
    async fn eliminar_resultado(&self, id: Id) -> Result<(), ApiError>;
}

impl ResultadoApi for ApiClient {
    async fn obtener_resultados(&self) -> Result<Vec<Resultado>, ApiError> {
        let request = api_client::build_get(&self.resultados_url(""))?;
        let resultados: Vec<Resultado> = api_client::send_json(request).await?;
        log::info!("✅ {} resultados obtenidos", resultados.len());
        Ok(resultados)
    }

    async fn obtener_por_id(&self, id: Id) -> Result<Resultado, ApiError> {
        let request = api_client::build_get(&self.resultados_url(&api_client::id_suffix(id)))?;
        api_client::send_json(request).await
    }

    async fn crear(&self, resultado: &Resultado) -> Result<Resultado, ApiError> {
        log::info!("🧪 Creando resultado para examen {}", resultado.id_examen);
        let request = api_client::build_post(&self.resultados_url(""), resultado)?;
        api_client::send_json(request).await
    }

    async fn actualizar(&self, id: Id, resultado: &Resultado) -> Result<Resultado, ApiError> {
        log::info!("🧪 Actualizando resultado {}", id);
        let request =
            api_client::build_put(&self.resultados_url(&api_client::id_suffix(id)), resultado)?;
        api_client::send_json(request).await
    }

    /// El cuerpo de la respuesta (si lo hay) se ignora
    async fn eliminar_resultado(&self, id: Id) -> Result<(), ApiError> {
        log::info!("🗑️ Eliminando resultado {}", id);
        let request = api_client::build_delete(&self.resultados_url(&api_client::id_suffix(id)))?;
        api_client::send(request).await?;
        Ok(())
    }
}
