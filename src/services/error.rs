// ============================================================================
// API ERROR - Errores de backend y mensajes para el usuario
// ============================================================================

use thiserror::Error;

/// Fallo de una llamada al backend (resultado etiquetado, nunca panic)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("sin detalle"))]
    Http { status: u16, message: Option<String> },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Construye el error a partir de una respuesta no-2xx; usa `message`
    /// del cuerpo JSON si el backend lo envía
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .filter(|m| !m.trim().is_empty());
        ApiError::Http { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(_) => Some(0),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Mensaje de una línea para mostrar al usuario (sin payload crudo)
    pub fn mensaje_usuario(&self) -> String {
        let server_message = match self {
            ApiError::Http { message, .. } => message.clone(),
            _ => None,
        };

        let mensaje = match self {
            ApiError::Network(_) => "No se pudo conectar al servidor".to_string(),
            ApiError::Parse(_) => "Respuesta inesperada del servidor".to_string(),
            ApiError::Serialization(_) => "No se pudo preparar la solicitud".to_string(),
            ApiError::Http { status, .. } => match status {
                0 => "No se pudo conectar al servidor".to_string(),
                400 => server_message.unwrap_or_else(|| "Solicitud incorrecta".to_string()),
                401 => "No autorizado. Por favor, inicie sesión nuevamente".to_string(),
                403 => "No tiene permisos para realizar esta acción".to_string(),
                404 => "Recurso no encontrado".to_string(),
                500 => "Error interno del servidor".to_string(),
                503 => "Servicio no disponible".to_string(),
                other => server_message
                    .unwrap_or_else(|| format!("Error del servidor: {}", other)),
            },
        };
        mensaje.lines().next().unwrap_or_default().to_string()
    }
}
