// ============================================================================
// CONSTANTS - Claves de storage y parámetros de la UI
// ============================================================================

/// Clave de localStorage con la sesión serializada (única dueña: SessionStore)
pub const SESSION_KEY: &str = "sesion";

/// Espera antes de redirigir tras registrar/actualizar un usuario
pub const REDIRECT_DELAY_MS: u32 = 1500;

/// Longitud mínima de contraseña en el registro
pub const PASSWORD_MIN_LEN: usize = 6;
