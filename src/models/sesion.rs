use serde::{Deserialize, Serialize};

/// Rol del usuario en el portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rol {
    Admin,
    User,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "ADMIN",
            Rol::User => "USER",
        }
    }
}

impl Default for Rol {
    fn default() -> Self {
        Rol::User
    }
}

/// Sesión del usuario autenticado, persistida bajo la clave `"sesion"`.
///
/// Todos los campos son obligatorios al deserializar: un registro incompleto
/// en storage se trata como ausencia de sesión.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sesion {
    pub logueado: bool,
    pub usuario: String,
    pub correo: String,
    pub rol: Rol,
}

impl Sesion {
    /// Sesión recién autenticada a partir de los datos del usuario
    pub fn nueva(nombre: &str, apellido: &str, correo: &str, rol: Rol) -> Self {
        Self {
            logueado: true,
            usuario: format!("{} {}", nombre, apellido).trim().to_string(),
            correo: correo.to_string(),
            rol,
        }
    }

    pub fn es_admin(&self) -> bool {
        self.rol == Rol::Admin
    }
}
