use serde::{Deserialize, Serialize};
use super::ids::{deserialize_opt_id, Id};
use super::sesion::Rol;

/// Estado de la cuenta: el backend usa "1" (activo) y "0" (inactivo)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EstadoUsuario {
    #[serde(rename = "0")]
    Inactivo,
    #[serde(rename = "1")]
    Activo,
}

impl Default for EstadoUsuario {
    fn default() -> Self {
        EstadoUsuario::Activo
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id_usuario: Option<Id>,
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub rol: Rol,
    #[serde(default)]
    pub estado: EstadoUsuario,
}

/// Alta de usuario desde el formulario de registro
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NuevoUsuario {
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    pub password: String,
    pub rol: Rol,
    pub estado: EstadoUsuario,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub correo: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    pub rol: Rol,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerificacionCorreo {
    pub existe: bool,
}
