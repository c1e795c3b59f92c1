use serde::{Deserialize, Serialize};
use super::ids::{deserialize_opt_id, Id};

/// Estado de un resultado de laboratorio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EstadoResultado {
    Validado,
    Entregado,
    Pendiente,
}

impl EstadoResultado {
    pub const TODOS: [EstadoResultado; 3] = [
        EstadoResultado::Validado,
        EstadoResultado::Entregado,
        EstadoResultado::Pendiente,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoResultado::Validado => "VALIDADO",
            EstadoResultado::Entregado => "ENTREGADO",
            EstadoResultado::Pendiente => "PENDIENTE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::TODOS
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// Resultado de laboratorio (formato JSON del backend, camelCase)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resultado {
    #[serde(
        default,
        deserialize_with = "deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id_resultado: Option<Id>,
    pub id_examen: String,
    pub tipo_analisis: String,
    pub laboratorio: String,
    pub valores_resultado: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
    pub fecha_resultado: String,
    pub estado: EstadoResultado,
}

impl Resultado {
    /// Compara el identificador por valor numérico
    pub fn tiene_id(&self, id: Id) -> bool {
        self.id_resultado == Some(id)
    }
}
