use serde::{Deserialize, Serialize};

const DEFAULT_USUARIOS_URL: &str = "http://localhost:8080/usuarios";
const DEFAULT_RESULTADOS_URL: &str = "http://localhost:9090/resultados";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_usuarios_url: String,
    pub api_resultados_url: String,
    pub environment: String,
    pub enable_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_usuarios_url: DEFAULT_USUARIOS_URL.to_string(),
            api_resultados_url: DEFAULT_RESULTADOS_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
        }
    }
}

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("API_USUARIOS_URL"),
            option_env!("API_RESULTADOS_URL"),
            option_env!("ENVIRONMENT"),
            option_env!("ENABLE_LOGGING"),
        )
    }

    fn from_values(
        usuarios: Option<&str>,
        resultados: Option<&str>,
        environment: Option<&str>,
        enable_logging: Option<&str>,
    ) -> Self {
        Self {
            api_usuarios_url: normalizar_url(usuarios.unwrap_or(DEFAULT_USUARIOS_URL)),
            api_resultados_url: normalizar_url(resultados.unwrap_or(DEFAULT_RESULTADOS_URL)),
            environment: environment.unwrap_or("development").to_string(),
            enable_logging: enable_logging
                .unwrap_or("true")
                .parse()
                .unwrap_or(true),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Nivel de log para wasm-logger: sin logging solo se emiten avisos y errores
    pub fn log_level(&self) -> log::Level {
        match (self.enable_logging, self.is_production()) {
            (false, _) => log::Level::Warn,
            (true, true) => log::Level::Info,
            (true, false) => log::Level::Debug,
        }
    }
}

/// Quita la barra final para poder concatenar `/{id}` sin duplicarla
fn normalizar_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
