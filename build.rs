use std::env;
use std::fs;
use std::path::Path;

/// Variables que el frontend lee con `option_env!` (ver src/config.rs)
const CLAVES_CONOCIDAS: &[&str] = &[
    "API_USUARIOS_URL",
    "API_RESULTADOS_URL",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");

    let env_file = Path::new(".env");
    let Ok(contenido) = fs::read_to_string(env_file) else {
        println!("cargo:warning=Sin archivo .env: se usan las URLs por defecto (localhost)");
        return;
    };

    for linea in contenido.lines().map(str::trim) {
        if linea.is_empty() || linea.starts_with('#') {
            continue;
        }

        let Some((clave, valor)) = linea.split_once('=') else {
            continue;
        };
        let clave = clave.trim();
        let valor = valor.trim().trim_matches('"');

        if !CLAVES_CONOCIDAS.contains(&clave) {
            println!("cargo:warning=Clave desconocida en .env ignorada: {}", clave);
            continue;
        }

        // El entorno del proceso tiene prioridad sobre .env
        if env::var(clave).is_err() {
            println!("cargo:rustc-env={}={}", clave, valor);
        }
        println!("cargo:rerun-if-env-changed={}", clave);
    }
}
