// ============================================================================
// PORTAL RESULTADOS - FRONTEND MVVM (RUST PURO)
// ============================================================================
// - Models: estructuras compartidas con el backend
// - Utils: storage, tareas, validaciones
// - Stores: estado reactivo (sesión) con Rc<RefCell>
// - Guards + Router: control de acceso a rutas protegidas
// - Services: SOLO comunicación API
// - ViewModels: estado + lógica de cada pantalla
// ============================================================================

pub mod app;
pub mod config;
pub mod guards;
pub mod models;
pub mod router;
pub mod services;
pub mod stores;
pub mod utils;
pub mod viewmodels;

#[cfg(test)]
mod testing;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;
use crate::services::ApiClient;

// Instancia global de la app (una por página)
thread_local! {
    static APP: RefCell<Option<App<ApiClient, ApiClient>>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Portal de resultados ({})", CONFIG.environment);

    let app = App::new();
    APP.with(|cell| *cell.borrow_mut() = Some(app.clone()));

    let path = web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    app.iniciar(&path);
}

/// Navegación desde JavaScript (enlaces, botones del HTML)
#[wasm_bindgen]
pub fn navegar(path: &str) -> bool {
    with_app(|app| app.navegar(path)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn cerrar_sesion() {
    with_app(|app| app.cerrar_sesion());
}

fn with_app<T>(f: impl FnOnce(&App<ApiClient, ApiClient>) -> T) -> Option<T> {
    // Clon del handle: `f` puede navegar y volver a entrar en APP
    let app = APP.with(|cell| cell.borrow().clone());
    match app {
        Some(app) => Some(f(&app)),
        None => {
            log::warn!("⚠️ App no está inicializada");
            None
        }
    }
}
