// ============================================================================
// ROUTER - Tabla de rutas, guard y hooks de entrada
// ============================================================================
// Cada navegación: guard (si la ruta es protegida) → ruta actual → historial
// del navegador → hooks `on_enter` de esa ruta → listeners globales.
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::guards::AuthGuard;
use crate::models::Id;
use crate::stores::{Observers, SessionStore, Subscription};

/// Rutas del portal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    ListaResultado,
    /// `None` = alta de un resultado nuevo
    DetalleResultado(Option<Id>),
    /// `None` = autoregistro / alta por un admin
    Registro(Option<Id>),
    Recupera,
    ListUsuarios,
}

impl Route {
    /// Ruta a partir de un path (`/detalle-resultado/4`); lo desconocido va a login
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let id = |s: &str| s.parse::<Id>().ok();
        match segments.as_slice() {
            ["login"] => Route::Login,
            ["lista-resultado"] | ["lista-resultado", _] => Route::ListaResultado,
            ["detalle-resultado"] => Route::DetalleResultado(None),
            ["detalle-resultado", raw] => match id(raw) {
                Some(id) => Route::DetalleResultado(Some(id)),
                None => Route::Login,
            },
            ["registro"] => Route::Registro(None),
            ["registro", raw] => match id(raw) {
                Some(id) => Route::Registro(Some(id)),
                None => Route::Login,
            },
            ["recupera"] => Route::Recupera,
            ["list-usuarios"] => Route::ListUsuarios,
            _ => Route::Login,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::ListaResultado => "/lista-resultado".to_string(),
            Route::DetalleResultado(None) => "/detalle-resultado".to_string(),
            Route::DetalleResultado(Some(id)) => format!("/detalle-resultado/{}", id),
            Route::Registro(None) => "/registro".to_string(),
            Route::Registro(Some(id)) => format!("/registro/{}", id),
            Route::Recupera => "/recupera".to_string(),
            Route::ListUsuarios => "/list-usuarios".to_string(),
        }
    }

    /// Rutas que pasan por el guard de sesión
    pub fn requiere_sesion(&self) -> bool {
        matches!(
            self,
            Route::ListaResultado | Route::DetalleResultado(_) | Route::ListUsuarios
        )
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Capa de navegación vista desde guards y view models
pub trait Navigator {
    /// Devuelve false si la navegación fue denegada
    fn navigate(&self, route: Route) -> bool;
}

struct Inner {
    guard: AuthGuard,
    current: RefCell<Option<Route>>,
    hooks: RefCell<HashMap<Route, Rc<Observers<()>>>>,
    listeners: Observers<Route>,
}

/// Router de la aplicación (handle clonable)
#[derive(Clone)]
pub struct Router {
    inner: Rc<Inner>,
}

impl Router {
    pub fn new(session: SessionStore) -> Self {
        Self {
            inner: Rc::new(Inner {
                guard: AuthGuard::new(session),
                current: RefCell::new(None),
                hooks: RefCell::new(HashMap::new()),
                listeners: Observers::new(),
            }),
        }
    }

    pub fn current(&self) -> Option<Route> {
        self.inner.current.borrow().clone()
    }

    /// Hook invocado cada vez que `route` exacta pasa a estar activa
    pub fn on_enter<F>(&self, route: Route, callback: F) -> Subscription
    where
        F: Fn() + 'static,
    {
        let observers = self
            .inner
            .hooks
            .borrow_mut()
            .entry(route)
            .or_default()
            .clone();
        observers.subscribe(move |_| callback())
    }

    /// Listener de toda navegación completada
    pub fn on_navigate<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Route) + 'static,
    {
        self.inner.listeners.subscribe(callback)
    }

    /// Navegación originada por el navegador (botón atrás): no apila historial
    pub fn sync_from_location(&self, path: &str) -> bool {
        self.go(Route::parse(path), false)
    }

    fn go(&self, route: Route, push: bool) -> bool {
        if route.requiere_sesion() && !self.inner.guard.can_activate(&route, self) {
            return false;
        }

        log::info!("🧭 Navegando a {}", route);
        *self.inner.current.borrow_mut() = Some(route.clone());
        if push {
            push_history(&route);
        }

        // Sin préstamos activos: los hooks pueden volver a navegar
        let hooks = self.inner.hooks.borrow().get(&route).cloned();
        if let Some(hooks) = hooks {
            hooks.notify(&());
        }
        self.inner.listeners.notify(&route);
        true
    }
}

impl Navigator for Router {
    fn navigate(&self, route: Route) -> bool {
        self.go(route, true)
    }
}

#[cfg(target_arch = "wasm32")]
fn push_history(route: &Route) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let path = route.path();
    if let Err(e) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path)) {
        log::warn!("⚠️ No se pudo actualizar el historial a {}: {:?}", path, e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn push_history(_route: &Route) {}
