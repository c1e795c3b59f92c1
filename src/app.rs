// ============================================================================
// APP - Raíz de composición
// ============================================================================
// Crea storage, sesión, router y clientes HTTP, y monta el view model de la
// pantalla activa cada vez que el router completa una navegación.
// ============================================================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::models::Id;
use crate::router::{Navigator, Route, Router};
use crate::services::{ApiClient, AuthApi, ResultadoApi};
use crate::stores::{SessionStore, Subscription};
use crate::utils::{tasks, StorageService};
use crate::viewmodels::{
    AdminViewModel, DetalleResultadoViewModel, HeaderViewModel, ListaResultadosViewModel,
    LoginViewModel, RegistroViewModel,
};

/// View model de la pantalla montada
pub enum Pantalla<R: ResultadoApi + 'static, U: AuthApi + 'static> {
    Login(Rc<LoginViewModel<U>>),
    ListaResultado(ListaResultadosViewModel<R>),
    DetalleResultado(Rc<DetalleResultadoViewModel<R>>),
    Registro(RegistroViewModel<U>),
    Recupera,
    ListUsuarios(Rc<AdminViewModel<U>>),
}

impl<R: ResultadoApi + 'static, U: AuthApi + 'static> Clone for Pantalla<R, U> {
    fn clone(&self) -> Self {
        match self {
            Pantalla::Login(vm) => Pantalla::Login(vm.clone()),
            Pantalla::ListaResultado(vm) => Pantalla::ListaResultado(vm.clone()),
            Pantalla::DetalleResultado(vm) => Pantalla::DetalleResultado(vm.clone()),
            Pantalla::Registro(vm) => Pantalla::Registro(vm.clone()),
            Pantalla::Recupera => Pantalla::Recupera,
            Pantalla::ListUsuarios(vm) => Pantalla::ListUsuarios(vm.clone()),
        }
    }
}

impl<R: ResultadoApi + 'static, U: AuthApi + 'static> Pantalla<R, U> {
    fn destruir(&self) {
        match self {
            Pantalla::ListaResultado(vm) => vm.destruir(),
            Pantalla::DetalleResultado(vm) => vm.destruir(),
            Pantalla::Registro(vm) => vm.destruir(),
            Pantalla::Login(_) | Pantalla::ListUsuarios(_) | Pantalla::Recupera => {}
        }
    }
}

struct Montada<R: ResultadoApi + 'static, U: AuthApi + 'static> {
    route: Route,
    pantalla: Pantalla<R, U>,
}

struct Inner<R: ResultadoApi + 'static, U: AuthApi + 'static> {
    resultados: R,
    usuarios: U,
    session: SessionStore,
    router: Router,
    header: HeaderViewModel,
    montada: RefCell<Option<Montada<R, U>>>,
    navegacion: RefCell<Option<Subscription>>,
}

/// Aplicación principal (handle clonable)
pub struct App<R: ResultadoApi + Clone + 'static, U: AuthApi + Clone + 'static> {
    inner: Rc<Inner<R, U>>,
}

impl<R: ResultadoApi + Clone + 'static, U: AuthApi + Clone + 'static> Clone for App<R, U> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl App<ApiClient, ApiClient> {
    /// App del navegador: localStorage + backend configurado en `CONFIG`
    pub fn new() -> Self {
        let api = ApiClient::new();
        let app = Self::with_parts(StorageService::browser(), api.clone(), api);
        app.escuchar_popstate();
        app
    }

    #[cfg(target_arch = "wasm32")]
    fn escuchar_popstate(&self) {
        use wasm_bindgen::closure::Closure;
        use wasm_bindgen::JsCast;

        let Some(window) = web_sys::window() else {
            return;
        };
        let router = self.inner.router.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_e: web_sys::Event| {
            let path = web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_default();
            router.sync_from_location(&path);
        });
        if let Err(e) =
            window.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
        {
            log::warn!("⚠️ No se pudo escuchar popstate: {:?}", e);
        }
        // Listener único durante toda la vida de la página
        closure.forget();
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn escuchar_popstate(&self) {}
}

impl<R: ResultadoApi + Clone + 'static, U: AuthApi + Clone + 'static> App<R, U> {
    pub fn with_parts(storage: StorageService, resultados: R, usuarios: U) -> Self {
        let session = SessionStore::new(storage);
        let router = Router::new(session.clone());
        let header = HeaderViewModel::new(session.clone(), router.clone());

        let app = Self {
            inner: Rc::new(Inner {
                resultados,
                usuarios,
                session,
                router,
                header,
                montada: RefCell::new(None),
                navegacion: RefCell::new(None),
            }),
        };

        let weak: Weak<Inner<R, U>> = Rc::downgrade(&app.inner);
        let sub = app.inner.router.on_navigate(move |route| {
            if let Some(inner) = weak.upgrade() {
                App { inner }.montar(route);
            }
        });
        *app.inner.navegacion.borrow_mut() = Some(sub);
        app
    }

    /// Arranque: entra en la ruta actual sin apilar historial
    pub fn iniciar(&self, path: &str) {
        self.inner.router.sync_from_location(path);
    }

    pub fn navegar(&self, path: &str) -> bool {
        self.inner.router.navigate(Route::parse(path))
    }

    pub fn cerrar_sesion(&self) {
        self.inner.header.logout();
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn router(&self) -> &Router {
        &self.inner.router
    }

    pub fn header(&self) -> &HeaderViewModel {
        &self.inner.header
    }

    pub fn pantalla(&self) -> Option<Pantalla<R, U>> {
        self.inner
            .montada
            .borrow()
            .as_ref()
            .map(|m| m.pantalla.clone())
    }

    /// Misma ruta: se conserva la instancia (la recarga la dispara su hook).
    /// Ruta distinta: se destruye la pantalla anterior y se monta la nueva.
    fn montar(&self, route: &Route) {
        let misma = self
            .inner
            .montada
            .borrow()
            .as_ref()
            .is_some_and(|m| &m.route == route);
        if misma {
            return;
        }

        let pantalla = self.crear_pantalla(route);
        let anterior = self.inner.montada.borrow_mut().replace(Montada {
            route: route.clone(),
            pantalla: pantalla.clone(),
        });
        if let Some(anterior) = anterior {
            anterior.pantalla.destruir();
        }

        log::debug!("🖼️ Pantalla montada: {}", route);
        self.arrancar(&pantalla, route);
    }

    fn crear_pantalla(&self, route: &Route) -> Pantalla<R, U> {
        let inner = &self.inner;
        match route {
            Route::Login => Pantalla::Login(Rc::new(LoginViewModel::new(
                inner.usuarios.clone(),
                inner.session.clone(),
                inner.router.clone(),
            ))),
            Route::ListaResultado => Pantalla::ListaResultado(ListaResultadosViewModel::new(
                inner.resultados.clone(),
                inner.router.clone(),
            )),
            Route::DetalleResultado(_) => Pantalla::DetalleResultado(Rc::new(
                DetalleResultadoViewModel::new(inner.resultados.clone(), inner.router.clone()),
            )),
            Route::Registro(_) => Pantalla::Registro(RegistroViewModel::new(
                inner.usuarios.clone(),
                inner.session.clone(),
                inner.router.clone(),
            )),
            Route::Recupera => Pantalla::Recupera,
            Route::ListUsuarios => Pantalla::ListUsuarios(Rc::new(AdminViewModel::new(
                inner.usuarios.clone(),
                inner.router.clone(),
            ))),
        }
    }

    fn arrancar(&self, pantalla: &Pantalla<R, U>, route: &Route) {
        let id: Option<Id> = match route {
            Route::DetalleResultado(id) | Route::Registro(id) => *id,
            _ => None,
        };
        match pantalla {
            Pantalla::ListaResultado(vm) => vm.iniciar(),
            Pantalla::DetalleResultado(vm) => {
                let vm = vm.clone();
                tasks::spawn(async move { vm.iniciar(id).await });
            }
            Pantalla::Registro(vm) => {
                let vm = vm.clone();
                tasks::spawn(async move { vm.iniciar(id).await });
            }
            Pantalla::ListUsuarios(vm) => {
                let vm = vm.clone();
                tasks::spawn(async move { vm.cargar_usuarios().await });
            }
            Pantalla::Login(_) | Pantalla::Recupera => {}
        }
    }
}
