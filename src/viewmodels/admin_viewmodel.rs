// ============================================================================
// ADMIN VIEWMODEL - Listado de usuarios para administradores
// ============================================================================

use std::rc::Rc;

use crate::models::{Id, Usuario};
use crate::router::{Navigator, Route, Router};
use crate::services::AuthApi;
use crate::stores::{ReactiveState, Subscription};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub usuarios: Vec<Usuario>,
    pub error: String,
    pub cargando: bool,
}

/// ViewModel de `/list-usuarios`
pub struct AdminViewModel<A: AuthApi> {
    api: A,
    router: Router,
    state: Rc<ReactiveState<AdminState>>,
}

impl<A: AuthApi> AdminViewModel<A> {
    pub fn new(api: A, router: Router) -> Self {
        Self {
            api,
            router,
            state: Rc::new(ReactiveState::default()),
        }
    }

    pub async fn cargar_usuarios(&self) {
        self.state.update(|s| {
            s.cargando = true;
            s.error.clear();
        });
        match self.api.listar_usuarios().await {
            Ok(usuarios) => self.state.update(|s| {
                s.usuarios = usuarios;
                s.cargando = false;
            }),
            Err(e) => {
                log::error!("❌ Error cargando usuarios: {}", e);
                self.state.update(|s| {
                    s.error = "Error al cargar usuarios.".to_string();
                    s.cargando = false;
                });
            }
        }
    }

    pub fn editar(&self, id: Id) {
        self.router.navigate(Route::Registro(Some(id)));
    }

    pub fn state(&self) -> AdminState {
        self.state.get()
    }

    pub fn on_change<F: Fn() + 'static>(&self, callback: F) -> Subscription {
        self.state.subscribe(callback)
    }
}
