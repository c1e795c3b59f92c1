// ============================================================================
// HEADER VIEWMODEL - Usuario actual, navegación común y logout
// ============================================================================

use std::rc::Rc;

use crate::models::Rol;
use crate::router::{Navigator, Route, Router};
use crate::stores::{ReactiveState, SessionStore, Subscription};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderState {
    pub usuario: Option<String>,
    pub rol: Option<Rol>,
}

/// Cabecera común: muestra el usuario y ofrece volver a la lista o salir
pub struct HeaderViewModel {
    session: SessionStore,
    router: Router,
    state: Rc<ReactiveState<HeaderState>>,
    _session_sub: Subscription,
}

impl HeaderViewModel {
    pub fn new(session: SessionStore, router: Router) -> Self {
        let state = Rc::new(ReactiveState::<HeaderState>::default());
        let weak = Rc::downgrade(&state);
        let session_sub = session.subscribe(move |sesion| {
            if let Some(state) = weak.upgrade() {
                state.update(|s| {
                    s.usuario = sesion.map(|s| s.usuario.clone());
                    s.rol = sesion.map(|s| s.rol);
                });
            }
        });
        Self {
            session,
            router,
            state,
            _session_sub: session_sub,
        }
    }

    pub fn es_admin(&self) -> bool {
        self.state.with(|s| s.rol == Some(Rol::Admin))
    }

    pub fn ir_a_lista(&self) {
        self.router.navigate(Route::ListaResultado);
    }

    pub fn ir_a_usuarios(&self) {
        self.router.navigate(Route::ListUsuarios);
    }

    pub fn logout(&self) {
        self.session.logout();
        self.router.navigate(Route::Login);
    }

    pub fn state(&self) -> HeaderState {
        self.state.get()
    }

    pub fn on_change<F: Fn() + 'static>(&self, callback: F) -> Subscription {
        self.state.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sesion;
    use crate::testing::entorno;

    #[test]
    fn test_refleja_la_sesion() {
        let (session, router) = entorno(Some(Rol::User));
        let vm = HeaderViewModel::new(session.clone(), router);
        assert_eq!(vm.state().usuario.as_deref(), Some("Ana Ruiz"));
        assert!(!vm.es_admin());

        session.login(Sesion::nueva("Luis", "Soto", "luis@lab.cl", Rol::Admin));
        assert!(vm.es_admin());
        assert_eq!(vm.state().usuario.as_deref(), Some("Luis Soto"));
    }

    #[test]
    fn test_logout_limpia_y_va_a_login() {
        let (session, router) = entorno(Some(Rol::Admin));
        let vm = HeaderViewModel::new(session.clone(), router.clone());
        vm.logout();

        assert!(!session.is_logged_in());
        assert_eq!(vm.state(), HeaderState::default());
        assert_eq!(router.current(), Some(Route::Login));
    }

    #[test]
    fn test_ir_a_lista() {
        let (session, router) = entorno(Some(Rol::User));
        let vm = HeaderViewModel::new(session, router.clone());
        vm.ir_a_lista();
        assert_eq!(router.current(), Some(Route::ListaResultado));
    }
}
