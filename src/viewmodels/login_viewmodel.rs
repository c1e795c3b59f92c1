// ============================================================================
// LOGIN VIEWMODEL - Formulario de acceso y alta de la sesión
// ============================================================================

use std::rc::Rc;

use crate::models::{LoginCredentials, Sesion};
use crate::router::{Navigator, Route, Router};
use crate::services::AuthApi;
use crate::stores::{ReactiveState, SessionStore, Subscription};
use crate::utils::validators::{is_blank, is_valid_email};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    /// Credenciales rechazadas o backend caído
    pub error: bool,
    pub loading: bool,
    /// El usuario intentó enviar: mostrar errores de campo
    pub tocado: bool,
}

impl LoginState {
    pub fn error_email(&self) -> Option<&'static str> {
        if is_blank(&self.email) {
            Some("El correo es obligatorio")
        } else if !is_valid_email(&self.email) {
            Some("Ingresa un correo válido")
        } else {
            None
        }
    }

    pub fn error_password(&self) -> Option<&'static str> {
        is_blank(&self.password).then_some("La contraseña es obligatoria")
    }

    pub fn es_valido(&self) -> bool {
        self.error_email().is_none() && self.error_password().is_none()
    }
}

/// ViewModel de `/login`
pub struct LoginViewModel<A: AuthApi> {
    api: A,
    session: SessionStore,
    router: Router,
    state: Rc<ReactiveState<LoginState>>,
}

impl<A: AuthApi> LoginViewModel<A> {
    pub fn new(api: A, session: SessionStore, router: Router) -> Self {
        Self {
            api,
            session,
            router,
            state: Rc::new(ReactiveState::default()),
        }
    }

    pub fn set_email(&self, email: &str) {
        self.state.update(|s| s.email = email.to_string());
    }

    pub fn set_password(&self, password: &str) {
        self.state.update(|s| s.password = password.to_string());
    }

    pub async fn login(&self) {
        self.state.update(|s| s.error = false);

        let form = self.state.get();
        if !form.es_valido() {
            self.state.update(|s| s.tocado = true);
            return;
        }

        self.state.update(|s| s.loading = true);
        let credentials = LoginCredentials {
            correo: form.email.trim().to_string(),
            password: form.password,
        };

        match self.api.login(&credentials).await {
            Ok(usuario) => {
                self.session.login(Sesion::nueva(
                    &usuario.nombre,
                    &usuario.apellido,
                    &usuario.correo,
                    usuario.rol,
                ));
                self.state.update(|s| {
                    s.loading = false;
                    s.password.clear();
                });
                self.router.navigate(Route::ListaResultado);
            }
            Err(e) => {
                log::error!("❌ Error login: {}", e);
                self.state.update(|s| {
                    s.error = true;
                    s.loading = false;
                });
            }
        }
    }

    pub fn state(&self) -> LoginState {
        self.state.get()
    }

    pub fn on_change<F: Fn() + 'static>(&self, callback: F) -> Subscription {
        self.state.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoginResponse, Rol};
    use crate::services::ApiError;
    use crate::testing::{entorno, MockAuthApi};
    use futures::executor::block_on;

    fn vm() -> (LoginViewModel<Rc<MockAuthApi>>, Rc<MockAuthApi>, SessionStore, Router) {
        let (session, router) = entorno(None);
        let api = MockAuthApi::new();
        (
            LoginViewModel::new(api.clone(), session.clone(), router.clone()),
            api,
            session,
            router,
        )
    }

    #[test]
    fn test_formulario_invalido_no_llama_al_backend() {
        let (vm, api, _, _) = vm();
        vm.set_email("no-es-correo");
        block_on(vm.login());

        let s = vm.state();
        assert!(s.tocado);
        assert_eq!(s.error_email(), Some("Ingresa un correo válido"));
        assert_eq!(s.error_password(), Some("La contraseña es obligatoria"));
        assert!(api.llamadas().is_empty());
    }

    #[test]
    fn test_login_exitoso_crea_sesion_y_navega() {
        let (vm, api, session, router) = vm();
        *api.login.borrow_mut() = Ok(LoginResponse {
            nombre: "Luis".into(),
            apellido: "Soto".into(),
            correo: "luis@lab.cl".into(),
            rol: Rol::Admin,
        });
        vm.set_email(" luis@lab.cl ");
        vm.set_password("secreto");
        block_on(vm.login());

        assert_eq!(api.llamadas(), vec!["login:luis@lab.cl"]);
        let sesion = session.get_current().unwrap();
        assert!(sesion.logueado);
        assert_eq!(sesion.usuario, "Luis Soto");
        assert!(session.is_admin());
        assert_eq!(router.current(), Some(Route::ListaResultado));
        assert!(!vm.state().loading);
        assert!(vm.state().password.is_empty());
    }

    #[test]
    fn test_login_rechazado() {
        let (vm, api, session, router) = vm();
        *api.login.borrow_mut() = Err(ApiError::from_response(401, ""));
        vm.set_email("ana@lab.cl");
        vm.set_password("mala");
        block_on(vm.login());

        let s = vm.state();
        assert!(s.error);
        assert!(!s.loading);
        assert!(!session.is_logged_in());
        assert_eq!(router.current(), None);
    }
}
