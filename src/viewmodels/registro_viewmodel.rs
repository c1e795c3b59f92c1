// ============================================================================
// REGISTRO VIEWMODEL - Alta pública y edición de usuarios (admin)
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::models::{EstadoUsuario, Id, NuevoUsuario, Rol, Usuario};
use crate::router::{Navigator, Route, Router};
use crate::services::AuthApi;
use crate::stores::{ReactiveState, SessionStore, Subscription};
use crate::utils::constants::{PASSWORD_MIN_LEN, REDIRECT_DELAY_MS};
use crate::utils::tasks;
use crate::utils::validators::{is_blank, is_valid_email};

pub const ERROR_FORMULARIO: &str = "Revisa los campos, hay errores en el formulario.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistroForm {
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    pub password: String,
    pub password2: String,
    pub rol: Rol,
    pub estado: EstadoUsuario,
}

impl RegistroForm {
    /// Errores por campo. La contraseña solo se exige en el alta.
    pub fn errores(&self, es_edicion: bool) -> Vec<(&'static str, &'static str)> {
        let mut errores = Vec::new();
        if is_blank(&self.nombre) {
            errores.push(("nombre", "El nombre es obligatorio"));
        }
        if is_blank(&self.apellido) {
            errores.push(("apellido", "El apellido es obligatorio"));
        }
        if is_blank(&self.correo) {
            errores.push(("correo", "El correo es obligatorio"));
        } else if !is_valid_email(&self.correo) {
            errores.push(("correo", "Ingresa un correo válido"));
        }
        let password = self.password.trim();
        if !es_edicion && password.is_empty() {
            errores.push(("password", "La contraseña es obligatoria"));
        } else if !password.is_empty() && password.chars().count() < PASSWORD_MIN_LEN {
            errores.push(("password", "La contraseña debe tener al menos 6 caracteres"));
        }
        if self.password != self.password2 {
            errores.push(("password2", "Las contraseñas no coinciden"));
        }
        errores
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistroState {
    pub form: RegistroForm,
    pub editing_id: Option<Id>,
    pub mensaje: String,
    pub error: String,
    pub cargando: bool,
    pub enviando: bool,
}

impl RegistroState {
    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }
}

struct Inner<A> {
    api: A,
    session: SessionStore,
    router: Router,
    state: ReactiveState<RegistroState>,
    destruido: Cell<bool>,
}

/// ViewModel de `/registro[/:id]` (handle clonable)
pub struct RegistroViewModel<A: AuthApi + 'static> {
    inner: Rc<Inner<A>>,
}

impl<A: AuthApi + 'static> Clone for RegistroViewModel<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: AuthApi + 'static> RegistroViewModel<A> {
    pub fn new(api: A, session: SessionStore, router: Router) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                session,
                router,
                state: ReactiveState::default(),
                destruido: Cell::new(false),
            }),
        }
    }

    /// Desmontaje: cancela la redirección pendiente e ignora respuestas tardías
    pub fn destruir(&self) {
        self.inner.destruido.set(true);
    }

    pub fn esta_destruido(&self) -> bool {
        self.inner.destruido.get()
    }

    /// Con id: modo edición, precarga el usuario sin su contraseña
    pub async fn iniciar(&self, id: Option<Id>) {
        let Some(id) = id else {
            self.inner.state.update(|s| s.editing_id = None);
            return;
        };

        self.inner.state.update(|s| {
            s.editing_id = Some(id);
            s.cargando = true;
        });
        let respuesta = self.inner.api.obtener_usuario(id).await;
        if self.inner.destruido.get() {
            return;
        }
        match respuesta {
            Ok(usuario) => self.inner.state.update(|s| {
                s.form = RegistroForm {
                    nombre: usuario.nombre,
                    apellido: usuario.apellido,
                    correo: usuario.correo,
                    password: String::new(),
                    password2: String::new(),
                    rol: usuario.rol,
                    estado: usuario.estado,
                };
                s.cargando = false;
            }),
            Err(e) => {
                log::error!("❌ Error cargando usuario {}: {}", id, e);
                self.inner.state.update(|s| {
                    s.error = "No se pudo cargar el usuario.".to_string();
                    s.cargando = false;
                });
            }
        }
    }

    pub fn editar_form(&self, edit: impl FnOnce(&mut RegistroForm)) {
        self.inner.state.update(|s| edit(&mut s.form));
    }

    pub async fn registrar(&self) {
        let (form, editing_id) = self.inner.state.with(|s| (s.form.clone(), s.editing_id));
        self.inner.state.update(|s| {
            s.mensaje.clear();
            s.error.clear();
        });

        if !form.errores(editing_id.is_some()).is_empty() {
            self.inner.state.update(|s| s.error = ERROR_FORMULARIO.to_string());
            return;
        }

        self.inner.state.update(|s| s.enviando = true);
        match editing_id {
            Some(id) => self.actualizar(id, form).await,
            None => self.crear(form).await,
        }
        self.inner.state.update(|s| s.enviando = false);
    }

    async fn actualizar(&self, id: Id, form: RegistroForm) {
        // La contraseña viaja tal cual se escribió; trim solo para decidir si viene
        let password = (!is_blank(&form.password)).then(|| form.password.clone());
        let usuario = Usuario {
            id_usuario: Some(id),
            nombre: form.nombre.trim().to_string(),
            apellido: form.apellido.trim().to_string(),
            correo: form.correo.trim().to_string(),
            password,
            rol: form.rol,
            estado: form.estado,
        };

        let respuesta = self.inner.api.actualizar_usuario(id, &usuario).await;
        if self.inner.destruido.get() {
            return;
        }
        match respuesta {
            Ok(_) => {
                self.inner
                    .state
                    .update(|s| s.mensaje = "Usuario actualizado con éxito.".to_string());
                self.redirigir(Route::ListUsuarios);
            }
            Err(e) => {
                log::error!("❌ Error actualizando usuario {}: {}", id, e);
                self.inner
                    .state
                    .update(|s| s.error = "Error al actualizar usuario.".to_string());
            }
        }
    }

    async fn crear(&self, form: RegistroForm) {
        // El destino se decide con la sesión de quien inició el alta
        let destino = if self.inner.session.is_admin() {
            Route::ListUsuarios
        } else {
            Route::Login
        };
        let correo = form.correo.trim().to_string();

        let verificacion = self.inner.api.verificar_correo(&correo).await;
        if self.inner.destruido.get() {
            return;
        }
        match verificacion {
            Err(e) => {
                log::error!("❌ Error verificando correo {}: {}", correo, e);
                self.inner
                    .state
                    .update(|s| s.error = "Error al verificar el correo.".to_string());
                return;
            }
            Ok(verificacion) if verificacion.existe => {
                self.inner
                    .state
                    .update(|s| s.error = "El correo ya está registrado.".to_string());
                return;
            }
            Ok(_) => {}
        }

        let nuevo = NuevoUsuario {
            nombre: form.nombre.trim().to_string(),
            apellido: form.apellido.trim().to_string(),
            correo,
            password: form.password,
            rol: Rol::User,
            estado: EstadoUsuario::Activo,
        };

        let respuesta = self.inner.api.registrar_usuario(&nuevo).await;
        if self.inner.destruido.get() {
            return;
        }
        match respuesta {
            Ok(_) => {
                self.inner.state.update(|s| {
                    s.mensaje = "Usuario registrado con éxito. Redirigiendo...".to_string();
                    s.form = RegistroForm::default();
                });
                self.redirigir(destino);
            }
            Err(e) => {
                log::error!("❌ Error registrando usuario: {}", e);
                self.inner
                    .state
                    .update(|s| s.error = "Hubo un error al registrar el usuario.".to_string());
            }
        }
    }

    fn redirigir(&self, destino: Route) {
        let inner = self.inner.clone();
        tasks::after(REDIRECT_DELAY_MS, move || {
            if inner.destruido.get() {
                log::debug!("ℹ️ Redirección a {} cancelada: pantalla destruida", destino);
                return;
            }
            inner.router.navigate(destino);
        });
    }

    pub fn state(&self) -> RegistroState {
        self.inner.state.get()
    }

    pub fn on_change<F: Fn() + 'static>(&self, callback: F) -> Subscription {
        self.inner.state.subscribe(callback)
    }
}
