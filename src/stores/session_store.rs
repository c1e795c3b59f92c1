// ============================================================================
// SESSION STORE - Dueño único de la sesión actual
// ============================================================================
// Lee/escribe la clave "sesion" solo a través de StorageService y notifica
// a los subscribers de forma síncrona en cada login/logout.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Rol, Sesion};
use crate::stores::reactivity::{Observers, Subscription};
use crate::utils::{StorageService, SESSION_KEY};

struct Inner {
    storage: StorageService,
    current: RefCell<Option<Sesion>>,
    observers: Observers<Option<Sesion>>,
}

/// Handle clonable al estado de sesión compartido
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    /// Inicializa la sesión en memoria desde storage (None si no hay o es inválida)
    pub fn new(storage: StorageService) -> Self {
        let current = storage.get::<Sesion>(SESSION_KEY);
        match &current {
            Some(sesion) => log::info!("💾 Sesión restaurada desde storage: {}", sesion.correo),
            None => log::debug!("ℹ️ Sin sesión guardada"),
        }
        Self {
            inner: Rc::new(Inner {
                storage,
                current: RefCell::new(current),
                observers: Observers::new(),
            }),
        }
    }

    /// Valor en memoria; no vuelve a leer storage
    pub fn get_current(&self) -> Option<Sesion> {
        self.inner.current.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.inner
            .current
            .borrow()
            .as_ref()
            .map(|s| s.logueado)
            .unwrap_or(false)
    }

    pub fn is_admin(&self) -> bool {
        self.rol() == Some(Rol::Admin)
    }

    pub fn rol(&self) -> Option<Rol> {
        self.inner.current.borrow().as_ref().map(|s| s.rol)
    }

    /// Persiste (best-effort) y publica la nueva sesión
    pub fn login(&self, sesion: Sesion) {
        if !self.inner.storage.set(SESSION_KEY, &sesion) {
            log::warn!("⚠️ Sesión no persistida; se mantiene solo en memoria");
        }
        log::info!("🔐 Sesión iniciada: {} ({})", sesion.correo, sesion.rol.as_str());
        *self.inner.current.borrow_mut() = Some(sesion);
        self.publish();
    }

    pub fn logout(&self) {
        if !self.inner.storage.remove(SESSION_KEY) {
            log::warn!("⚠️ No se pudo eliminar la sesión de storage");
        }
        log::info!("👋 Sesión cerrada");
        *self.inner.current.borrow_mut() = None;
        self.publish();
    }

    /// Llama a `callback` ahora con el valor actual y luego en cada cambio
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Option<&Sesion>) + 'static,
    {
        let current = self.get_current();
        callback(current.as_ref());
        self.inner
            .observers
            .subscribe(move |sesion: &Option<Sesion>| callback(sesion.as_ref()))
    }

    fn publish(&self) {
        // Sin préstamo activo durante la notificación: un subscriber puede
        // volver a llamar a login/logout.
        let value = self.get_current();
        self.inner.observers.notify(&value);
    }
}
