// ============================================================================
// LISTA RESULTADOS VIEWMODEL - Carga, recarga al volver y borrado confirmado
// ============================================================================
// La lista en memoria es una caché del servidor: solo se quita una fila
// después de que el backend confirma el DELETE.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use crate::models::{Id, Resultado};
use crate::router::{Navigator, Route, Router};
use crate::services::ResultadoApi;
use crate::stores::{ReactiveState, Subscription};
use crate::utils::tasks;

pub const ERROR_CARGA: &str = "Error al cargar resultados.";
pub const ERROR_ELIMINAR: &str = "No se pudo eliminar el registro.";

/// Fase de la carga de la lista
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fase {
    Idle,
    Loading,
    Loaded,
    LoadError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListaResultadosState {
    pub resultados: Vec<Resultado>,
    pub error: String,
    pub cargando: bool,
    pub fase: Fase,
    pub mostrar_modal: bool,
    pub id_seleccionado: Option<Id>,
}

impl Default for ListaResultadosState {
    fn default() -> Self {
        Self {
            resultados: Vec::new(),
            error: String::new(),
            cargando: false,
            fase: Fase::Idle,
            mostrar_modal: false,
            id_seleccionado: None,
        }
    }
}

struct Inner<A> {
    api: A,
    router: Router,
    state: ReactiveState<ListaResultadosState>,
    hook: RefCell<Option<Subscription>>,
    destruido: Cell<bool>,
    /// Número de la última carga emitida; solo esa puede escribir la lista
    carga_actual: Cell<u64>,
    /// Borrados confirmados mientras la última carga estaba en vuelo
    borrados_en_vuelo: RefCell<HashSet<Id>>,
}

/// ViewModel de la pantalla `/lista-resultado` (handle clonable)
pub struct ListaResultadosViewModel<A: ResultadoApi + 'static> {
    inner: Rc<Inner<A>>,
}

impl<A: ResultadoApi + 'static> Clone for ListaResultadosViewModel<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: ResultadoApi + 'static> ListaResultadosViewModel<A> {
    pub fn new(api: A, router: Router) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                router,
                state: ReactiveState::default(),
                hook: RefCell::new(None),
                destruido: Cell::new(false),
                carga_actual: Cell::new(0),
                borrados_en_vuelo: RefCell::new(HashSet::new()),
            }),
        }
    }

    /// Montaje: primera carga + recarga cada vez que se vuelve a esta ruta
    pub fn iniciar(&self) {
        if self.inner.destruido.get() {
            return;
        }

        if self.inner.hook.borrow().is_none() {
            let weak: Weak<Inner<A>> = Rc::downgrade(&self.inner);
            let hook = self.inner.router.on_enter(Route::ListaResultado, move || {
                if let Some(inner) = weak.upgrade() {
                    log::debug!("🔄 De vuelta en la lista, recargando resultados");
                    ListaResultadosViewModel { inner }.spawn_carga();
                }
            });
            *self.inner.hook.borrow_mut() = Some(hook);
        }

        self.spawn_carga();
    }

    /// Desmontaje: cancela el hook de recarga e ignora respuestas tardías
    pub fn destruir(&self) {
        self.inner.destruido.set(true);
        if let Some(hook) = self.inner.hook.borrow_mut().take() {
            hook.unsubscribe();
        }
        log::debug!("🧹 Lista de resultados destruida");
    }

    pub fn spawn_carga(&self) {
        let vm = self.clone();
        tasks::spawn(async move { vm.cargar_resultados().await });
    }

    pub async fn cargar_resultados(&self) {
        if self.inner.destruido.get() {
            return;
        }
        let carga = self.inner.carga_actual.get() + 1;
        self.inner.carga_actual.set(carga);
        self.inner.borrados_en_vuelo.borrow_mut().clear();
        self.inner.state.update(|s| {
            s.cargando = true;
            s.fase = Fase::Loading;
        });

        let respuesta = self.inner.api.obtener_resultados().await;
        if self.inner.destruido.get() {
            log::debug!("ℹ️ Respuesta de carga ignorada: pantalla destruida");
            return;
        }
        if self.inner.carga_actual.get() != carga {
            log::debug!("ℹ️ Respuesta de carga {} ignorada: hay una carga más reciente", carga);
            return;
        }

        match respuesta {
            Ok(resultados) => {
                // La respuesta puede haberse generado antes de un DELETE ya confirmado
                let borrados = std::mem::take(&mut *self.inner.borrados_en_vuelo.borrow_mut());
                let resultados: Vec<Resultado> = sin_ids_duplicados(resultados)
                    .into_iter()
                    .filter(|r| r.id_resultado.map_or(true, |id| !borrados.contains(&id)))
                    .collect();
                log::info!("📋 {} resultados cargados", resultados.len());
                self.inner.state.update(|s| {
                    s.resultados = resultados;
                    s.error.clear();
                    s.cargando = false;
                    s.fase = Fase::Loaded;
                });
            }
            Err(e) => {
                log::error!("❌ Error cargando resultados: {}", e);
                self.inner.state.update(|s| {
                    s.error = ERROR_CARGA.to_string();
                    s.cargando = false;
                    s.fase = Fase::LoadError;
                });
                if e.is_unauthorized() {
                    self.inner.router.navigate(Route::Login);
                }
            }
        }
    }

    /// Pide confirmación para borrar `id`; aún no llama al servidor
    pub fn abrir_modal(&self, id: Id) {
        self.inner.state.update(|s| {
            s.id_seleccionado = Some(id);
            s.mostrar_modal = true;
        });
    }

    pub fn cancelar(&self) {
        self.inner.state.update(cerrar_modal);
    }

    pub async fn confirmar_eliminacion(&self) {
        let Some(id) = self.inner.state.with(|s| s.id_seleccionado) else {
            return;
        };

        let respuesta = self.inner.api.eliminar_resultado(id).await;
        if self.inner.destruido.get() {
            log::debug!("ℹ️ Respuesta de borrado ignorada: pantalla destruida");
            return;
        }

        match respuesta {
            Ok(()) => {
                log::info!("🗑️ Resultado {} eliminado", id);
                self.inner.borrados_en_vuelo.borrow_mut().insert(id);
                self.inner.state.update(|s| {
                    s.resultados.retain(|r| !r.tiene_id(id));
                    cerrar_modal(s);
                });
            }
            Err(e) => {
                log::error!("❌ Error eliminando resultado {}: {}", id, e);
                self.inner.state.update(|s| {
                    s.error = ERROR_ELIMINAR.to_string();
                    cerrar_modal(s);
                });
            }
        }
    }

    pub fn editar(&self, id: Id) {
        self.inner.router.navigate(Route::DetalleResultado(Some(id)));
    }

    pub fn on_change<F: Fn() + 'static>(&self, callback: F) -> Subscription {
        self.inner.state.subscribe(callback)
    }

    pub fn state(&self) -> ListaResultadosState {
        self.inner.state.get()
    }

    pub fn resultados(&self) -> Vec<Resultado> {
        self.inner.state.with(|s| s.resultados.clone())
    }

    pub fn cargando(&self) -> bool {
        self.inner.state.with(|s| s.cargando)
    }

    pub fn error(&self) -> String {
        self.inner.state.with(|s| s.error.clone())
    }

    pub fn fase(&self) -> Fase {
        self.inner.state.with(|s| s.fase)
    }

    pub fn mostrar_modal(&self) -> bool {
        self.inner.state.with(|s| s.mostrar_modal)
    }

    pub fn id_seleccionado(&self) -> Option<Id> {
        self.inner.state.with(|s| s.id_seleccionado)
    }

    pub fn esta_destruido(&self) -> bool {
        self.inner.destruido.get()
    }
}

/// Selección y modal se limpian siempre juntos
fn cerrar_modal(s: &mut ListaResultadosState) {
    s.mostrar_modal = false;
    s.id_seleccionado = None;
}

/// `idResultado` es único dentro de la lista; se conserva la primera aparición
fn sin_ids_duplicados(resultados: Vec<Resultado>) -> Vec<Resultado> {
    let mut vistos = HashSet::new();
    let total = resultados.len();
    let unicos: Vec<Resultado> = resultados
        .into_iter()
        .filter(|r| r.id_resultado.map_or(true, |id| vistos.insert(id)))
        .collect();
    if unicos.len() != total {
        log::warn!("⚠️ {} resultados con id duplicado descartados", total - unicos.len());
    }
    unicos
}
