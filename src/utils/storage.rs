// ============================================================================
// STORAGE - Adaptador clave/valor sobre localStorage
// ============================================================================
// Contrato público infalible: `get` devuelve None y `set/remove/clear`
// devuelven false ante cualquier fallo (sin navegador, cuota, JSON inválido).
// Las variantes `try_*` exponen el error para quien lo necesite.
// ============================================================================

use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("localStorage no disponible en este contexto")]
    Unavailable,

    #[error("Error de storage: {0}")]
    Backend(String),

    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Almacén de texto clave/valor (localStorage o memoria)
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Backend sobre `window.localStorage`.
///
/// Fuera de wasm32 (tests nativos, prerender) no hay `window`: todas las
/// operaciones devuelven `StorageError::Unavailable`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorage;

impl LocalStorage {
    #[cfg(target_arch = "wasm32")]
    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        Err(StorageError::Unavailable)
    }
}

impl StorageBackend for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.storage()?
            .clear()
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }
}

/// Backend en memoria (tests y entornos sin navegador)
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texto crudo guardado bajo `key` (útil para inspeccionar en tests)
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.items.borrow_mut().clear();
        Ok(())
    }
}

/// Fachada tipada (JSON) sobre un `StorageBackend`
#[derive(Clone)]
pub struct StorageService {
    backend: Rc<dyn StorageBackend>,
}

impl StorageService {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Storage del navegador (no-op fuera de él)
    pub fn browser() -> Self {
        Self::new(Rc::new(LocalStorage))
    }

    pub fn memory(storage: MemoryStorage) -> Self {
        Self::new(Rc::new(storage))
    }

    /// Serializa antes de escribir: un fallo de JSON no toca el storage
    pub fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.backend.set_item(key, &json)
    }

    pub fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.get_item(key)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn try_remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove_item(key)
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(StorageError::Unavailable) => false,
            Err(e) => {
                log::error!("❌ Error guardando en storage [{}]: {}", key, e);
                false
            }
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(StorageError::Unavailable) => None,
            Err(e) => {
                log::error!("❌ Error leyendo storage [{}]: {}", key, e);
                None
            }
        }
    }

    pub fn remove(&self, key: &str) -> bool {
        match self.try_remove(key) {
            Ok(()) => true,
            Err(StorageError::Unavailable) => false,
            Err(e) => {
                log::error!("❌ Error eliminando de storage [{}]: {}", key, e);
                false
            }
        }
    }

    pub fn has(&self, key: &str) -> bool {
        matches!(self.backend.get_item(key), Ok(Some(_)))
    }

    pub fn clear(&self) -> bool {
        match self.backend.clear() {
            Ok(()) => true,
            Err(StorageError::Unavailable) => false,
            Err(e) => {
                log::error!("❌ Error limpiando storage: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde::Deserialize;

    /// Backend que falla siempre en escritura (cuota excedida)
    pub(crate) struct FullStorage;

    impl StorageBackend for FullStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("QuotaExceededError".into()))
        }
        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("SecurityError".into()))
        }
        fn clear(&self) -> Result<(), StorageError> {
            Err(StorageError::Backend("SecurityError".into()))
        }
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Preferencia {
        tema: String,
        tamano: u8,
    }

    #[test]
    fn test_set_get_remove_has() {
        let mem = MemoryStorage::new();
        let storage = StorageService::memory(mem.clone());
        let pref = Preferencia { tema: "oscuro".into(), tamano: 2 };

        assert!(storage.set("pref", &pref));
        assert!(storage.has("pref"));
        assert_eq!(storage.get::<Preferencia>("pref"), Some(pref));
        assert_eq!(mem.raw("pref").as_deref(), Some(r#"{"tema":"oscuro","tamano":2}"#));

        assert!(storage.remove("pref"));
        assert!(!storage.has("pref"));
        assert_eq!(storage.get::<Preferencia>("pref"), None);
    }

    #[test]
    fn test_json_corrupto_devuelve_none() {
        let mem = MemoryStorage::new();
        mem.set_item("pref", "{no es json").unwrap();
        let storage = StorageService::memory(mem);

        assert_eq!(storage.get::<Preferencia>("pref"), None);
        assert!(matches!(
            storage.try_get::<Preferencia>("pref"),
            Err(StorageError::Serialization(_))
        ));
        // La clave sigue existiendo aunque no se pueda leer
        assert!(storage.has("pref"));
    }

    #[test]
    fn test_fallo_de_serializacion_no_escribe_nada() {
        let mem = MemoryStorage::new();
        let storage = StorageService::memory(mem.clone());
        assert!(storage.set("pref", &"anterior"));

        // JSON no admite claves de mapa que no sean texto
        let mut invalido: HashMap<(i32, i32), i32> = HashMap::new();
        invalido.insert((1, 2), 3);

        assert!(!storage.set("pref", &invalido));
        assert!(!storage.set("nueva", &invalido));
        assert!(matches!(
            storage.try_set("nueva", &invalido),
            Err(StorageError::Serialization(_))
        ));
        assert_eq!(mem.raw("pref").as_deref(), Some(r#""anterior""#));
        assert_eq!(mem.raw("nueva"), None);
        assert_eq!(mem.len(), 1);
    }

    #[test]
    fn test_clear_vacia_todo() {
        let mem = MemoryStorage::new();
        let storage = StorageService::memory(mem.clone());
        storage.set("a", &1);
        storage.set("b", &2);
        assert!(storage.clear());
        assert!(mem.is_empty());
    }

    #[test]
    fn test_fuera_del_navegador_todo_es_no_op() {
        let storage = StorageService::browser();
        assert!(!storage.set("sesion", &"x"));
        assert_eq!(storage.get::<String>("sesion"), None);
        assert!(!storage.remove("sesion"));
        assert!(!storage.has("sesion"));
        assert!(!storage.clear());
        assert!(matches!(storage.try_get::<String>("sesion"), Err(StorageError::Unavailable)));
    }

    #[test]
    fn test_fallo_de_escritura_devuelve_false() {
        let storage = StorageService::new(Rc::new(FullStorage));
        assert!(!storage.set("k", &"v"));
        assert!(!storage.remove("k"));
        assert!(!storage.clear());
    }
}
