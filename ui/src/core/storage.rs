//! Key-value settings persistence.
//!
//! Values are serialised as JSON text so numbers and booleans survive
//! string-only backends. Reads never fail from the caller's perspective:
//! missing or malformed entries come back as the supplied default.
//!
//! In the browser the chain is: userscript manager storage → page
//! `localStorage` → session memory. Each step only engages when the one
//! before it errors.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};

use super::error::{StorageError, StorageResult};

/// Raw string storage. Object safe so callers can hold `Rc<dyn SettingsStore>`.
pub trait SettingsStore {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for std::rc::Rc<S> {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_raw(key, value)
    }
}

/// Typed access on top of [`SettingsStore`].
pub trait SettingsExt: SettingsStore {
    /// Read and decode `key`, falling back to `default` on any failure.
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get_raw(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!("setting `{key}` is malformed ({err}); using default");
                    default
                }
            },
            Ok(None) => default,
            Err(err) => {
                tracing::debug!("setting `{key}` unreadable ({err}); using default");
                default
            }
        }
    }

    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value).map_err(|err| StorageError::Serialize {
            key: key.to_string(),
            message: err.to_string(),
        })?;
        self.set_raw(key, &raw)
    }
}

impl<S: SettingsStore + ?Sized> SettingsExt for S {}

/// In-process store. Used as the session fallback and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Chains a primary and a secondary backend with a session-memory floor.
///
/// A backend that errors once is remembered as broken and skipped for the
/// rest of the session so the console is not flooded on every tick.
pub struct FallbackStore<P, S> {
    primary: P,
    secondary: S,
    session: MemoryStore,
    primary_broken: Cell<bool>,
    secondary_broken: Cell<bool>,
}

impl<P: SettingsStore, S: SettingsStore> FallbackStore<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary,
            session: MemoryStore::new(),
            primary_broken: Cell::new(false),
            secondary_broken: Cell::new(false),
        }
    }

    fn note_failure(flag: &Cell<bool>, which: &str, err: &StorageError) {
        if !flag.replace(true) {
            tracing::warn!("{which} settings store failed ({err}); falling back");
        }
    }
}

impl<P: SettingsStore, S: SettingsStore> SettingsStore for FallbackStore<P, S> {
    fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
        if !self.primary_broken.get() {
            match self.primary.get_raw(key) {
                Ok(value) => return Ok(value),
                Err(err) => Self::note_failure(&self.primary_broken, "primary", &err),
            }
        }
        if !self.secondary_broken.get() {
            match self.secondary.get_raw(key) {
                Ok(value) => return Ok(value),
                Err(err) => Self::note_failure(&self.secondary_broken, "secondary", &err),
            }
        }
        self.session.get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
        if !self.primary_broken.get() {
            match self.primary.set_raw(key, value) {
                Ok(()) => return Ok(()),
                Err(err) => Self::note_failure(&self.primary_broken, "primary", &err),
            }
        }
        if !self.secondary_broken.get() {
            match self.secondary.set_raw(key, value) {
                Ok(()) => return Ok(()),
                Err(err) => Self::note_failure(&self.secondary_broken, "secondary", &err),
            }
        }
        self.session.set_raw(key, value)
    }
}

/// The store the overlay uses at runtime.
#[cfg(target_arch = "wasm32")]
pub fn browser_settings() -> FallbackStore<web::UserscriptStore, web::LocalStore> {
    FallbackStore::new(web::UserscriptStore, web::LocalStore)
}

/// Native builds have no browser storage; settings live for the process only.
#[cfg(not(target_arch = "wasm32"))]
pub fn browser_settings() -> MemoryStore {
    MemoryStore::new()
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    //! Browser-backed stores.

    use wasm_bindgen::{JsCast, JsValue};

    use super::SettingsStore;
    use crate::core::error::{StorageError, StorageResult};

    fn js_message(err: JsValue) -> String {
        err.as_string()
            .or_else(|| {
                js_sys::JSON::stringify(&err)
                    .ok()
                    .and_then(|s| s.as_string())
            })
            .unwrap_or_else(|| "unknown error".to_string())
    }

    fn global_function(name: &str) -> StorageResult<js_sys::Function> {
        let value = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str(name))
            .map_err(|err| StorageError::Backend(js_message(err)))?;
        value
            .dyn_into::<js_sys::Function>()
            .map_err(|_| StorageError::Unavailable("userscript manager"))
    }

    /// `GM_getValue` / `GM_setValue` exposed by the userscript manager.
    ///
    /// Values cross the boundary as JS values (not strings) so entries
    /// written by older script versions as plain numbers stay readable.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct UserscriptStore;

    impl SettingsStore for UserscriptStore {
        fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
            let get = global_function("GM_getValue")?;
            let value = get
                .call1(&JsValue::NULL, &JsValue::from_str(key))
                .map_err(|err| StorageError::Backend(js_message(err)))?;
            if value.is_undefined() || value.is_null() {
                return Ok(None);
            }
            let text = js_sys::JSON::stringify(&value)
                .map_err(|err| StorageError::Backend(js_message(err)))?;
            Ok(text.as_string())
        }

        fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
            let set = global_function("GM_setValue")?;
            let parsed = js_sys::JSON::parse(value).unwrap_or_else(|_| JsValue::from_str(value));
            set.call2(&JsValue::NULL, &JsValue::from_str(key), &parsed)
                .map_err(|err| StorageError::Backend(js_message(err)))?;
            Ok(())
        }
    }

    /// Same-origin `window.localStorage`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalStore;

    impl LocalStore {
        fn storage() -> StorageResult<web_sys::Storage> {
            let window = web_sys::window().ok_or(StorageError::Unavailable("window"))?;
            window
                .local_storage()
                .map_err(|err| StorageError::Backend(js_message(err)))?
                .ok_or(StorageError::Unavailable("localStorage"))
        }
    }

    impl SettingsStore for LocalStore {
        fn get_raw(&self, key: &str) -> StorageResult<Option<String>> {
            Self::storage()?
                .get_item(key)
                .map_err(|err| StorageError::Backend(js_message(err)))
        }

        fn set_raw(&self, key: &str, value: &str) -> StorageResult<()> {
            Self::storage()?
                .set_item(key, value)
                .map_err(|err| StorageError::Backend(js_message(err)))
        }
    }
}
