//! Maps `(renderer, format)` pairs to formatter constructors.
//!
//! A formatter declares what it renders by registering a constructor for each
//! pair it serves. The registry is filled during start-up and only read while
//! rendering; every lookup builds a fresh formatter, so renders never share
//! formatter state.
//!
//! Applications that want a single process-wide registry build one and hand it
//! to [`FormatterRegistry::install`]; it is read-only from then on.

use crate::error::RegistryError;
use crate::formatter::Formatter;
use crate::spec::RendererSpec;
use folio_types::{FormatId, RendererId};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type FormatterConstructor = Arc<dyn Fn() -> Box<dyn Formatter> + Send + Sync>;

/// Anything that can produce a formatter for a renderer and format.
pub trait FormatterFactory {
    /// Returns a new formatter, or `None` if nothing is registered for the pair.
    fn create(&self, renderer: &RendererId, format: &FormatId) -> Option<Box<dyn Formatter>>;
}

static GLOBAL_REGISTRY: OnceCell<FormatterRegistry> = OnceCell::new();

#[derive(Clone, Default)]
pub struct FormatterRegistry {
    constructors: HashMap<(RendererId, FormatId), FormatterConstructor>,
}

impl FormatterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `constructor` as the formatter for `renderer` in `format`.
    /// Registering the same pair again replaces the previous constructor.
    pub fn register<C>(
        &mut self,
        renderer: impl Into<RendererId>,
        format: impl Into<FormatId>,
        constructor: C,
    ) -> &mut Self
    where
        C: Fn() -> Box<dyn Formatter> + Send + Sync + 'static,
    {
        let key = (renderer.into(), format.into());
        if self.constructors.contains_key(&key) {
            log::warn!(
                "Replacing formatter registered for renderer '{}' and format '{}'",
                key.0,
                key.1
            );
        } else {
            log::debug!("Registered formatter for renderer '{}' and format '{}'", key.0, key.1);
        }
        self.constructors.insert(key, Arc::new(constructor));
        self
    }

    /// Convenience for registering against a spec rather than its id.
    pub fn register_for<C>(
        &mut self,
        spec: &RendererSpec,
        format: impl Into<FormatId>,
        constructor: C,
    ) -> &mut Self
    where
        C: Fn() -> Box<dyn Formatter> + Send + Sync + 'static,
    {
        self.register(spec.id(), format, constructor)
    }

    pub fn contains(&self, renderer: &RendererId, format: &FormatId) -> bool {
        self.constructors
            .contains_key(&(renderer.clone(), format.clone()))
    }

    /// The formats `renderer` can be rendered to, sorted by name.
    pub fn formats_for(&self, renderer: &RendererId) -> Vec<FormatId> {
        let mut formats: Vec<FormatId> = self
            .constructors
            .keys()
            .filter(|(r, _)| r == renderer)
            .map(|(_, f)| f.clone())
            .collect();
        formats.sort();
        formats
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Makes this registry the process-wide one.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::AlreadyInstalled` if a registry was installed before.
    pub fn install(self) -> Result<&'static FormatterRegistry, RegistryError> {
        GLOBAL_REGISTRY
            .set(self)
            .map_err(|_| RegistryError::AlreadyInstalled)?;
        log::info!("Installed global formatter registry");
        GLOBAL_REGISTRY.get().ok_or(RegistryError::AlreadyInstalled)
    }

    /// The process-wide registry, if one was installed.
    pub fn global() -> Option<&'static FormatterRegistry> {
        GLOBAL_REGISTRY.get()
    }
}

impl FormatterFactory for FormatterRegistry {
    fn create(&self, renderer: &RendererId, format: &FormatId) -> Option<Box<dyn Formatter>> {
        let constructor = self
            .constructors
            .get(&(renderer.clone(), format.clone()))?;
        Some(constructor())
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pairs: Vec<String> = self
            .constructors
            .keys()
            .map(|(r, f)| format!("{}:{}", r, f))
            .collect();
        pairs.sort();
        f.debug_struct("FormatterRegistry")
            .field("formatters", &pairs)
            .finish()
    }
}
