//! The per-render options context.

use crate::error::OptionError;
use crate::spec::RendererSpec;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Option values for a single render, handed by reference to every stage handler.
///
/// Values are JSON values; `Value::Null` reads as unset. There are two ways to
/// write: [`set`](Self::set) accepts any name, while [`assign`](Self::assign) is
/// the accessor form and only accepts names the renderer declared.
///
/// Handlers usually read through [`extract`](Self::extract) into a
/// `#[derive(Deserialize)]` struct describing the renderer's options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsContext {
    values: Map<String, Value>,
    accessors: Vec<String>,
}

impl OptionsContext {
    /// Method names of this type. An option declared with one of these names gets
    /// no accessor, so `assign` refuses it.
    pub const RESERVED_ACCESSORS: &'static [&'static str] = &[
        "get",
        "get_str",
        "get_f64",
        "get_bool",
        "is_set",
        "set",
        "assign",
        "remove",
        "names",
        "len",
        "is_empty",
        "iter",
        "extract",
        "to_value",
        "has_accessor",
    ];

    /// An empty context with no accessors.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty context whose accessors are the options declared by `spec`.
    pub fn for_spec(spec: &RendererSpec) -> Self {
        Self {
            values: Map::new(),
            accessors: spec.accessor_names().map(str::to_string).collect(),
        }
    }

    /// Seeds the context from key/value pairs, later pairs overwriting earlier ones.
    pub fn with_values<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (name, value) in values {
            self.set(name, value);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, name: &str) -> Result<Option<&str>, OptionError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(invalid(name, "string")),
        }
    }

    pub fn get_f64(&self, name: &str) -> Result<Option<f64>, OptionError> {
        match self.get(name) {
            None => Ok(None),
            Some(v) => v.as_f64().map(Some).ok_or_else(|| invalid(name, "number")),
        }
    }

    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, OptionError> {
        match self.get(name) {
            None => Ok(None),
            Some(v) => v.as_bool().map(Some).ok_or_else(|| invalid(name, "boolean")),
        }
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Writes any option, declared or not. Returns the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Writes a declared option through its accessor.
    ///
    /// # Errors
    ///
    /// Returns `OptionError::NoAccessor` if the renderer did not declare `name`,
    /// or if its accessor was suppressed by a collision with a context method.
    pub fn assign(&mut self, name: &str, value: impl Into<Value>) -> Result<(), OptionError> {
        if !self.has_accessor(name) {
            return Err(OptionError::NoAccessor(name.to_string()));
        }
        self.values.insert(name.to_string(), value.into());
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    pub fn has_accessor(&self, name: &str) -> bool {
        self.accessors.iter().any(|n| n == name)
    }

    /// Names of all set options.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(name, _)| name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The options as a JSON object.
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    /// Deserializes the options into a typed configuration struct.
    ///
    /// # Errors
    ///
    /// Returns `OptionError::Deserialize` when the values do not fit `T`.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<T, OptionError> {
        Ok(serde_json::from_value(self.to_value())?)
    }
}

fn invalid(name: &str, expected: &'static str) -> OptionError {
    OptionError::InvalidType {
        name: name.to_string(),
        expected,
    }
}
