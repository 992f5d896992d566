use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::errors::BrowserError;

/// Host function callable from page JavaScript.
///
/// Arguments arrive as JSON values. Engines may invoke it from whichever
/// thread runs their message loop.
pub type JsFunction = Box<dyn Fn(&[Value]) -> Result<(), BrowserError> + Send + Sync>;

/// Functions and properties exposed to a page under the `window` object.
#[derive(Default)]
pub struct JsBindings {
    functions: BTreeMap<String, JsFunction>,
    properties: BTreeMap<String, Value>,
}

impl fmt::Debug for JsBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsBindings")
            .field("functions", &self.functions.keys().collect::<Vec<_>>())
            .field("properties", &self.properties)
            .finish()
    }
}

impl JsBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `f` under `name`, replacing any previous function.
    pub fn set_function<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&[Value]) -> Result<(), BrowserError> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Box::new(f));
        self
    }

    /// Sets property `name`, replacing any previous value.
    pub fn set_property(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }

    /// Invokes the function registered under `name`.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<(), BrowserError> {
        let f = self
            .functions
            .get(name)
            .ok_or_else(|| BrowserError::UnknownBinding(name.to_string()))?;
        f(args)
    }
}
