use std::sync::mpsc::Sender;

use serde_json::{Map, Value, json};
use webpane_browser::{BrowserError, JsBindings};

use crate::shape::ShapeCommand;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum BindingError {
    #[error("{function}() expects an argument")]
    MissingArgument { function: &'static str },

    #[error("{function}() expects a number, got {value}")]
    NotANumber { function: &'static str, value: Value },
}

impl From<BindingError> for BrowserError {
    fn from(err: BindingError) -> Self {
        let name = match &err {
            BindingError::MissingArgument { function } | BindingError::NotANumber { function, .. } => {
                function.to_string()
            }
        };
        BrowserError::BindingArgument {
            name,
            reason: err.to_string(),
        }
    }
}

/// Shape functions exposed to the page, in registration order.
pub const SHAPE_FUNCTIONS: [&str; 3] = ["toggle_color", "update_rotation", "update_scale"];

/// JavaScript truthiness of a JSON value.
pub fn js_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric value of a binding argument. Numeric strings and booleans convert;
/// results must be finite.
pub fn js_number(function: &'static str, value: &Value) -> Result<f64, BindingError> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    n.filter(|f| f.is_finite()).ok_or_else(|| BindingError::NotANumber {
        function,
        value: value.clone(),
    })
}

fn first_arg<'a>(function: &'static str, args: &'a [Value]) -> Result<&'a Value, BindingError> {
    args.first().ok_or(BindingError::MissingArgument { function })
}

/// Source text shown to the page for a host function.
fn native_source(function: &str) -> String {
    format!("function {function}(value) {{ [native code] }}")
}

/// Host bindings for the demo page.
///
/// Shape functions queue [`ShapeCommand`]s on `commands`; the loop applies
/// them. `log_message` logs its argument.
pub fn host_bindings(commands: Sender<ShapeCommand>) -> JsBindings {
    let mut bindings = JsBindings::new();

    bindings.set_function("log_message", |args| {
        let msg = match args.first() {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        log::info!("JS sent: {msg}");
        Ok(())
    });

    let tx = commands.clone();
    bindings.set_function("toggle_color", move |args| {
        let value = first_arg("toggle_color", args).map_err(warn)?;
        send(&tx, ShapeCommand::SetFilled(js_truthy(value)));
        Ok(())
    });

    let tx = commands.clone();
    bindings.set_function("update_rotation", move |args| {
        let speed = first_arg("update_rotation", args)
            .and_then(|v| js_number("update_rotation", v))
            .map_err(warn)?;
        send(&tx, ShapeCommand::SetSpeed(speed));
        Ok(())
    });

    let tx = commands;
    bindings.set_function("update_scale", move |args| {
        let scale = first_arg("update_scale", args)
            .and_then(|v| js_number("update_scale", v))
            .map_err(warn)?;
        send(&tx, ShapeCommand::SetScale(scale));
        Ok(())
    });

    let sources: Map<String, Value> = SHAPE_FUNCTIONS
        .iter()
        .map(|name| (name.to_string(), json!(native_source(name))))
        .collect();
    bindings.set_property("sources", Value::Object(sources));

    bindings
}

fn warn(err: BindingError) -> BrowserError {
    log::warn!("ignoring binding call: {err}");
    err.into()
}

fn send(tx: &Sender<ShapeCommand>, cmd: ShapeCommand) {
    if tx.send(cmd).is_err() {
        log::debug!("shape command {cmd:?} dropped; loop has exited");
    }
}
