//! Type coercion registry and builtin coercions

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure of a single read-side coercion
///
/// Carried as the cause inside [`crate::Error::TypecastFailed`], which adds
/// the resource, attribute, and raw-value context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CoerceError {
    message: String,
}

impl CoerceError {
    /// Create a coercion error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A read-side coercion function
///
/// Never invoked with a JSON null; the projector bypasses coercion for
/// null values entirely.
pub type ReadCoercion = Arc<dyn Fn(&Value) -> Result<Value, CoerceError> + Send + Sync>;

/// Registry of read-side coercions by type name
#[derive(Clone)]
pub struct TypeRegistry {
    coercions: HashMap<String, ReadCoercion>,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.coercions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}

static BUILTIN: Lazy<TypeRegistry> = Lazy::new(build_builtin);

impl TypeRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            coercions: HashMap::new(),
        }
    }

    /// The builtin registry: string, integer, integer_id, float,
    /// big_decimal, boolean, date, datetime, hash, array
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Register a coercion under a type name, replacing any existing one
    pub fn register<F>(&mut self, name: impl Into<String>, coercion: F)
    where
        F: Fn(&Value) -> Result<Value, CoerceError> + Send + Sync + 'static,
    {
        self.coercions.insert(name.into(), Arc::new(coercion));
    }

    /// Look up the coercion for a type name
    pub fn get(&self, name: &str) -> Option<&ReadCoercion> {
        self.coercions.get(name)
    }

    /// Check whether a type name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.coercions.contains_key(name)
    }
}

fn build_builtin() -> TypeRegistry {
    let mut registry = TypeRegistry::empty();
    registry.register("string", coerce_string);
    registry.register("integer", coerce_integer);
    registry.register("integer_id", coerce_integer_id);
    registry.register("float", coerce_float);
    // Lossy above 2^53; no decimal representation on the wire.
    registry.register("big_decimal", coerce_float);
    registry.register("boolean", coerce_boolean);
    registry.register("date", coerce_date);
    registry.register("datetime", coerce_datetime);
    registry.register("hash", coerce_hash);
    registry.register("array", coerce_array);
    registry
}

// ============================================================================
// Builtin Coercions
// ============================================================================

fn coerce_string(value: &Value) -> Result<Value, CoerceError> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(CoerceError::new(format!("cannot coerce {other} to string"))),
    }
}

fn integer_of(value: &Value) -> Result<i64, CoerceError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| CoerceError::new(format!("{n} is not a whole number"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| CoerceError::new(format!("'{s}' is not an integer"))),
        other => Err(CoerceError::new(format!("cannot coerce {other} to integer"))),
    }
}

fn coerce_integer(value: &Value) -> Result<Value, CoerceError> {
    integer_of(value).map(Value::from)
}

fn coerce_integer_id(value: &Value) -> Result<Value, CoerceError> {
    // Ids render as strings on the wire regardless of storage type.
    integer_of(value).map(|n| Value::String(n.to_string()))
}

fn coerce_float(value: &Value) -> Result<Value, CoerceError> {
    let float = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| CoerceError::new(format!("{n} is not representable as a float"))),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoerceError::new(format!("'{s}' is not a float"))),
        other => Err(CoerceError::new(format!("cannot coerce {other} to float"))),
    }?;
    serde_json::Number::from_f64(float)
        .map(Value::Number)
        .ok_or_else(|| CoerceError::new(format!("{float} is not a finite number")))
}

fn coerce_boolean(value: &Value) -> Result<Value, CoerceError> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" => Ok(Value::Bool(true)),
            "false" | "f" | "0" => Ok(Value::Bool(false)),
            _ => Err(CoerceError::new(format!("'{s}' is not a boolean"))),
        },
        Value::Number(n) if n.as_u64() == Some(1) => Ok(Value::Bool(true)),
        Value::Number(n) if n.as_u64() == Some(0) => Ok(Value::Bool(false)),
        other => Err(CoerceError::new(format!("cannot coerce {other} to boolean"))),
    }
}

fn coerce_date(value: &Value) -> Result<Value, CoerceError> {
    let Value::String(s) = value else {
        return Err(CoerceError::new(format!("cannot coerce {value} to date")));
    };
    let s = s.trim();
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.date_naive()))
        .map_err(|_| CoerceError::new(format!("'{s}' is not a date")))?;
    Ok(Value::String(date.format("%Y-%m-%d").to_string()))
}

fn coerce_datetime(value: &Value) -> Result<Value, CoerceError> {
    let Value::String(s) = value else {
        return Err(CoerceError::new(format!("cannot coerce {value} to datetime")));
    };
    let s = s.trim();
    let datetime = DateTime::parse_from_rfc3339(s)
        .map_err(|_| CoerceError::new(format!("'{s}' is not an RFC 3339 datetime")))?;
    Ok(Value::String(datetime.to_rfc3339()))
}

fn coerce_hash(value: &Value) -> Result<Value, CoerceError> {
    if value.is_object() {
        Ok(value.clone())
    } else {
        Err(CoerceError::new(format!("cannot coerce {value} to hash")))
    }
}

fn coerce_array(value: &Value) -> Result<Value, CoerceError> {
    if value.is_array() {
        Ok(value.clone())
    } else {
        Err(CoerceError::new(format!("cannot coerce {value} to array")))
    }
}
