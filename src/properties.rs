// src/properties.rs

//! A small key/value configuration provider.
//!
//! Values are resolved in order:
//! 1. a value set with [`Properties::set`] (the `--prop` command-line option)
//! 2. a value from the JSON properties file
//! 3. the default supplied by the caller
//!
//! A key containing `'/'` addresses nested JSON objects, e.g. `"search/year"`
//! reads `{"search": {"year": 2024}}`.

use crate::common::{ExtractError, FPath, Path, ResultExtract};

use std::collections::BTreeMap;
use std::io::ErrorKind;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};
use ::serde_json::{Map, Value};

/// Default name of the properties file, looked up in the working directory.
pub const PROPERTIES_FILE_DEFAULT: &str = "properties.json";

/// Separator of nested property names.
pub const PROP_PATH_SEP: char = '/';

/// String spellings accepted as `true` by [`Properties::get_bool`].
const TRUTH: [&str; 3] = ["true", "1", "yes"];
/// String spellings accepted as `false` by [`Properties::get_bool`].
const LIES: [&str; 3] = ["false", "0", "no"];

/// Key/value properties loaded from a JSON object file and overridden by
/// explicit values.
#[derive(Debug, Default)]
pub struct Properties {
    /// Path the file properties were loaded from, if any.
    path: Option<FPath>,
    /// Values from the properties file.
    file_values: Map<String, Value>,
    /// Explicitly set values, take precedence over `file_values`.
    overrides: BTreeMap<String, String>,
}

impl Properties {
    /// Empty `Properties`; every lookup returns its default.
    pub fn new() -> Properties {
        Properties::default()
    }

    /// Load properties from the JSON object file at `path`.
    ///
    /// A missing file is not an error, it is treated as an empty object.
    pub fn from_file(path: &Path) -> ResultExtract<Properties> {
        defn!("({:?})", path);
        let data: String = match std::fs::read_to_string(path) {
            Ok(val) => val,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                defx!("not found, return empty Properties");
                return Ok(Properties {
                    path: None,
                    ..Properties::default()
                });
            }
            Err(err) => {
                defx!("read_to_string error {}", err);
                return Err(ExtractError::io(path, err));
            }
        };
        let mut properties = Properties::from_json_str(data.as_str())?;
        properties.path = Some(path.to_string_lossy().to_string());
        defx!("loaded {} top-level properties", properties.file_values.len());

        Ok(properties)
    }

    /// Load properties from a JSON object string.
    pub fn from_json_str(data: &str) -> ResultExtract<Properties> {
        let value: Value = match serde_json::from_str(data) {
            Ok(val) => val,
            Err(err) => {
                return Err(ExtractError::BadProperty {
                    key: String::new(),
                    reason: format!("properties are not valid JSON: {}", err),
                });
            }
        };
        match value {
            Value::Object(map) => Ok(Properties {
                path: None,
                file_values: map,
                overrides: BTreeMap::new(),
            }),
            _ => Err(ExtractError::BadProperty {
                key: String::new(),
                reason: String::from("properties must be a JSON object"),
            }),
        }
    }

    /// Path of the loaded properties file, if one was read.
    pub fn path(&self) -> Option<&FPath> {
        self.path.as_ref()
    }

    /// Set a property explicitly; overrides the properties file.
    pub fn set(&mut self, prop: &str, value: &str) {
        defñ!("({:?}, {:?})", prop, value);
        self.overrides.insert(String::from(prop), String::from(value));
    }

    /// Is `prop` set explicitly or in the properties file?
    pub fn is_set(&self, prop: &str) -> bool {
        self.lookup(prop).is_some()
    }

    /// Get `prop` as a string, else `default`.
    ///
    /// JSON numbers and booleans are returned in their JSON spelling.
    pub fn get_str(&self, prop: &str, default: &str) -> ResultExtract<String> {
        match self.lookup(prop) {
            None => Ok(String::from(default)),
            Some(Lookup::Override(s)) => Ok(s.clone()),
            Some(Lookup::File(value)) => value_to_string(prop, value),
        }
    }

    /// Get `prop` as a `usize`, else `default`.
    pub fn get_usize(&self, prop: &str, default: usize) -> ResultExtract<usize> {
        let s: String = match self.lookup(prop) {
            None => return Ok(default),
            Some(Lookup::Override(s)) => s.clone(),
            Some(Lookup::File(Value::Number(n))) => n.to_string(),
            Some(Lookup::File(value)) => value_to_string(prop, value)?,
        };
        match s.trim().parse::<usize>() {
            Ok(val) => Ok(val),
            Err(err) => Err(ExtractError::BadProperty {
                key: String::from(prop),
                reason: format!("{:?} is not a non-negative integer: {}", s, err),
            }),
        }
    }

    /// Get `prop` as a `bool`, else `default`.
    ///
    /// Strings `"true"`, `"1"`, `"yes"` and `"false"`, `"0"`, `"no"` are
    /// accepted in any letter case.
    pub fn get_bool(&self, prop: &str, default: bool) -> ResultExtract<bool> {
        let s: String = match self.lookup(prop) {
            None => return Ok(default),
            Some(Lookup::File(Value::Bool(b))) => return Ok(*b),
            Some(Lookup::Override(s)) => s.clone(),
            Some(Lookup::File(value)) => value_to_string(prop, value)?,
        };
        let lower = s.trim().to_lowercase();
        if TRUTH.contains(&lower.as_str()) {
            return Ok(true);
        }
        if LIES.contains(&lower.as_str()) {
            return Ok(false);
        }

        Err(ExtractError::BadProperty {
            key: String::from(prop),
            reason: format!("{:?} is not a boolean", s),
        })
    }

    /// Get `prop` as a string; fails if it is not set anywhere.
    pub fn need(&self, prop: &str) -> ResultExtract<String> {
        match self.lookup(prop) {
            None => Err(ExtractError::BadProperty {
                key: String::from(prop),
                reason: String::from("missing property value"),
            }),
            Some(Lookup::Override(s)) => Ok(s.clone()),
            Some(Lookup::File(value)) => value_to_string(prop, value),
        }
    }

    fn lookup(&self, prop: &str) -> Option<Lookup<'_>> {
        if let Some(s) = self.overrides.get(prop) {
            return Some(Lookup::Override(s));
        }
        let mut keys = prop.split(PROP_PATH_SEP);
        let first = keys.next()?;
        let mut value: &Value = self.file_values.get(first)?;
        for key in keys {
            value = value.as_object()?.get(key)?;
        }
        if value.is_null() {
            return None;
        }

        Some(Lookup::File(value))
    }
}

/// Where a property value was found.
enum Lookup<'a> {
    Override(&'a String),
    File(&'a Value),
}

fn value_to_string(prop: &str, value: &Value) -> ResultExtract<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ExtractError::BadProperty {
            key: String::from(prop),
            reason: String::from("expected a string, number, or boolean"),
        }),
    }
}
