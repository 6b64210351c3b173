//! The `json` module contains helpers for reading configuration data out of
//! [`Value`] objects without committing the configuration layout to serde derives.

use crate::error::SolremapError;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::BufReader;

/// Read the contents of the JSON in the file named by `file_name`.
///
/// # Arguments
///
/// * `file_name` - The string slice containing the path to the file in the file system.
///
/// # Errors
///
/// Returns [`SolremapError::IO`] if the file cannot be opened and
/// [`SolremapError::JSON`] if the contents do not parse as JSON.
pub fn load_json_from_file_with_name(file_name: &str) -> Result<Value, SolremapError> {
    let file = File::open(file_name)?;
    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader)?;
    Ok(value)
}

/// Trait for use with the [`Value`] type that adds typed accessors for the key/value
/// pairs of a JSON dictionary node.  All accessors return `None` when the node is not
/// a dictionary or the key holds a value of a different type.
pub trait JSONQuery {
    fn contains_key(&self, key: &str) -> bool;
    fn get_value_for_key(&self, key: &str) -> Option<&Value>;
    fn get_str_for_key(&self, key: &str) -> Option<&str>;
    fn get_bool_for_key(&self, key: &str) -> Option<bool>;
    fn get_int_for_key(&self, key: &str) -> Option<i64>;
    fn get_array_for_key(&self, key: &str) -> Option<&Vec<Value>>;
    fn get_map_for_key(&self, key: &str) -> Option<&Map<String, Value>>;
    fn set_node_for_key(&mut self, key: &str, node: Value);
    fn set_str_for_key(&mut self, key: &str, value: &str);
}

impl JSONQuery for Value {
    /// Return true if the dictionary node has a key/value pair indexed by `key`.
    fn contains_key(&self, key: &str) -> bool {
        self.get_value_for_key(key).is_some()
    }

    /// Return a reference to the [`Value`] object stored in the dictionary for `key`.
    fn get_value_for_key(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Return the string stored in the dictionary for `key`.
    fn get_str_for_key(&self, key: &str) -> Option<&str> {
        self.get_value_for_key(key).and_then(|v| v.as_str())
    }

    /// Return the boolean stored in the dictionary for `key`.
    fn get_bool_for_key(&self, key: &str) -> Option<bool> {
        self.get_value_for_key(key).and_then(|v| v.as_bool())
    }

    /// Return the integer stored in the dictionary for `key`.
    fn get_int_for_key(&self, key: &str) -> Option<i64> {
        self.get_value_for_key(key).and_then(|v| v.as_i64())
    }

    /// Return the array stored in the dictionary for `key`.
    fn get_array_for_key(&self, key: &str) -> Option<&Vec<Value>> {
        self.get_value_for_key(key).and_then(|v| v.as_array())
    }

    /// Return the dictionary stored in the dictionary for `key`.
    fn get_map_for_key(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get_value_for_key(key).and_then(|v| v.as_object())
    }

    /// Store `node` in the dictionary for `key`, replacing any previous value.  Does
    /// nothing if the receiver is not a dictionary node.
    fn set_node_for_key(&mut self, key: &str, node: Value) {
        if let Some(map) = self.as_object_mut() {
            map.insert(String::from(key), node);
        }
    }

    /// Store the string `value` in the dictionary for `key`.
    fn set_str_for_key(&mut self, key: &str, value: &str) {
        self.set_node_for_key(key, json![value]);
    }
}
