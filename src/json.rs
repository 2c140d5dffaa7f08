use crate::{Error, Result};
use simd_json::prelude::*;
use simd_json::{OwnedValue, StaticNode};

const FILE_KEY: &str = "file";

/// `SourceMapJson` is the JSON object of a source map, kept opaque.
///
/// Only the `file` key has a meaning here: it names the generated file and goes
/// stale as soon as the map is moved in or out of the artifact, so both
/// directions drop it. Every other key passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMapJson(OwnedValue);

impl SourceMapJson {
    /// Parses a JSON buffer, which must hold an object.
    ///
    /// The slice is mutable because parsing unescapes strings in place.
    pub fn from_slice(json: &mut [u8]) -> Result<Self> {
        Self::from_value(simd_json::to_owned_value(json)?)
    }

    pub fn from_value(value: OwnedValue) -> Result<Self> {
        match value {
            OwnedValue::Object(..) => Ok(Self(value)),
            _ => Err(Error::NotAnObject),
        }
    }

    #[inline]
    pub fn as_value(&self) -> &OwnedValue {
        &self.0
    }

    #[inline]
    pub fn into_value(self) -> OwnedValue {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&OwnedValue> {
        match &self.0 {
            OwnedValue::Object(object) => object.get(key),
            _ => None,
        }
    }

    pub fn insert<K>(&mut self, key: K, value: OwnedValue) -> Option<OwnedValue>
    where
        K: Into<String>,
    {
        match &mut self.0 {
            OwnedValue::Object(object) => object.insert(key.into(), value),
            _ => None,
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<OwnedValue> {
        match &mut self.0 {
            OwnedValue::Object(object) => object.remove(key),
            _ => None,
        }
    }

    #[inline]
    pub fn file(&self) -> Option<&OwnedValue> {
        self.get(FILE_KEY)
    }

    /// Removes every `file` key, returning the value of the first one.
    ///
    /// Parsed objects keep duplicate keys, so one removal is not enough.
    pub fn strip_file(&mut self) -> Option<OwnedValue> {
        let first = self.remove(FILE_KEY);
        while self.remove(FILE_KEY).is_some() {}
        first
    }

    /// Fails with [Error::UnserializableValue] if a NaN or infinite number is stored anywhere.
    pub fn check_finite(&self) -> Result<()> {
        match non_finite_path(&self.0) {
            Some(path) => Err(Error::UnserializableValue { path }),
            None => Ok(()),
        }
    }

    /// Serializes to JSON without any whitespace.
    ///
    /// Key order follows the input for objects of up to 32 keys; larger
    /// objects may come out reordered.
    pub fn to_compact(&self) -> Result<String> {
        self.check_finite()?;
        Ok(self.0.encode())
    }

    /// Serializes to the layout used for external map files:
    /// two-space indentation and a trailing newline.
    ///
    /// Like [to_compact](Self::to_compact), objects with more than 32 keys
    /// are not guaranteed to keep their key order.
    pub fn to_pretty(&self) -> Result<String> {
        self.check_finite()?;
        let mut s = self.0.encode_pp();
        s.push('\n');
        Ok(s)
    }
}

impl TryFrom<OwnedValue> for SourceMapJson {
    type Error = Error;

    fn try_from(value: OwnedValue) -> Result<Self> {
        Self::from_value(value)
    }
}

impl From<SourceMapJson> for OwnedValue {
    fn from(map: SourceMapJson) -> Self {
        map.0
    }
}

fn non_finite_path(value: &OwnedValue) -> Option<String> {
    match value {
        OwnedValue::Static(StaticNode::F64(n)) if !n.is_finite() => Some(String::new()),
        OwnedValue::Array(items) => items.iter().enumerate().find_map(|(idx, item)| {
            non_finite_path(item).map(|rest| format!("/{idx}{rest}"))
        }),
        OwnedValue::Object(object) => object.iter().find_map(|(key, item)| {
            non_finite_path(item).map(|rest| format!("/{key}{rest}"))
        }),
        _ => None,
    }
}
