//! The JSON object a helper hands back to the player script on stdout.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::{Map, Value};

/// Ordered key/value payload, written as a single JSON line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tunnel {
    entries: Map<String, Value>,
}

impl Tunnel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tunnel holding a single entry.
    pub fn with(key: &str, value: impl Serialize) -> Result<Self, serde_json::Error> {
        let mut tunnel = Self::new();
        tunnel.insert(key, value)?;
        Ok(tunnel)
    }

    /// Add or replace `key`. Insertion order is kept for output.
    pub fn insert(&mut self, key: &str, value: impl Serialize) -> Result<(), serde_json::Error> {
        self.entries.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Insert and immediately write the whole accumulated object.
    ///
    /// Repeated calls print the growing object once per call.
    pub fn send(
        &mut self,
        key: &str,
        value: impl Serialize,
        out: &mut impl Write,
    ) -> io::Result<()> {
        self.insert(key, value)?;
        self.emit(out)
    }

    /// Write the object as one line of JSON.
    pub fn emit(&self, out: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer(&mut *out, &self.entries)?;
        out.write_all(b"\n")?;
        out.flush()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines(buf: &[u8]) -> Vec<String> {
        String::from_utf8(buf.to_vec())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_emit_single_line() {
        let tunnel = Tunnel::with("myGuess", json!({ "title": "Sousou no Frieren" })).unwrap();
        let mut out = Vec::new();
        tunnel.emit(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"myGuess\":{\"title\":\"Sousou no Frieren\"}}\n"
        );
    }

    #[test]
    fn test_send_prints_accumulated_object() {
        let mut tunnel = Tunnel::new();
        let mut out = Vec::new();
        tunnel.send("MediaId", 21, &mut out).unwrap();
        tunnel.send("Progress", 5, &mut out).unwrap();
        assert_eq!(
            lines(&out),
            vec![
                r#"{"MediaId":21}"#.to_string(),
                r#"{"MediaId":21,"Progress":5}"#.to_string(),
            ]
        );
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let mut tunnel = Tunnel::new();
        tunnel.insert("Volume", 40).unwrap();
        tunnel.insert("Updated", 3).unwrap();
        tunnel.insert("MediaId", Option::<u64>::None).unwrap();
        let mut out = Vec::new();
        tunnel.emit(&mut out).unwrap();
        assert_eq!(lines(&out), vec![r#"{"Volume":40,"Updated":3,"MediaId":null}"#]);
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut tunnel = Tunnel::new();
        tunnel.insert("Volume", 10).unwrap();
        tunnel.insert("Volume", 20).unwrap();
        assert_eq!(tunnel.get("Volume"), Some(&json!(20)));
        assert!(!tunnel.is_empty());
    }
}
