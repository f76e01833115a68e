//! FeatureCollection framing around verbatim feature lines.

use std::io::{self, Write};

pub const COLLECTION_HEADER: &[u8] = br#"{"type": "FeatureCollection", "features": ["#;
pub const COLLECTION_FOOTER: &[u8] = b"]}";

/// Writes the collection header on creation, comma-joins features, and
/// the footer on [`finish`](Self::finish).
pub struct FeatureCollectionWriter<W: Write> {
    inner: W,
    written: u64,
}

impl<W: Write> FeatureCollectionWriter<W> {
    pub fn new(mut inner: W) -> io::Result<Self> {
        inner.write_all(COLLECTION_HEADER)?;
        Ok(Self { inner, written: 0 })
    }

    /// Append one feature, copied byte for byte.
    pub fn write_feature(&mut self, feature: &[u8]) -> io::Result<()> {
        if self.written > 0 {
            self.inner.write_all(b",")?;
        }
        self.inner.write_all(feature)?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Close the collection and flush. Returns the inner writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.write_all(COLLECTION_FOOTER)?;
        self.inner.flush()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(features: &[&str]) -> String {
        let mut writer = FeatureCollectionWriter::new(Vec::new()).unwrap();
        for feature in features {
            writer.write_feature(feature.as_bytes()).unwrap();
        }
        assert_eq!(writer.written(), features.len() as u64);
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_empty_collection() {
        let out = collect(&[]);
        assert_eq!(out, r#"{"type": "FeatureCollection", "features": []}"#);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["features"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_single_feature() {
        let out = collect(&[r#"{"id": 1}"#]);
        assert_eq!(
            out,
            r#"{"type": "FeatureCollection", "features": [{"id": 1}]}"#
        );
    }

    #[test]
    fn test_many_features_valid_json() {
        let out = collect(&[r#"{"id": 1}"#, r#"{"id": 2}"#, r#"{"id": 3}"#]);
        assert!(!out.contains(",]"));
        assert!(!out.contains("[,"));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        let ids: Vec<i64> = value["features"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
