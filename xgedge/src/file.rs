//! JSON file helpers.

use std::fs::File;
use std::io::{BufReader, BufWriter, Error, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{from_reader, to_writer_pretty};

/// Reads a JSON-encoded type from a given file `path`.
pub fn read_json<D: DeserializeOwned>(path: impl AsRef<Path>) -> Result<D, Error> {
    let file = File::open(path)?;
    Ok(from_reader(BufReader::new(file))?)
}

/// JSON-encodes the `value` in pretty-printed form and writes it to a given `path`.
pub fn write_json(path: impl AsRef<Path>, value: &impl Serialize) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    to_writer_pretty(&mut writer, value)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::env;

    use super::*;

    #[test]
    fn write_then_read() {
        let path = env::temp_dir().join(format!("xgedge-file-{}.json", std::process::id()));
        let value = BTreeMap::from([("Premier League".to_string(), 0.25), ("Serie A".to_string(), 0.35)]);
        write_json(&path, &value).unwrap();
        let decoded: BTreeMap<String, f64> = read_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(value, decoded);
    }

    #[test]
    fn write_is_pretty_printed() {
        let path = env::temp_dir().join(format!("xgedge-file-pretty-{}.json", std::process::id()));
        write_json(&path, &BTreeMap::from([("Serie A".to_string(), 0.35)])).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!("{\n  \"Serie A\": 0.35\n}", written);
    }

    #[test]
    fn read_missing_file() {
        let path = env::temp_dir().join("xgedge-file-does-not-exist.json");
        assert!(read_json::<BTreeMap<String, f64>>(path).is_err());
    }
}
