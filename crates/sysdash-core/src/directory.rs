//! Reference Directory: country code → display name
//!
//! Built once at startup from `<display-name>;<code>` lines and shared
//! read-only by every stage.
use crate::error::{Result, SysdashError};
use std::collections::HashMap;
use std::path::Path;

const FIELD_DELIMITER: char = ';';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Default)]
pub struct CountryDirectory {
    by_code: HashMap<String, CountryRecord>,
}

impl CountryDirectory {
    /// Lines splitting into fewer than two fields are skipped.
    pub fn parse(text: &str) -> Self {
        let mut by_code = HashMap::new();

        for line in text.lines() {
            let mut fields = line.trim().split(FIELD_DELIMITER);
            let (Some(name), Some(code)) = (fields.next(), fields.next()) else {
                continue;
            };
            let record = CountryRecord {
                name: name.trim().to_string(),
                code: code.trim().to_string(),
            };
            by_code.insert(record.code.clone(), record);
        }

        Self { by_code }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SysdashError::Reference {
            path: path.to_path_buf(),
            source,
        })?;
        let directory = Self::parse(&text);
        tracing::info!(
            "Loaded {} countries from {}",
            directory.len(),
            path.display()
        );
        Ok(directory)
    }

    pub fn lookup(&self, code: &str) -> Option<&CountryRecord> {
        self.by_code.get(code)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}
