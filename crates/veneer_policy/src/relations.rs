//! Delimited key → comma-list relation tables.
//!
//! Each line is `key=value,value,...`; `#` starts a comment. Duplicate
//! keys overwrite earlier entries. An empty value list is allowed and
//! parses to an empty vec.

use std::collections::HashMap;

use crate::error::PolicyError;

/// Parses a relation document into a key → values map.
pub fn parse_relations(content: &str) -> Result<HashMap<String, Vec<String>>, PolicyError> {
    let mut relations = HashMap::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let text = match raw.find('#') {
            Some(i) => raw[..i].trim(),
            None => raw.trim(),
        };
        if text.is_empty() {
            continue;
        }

        let Some((key, values)) = text.split_once('=') else {
            return Err(PolicyError::Relation {
                line,
                reason: "expected 'key=value,...'".to_string(),
            });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(PolicyError::Relation {
                line,
                reason: "empty key".to_string(),
            });
        }

        let values: Vec<String> = values
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect();

        // Last occurrence wins.
        relations.insert(key.to_string(), values);
    }

    Ok(relations)
}
