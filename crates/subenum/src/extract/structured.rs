use super::SubdomainSet;
use crate::error::SourceError;
use serde_json::Value;
use tracing::trace;

// arrays are walked this deep, objects only at the top
const MAX_ARRAY_DEPTH: usize = 2;

pub fn extract(body: &[u8], domain: &str, subdomains: &mut SubdomainSet) -> Result<(), SourceError> {
    let value: Value = serde_json::from_slice(body).map_err(SourceError::Parse)?;

    match value {
        Value::Array(items) => walk_array(items, domain, 1, subdomains),
        Value::Object(map) => {
            for (_, value) in map {
                collect(value, domain, subdomains);
            }
        }
        _ => trace!("Top level JSON value ignored"),
    }

    Ok(())
}

fn walk_array(items: Vec<Value>, domain: &str, depth: usize, subdomains: &mut SubdomainSet) {
    for item in items {
        match item {
            Value::Array(nested) if depth < MAX_ARRAY_DEPTH => {
                walk_array(nested, domain, depth + 1, subdomains)
            }
            other => collect(other, domain, subdomains),
        }
    }
}

fn collect(value: Value, domain: &str, subdomains: &mut SubdomainSet) {
    if let Value::String(candidate) = value {
        if candidate.contains(domain) {
            trace!("Collecting: {:?}", candidate);
            subdomains.insert(candidate);
        }
    }
}
