//! Schema-to-mapping translation.
//!
//! Pure and deterministic: the same descriptor list always serializes to the
//! same bytes. Properties are kept in a `BTreeMap` so the emitted JSON has a
//! stable field order.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::FieldDescriptor;

/// Field names treated as the creation timestamp and always mapped to
/// `date`, whatever their declared kind.
const CREATED_FIELD_NAMES: [&str; 2] = ["created", "date_created"];

/// The index mapping sent to the store at initialization:
/// `{"mappings": {"properties": {<field>: {"type": <store type>}}}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    pub mappings: Properties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub properties: BTreeMap<String, Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    #[serde(rename = "type")]
    pub field_type: String,
}

impl Property {
    fn new(field_type: &str) -> Self {
        Self {
            field_type: field_type.to_string(),
        }
    }
}

/// Translate a schema's field descriptors into its index mapping.
///
/// The implicit `created` field is always mapped to `date`, and any declared
/// field named after the creation timestamp is forced to `date` regardless of
/// its kind. Unmapped fields are omitted so the store infers their treatment
/// on first write.
pub fn mapping_for(fields: &[FieldDescriptor]) -> MappingDocument {
    let mut properties = BTreeMap::new();
    properties.insert("created".to_string(), Property::new("date"));

    for field in fields {
        if CREATED_FIELD_NAMES.contains(&field.name) {
            properties.insert(field.name.to_string(), Property::new("date"));
            continue;
        }
        if let Some(kind) = field.kind {
            properties.insert(field.name.to_string(), Property::new(kind.store_type()));
        }
    }

    MappingDocument {
        mappings: Properties { properties },
    }
}
