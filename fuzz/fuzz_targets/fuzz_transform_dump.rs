//! Fuzz target for dump transformation.
//!
//! Dumps come from another system and may be truncated or hand-edited.
//! Whatever the input, every collection mapping must either produce
//! documents or return an error, never panic.

#![no_main]

use hono_registry_migrate::{render_json, Collection, RecordTransformer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(dump) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    for collection in Collection::ALL {
        let transformer = RecordTransformer::new(collection, serde_json::Value::Null);
        if let Ok(documents) = transformer.transform_value(dump.clone()) {
            assert!(documents
                .iter()
                .all(|doc| doc.updated_on() == transformer.updated_on()));
            let _ = render_json(&documents, 4);
        }
    }
});
