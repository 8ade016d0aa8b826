//! Deep merge for partial résumé updates.

use serde_json::Value;

/// Merges `patch` into `base` recursively. Objects merge key-wise; arrays,
/// scalars, and null replace the existing value outright. This is what
/// lets a live-preview save of `{"personalInfo": {"fullName": "..."}}`
/// land without wiping `personalInfo.email`.
pub fn deep_merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                match base_map.get_mut(&key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value);
                    }
                    _ => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base_slot, patch) => *base_slot = patch,
    }
}
