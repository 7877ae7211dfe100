//! Layer merging.

use serde_json::Value;

/// Overlay `layer` onto `merged`.
///
/// Objects merge key by key; any other value, arrays and `null` included,
/// replaces what the lower layer set.
pub(super) fn merge_json_values(merged: &mut Value, layer: &Value) {
    let (Value::Object(target), Value::Object(source)) = (&mut *merged, layer) else {
        *merged = layer.clone();
        return;
    };
    for (key, value) in source {
        let slot = target.entry(key.clone()).or_insert(Value::Null);
        merge_json_values(slot, value);
    }
}
