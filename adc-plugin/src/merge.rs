use adc_core::PluginRecord;
use serde_json::Value;

/// Fill `supplied` with every key of `defaults` it lacks.
///
/// Nested objects are merged key by key; any value the caller supplied wins,
/// including a non-object value where the default is an object.
pub fn merge_defaults(defaults: &PluginRecord, mut supplied: PluginRecord) -> PluginRecord {
    merge_into(defaults, &mut supplied);
    supplied
}

fn merge_into(defaults: &PluginRecord, target: &mut PluginRecord) {
    for (key, default) in defaults {
        match target.get_mut(key) {
            None => {
                target.insert(key.clone(), default.clone());
            }
            Some(Value::Object(nested)) => {
                if let Value::Object(nested_default) = default {
                    merge_into(nested_default, nested);
                }
            }
            Some(_) => {}
        }
    }
}
