//! JSON-safe serialization of wide-integer row values.
//!
//! Row identifiers come out of the database as 64-bit integers. JavaScript
//! consumers lose precision past 2^53-1, so values beyond that range are
//! emitted as decimal strings instead of numbers. Everything else passes
//! through untouched.

use serde::Serialize;
use serde_json::{Map, Value};

/// Largest integer exactly representable in a double (2^53 - 1).
pub const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Converts one value to its JSON-safe form.
///
/// Integers with magnitude at most [`MAX_SAFE_INTEGER`] stay numbers; larger
/// magnitudes become their base-10 string representation. Floats, strings,
/// booleans, nulls, arrays and objects are returned unchanged.
pub fn serialize_value(value: Value) -> Value {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i > MAX_SAFE_INTEGER || i < -MAX_SAFE_INTEGER {
                    Value::String(i.to_string())
                } else {
                    Value::Number(n)
                }
            } else if let Some(u) = n.as_u64() {
                // Only reachable for values above i64::MAX.
                Value::String(u.to_string())
            } else {
                Value::Number(n)
            }
        }
        other => other,
    }
}

/// Applies [`serialize_value`] to every field of an object, preserving key
/// order. Non-object input is returned unchanged.
pub fn serialize_row(row: Value) -> Value {
    match row {
        Value::Object(fields) => {
            let mapped: Map<String, Value> = fields
                .into_iter()
                .map(|(k, v)| (k, serialize_value(v)))
                .collect();
            Value::Object(mapped)
        }
        other => other,
    }
}

/// Maps [`serialize_row`] over an ordered sequence of records.
pub fn serialize_rows(rows: Vec<Value>) -> Vec<Value> {
    rows.into_iter().map(serialize_row).collect()
}

/// Serializes any value and applies the safe-integer transform at the
/// appropriate depth: arrays element-wise as rows, objects field-wise,
/// scalars directly.
pub fn to_safe_value<T: Serialize>(value: &T) -> Result<Value, serde_json::Error> {
    let raw = serde_json::to_value(value)?;
    Ok(match raw {
        Value::Array(items) => Value::Array(serialize_rows(items)),
        Value::Object(_) => serialize_row(raw),
        other => serialize_value(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_integers_stay_numbers() {
        assert_eq!(serialize_value(json!(0)), json!(0));
        assert_eq!(serialize_value(json!(42)), json!(42));
        assert_eq!(serialize_value(json!(-42)), json!(-42));
        assert_eq!(
            serialize_value(json!(MAX_SAFE_INTEGER)),
            json!(9_007_199_254_740_991i64)
        );
        assert_eq!(
            serialize_value(json!(-MAX_SAFE_INTEGER)),
            json!(-9_007_199_254_740_991i64)
        );
    }

    #[test]
    fn test_unsafe_integers_become_decimal_strings() {
        assert_eq!(
            serialize_value(json!(MAX_SAFE_INTEGER + 1)),
            json!("9007199254740992")
        );
        assert_eq!(
            serialize_value(json!(-MAX_SAFE_INTEGER - 1)),
            json!("-9007199254740992")
        );
        assert_eq!(
            serialize_value(json!(i64::MAX)),
            json!("9223372036854775807")
        );
        assert_eq!(
            serialize_value(json!(i64::MIN)),
            json!("-9223372036854775808")
        );
        assert_eq!(
            serialize_value(json!(u64::MAX)),
            json!("18446744073709551615")
        );
    }

    #[test]
    fn test_non_integers_pass_through() {
        assert_eq!(serialize_value(json!("texto")), json!("texto"));
        assert_eq!(serialize_value(json!(true)), json!(true));
        assert_eq!(serialize_value(json!(null)), json!(null));
        assert_eq!(serialize_value(json!(1.5)), json!(1.5));
        assert_eq!(serialize_value(json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn test_serialize_row_transforms_fields_shallowly() {
        let row = json!({
            "id": i64::MAX,
            "codigo": "BCO0001",
            "ativo": true,
        });
        let out = serialize_row(row);
        assert_eq!(out["id"], json!("9223372036854775807"));
        assert_eq!(out["codigo"], json!("BCO0001"));
        assert_eq!(out["ativo"], json!(true));
    }

    #[test]
    fn test_serialize_row_preserves_key_order() {
        let row = json!({"zeta": 1, "alfa": 2, "meio": 3});
        let text = serde_json::to_string(&serialize_row(row)).unwrap();
        let zeta = text.find("zeta").unwrap();
        let alfa = text.find("alfa").unwrap();
        let meio = text.find("meio").unwrap();
        assert!(zeta < alfa && alfa < meio);
    }

    #[test]
    fn test_serialize_row_non_object_unchanged() {
        assert_eq!(serialize_row(json!(7)), json!(7));
        assert_eq!(serialize_row(json!("x")), json!("x"));
    }

    #[test]
    fn test_serialize_rows_maps_each_record() {
        let rows = vec![json!({"id": 1}), json!({"id": MAX_SAFE_INTEGER + 5})];
        let out = serialize_rows(rows);
        assert_eq!(out[0]["id"], json!(1));
        assert_eq!(out[1]["id"], json!("9007199254740996"));
    }

    #[test]
    fn test_to_safe_value_on_struct() {
        #[derive(Serialize)]
        struct Registro {
            id: i64,
            nome: String,
        }
        let v = to_safe_value(&Registro {
            id: i64::MAX,
            nome: "TESTE".into(),
        })
        .unwrap();
        assert_eq!(v["id"], json!("9223372036854775807"));
        assert_eq!(v["nome"], json!("TESTE"));
    }

    #[test]
    fn test_to_safe_value_on_vec() {
        let v = to_safe_value(&vec![json!({"id": 1}), json!({"id": i64::MAX})]).unwrap();
        assert_eq!(v[0]["id"], json!(1));
        assert_eq!(v[1]["id"], json!("9223372036854775807"));
    }
}
