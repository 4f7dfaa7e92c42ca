use log::debug;
use serde_json::{Map, Value};

use crate::error::Error;

/// Form/query parameters of a request, decoded into a string-keyed mapping.
pub type Params = Map<String, Value>;

/// Form field injected by the CSRF middleware; never part of the payload.
pub const CSRF_TOKEN_KEY: &str = "csrfmiddlewaretoken";

/// Form field carrying a JSON-encoded object with the remaining attributes.
pub const DATA_BLOB_KEY: &str = "data";

/// Normalizes request parameters in place.
///
/// Strips the CSRF middleware token, then decodes an optional `data` field
/// and merges the decoded object into `params`, decoded keys overriding
/// existing ones. The `data` field must hold a JSON object string; anything
/// else fails the request with a 400-equivalent [`Error::InvalidDataBlob`]
/// and leaves `params` untouched apart from the token removal.
pub fn unpack_data_blob(params: &mut Params) -> Result<(), Error> {
    if params.remove(CSRF_TOKEN_KEY).is_some() {
        debug!("stripped {CSRF_TOKEN_KEY} from request params");
    }

    let Some(raw) = params.get(DATA_BLOB_KEY) else {
        return Ok(());
    };
    let raw = raw.as_str().ok_or(Error::InvalidDataBlob)?;
    let blob: Value = serde_json::from_str(raw).map_err(|err| {
        debug!("rejecting data blob: {err}");
        Error::InvalidDataBlob
    })?;
    let Value::Object(blob) = blob else {
        debug!("rejecting data blob: not a JSON object");
        return Err(Error::InvalidDataBlob);
    };

    params.remove(DATA_BLOB_KEY);
    for (key, value) in blob {
        params.insert(key, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn merge_data_blob_into_params() {
        let mut p = params(json!({ "data": r#"{"a":1,"b":2}"#, "c": 3 }));
        unpack_data_blob(&mut p).unwrap();
        assert_eq!(Value::Object(p), json!({ "a": 1, "b": 2, "c": 3 }));
    }

    #[test]
    fn decoded_keys_override_existing_ones() {
        let mut p = params(json!({ "data": r#"{"a":"new"}"#, "a": "old" }));
        unpack_data_blob(&mut p).unwrap();
        assert_eq!(p.get("a"), Some(&json!("new")));
    }

    #[test]
    fn malformed_json_is_a_bad_request() {
        let mut p = params(json!({ "data": "not json" }));
        let err = unpack_data_blob(&mut p).unwrap_err();
        assert!(matches!(err, Error::InvalidDataBlob));
        assert_eq!(err.to_string(), "data blob must be a valid JSON object string");
        // Validation happens before removal.
        assert!(p.contains_key(DATA_BLOB_KEY));
    }

    #[test]
    fn non_object_json_is_a_bad_request() {
        let mut p = params(json!({ "data": "[1,2,3]" }));
        assert!(matches!(
            unpack_data_blob(&mut p).unwrap_err(),
            Error::InvalidDataBlob
        ));
    }

    #[test]
    fn non_string_data_value_is_a_bad_request() {
        let mut p = params(json!({ "data": { "a": 1 } }));
        assert!(matches!(
            unpack_data_blob(&mut p).unwrap_err(),
            Error::InvalidDataBlob
        ));
    }

    #[test]
    fn strip_csrf_token_without_data_blob() {
        let mut p = params(json!({ "csrfmiddlewaretoken": "x", "a": 1 }));
        unpack_data_blob(&mut p).unwrap();
        assert_eq!(Value::Object(p), json!({ "a": 1 }));
    }

    #[test]
    fn no_data_key_is_a_no_op() {
        let mut p = params(json!({ "a": 1, "b": 2 }));
        unpack_data_blob(&mut p).unwrap();
        assert_eq!(Value::Object(p), json!({ "a": 1, "b": 2 }));
    }
}
