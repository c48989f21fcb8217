use crate::{ApiErrors, MangadexError, Result};
use serde_json::Value;

/// Turns the service's error envelope into [`MangadexError::ApiError`] and
/// passes every other payload through untouched.
pub fn check_api_error(data: Value) -> Result<Value> {
    match &data {
        Value::Object(map) => {
            let errors = map.get("errors");
            let is_error = map.get("result").and_then(Value::as_str) == Some("error")
                || map.contains_key("error")
                || errors.and_then(Value::as_array).is_some_and(|e| !e.is_empty());
            if is_error {
                return Err(MangadexError::ApiError(collect_errors(errors)));
            }
        }
        Value::Array(items) => {
            if items.iter().any(is_error_entry) {
                let errors = items
                    .iter()
                    .filter_map(|item| item.get("errors"))
                    .flat_map(|e| collect_errors(Some(e)).0)
                    .collect();
                return Err(MangadexError::ApiError(ApiErrors(errors)));
            }
        }
        _ => {}
    }
    Ok(data)
}

fn is_error_entry(item: &Value) -> bool {
    match item {
        Value::String(s) => s == "error",
        Value::Object(map) => {
            map.get("result").and_then(Value::as_str) == Some("error") || map.contains_key("error")
        }
        _ => false,
    }
}

fn collect_errors(errors: Option<&Value>) -> ApiErrors {
    match errors {
        Some(Value::Array(list)) => ApiErrors(list.clone()),
        Some(Value::Null) | None => ApiErrors::default(),
        Some(other) => ApiErrors(vec![other.clone()]),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn api_errors(result: Result<Value>) -> Vec<Value> {
        match result {
            Err(MangadexError::ApiError(errors)) => errors.0,
            other => panic!("expected an api error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_envelope_keeps_errors() {
        let errors = json!([
            {"id": "a", "status": 400, "title": "validation_exception", "detail": "limit too big"},
            {"id": "b", "status": 400, "title": "validation_exception", "detail": "bad offset"}
        ]);
        let payload = json!({"result": "error", "errors": errors.clone()});
        assert_eq!(Value::Array(api_errors(check_api_error(payload))), errors);
    }

    #[test]
    fn test_error_key_without_result() {
        let payload = json!({"error": "forbidden", "errors": [{"title": "forbidden"}]});
        assert_eq!(api_errors(check_api_error(payload)), vec![json!({"title": "forbidden"})]);

        let bare = json!({"error": true});
        assert!(api_errors(check_api_error(bare)).is_empty());
    }

    #[test]
    fn test_non_empty_errors_array() {
        let payload = json!({"errors": [{"title": "unauthorized"}]});
        assert_eq!(api_errors(check_api_error(payload)).len(), 1);

        let empty = json!({"result": "ok", "errors": []});
        assert!(check_api_error(empty).is_ok());
    }

    #[test]
    fn test_error_inside_list() {
        let payload = json!(["ok", "error"]);
        assert!(api_errors(check_api_error(payload)).is_empty());

        let payload = json!([
            {"result": "ok", "data": {"id": "t1"}},
            {"result": "error", "errors": [{"title": "not_found"}]}
        ]);
        assert_eq!(api_errors(check_api_error(payload)), vec![json!({"title": "not_found"})]);
    }

    #[test]
    fn test_success_passes_through() {
        let payload = json!({"data": {"id": "abc", "attributes": {}}});
        assert_eq!(check_api_error(payload.clone()).unwrap(), payload);

        let list = json!([{"result": "ok", "data": {"id": "t1"}}]);
        assert_eq!(check_api_error(list.clone()).unwrap(), list);

        let ok = json!({"result": "ok"});
        assert_eq!(check_api_error(ok.clone()).unwrap(), ok);
    }
}
