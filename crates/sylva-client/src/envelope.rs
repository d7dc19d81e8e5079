//! Response envelope unwrapping.
//!
//! Backends answer `{ data, meta? }`, some endpoints answer a bare payload.
//! Non-success statuses become [`ApiError`]s carrying the backend's `message`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use sylva_core::error::{CONTENT_NOT_FOUND, CONTENT_SERVER_ERROR};
use sylva_core::listing::PaginatedResult;
use sylva_core::ports::RawResponse;
use sylva_core::ApiError;
use sylva_shared::Envelope;

/// Unwrap a response, returning `body.data` when present and the whole body otherwise.
pub fn unwrap_response<T: DeserializeOwned>(response: RawResponse) -> Result<T, ApiError> {
    let body = success_body(response)?;
    let payload = match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    decode(payload)
}

/// Like [`unwrap_response`] but a body without a `data` key is an error.
pub fn unwrap_response_strict<T: DeserializeOwned>(response: RawResponse) -> Result<T, ApiError> {
    match success_body(response)? {
        Value::Object(map) if map.contains_key("data") => {
            decode::<Envelope<T>>(Value::Object(map)).map(|envelope| envelope.data)
        }
        Value::Object(_) => Err(ApiError::Decode("response has no `data` field".to_string())),
        _ => Err(ApiError::Decode("response is not an envelope".to_string())),
    }
}

/// Unwrap a listing: `data` must be an array; `meta.pagination` drives the page numbers.
///
/// Without pagination meta the items are treated as a single complete page.
pub fn unwrap_page<T: DeserializeOwned>(
    response: RawResponse,
    fallback_page_size: u32,
) -> Result<PaginatedResult<T>, ApiError> {
    let (items, pagination) = match success_body(response)? {
        Value::Object(map) if map.contains_key("data") => {
            let envelope = decode::<Envelope<Vec<T>>>(Value::Object(map))?;
            (envelope.data, envelope.meta.and_then(|meta| meta.pagination))
        }
        other => (decode::<Vec<T>>(other)?, None),
    };

    Ok(match pagination {
        Some(meta) => PaginatedResult::from_meta(items, &meta),
        None => {
            let len = items.len() as u64;
            let page_size = fallback_page_size.max(u32::try_from(len).unwrap_or(u32::MAX));
            PaginatedResult::new(items, 1, page_size, len)
        }
    })
}

/// Map statuses to the content API's user-facing messages:
/// 404 is "not found", 5xx is "retry later", everything else passes through.
pub fn translate_content_error(err: ApiError) -> ApiError {
    match err {
        ApiError::Status { status: 404, .. } => ApiError::NotFound(CONTENT_NOT_FOUND.to_string()),
        ApiError::Status { status, .. } if status >= 500 => {
            ApiError::Server(CONTENT_SERVER_ERROR.to_string())
        }
        other => other,
    }
}

/// Error for a non-success response, reading `message` from a JSON body.
pub fn error_from_response(response: &RawResponse) -> ApiError {
    let message = serde_json::from_slice::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("message")?.as_str().map(String::from));
    ApiError::from_status(response.status, message)
}

fn success_body(response: RawResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(error_from_response(&response));
    }
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct X {
        x: u32,
    }

    #[test]
    fn test_data_is_unwrapped() {
        let resp = RawResponse::json(200, &json!({"data": {"x": 1}}));
        assert_eq!(unwrap_response::<X>(resp).unwrap(), X { x: 1 });
    }

    #[test]
    fn test_bare_body_is_returned_as_is() {
        let resp = RawResponse::json(200, &json!({"x": 1}));
        assert_eq!(unwrap_response::<X>(resp).unwrap(), X { x: 1 });
    }

    #[test]
    fn test_strict_rejects_bare_body() {
        let resp = RawResponse::json(200, &json!({"x": 1}));
        assert!(matches!(
            unwrap_response_strict::<X>(resp),
            Err(ApiError::Decode(_))
        ));
        let resp = RawResponse::json(200, &json!({"data": {"x": 2}}));
        assert_eq!(unwrap_response_strict::<X>(resp).unwrap(), X { x: 2 });
    }

    #[test]
    fn test_error_message_from_body() {
        let resp = RawResponse::json(422, &json!({"message": "Slug déjà pris"}));
        let err = unwrap_response::<X>(resp).unwrap_err();
        assert_eq!(err.to_string(), "Slug déjà pris");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_generic_error_message() {
        let resp = RawResponse::new(503, "<html>down</html>");
        let err = unwrap_response::<X>(resp).unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status 503");
    }

    #[test]
    fn test_content_404_translation() {
        let resp = RawResponse::json(404, &json!({}));
        let err = translate_content_error(unwrap_response::<X>(resp).unwrap_err());
        assert_eq!(err.to_string(), "Contenu non trouvé");
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_content_5xx_translation() {
        for status in [500, 502, 504] {
            let resp = RawResponse::json(status, &json!({"message": "boom"}));
            let err = translate_content_error(unwrap_response::<X>(resp).unwrap_err());
            assert_eq!(err.to_string(), CONTENT_SERVER_ERROR);
        }
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = translate_content_error(ApiError::from_status(403, Some("Non".to_string())));
        assert_eq!(err.to_string(), "Non");
        let err = translate_content_error(ApiError::Transport("refused".to_string()));
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[test]
    fn test_empty_body_is_null() {
        let resp = RawResponse::new(204, "");
        assert_eq!(unwrap_response::<Option<X>>(resp).unwrap(), None);
    }

    #[test]
    fn test_page_with_meta() {
        let resp = RawResponse::json(
            200,
            &json!({
                "data": [{"x": 1}, {"x": 2}],
                "meta": {"pagination": {"page": 2, "pageSize": 2, "total": 5}}
            }),
        );
        let page = unwrap_page::<X>(resp, 10).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_envelope_without_pagination_is_one_page() {
        let resp = RawResponse::json(200, &json!({"data": [{"x": 1}], "meta": {}}));
        let page = unwrap_page::<X>(resp, 10).unwrap();
        assert_eq!(page.items, vec![X { x: 1 }]);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_strict_reads_data_next_to_meta() {
        let resp = RawResponse::json(
            200,
            &json!({"data": {"x": 4}, "meta": {"pagination": {"page": 1, "pageSize": 1, "total": 1}}}),
        );
        assert_eq!(unwrap_response_strict::<X>(resp).unwrap(), X { x: 4 });
    }

    #[test]
    fn test_page_without_meta() {
        let resp = RawResponse::json(200, &json!([{"x": 1}, {"x": 2}, {"x": 3}]));
        let page = unwrap_page::<X>(resp, 2).unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 1);
    }
}
