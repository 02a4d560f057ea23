//! Decoding of Table API response bodies and pagination headers.

use crate::{
    error::{SnowError, SnowResult},
    models::{ListResponse, Record, ResultEnvelope, TypedListResponse},
};
use reqwest::header::{HeaderMap, LINK};
use serde::de::DeserializeOwned;

/// Total number of matching records, sent unless `sysparm_no_count=true`
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Decode a `{"result": T}` body
pub fn decode_single<T: DeserializeOwned>(body: &[u8]) -> SnowResult<T> {
    let envelope: ResultEnvelope<T> = serde_json::from_slice(body).map_err(SnowError::Decode)?;
    Ok(envelope.result)
}

/// Decode a `{"result": [...]}` body of untyped records plus its pagination headers
pub fn decode_list(headers: &HeaderMap, body: &[u8]) -> SnowResult<ListResponse> {
    let page = decode_list_as::<Record>(headers, body)?;
    Ok(ListResponse {
        count: page.count,
        link: page.link,
        result: page.result,
    })
}

/// Decode a `{"result": [...]}` body of typed records plus its pagination headers
pub fn decode_list_as<T: DeserializeOwned>(
    headers: &HeaderMap,
    body: &[u8],
) -> SnowResult<TypedListResponse<T>> {
    let count = total_count(headers)?;
    let link = pagination_link(headers)?;
    let result = decode_single::<Vec<T>>(body)?;

    Ok(TypedListResponse { count, link, result })
}

/// `X-Total-Count` as an integer, `None` if the header is absent
pub fn total_count(headers: &HeaderMap) -> SnowResult<Option<u64>> {
    let Some(value) = headers.get(TOTAL_COUNT_HEADER) else {
        return Ok(None);
    };

    let raw = value.to_str().map_err(|_| {
        SnowError::InvalidResponse(format!("{} header is not valid text", TOTAL_COUNT_HEADER))
    })?;

    raw.trim().parse::<u64>().map(Some).map_err(|_| {
        SnowError::InvalidResponse(format!("{} header is not an integer: {:?}", TOTAL_COUNT_HEADER, raw))
    })
}

/// Raw `Link` header, `None` if absent
pub fn pagination_link(headers: &HeaderMap) -> SnowResult<Option<String>> {
    headers
        .get(LINK)
        .map(|value| {
            value
                .to_str()
                .map(str::to_string)
                .map_err(|_| SnowError::InvalidResponse("Link header is not valid text".into()))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Incident;
    use reqwest::header::HeaderValue;

    const LINK_VALUE: &str = "<https://dev.example.com/api/now/table/incident?sysparm_offset=5&sysparm_limit=5>;rel=\"next\"";

    #[test]
    fn list_with_count_header() {
        let mut headers = HeaderMap::new();
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("1"));

        let body = br#"{"result":[{"sys_id":"abc","short_description":"x"}]}"#;
        let page = decode_list(&headers, body).unwrap();

        assert_eq!(page.count, Some(1));
        assert_eq!(page.link, None);
        assert_eq!(page.result.len(), 1);
        assert_eq!(page.result[0]["sys_id"], "abc");
    }

    #[test]
    fn list_with_link_header() {
        let mut headers = HeaderMap::new();
        headers.insert(LINK, HeaderValue::from_static(LINK_VALUE));

        let page = decode_list(&headers, br#"{"result":[]}"#).unwrap();
        assert_eq!(page.count, None);
        assert_eq!(page.link.as_deref(), Some(LINK_VALUE));
        assert!(page.result.is_empty());
    }

    #[test]
    fn bad_count_header_is_reported() {
        let mut headers = HeaderMap::new();
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("many"));

        let err = decode_list(&headers, br#"{"result":[]}"#).unwrap_err();
        assert!(matches!(err, SnowError::InvalidResponse(ref msg) if msg.contains("many")));
    }

    #[test]
    fn malformed_envelope_is_a_decode_error() {
        let err = decode_list(&HeaderMap::new(), b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, SnowError::Decode(_)));

        let err = decode_single::<Record>(br#"{"records": {}}"#).unwrap_err();
        assert!(matches!(err, SnowError::Decode(_)));
    }

    #[test]
    fn typed_single_record() {
        let body = br#"{"result":{"sys_id":"abc","number":"INC0000001","reassignment_count":"0"}}"#;
        let incident: Incident = decode_single(body).unwrap();
        assert_eq!(incident.sys_id.as_deref(), Some("abc"));
        assert_eq!(incident.reassignment_count, Some(crate::models::SnInt(0)));
    }

    #[test]
    fn typed_field_failure_is_a_decode_error() {
        let body = br#"{"result":{"reassignment_count":"abc"}}"#;
        let err = decode_single::<Incident>(body).unwrap_err();
        assert!(matches!(err, SnowError::Decode(_)));
        assert!(err.to_string().contains("abc"));
    }
}
