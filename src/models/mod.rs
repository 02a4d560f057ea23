use serde::{Deserialize, Deserializer, Serialize};

pub mod fieldtype;
pub mod incident;

pub use fieldtype::{SnBool, SnInt, SnTime};
pub use incident::Incident;

/// Untyped record from an arbitrary table
pub type Record = serde_json::Map<String, serde_json::Value>;

/// `{"result": ...}` envelope wrapping every Table API response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    pub result: T,
}

/// One page of untyped records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListResponse {
    /// `X-Total-Count` header
    pub count: Option<u64>,
    /// Raw `Link` header for manual pagination
    pub link: Option<String>,
    pub result: Vec<Record>,
}

/// One page of typed records
#[derive(Debug, Clone, PartialEq)]
pub struct TypedListResponse<T> {
    pub count: Option<u64>,
    pub link: Option<String>,
    pub result: Vec<T>,
}

/// Single untyped record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SingleResponse {
    pub result: Record,
}

/// Reference to another record.
///
/// Normally a `{link, value}` object. With `sysparm_exclude_reference_link`
/// set the instance sends the bare sys_id string instead, which decodes
/// with `link` left empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExpandedParameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub value: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExpandedParameterRepr {
    Object {
        #[serde(default)]
        link: Option<String>,
        #[serde(default)]
        value: String,
    },
    Plain(String),
}

impl<'de> Deserialize<'de> for ExpandedParameter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match ExpandedParameterRepr::deserialize(deserializer)? {
            ExpandedParameterRepr::Object { link, value } => ExpandedParameter { link, value },
            ExpandedParameterRepr::Plain(value) => ExpandedParameter { link: None, value },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_object() {
        let param: ExpandedParameter = serde_json::from_str(
            r#"{"link": "https://dev.example.com/api/now/table/sys_user/6816f79c", "value": "6816f79c"}"#,
        )
        .unwrap();
        assert_eq!(param.value, "6816f79c");
        assert_eq!(
            param.link.as_deref(),
            Some("https://dev.example.com/api/now/table/sys_user/6816f79c")
        );
    }

    #[test]
    fn bare_sys_id_reference() {
        let param: ExpandedParameter = serde_json::from_str("\"6816f79c\"").unwrap();
        assert_eq!(param, ExpandedParameter { link: None, value: "6816f79c".into() });
    }

    #[test]
    fn single_envelope() {
        let single: SingleResponse =
            serde_json::from_str(r#"{"result": {"sys_id": "abc", "active": "true"}}"#).unwrap();
        assert_eq!(single.result["sys_id"], "abc");
        assert_eq!(single.result["active"], "true");
    }
}
