//! `sysparm_*` query options for Table API reads.

use std::fmt;
use url::form_urlencoded;

/// Which representation of reference and choice fields the instance returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayValue {
    /// Actual database values (`false`)
    Raw,
    /// Display values (`true`)
    Display,
    /// Both, as `{display_value, value}` pairs (`all`)
    Both,
}

impl DisplayValue {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayValue::Raw => "false",
            DisplayValue::Display => "true",
            DisplayValue::Both => "all",
        }
    }
}

/// Request-shaping options for list and single-record reads.
///
/// Every field is optional and only fields that are set end up in the query
/// string. Parameters are emitted in alphabetical order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Reference and choice field representation
    pub display_value: Option<DisplayValue>,
    /// Drop the Table API `link` from reference fields
    pub exclude_reference_link: Option<bool>,
    /// Field names to include in the response
    pub fields: Option<Vec<String>>,
    /// Maximum number of records to return
    pub limit: Option<u32>,
    /// Skip the `select count(*)` on the table
    pub no_count: Option<bool>,
    /// Index of the first record to return
    pub offset: Option<u64>,
    /// Encoded query, e.g. `active=true^ORDERBYnumber`
    pub query: Option<String>,
    /// Name of the query category
    pub query_category: Option<String>,
    /// Include records from domains the user is not configured for
    pub query_no_domain: Option<bool>,
    /// Remove the `Link` header from the response
    pub suppress_pagination_header: Option<bool>,
    /// UI view (`desktop`, `mobile` or `both`)
    pub view: Option<String>,
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display_value(mut self, display_value: DisplayValue) -> Self {
        self.display_value = Some(display_value);
        self
    }

    pub fn with_exclude_reference_link(mut self, exclude: bool) -> Self {
        self.exclude_reference_link = Some(exclude);
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_no_count(mut self, no_count: bool) -> Self {
        self.no_count = Some(no_count);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_query_category(mut self, category: impl Into<String>) -> Self {
        self.query_category = Some(category.into());
        self
    }

    pub fn with_query_no_domain(mut self, no_domain: bool) -> Self {
        self.query_no_domain = Some(no_domain);
        self
    }

    pub fn with_suppress_pagination_header(mut self, suppress: bool) -> Self {
        self.suppress_pagination_header = Some(suppress);
        self
    }

    pub fn with_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// True if no option is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Present options as `(parameter, value)` pairs, unencoded
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(display_value) = self.display_value {
            pairs.push(("sysparm_display_value", display_value.as_str().to_string()));
        }
        if let Some(exclude) = self.exclude_reference_link {
            pairs.push(("sysparm_exclude_reference_link", exclude.to_string()));
        }
        if let Some(fields) = &self.fields {
            pairs.push(("sysparm_fields", fields.join(",")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("sysparm_limit", limit.to_string()));
        }
        if let Some(no_count) = self.no_count {
            pairs.push(("sysparm_no_count", no_count.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("sysparm_offset", offset.to_string()));
        }
        if let Some(query) = &self.query {
            pairs.push(("sysparm_query", query.clone()));
        }
        if let Some(category) = &self.query_category {
            pairs.push(("sysparm_query_category", category.clone()));
        }
        if let Some(no_domain) = self.query_no_domain {
            pairs.push(("sysparm_query_no_domain", no_domain.to_string()));
        }
        if let Some(suppress) = self.suppress_pagination_header {
            pairs.push(("sysparm_suppress_pagination_header", suppress.to_string()));
        }
        if let Some(view) = &self.view {
            pairs.push(("sysparm_view", view.clone()));
        }

        pairs
    }

    /// Form-urlencoded query string without the leading `?`
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.to_pairs() {
            serializer.append_pair(name, &value);
        }
        serializer.finish()
    }
}

impl fmt::Display for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
