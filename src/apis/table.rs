use crate::{
    client::SnowClient,
    error::{SnowError, SnowResult},
    models::{ListResponse, SingleResponse},
    query::QueryOptions,
    response::{decode_list, decode_single},
};
use log::{debug, info};
use serde::{de::DeserializeOwned, Serialize};

/// Percent-encode one path segment.
///
/// Empty, `.` and `..` segments are rejected: URL resolution would collapse
/// them onto a different endpoint.
fn path_segment<'s>(name: &str, segment: &'s str) -> SnowResult<std::borrow::Cow<'s, str>> {
    match segment {
        "" | "." | ".." => Err(SnowError::invalid_param(format!(
            "{} must not be {:?}",
            name, segment
        ))),
        _ => Ok(urlencoding::encode(segment)),
    }
}

/// Path of a table collection
pub fn table_path(table: &str) -> SnowResult<String> {
    Ok(format!("api/now/table/{}", path_segment("table name", table)?))
}

/// Path of a single record
pub fn record_path(table: &str, sys_id: &str) -> SnowResult<String> {
    Ok(format!("{}/{}", table_path(table)?, path_segment("sys_id", sys_id)?))
}

/// Generic Table API operations
pub struct TableApi<'a> {
    client: &'a SnowClient,
}

impl<'a> TableApi<'a> {
    pub fn new(client: &'a SnowClient) -> Self {
        Self { client }
    }

    /// Retrieve one page of records from a table
    ///
    /// # Arguments
    /// * `table` - Table name (e.g., "incident")
    /// * `query` - Filter, pagination and field selection
    pub async fn list(&self, table: &str, query: Option<&QueryOptions>) -> SnowResult<ListResponse> {
        info!("Listing records of table: {}", table);
        let response = self.client.get(&table_path(table)?, query).await?;
        let (headers, body) = SnowClient::read_body(response).await?;

        let page = decode_list(&headers, &body)?;
        debug!("Received {} records (total {:?})", page.result.len(), page.count);
        Ok(page)
    }

    /// Retrieve a single record by sys_id
    ///
    /// # Arguments
    /// * `table` - Table name
    /// * `sys_id` - Record identifier
    /// * `query` - Display value, field selection and view options
    pub async fn get(
        &self,
        table: &str,
        sys_id: &str,
        query: Option<&QueryOptions>,
    ) -> SnowResult<SingleResponse> {
        let result = self.get_as(table, sys_id, query).await?;
        Ok(SingleResponse { result })
    }

    /// Retrieve a single record decoded into a typed model
    pub async fn get_as<T: DeserializeOwned>(
        &self,
        table: &str,
        sys_id: &str,
        query: Option<&QueryOptions>,
    ) -> SnowResult<T> {
        info!("Getting record {} from table: {}", sys_id, table);
        let response = self.client.get(&record_path(table, sys_id)?, query).await?;
        let (_, body) = SnowClient::read_body(response).await?;

        decode_single(&body)
    }

    /// Insert a record and return it as stored
    pub async fn create<B>(&self, table: &str, body: &B) -> SnowResult<SingleResponse>
    where
        B: Serialize + ?Sized,
    {
        info!("Creating record in table: {}", table);
        let response = self.client.post(&table_path(table)?, body).await?;
        let (_, body) = SnowClient::read_body(response).await?;

        Ok(SingleResponse {
            result: decode_single(&body)?,
        })
    }

    /// Update the given fields of a record and return it as stored
    pub async fn update<B>(&self, table: &str, sys_id: &str, body: &B) -> SnowResult<SingleResponse>
    where
        B: Serialize + ?Sized,
    {
        info!("Updating record {} in table: {}", sys_id, table);
        let response = self.client.put(&record_path(table, sys_id)?, body).await?;
        let (_, body) = SnowClient::read_body(response).await?;

        Ok(SingleResponse {
            result: decode_single(&body)?,
        })
    }

    /// Delete a record
    pub async fn delete(&self, table: &str, sys_id: &str) -> SnowResult<()> {
        info!("Deleting record {} from table: {}", sys_id, table);
        let response = self.client.delete(&record_path(table, sys_id)?, None).await?;
        SnowClient::read_body(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_record_paths() {
        assert_eq!(table_path("incident").unwrap(), "api/now/table/incident");
        assert_eq!(
            record_path("sc_request", "ef2706c29707d510b2a3b68fe153af7d").unwrap(),
            "api/now/table/sc_request/ef2706c29707d510b2a3b68fe153af7d"
        );
    }

    #[test]
    fn escapes_path_segments() {
        assert_eq!(
            record_path("incident", "a/b c").unwrap(),
            "api/now/table/incident/a%2Fb%20c"
        );
        assert_eq!(
            record_path("incident", "..abc").unwrap(),
            "api/now/table/incident/..abc"
        );
    }

    #[test]
    fn rejects_dot_segments() {
        for sys_id in ["", ".", ".."] {
            let err = record_path("incident", sys_id).unwrap_err();
            assert!(matches!(err, SnowError::InvalidParameter(_)), "{:?}", sys_id);
        }
        for table in ["", ".", ".."] {
            let err = table_path(table).unwrap_err();
            assert!(matches!(err, SnowError::InvalidParameter(_)), "{:?}", table);
        }
    }
}
