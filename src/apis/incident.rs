use crate::{
    apis::table::{record_path, table_path},
    client::SnowClient,
    error::SnowResult,
    models::{incident::INCIDENT_TABLE, Incident, TypedListResponse},
    query::QueryOptions,
    response::{decode_list_as, decode_single},
};
use log::info;

/// Typed access to the `incident` table
pub struct IncidentApi<'a> {
    client: &'a SnowClient,
}

impl<'a> IncidentApi<'a> {
    pub fn new(client: &'a SnowClient) -> Self {
        Self { client }
    }

    /// Get an incident by sys_id
    pub async fn get(&self, sys_id: &str) -> SnowResult<Incident> {
        info!("Getting incident: {}", sys_id);
        let response = self
            .client
            .get(&record_path(INCIDENT_TABLE, sys_id)?, None)
            .await?;
        let (_, body) = SnowClient::read_body(response).await?;

        decode_single(&body)
    }

    /// List one page of incidents
    pub async fn list(&self, query: Option<&QueryOptions>) -> SnowResult<TypedListResponse<Incident>> {
        info!("Listing incidents");
        let response = self.client.get(&table_path(INCIDENT_TABLE)?, query).await?;
        let (headers, body) = SnowClient::read_body(response).await?;

        decode_list_as(&headers, &body)
    }
}
