//! Lists active incidents, fetches one by sys_id and lists service requests.
//!
//! Reads `SN_USERNAME`, `SN_PASSWORD` and `SN_INSTANCE_URL` from the
//! environment or a `.env` file.
//!
//! ```text
//! cargo run --example get_incident -- ef2706c29707d510b2a3b68fe153af7d
//! ```

use anyhow::Context;
use snow_client::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let credentials = Credentials::from_env().context("loading credentials")?;
    let client = SnowClient::new(credentials)?;

    let query = QueryOptions::new().with_query("active=true").with_limit(5);

    // Get multiple incidents
    let incidents = client.table().list("incident", Some(&query)).await?;
    println!("{} active incidents", incidents.count.unwrap_or_default());
    for record in &incidents.result {
        println!("[{}] {}", field(record, "sys_id"), field(record, "short_description"));
    }

    // Get a single incident by sys_id
    if let Some(sys_id) = std::env::args().nth(1) {
        let incident = client.incidents().get(&sys_id).await?;
        println!(
            "[{}] {}",
            incident.sys_id.as_deref().unwrap_or_default(),
            incident.short_description.as_deref().unwrap_or_default()
        );
    }

    // Get multiple sc_request
    let requests = client.table().list("sc_request", Some(&query)).await?;
    for record in &requests.result {
        println!("[{}] {}", field(record, "sys_id"), field(record, "short_description"));
    }
    if let Some(link) = requests.link {
        println!("next pages: {}", link);
    }

    Ok(())
}

fn field<'a>(record: &'a Record, name: &str) -> &'a str {
    record.get(name).and_then(|v| v.as_str()).unwrap_or_default()
}
