use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::Client;

#[derive(Parser)]
#[command(name = "scholars-cli")]
#[command(about = "Scholars discovery middleware CLI", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:9000")]
    endpoint: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health
    Health,

    /// Faceted person search
    Search {
        /// Free-text query; omit to match everyone
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Facet fields, e.g. subjectArea,organization
        #[arg(short, long, value_delimiter = ',')]
        facets: Vec<String>,

        /// Facet filters as field=value
        #[arg(short = 'F', long = "filter")]
        filters: Vec<String>,

        #[arg(short, long, default_value = "0")]
        page: u32,

        #[arg(short, long, default_value = "20")]
        size: u32,
    },

    /// List seeded themes
    Themes,

    /// List harvest sources, or show one entity type's source
    Sources {
        #[arg(value_name = "ENTITY_TYPE")]
        entity_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::new();
    let endpoint = cli.endpoint.trim_end_matches('/');

    let body = match cli.command {
        Commands::Health => get(&client, &format!("{}/health", endpoint), &[]).await?,

        Commands::Search {
            query,
            facets,
            filters,
            page,
            size,
        } => {
            let mut params = vec![
                ("page".to_string(), page.to_string()),
                ("size".to_string(), size.to_string()),
            ];
            if let Some(query) = query {
                params.push(("query".to_string(), query));
            }
            if !facets.is_empty() {
                params.push(("facets".to_string(), facets.join(",")));
            }
            for filter in filters {
                let Some((field, value)) = filter.split_once('=') else {
                    bail!("filter '{}' must look like field=value", filter);
                };
                params.push((format!("{}.filter", field), value.to_string()));
            }

            get(
                &client,
                &format!("{}/persons/search/faceted", endpoint),
                &params,
            )
            .await?
        }

        Commands::Themes => get(&client, &format!("{}/themes", endpoint), &[]).await?,

        Commands::Sources { entity_type } => {
            let url = match entity_type {
                Some(entity_type) => format!("{}/harvest/sources/{}", endpoint, entity_type),
                None => format!("{}/harvest/sources", endpoint),
            };
            get(&client, &url, &[]).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

async fn get(client: &Client, url: &str, params: &[(String, String)]) -> Result<serde_json::Value> {
    let response = client
        .get(url)
        .query(params)
        .send()
        .await
        .with_context(|| format!("request to {} failed", url))?;

    let status = response.status();
    let body: serde_json::Value = response
        .json()
        .await
        .with_context(|| format!("invalid response from {}", url))?;

    if !status.is_success() {
        bail!(
            "server returned {}: {}",
            status,
            serde_json::to_string_pretty(&body)?
        );
    }
    Ok(body)
}
