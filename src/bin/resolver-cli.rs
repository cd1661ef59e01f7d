use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "resolver-cli")]
#[command(about = "Management CLI for the page resolver", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value = "CHANGE_ME_IN_PRODUCTION")]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a tenant path
    Resolve {
        tenant: String,
        /// Path as requested by the browser, e.g. /en/locations/santo-domingo
        #[arg(default_value = "/")]
        path: String,
        /// Extra query parameter, repeatable (key=value)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Show a tenant's effective route table and conflicts
    Routes { tenant: String },
    /// Invalidate one tenant's cache, or every tenant when omitted
    Invalidate { tenant: Option<String> },
    /// Check service status
    Status,
    /// Inspect cache counters
    Cache,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = match cli.command {
        Commands::Resolve {
            tenant,
            path,
            params,
        } => {
            let mut query = vec![("path".to_string(), path)];
            query.extend(params);
            client
                .get(format!("{}/resolve/{}", cli.url, tenant))
                .query(&query)
                .send()
                .await?
        }
        Commands::Routes { tenant } => {
            client
                .get(format!("{}/admin/tenants/{}/routes", cli.url, tenant))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Invalidate { tenant: Some(tenant) } => {
            client
                .post(format!("{}/admin/tenants/{}/invalidate", cli.url, tenant))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Invalidate { tenant: None } => {
            client
                .post(format!("{}/admin/invalidate", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Status => {
            client
                .get(format!("{}/admin/status", cli.url))
                .headers(headers)
                .send()
                .await?
        }
        Commands::Cache => {
            client
                .get(format!("{}/admin/cache", cli.url))
                .headers(headers)
                .send()
                .await?
        }
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
