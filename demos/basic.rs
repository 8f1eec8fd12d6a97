use netreq_http::{ApiRequest, ApiResponse, NetworkClient, Parameters};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResult {
    total_count: u64,
    items: Vec<Repo>,
}

#[derive(Debug, Deserialize)]
struct Repo {
    full_name: String,
    stargazers_count: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = NetworkClient::from_env().map_err(anyhow::Error::msg)?;

    let request = ApiRequest::get("https://api.github.com/search/repositories")
        .with_parameters(
            Parameters::new()
                .with("q", "http client language:rust")
                .with("per_page", 5),
        )
        .with_header("Accept", "application/vnd.github+json")
        .with_header("User-Agent", "netreq-http-demo");

    let result = client
        .request::<ApiResponse<SearchResult>, _>(&request)
        .await?;

    println!("{} repositories", result.total_count);
    for repo in result.items {
        println!("{:>6}  {}", repo.stargazers_count, repo.full_name);
    }

    Ok(())
}
