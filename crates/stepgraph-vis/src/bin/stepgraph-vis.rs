//! Stepgraph Visualization Server
//!
//! Load a built-in sample graph and serve the replay API.

use stepgraph_graph::samples;
use stepgraph_vis::{Error, Session, VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stepgraph_vis=info,stepgraph_algo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env()?;
    let sample =
        samples::find(&config.sample).ok_or_else(|| Error::UnknownSample(config.sample.clone()))?;

    println!("Stepgraph Visualizer");
    println!("====================");
    println!();
    println!("Graph: {} ({} nodes)", sample.title, sample.nodes.len());
    println!("Samples: {}", samples::ALL.map(|s| s.name).join(", "));
    println!();
    println!("Starting server on http://{}", config.addr());
    println!();

    let server = VisServer::new(Session::new(sample.graph()));
    server.serve(config.addr()).await?;

    Ok(())
}
