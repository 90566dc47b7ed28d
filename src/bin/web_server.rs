use clap::Parser;
use kpaths::web::server::{start_server, ServerConfig};
use std::net::IpAddr;

/// HTTP service answering shortest and K-shortest path queries over uploaded graphs
#[derive(Debug, Parser)]
#[command(name = "kpaths-web", version)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3005)]
    port: u16,

    /// Maximum number of stored graph sessions
    #[arg(long, default_value_t = 1000)]
    max_sessions: usize,

    /// Largest K accepted by top-K queries
    #[arg(long, default_value_t = 100)]
    max_k: usize,

    /// Disable the permissive CORS layer
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        enable_cors: !args.no_cors,
        max_sessions: args.max_sessions,
        max_k: args.max_k,
    };

    println!("Starting kpaths web server...");
    println!("   Address: {}:{}", config.host, config.port);
    println!("   CORS enabled: {}", config.enable_cors);
    println!("   Max sessions: {}", config.max_sessions);
    println!("   Max k: {}", config.max_k);
    println!();

    start_server(config).await?;

    Ok(())
}
