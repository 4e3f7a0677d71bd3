use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = pgstmt_cli::Cli::parse();
    if let Err(e) = pgstmt_cli::run(cli).await {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
