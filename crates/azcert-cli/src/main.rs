use std::process::ExitCode;

use azcert_cli::{Cli, ReqwestTransport, execute, logging};
use azcert_core::{ClientConfig, ServiceClient};
use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let client = ServiceClient::with_config(ClientConfig::new(&cli.base_url), ReqwestTransport::new());
    tracing::debug!(base_url = %client.config().base_url, "client ready");

    match execute(&client, cli.command, cli.json).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
