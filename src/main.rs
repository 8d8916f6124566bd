use std::path::PathBuf;

use clap::Parser;
use lernsax_qr_core::app::{request, run_submission, FormController};
use lernsax_qr_core::client::NoWasmClient;
use lernsax_qr_core::config::{ClientConfig, DEFAULT_QR_URL, DEFAULT_RPC_URL};
use lernsax_qr_core::error::Result;
use lernsax_qr_core::interface::HttpClient;
use lernsax_qr_core::ResponseStatus;

/// Create a LernSax autologin QR code
#[derive(Debug, Parser)]
#[command(name = "lernsax-qr", version)]
struct Cli {
    /// LernSax login, `.lernsax.de` is appended if missing (prompted when omitted)
    #[arg(short, long)]
    email: Option<String>,

    /// Password (prompted without echo when omitted)
    #[arg(short, long)]
    password: Option<String>,

    /// Download the QR image to this file
    #[arg(short, long)]
    save: Option<PathBuf>,

    /// Print the resulting status as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, env = "LERNSAX_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,

    #[arg(long, env = "LERNSAX_QR_URL", default_value = DEFAULT_QR_URL)]
    qr_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = ClientConfig::new(cli.rpc_url, cli.qr_url)?;
    let client = NoWasmClient::new(config.clone()).await?;

    let email = match cli.email {
        Some(email) => email,
        None => request::prompt_email()?,
    };
    let password = match cli.password {
        Some(password) => password,
        None => request::prompt_password()?,
    };

    let mut controller = FormController::new(config.email_suffix);
    let status = run_submission(&client, &mut controller, &email, &password).await;
    request::print_status(&status, cli.json)?;

    if !matches!(status, ResponseStatus::Success { .. }) {
        std::process::exit(1);
    }

    if let Some(path) = cli.save {
        request::save_qr_image(&client, &status, &path).await?;
        println!("QR code saved to {}", path.display());
    }

    Ok(())
}
