//! No-WASM application implementation
//!
//! Terminal flow: prompt for whatever was not given on the command line,
//! print the outcome, optionally save the QR image next to it.

use std::io::Write;
use std::path::Path;

use crate::error::{ErrorKind, Result};
use crate::interface::RequestApi;
use crate::model::structs::ResponseStatus;

pub fn prompt_email() -> Result<String> {
    print!("Email: ");
    std::io::stdout().flush()?;

    let mut email = String::new();
    std::io::stdin().read_line(&mut email)?;
    Ok(email.trim().to_string())
}

pub fn prompt_password() -> Result<String> {
    Ok(rpassword::prompt_password("Password: ")?)
}

/// Download the QR image of a successful status to `path`
pub async fn save_qr_image<C: RequestApi>(
    client: &C,
    status: &ResponseStatus,
    path: &Path,
) -> Result<()> {
    let ResponseStatus::Success { image_url, .. } = status else {
        return Err(ErrorKind::ResponseError("no QR code to save".to_string()).into());
    };

    let image = client.fetch_image(image_url).await?;
    std::fs::write(path, &image)?;
    log::info!("Saved {} bytes of QR image to {}", image.len(), path.display());
    Ok(())
}

pub fn print_status(status: &ResponseStatus, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(status)?);
        return Ok(());
    }

    match status {
        ResponseStatus::Success { url, image_url } => {
            println!("=====================================");
            println!("Autologin URL: {url}");
            println!("QR code:       {image_url}");
            println!("=====================================");
        }
        ResponseStatus::Error { message } => eprintln!("{message}"),
        ResponseStatus::None | ResponseStatus::Loading => {}
    }
    Ok(())
}
