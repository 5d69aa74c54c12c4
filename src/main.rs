use std::path::PathBuf;

use disk_van_card_reader::CardReaderApp;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    log::info!("[MAIN] Starting card reader");

    let image_path = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => anyhow::bail!("usage: disk-van-card-reader <card-image>"),
    };

    let app = CardReaderApp::build()?;
    let result = app.extract_from_file(&image_path).await?;

    println!("{}", result);
    Ok(())
}
