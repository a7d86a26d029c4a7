// Entrypoint for the CLI application.
// - Keeps `main` small: read config, build the controller, hand it to
//   the UI loop.
// - Logs go to stderr so they do not mix with the prompts.

use facebox_cli::{
    api::ApiClient,
    config::Config,
    ui::main_menu,
    workflow::{DirDownloader, UploadController},
};
use tracing::info;

fn main() -> anyhow::Result<()> {
    // FACEBOX_URL, FACEBOX_ROUTES, FACEBOX_OUTPUT_DIR and FACEBOX_LOG,
    // see `Config`.
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .init();
    info!(
        url = %config.base_url,
        output = %config.output_dir.display(),
        "starting"
    );

    let api = ApiClient::new(config.base_url)?;
    let ctl = UploadController::new(api, DirDownloader::new(config.output_dir), config.routes);

    main_menu(ctl)?;
    Ok(())
}
