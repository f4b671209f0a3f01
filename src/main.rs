use std::env;
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;
use whlib::config::{Config, ConfigErr};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cfg = Config::new(env::args_os()).unwrap_or_else(|err| match err {
        ConfigErr::Arguments(e) => e.exit(),
        err => {
            error!("Problem parsing arguments: {}", err);
            process::exit(1);
        }
    });
    if let Err(e) = whlib::run(cfg).await {
        error!("Problem running program: {}", e);
        process::exit(1);
    }
}
