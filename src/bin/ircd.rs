use flexi_logger::{Duplicate, Logger};
use log::error;

use ircd::config::Config;
use ircd::server;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    Logger::try_with_str("info")
        .and_then(|logger| {
            logger
                .log_to_stderr()
                .duplicate_to_stderr(Duplicate::All)
                .start()
        })
        .ok();

    let config = match Config::from_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = server::run(config).await {
        error!("{err}");
        std::process::exit(1);
    }
}
