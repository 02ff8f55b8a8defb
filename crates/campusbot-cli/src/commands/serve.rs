//! Serve command

use crate::app::ServeArgs;
use anyhow::Result;
use campusbot_core::Config;

pub async fn run(args: ServeArgs, mut config: Config) -> Result<()> {
    if let Some(listen) = args.listen {
        config.server.listen_addr = listen;
    }
    campusbot_server::start_server(config).await
}
