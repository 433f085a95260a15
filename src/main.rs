use tracing::error;
use wc_server::bootstrap::{config, tracing as logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 配置先于日志加载，日志目录来自配置
    let config = config::load_config()?;
    logging::init_tracing_subscriber(config.log_dir.as_deref())?;

    if let Err(err) = wc_server::run(config).await {
        error!("Server exited with error: {err:#}");
        return Err(err);
    }
    Ok(())
}
