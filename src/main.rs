use anyhow::Result;
use response_sheet_scorer::logger;
use response_sheet_scorer::orchestrator::App;
use response_sheet_scorer::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
