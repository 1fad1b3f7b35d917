use anyhow::Result;
use extract_question_merge::config::{Command, Config};
use extract_question_merge::orchestrator::App;
use extract_question_merge::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 解析命令
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    // 初始化并运行应用
    App::initialize(config).await?.run(command).await?;

    Ok(())
}
