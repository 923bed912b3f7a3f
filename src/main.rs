use anyhow::Result;
use clap::Parser;
use exam_portal_client::{logger, App, Command, Config};

/// 在线考试平台命令行客户端
#[derive(Parser, Debug)]
#[command(name = "exam-client", version, about)]
struct Args {
    /// 后端地址，覆盖配置文件
    #[arg(long, env = "EXAM_API_BASE_URL", global = true)]
    api_base_url: Option<String>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 加载配置
    let mut config = Config::load()?;
    if let Some(url) = args.api_base_url {
        config.api_base_url = url;
        config.validate()?;
    }

    // 初始化日志
    logger::init(args.verbose || config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).await?.run(args.command).await
}
