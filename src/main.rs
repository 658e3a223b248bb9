use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::debug;

use ytpick::app::{self, App};
use ytpick::cli::Cli;
use ytpick::common::client::HttpClient;
use ytpick::common::logger::PrettyLogger;
use ytpick::config::{AppConfig, DEFAULT_LOG_LEVEL};
use ytpick::downloader::YtDlp;
use ytpick::log_warning;
use ytpick::search::YoutubeSearch;
use ytpick::selection::AnswerReader;

fn init_tracing(verbose: bool) {
    // 日志写到 stderr，stdout 留给交互界面
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        DEFAULT_LOG_LEVEL
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_cli(&args).context("Couldn't find home dir")?;
    debug!("运行配置: {:?}", config);

    let queries = app::read_queries(&config.query_file).await?;
    debug!("读取到 {} 行搜索词", queries.len());

    let client = HttpClient::new(config.fetch_timeout).context("Couldn't create HTTP client")?;
    let source = Arc::new(YoutubeSearch::new(client));

    let ytdlp = YtDlp::new(config.downloader.clone(), config.download_timeout);
    if !ytdlp.check_available().await {
        log_warning!(
            "{} is not runnable, downloads will fail (install yt-dlp or pass --downloader)",
            config.downloader.display()
        );
    }

    let app = App::new(config, source, Arc::new(ytdlp));
    let mut answers = AnswerReader::new(BufReader::new(tokio::io::stdin()));
    let mut out = tokio::io::stdout();
    app.run(queries, &mut answers, &mut out).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // 参数错误统一以 1 退出，--help / --version 正常退出
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_tracing(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            PrettyLogger::fatal(format!("Error: {:#}", e));
            ExitCode::from(1)
        }
    }
}
