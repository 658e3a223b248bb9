use clap::Parser;
use std::path::PathBuf;

use crate::downloader::runner::DEFAULT_PROGRAM;

/// YouTube 批量挑选下载工具
#[derive(Parser, Debug)]
#[command(name = "ytpick")]
#[command(version)]
#[command(about = "Pick one YouTube search result per line of a query file and download them with yt-dlp", long_about = None)]
pub struct Cli {
    /// 搜索词文件，每行一个搜索词
    #[arg(value_name = "QUERY_FILE")]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// 输出目录 (默认: ~/Videos/wrk)
    #[arg(long, value_name = "DIR")]
    #[arg(help = "Directory the videos are written to [default: ~/Videos/wrk]")]
    pub output_dir: Option<PathBuf>,

    /// 下载器可执行文件
    #[arg(long, value_name = "PROGRAM", env = "YTPICK_DOWNLOADER", default_value = DEFAULT_PROGRAM)]
    #[arg(help = "External downloader executable")]
    pub downloader: PathBuf,

    #[arg(long, value_name = "N", default_value_t = 3)]
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    #[arg(help = "Maximum number of downloads running at once")]
    pub concurrency: u16,

    #[arg(long, value_name = "SECS", default_value_t = 15)]
    #[arg(help = "Timeout for each search page request")]
    pub fetch_timeout: u64,

    #[arg(long, value_name = "SECS")]
    #[arg(help = "Kill a download that runs longer than this")]
    pub download_timeout: Option<u64>,

    #[arg(short, long)]
    #[arg(help = "Print debug logs")]
    pub verbose: bool,
}
