use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde_json::json;

use crate::cli::SubCommandExtend;
use crate::config::{Opts, OutputFormat, TargetOptions};
use crate::distance::{Distance, Metric};
use crate::driver::fill;
use crate::ordering::Ordering;
use crate::source::CsvSource;
use crate::toplist::{Method, TopListBuilder};

#[derive(Parser, Debug, Clone)]
pub struct QueryCommand {
    #[command(flatten)]
    pub target: TargetOptions,
    /// CSV 文件路径，每行格式为 id,lat,lon
    pub path: PathBuf,
    /// 选取的结果数量
    #[arg(short, value_name = "N", default_value_t = 5)]
    pub n: usize,
    /// 选取方式
    #[arg(short, long, value_enum, default_value_t = Method::Queue)]
    pub method: Method,
    /// parallel 方式使用的线程数
    #[arg(short, long, value_name = "N", default_value_t = num_cpus::get() as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub workers: u64,
    /// 距离计算方式
    #[arg(long, value_enum, default_value_t = Metric::GreatCircle)]
    pub metric: Metric,
    /// 文件第一行不是表头
    #[arg(long)]
    pub no_header: bool,
    /// 输出格式
    #[arg(long, value_enum, value_name = "FORMAT", default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for QueryCommand {
    fn run(&self, _opts: &Opts) -> Result<()> {
        let target = self.target.point();
        let builder = TopListBuilder::new(target.clone(), self.n)
            .metric(self.metric)
            .workers(self.workers as usize);
        let mut nearest = builder.clone().ordering(Ordering::Nearest).build(self.method);
        let mut furthest = builder.ordering(Ordering::Furthest).build(self.method);
        info!("目标点: {target}，方式: {:?}，数量: {}", self.method, nearest.k());

        let start = Instant::now();
        let source = CsvSource::open(&self.path, !self.no_header)
            .with_context(|| format!("无法打开文件: {}", self.path.display()))?;
        let count = fill(source, &mut [nearest.as_mut(), furthest.as_mut()])
            .with_context(|| format!("读取失败: {}", self.path.display()))?;

        let nearest = nearest.top();
        let furthest = furthest.top();
        info!("处理 {count} 个点，耗时 {:.3}s", start.elapsed().as_secs_f32());

        print_result(&nearest, &furthest, self.output_format)
    }
}

fn print_result(nearest: &[Distance], furthest: &[Distance], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = json!({ "nearest": nearest, "furthest": furthest });
            println!("{}", serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Table => {
            println!("Closest items:");
            print_table(nearest);
            println!();
            println!("Furthest items:");
            print_table(furthest);
        }
    }
    Ok(())
}

fn print_table(items: &[Distance]) {
    for d in items {
        println!("{:.2}\t{}\t{:.6}\t{:.6}", d.value, d.point.id, d.point.lat, d.point.lon);
    }
}
