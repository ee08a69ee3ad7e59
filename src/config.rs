use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::*;
use crate::location::Point;

#[derive(Parser, Debug, Clone)]
pub struct TargetOptions {
    /// 目标点纬度
    #[arg(long, value_name = "LAT", default_value_t = 0.0, allow_negative_numbers = true)]
    pub lat: f64,
    /// 目标点经度
    #[arg(long, value_name = "LON", default_value_t = 0.0, allow_negative_numbers = true)]
    pub lon: f64,
}

impl TargetOptions {
    pub fn point(&self) -> Point {
        Point::new("-", self.lat, self.lon)
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "geotopk", version)]
pub struct Opts {
    #[command(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCommand {
    /// 从 CSV 文件中找出距离目标点最近和最远的 N 个点
    Query(QueryCommand),
    /// 生成测试用的 CSV 数据并输出到标准输出
    Generate(GenerateCommand),
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Table,
}
