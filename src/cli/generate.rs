use std::io::{BufWriter, Write};

use anyhow::Result;
use clap::Parser;

use crate::cli::SubCommandExtend;
use crate::config::{Opts, TargetOptions};
use crate::source::SyntheticSource;

#[derive(Parser, Debug, Clone)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub target: TargetOptions,
    /// 生成的点数
    #[arg(short, long, default_value_t = 100)]
    pub count: usize,
    /// 相邻两点在经纬度上的间隔
    #[arg(short, long, default_value_t = 0.0001)]
    pub delta: f64,
}

impl SubCommandExtend for GenerateCommand {
    fn run(&self, _opts: &Opts) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        writeln!(out, "id,lat,lng")?;
        for point in SyntheticSource::new(self.target.point(), self.count, self.delta) {
            let point = point?;
            writeln!(out, "{},{},{}", point.id, point.lat, point.lon)?;
        }
        out.flush()?;
        Ok(())
    }
}
