use clap::Parser;
use geotopk::Opts;
use geotopk::cli::SubCommandExtend;
use geotopk::config::SubCommand;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    match &opts.subcmd {
        SubCommand::Query(config) => config.run(&opts),
        SubCommand::Generate(config) => config.run(&opts),
    }
}
