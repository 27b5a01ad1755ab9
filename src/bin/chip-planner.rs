use chip_planner::config::{self, FormatArg, Mode};
use chip_planner::error::Result;
use chip_planner::logging;
use chip_planner::output::{Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};
use chip_planner::{analyze_revaluation, optimize};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = config::parse_args()?;
    let config = config::build_config(args)?;
    logging::init_tracing(config.verbosity);

    let formatter = formatter_for(&config.format);
    let output = match config.mode {
        Mode::Optimize => formatter.optimization(&optimize(&config.params)?)?,
        Mode::Revalue => formatter.revaluation(&analyze_revaluation(&config.params)?)?,
    };
    print!("{}", output);

    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
