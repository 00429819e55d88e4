use anyhow::Context;
use clap::Parser;
use std::path::Path;

mod options {
    use std::path::PathBuf;

    #[derive(Debug, Clone, Copy, clap::ValueEnum)]
    pub enum UnknownCurrency {
        Skip,
        Abort,
    }

    #[derive(Debug, Clone, Copy, clap::ValueEnum)]
    pub enum Format {
        /// One labelled line per series.
        Text,
        /// The whole report in RON notation.
        Ron,
    }

    #[derive(Debug, clap::Parser)]
    #[command(
        name = "vacstat",
        about = "Salary and vacancy statistics by year and location from a vacancy export"
    )]
    pub struct Args {
        /// The part of a vacancy name selecting it into the profession statistics, case-sensitive.
        #[clap(long, short = 'p')]
        pub profession: String,
        #[clap(long, short = 'd', default_value = ",")]
        pub delimiter: char,
        /// A currency rate table in RON notation to use instead of the built-in one.
        #[clap(long, short = 'r')]
        pub rates: Option<PathBuf>,
        /// Locations with a smaller share of all vacancies are left out of the location statistics.
        #[clap(long, default_value = "0.01")]
        pub min_share: f64,
        /// The maximum amount of locations to show.
        #[clap(long, default_value = "10")]
        pub top: usize,
        /// What to do with vacancies whose currency isn't in the rate table.
        #[clap(long, value_enum, default_value = "skip")]
        pub on_unknown_currency: UnknownCurrency,
        #[clap(long, value_enum, default_value = "text")]
        pub format: Format,
        /// Log every dropped row.
        #[clap(long, short = 'v')]
        pub verbose: bool,
        /// The CSV file with one vacancy per row and a header line.
        pub csv_file: PathBuf,
    }
}

fn main() -> anyhow::Result<()> {
    let args = options::Args::parse();
    init_logger(args.verbose);

    let outcome = vacstat::read_vacancies(
        open(&args.csv_file)?,
        vacstat::dataset::Options {
            delimiter: args.delimiter,
        },
    )
    .with_context(|| format!("Could not read vacancies from '{}'", args.csv_file.display()))?;

    let custom_rates = args
        .rates
        .as_deref()
        .map(|path| -> anyhow::Result<_> {
            vacstat::CurrencyRates::from_ron_reader(open(path)?)
                .with_context(|| format!("Could not load currency rates from '{}'", path.display()))
        })
        .transpose()?;
    let rates = custom_rates
        .as_ref()
        .unwrap_or_else(|| vacstat::CurrencyRates::fixed());

    let report = vacstat::analyze(
        &outcome.vacancies,
        rates,
        vacstat::report::Options {
            profession: args.profession,
            geo: vacstat::geo::Options {
                min_share: args.min_share,
                top_n: args.top,
            },
            unknown_currency: match args.on_unknown_currency {
                options::UnknownCurrency::Skip => vacstat::report::UnknownCurrency::Skip,
                options::UnknownCurrency::Abort => vacstat::report::UnknownCurrency::Abort,
            },
        },
    )?;

    match args.format {
        options::Format::Text => print!("{report}"),
        options::Format::Ron => println!(
            "{}",
            ron::ser::to_string_pretty(&report, ron::ser::PrettyConfig::new().struct_names(true))?
        ),
    }
    Ok(())
}

fn open(path: &Path) -> anyhow::Result<std::io::BufReader<std::fs::File>> {
    Ok(std::io::BufReader::new(std::fs::File::open(path).with_context(
        || format!("Could not open '{}' for reading", path.display()),
    )?))
}

fn init_logger(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "vacstat=debug,info"
        } else {
            "vacstat=info"
        })
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
