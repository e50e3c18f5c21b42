//! superplot-summary
//!
//! Prints best fit, posterior mean, median, mode and credible region for
//! every parameter of a chain, followed by the minimum chi-squared and the
//! p-value of the best fit.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use superplot_io::{Chain, InfoFile};
use superplot_stats::{BinLimits, ChainSummary, MedianOrdering, StatsConfig};
use tracing_subscriber::EnvFilter;

/// Columns whose label contains this are chi-squared contributions, not
/// parameters
const CHI_SQ_MARKER: &str = r"\chi^2";

#[derive(Parser, Debug)]
#[command(name = "superplot-summary", version, about)]
struct Cli {
    /// Chain file (posterior weight, chi-squared, parameters...)
    chain: PathBuf,

    /// Info file with `lab<N>=<label>` column labels
    #[arg(short, long)]
    info: Option<PathBuf>,

    /// TOML config file (default: <config dir>/superplot/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of bins
    #[arg(long)]
    nbins: Option<u32>,

    /// Bin limits
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    bin_limits: Option<Vec<f64>>,

    /// Probability level for credible regions and confidence intervals
    #[arg(long)]
    alpha: Option<f64>,

    /// Degrees of freedom for the best-fit p-value
    #[arg(long)]
    dof: Option<u32>,

    /// Take the median over the chain as given instead of sorting by parameter
    #[arg(long)]
    chain_order: bool,

    /// Emit the summary as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// File config, overridden by any flags given on the command line
    fn stats_config(&self) -> Result<StatsConfig, Box<dyn std::error::Error>> {
        let config = match self.config_path() {
            Some(path) => {
                tracing::info!("Loading config from {:?}", path);
                StatsConfig::from_toml(&fs::read_to_string(&path)?)?
            }
            None => StatsConfig::default(),
        };
        self.apply_overrides(config)
    }

    /// Apply command-line flags on top of `config` and validate the result
    fn apply_overrides(
        &self,
        mut config: StatsConfig,
    ) -> Result<StatsConfig, Box<dyn std::error::Error>> {
        if let Some(nbins) = self.nbins {
            config.nbins = nbins;
        }
        if let Some(limits) = &self.bin_limits {
            config.bin_limits = Some(BinLimits::new(limits[0], limits[1]));
        }
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if self.dof.is_some() {
            config.dof = self.dof;
        }
        if self.chain_order {
            config.median_ordering = MedianOrdering::ChainOrder;
        }

        config.validate()?;
        Ok(config)
    }

    fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config {
            return Some(path.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("superplot").join("config.toml"))
            .filter(|path| path.exists())
    }
}

fn load_chain(chain: &Path, info: Option<&Path>) -> Result<Chain, Box<dyn std::error::Error>> {
    let chain = Chain::open(chain)?;
    Ok(match info {
        Some(info) => chain.with_info(&InfoFile::open(info)?),
        None => chain,
    })
}

/// Parameter columns to summarise, leaving out chi-squared contributions
fn summary_parameters(chain: &Chain) -> impl Iterator<Item = (&str, &[f64])> {
    chain
        .parameters()
        .filter(|(label, _)| !label.contains(CHI_SQ_MARKER))
}

fn format_modes(modes: &[f64]) -> String {
    modes
        .iter()
        .map(|m| format!("{:.6e}", m))
        .collect::<Vec<_>>()
        .join(",")
}

fn print_table(summary: &ChainSummary) {
    println!(
        "{:<24} | {:>13} | {:>14} | {:>16} | {:>13} | {:>28}",
        "Param", "Best-fit", "Posterior Mean", "Posterior Median", "Mode", "Credible region"
    );
    for p in &summary.parameters {
        println!(
            "{:<24} | {:>13.6e} | {:>14.6e} | {:>16.6e} | {:>13} | {:>13.6e} {:>14.6e}",
            p.name,
            p.best_fit,
            p.posterior_mean,
            p.posterior_median,
            format_modes(&p.posterior_modes),
            p.credible_lower,
            p.credible_upper
        );
    }

    println!("Min ChiSq {}", summary.min_chi_sq);
    if let Some(p_value) = summary.p_value {
        println!("p-value {}", p_value);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.stats_config()?;
    let chain = load_chain(&cli.chain, cli.info.as_deref())?;

    let summary = ChainSummary::compute(
        summary_parameters(&chain),
        chain.posterior_weight(),
        chain.chi_sq(),
        &config,
    )?;

    if summary.advisory_count() > 0 {
        tracing::warn!("{} advisories raised, see log above", summary.advisory_count());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_table(&summary);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CHAIN: &str = "\
0.05 4.0 -2.0 1.0 3.0
0.20 1.0 -1.0 2.0 0.5
0.50 0.0  0.0 3.0 0.0
0.20 1.0  1.0 4.0 0.5
0.05 4.0  2.0 5.0 3.0
";

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_overrides() {
        let cli = parse(&[
            "superplot-summary",
            "chain.txt",
            "--nbins",
            "20",
            "--bin-limits",
            "-1.5",
            "2.5",
            "--alpha",
            "0.0455",
            "--dof",
            "7",
            "--chain-order",
        ]);

        let config = cli.apply_overrides(StatsConfig::default()).unwrap();
        assert_eq!(config.nbins, 20);
        assert_eq!(config.bin_limits, Some(BinLimits::new(-1.5, 2.5)));
        assert_eq!(config.alpha, 0.0455);
        assert_eq!(config.dof, Some(7));
        assert_eq!(config.median_ordering, MedianOrdering::ChainOrder);
    }

    #[test]
    fn test_cli_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"nbins = 80\nalpha = 0.0455\nnorm_area = true\n")
            .unwrap();
        file.flush().unwrap();
        let path = file.path().to_str().unwrap();

        let cli = parse(&["superplot-summary", "chain.txt", "--config", path, "--nbins", "25"]);
        let config = cli.stats_config().unwrap();

        assert_eq!(config.nbins, 25);
        assert_eq!(config.alpha, 0.0455);
        assert!(config.norm_area);
    }

    #[test]
    fn test_cli_rejects_invalid_config() {
        let cli = parse(&["superplot-summary", "chain.txt", "--alpha", "1.5"]);
        assert!(cli.apply_overrides(StatsConfig::default()).is_err());
    }

    #[test]
    fn test_chi_sq_columns_left_out_of_summary() {
        let info = InfoFile::parse("lab2=$x$\nlab3=$y$\nlab4=$\\chi^2_{LHC}$\n").unwrap();
        let chain = Chain::from_reader(CHAIN.as_bytes()).unwrap().with_info(&info);

        let names: Vec<&str> = summary_parameters(&chain).map(|(name, _)| name).collect();
        assert_eq!(names, vec!["$x$", "$y$"]);

        let mut config = StatsConfig::new();
        config.nbins = 5;
        let summary = ChainSummary::compute(
            summary_parameters(&chain),
            chain.posterior_weight(),
            chain.chi_sq(),
            &config,
        )
        .unwrap();

        let names: Vec<&str> = summary.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["$x$", "$y$"]);
        assert_eq!(summary.parameters[0].best_fit, 0.0);
        assert_eq!(summary.parameters[1].best_fit, 3.0);
        assert_eq!(summary.min_chi_sq, 0.0);
    }

    #[test]
    fn test_format_modes() {
        assert_eq!(format_modes(&[1.0, 2.5]), "1.000000e0,2.500000e0");
    }
}
