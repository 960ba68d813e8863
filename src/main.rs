/*
    Cameron Emmanuel
    Nov - 05 - 2025
 */

use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use transit_vetter::characterization::planet_parameters::PlanetParameters;
use transit_vetter::constants::minutes_to_days;
use transit_vetter::data_access::{search_and_stitch, write_folded_csv};
use transit_vetter::plotting::write_report_plots;
use transit_vetter::report::render;
use transit_vetter::stellar::{CatalogStellarParameters, StellarParameters};
use transit_vetter::{run_vetting, VettingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "transit-vetter",
    about = "Vetting statistics for TESS transit candidates",
    long_about = None
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every vetting check on local sector files
    Vet {
        /// Light-curve files (CSV, or FITS with the `fits` feature), one per sector
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Target configuration (TOML). Defaults to TOI 864.01
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the sigma-clipping threshold from the configuration
        #[arg(long)]
        clip_sigma: Option<f64>,

        /// Directory to write SVG figures into
        #[arg(long)]
        plots: Option<PathBuf>,

        /// Write the folded, binned light curve to this CSV file
        #[arg(long)]
        export_folded: Option<PathBuf>,

        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Derive planet parameters from a depth and period only
    Params {
        /// Transit depth in ppm
        #[arg(long)]
        depth_ppm: f64,

        /// Orbital period in days
        #[arg(long)]
        period: f64,

        /// Stellar radius in solar radii (solar if omitted)
        #[arg(long)]
        radius: Option<f64>,

        /// Stellar mass in solar masses (solar if omitted)
        #[arg(long)]
        mass: Option<f64>,

        /// Stellar effective temperature in K (solar if omitted)
        #[arg(long)]
        teff: Option<f64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::Vet {
            files,
            config,
            clip_sigma,
            plots,
            export_folded,
            json,
        } => {
            let mut config = match config {
                Some(path) => VettingConfig::from_file(&path)?,
                None => VettingConfig::toi_864_01(),
            };
            if let Some(k) = clip_sigma {
                config.processing.clip_sigma = k;
                config.validate()?;
            }

            let lc = search_and_stitch(&files, config.processing.clip_sigma)?;
            let report = run_vetting(&config, &lc)?;

            if let Some(dir) = plots {
                write_report_plots(&dir, &report, config.processing.plot_bin_days)?;
            }
            if let Some(path) = export_folded {
                write_folded_csv(
                    &path,
                    &lc,
                    config.signal.period_days,
                    config.signal.epoch,
                    minutes_to_days(config.processing.export_bin_minutes),
                )?;
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render(&report));
            }
        }
        Command::Params {
            depth_ppm,
            period,
            radius,
            mass,
            teff,
        } => {
            let star = StellarParameters::resolve(&CatalogStellarParameters { radius, mass, teff });
            info!("host star: {}", star.params);
            let planet = PlanetParameters::derive(&star.params, depth_ppm, period);
            println!("Star: {}", star.params);
            for sub in &star.substitutions {
                println!("  note: {sub}");
            }
            println!("{planet}");
        }
    }

    Ok(())
}
