use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use mdplot::config::ViewerConfig;
use mdplot::data::category::MetricCategory;
use mdplot::data::session::{Session, ViewCommand};
use mdplot::gmx::GmxRunner;
use mdplot::persistence;
use mdplot::workdir::{has_results, stage_comparison, validate_folder};

#[derive(Parser)]
#[command(name = "mdplot")]
#[command(about = "Plot GROMACS .xvg analysis results", long_about = None)]
struct Cli {
    /// Simulation folder(s). More than one folder opens a side-by-side comparison.
    #[arg(required = true, num_args = 1..)]
    folders: Vec<PathBuf>,

    /// Viewer config YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// gmx binary (overrides the config)
    #[arg(long, value_name = "PATH")]
    gmx: Option<PathBuf>,

    /// Staging folder for comparisons (overrides the config)
    #[arg(long, value_name = "DIR")]
    staging: Option<PathBuf>,

    /// Run the gmx analysis first for folders without results
    #[arg(long, action = ArgAction::SetTrue)]
    analyse: bool,

    /// View state JSON to restore (styles, visibility, category)
    #[arg(long, value_name = "FILE")]
    state: Option<PathBuf>,

    /// Category subdirectory to show, e.g. RMSD, gyration, rmsf_rec
    #[arg(long)]
    category: Option<String>,

    /// Render the plot to this file (.png, .jpg, .pdf, .svg) and exit without a window
    #[arg(short, long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Raster export resolution (overrides the config)
    #[arg(long)]
    dpi: Option<u32>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut cfg = match ViewerConfig::load_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(gmx) = cli.gmx {
        cfg.gmx_path = gmx;
    }
    if let Some(staging) = cli.staging {
        cfg.staging_dir = staging;
    }
    if let Some(dpi) = cli.dpi {
        cfg.export.dpi = dpi;
    }

    let category = match cli.category.as_deref() {
        Some(name) => match MetricCategory::from_subdir(name) {
            Some(category) => Some(category),
            None => {
                log::error!("unknown category {:?}", name);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    if cli.analyse {
        let runner = GmxRunner::new(&cfg.gmx_path);
        for folder in cli.folders.iter().filter(|f| !has_results(f)) {
            let status = validate_folder(folder);
            if !status.is_valid() {
                log::warn!(
                    "skipping analysis of {}: missing {}",
                    folder.display(),
                    status.missing.join(", ")
                );
                continue;
            }
            match runner.run(folder) {
                Ok(report) if report.is_success() => {}
                Ok(report) => log::warn!("{}: {}", folder.display(), report.summary()),
                Err(e) => log::error!("{}: {}", folder.display(), e),
            }
        }
    }

    let workdir = if cli.folders.len() > 1 {
        match stage_comparison(&cli.folders, &cfg.staging_dir) {
            Ok(staging) => staging,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        let folder = cli.folders[0].clone();
        let status = validate_folder(&folder);
        if !status.is_valid() && !has_results(&folder) {
            log::warn!(
                "{} is missing {}",
                folder.display(),
                status.missing.join(", ")
            );
        }
        folder
    };

    let mut session = Session::open(workdir);
    session.export_settings = cfg.export;
    if let Some(path) = &cli.state {
        match persistence::load_state_from_path(path) {
            Ok(state) => state.apply_to(&mut session),
            Err(e) => log::warn!("ignoring view state: {}", e),
        }
    }
    if let Some(category) = category {
        if let Err(e) = session.apply(ViewCommand::SelectCategory(category)) {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = cli.export {
        return match session.apply(ViewCommand::Export {
            path: path.clone(),
            format: None,
        }) {
            Ok(()) => {
                log::info!("saved {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::error!("{}", e);
                ExitCode::FAILURE
            }
        };
    }

    match mdplot::run_viewer(session, cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("viewer failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
