//! pithos CLI - vessel profile volumetry from the terminal.
//!
//! Reads plain `height radius` sample files, computes enclosed volumes
//! by five numerical methods, classifies vessels on the Tsetlin scale,
//! and exports surface-of-revolution meshes as binary STL.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use pithos::{
    analyze_samples, classify_liters, stl, GroupStats, ProfileCurve, RevolutionMesh,
    VesselAnalysis, VolumeCalculator, VolumeMethod,
};

mod input;

#[derive(Parser)]
#[command(name = "pithos")]
#[command(about = "Axisymmetric vessel volumetry and classification", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a profile: volume, fill percentage, classification
    Analyze {
        /// Profile sample file (one "height radius" pair per line, cm)
        file: PathBuf,
        /// Volume method: disks, frustums, trapezoidal, simpson, spline
        #[arg(short, long, default_value = "spline")]
        method: String,
        /// Fill height (cm) to report the filled percentage at
        #[arg(short, long)]
        level: Option<f64>,
        /// Resample the normalized curve to this many uniform points
        /// before computing
        #[arg(short, long)]
        resample: Option<usize>,
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare all five volume methods against the spline reference
    Compare {
        /// Profile sample file
        file: PathBuf,
        /// Upper height (cm); defaults to the full profile
        #[arg(short, long)]
        level: Option<f64>,
    },
    /// Revolve a profile into a triangulated surface and write binary STL
    Mesh {
        /// Profile sample file
        file: PathBuf,
        /// Output STL path
        output: PathBuf,
        /// Angular segments of the revolution (minimum 3)
        #[arg(short, long, default_value_t = 64)]
        segments: usize,
        /// RDP simplification tolerance in cm (0 keeps every point)
        #[arg(short, long, default_value_t = 0.0)]
        epsilon: f64,
    },
    /// Look up a volume (liters) on the classification scale
    Classify {
        /// Volume in liters
        liters: f64,
    },
    /// Analyze several profiles sequentially, isolating failures
    Batch {
        /// Profile sample files
        files: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            method,
            level,
            resample,
            json,
        } => analyze(&file, &method, level, resample, json),
        Commands::Compare { file, level } => compare(&file, level),
        Commands::Mesh {
            file,
            output,
            segments,
            epsilon,
        } => mesh(&file, &output, segments, epsilon),
        Commands::Classify { liters } => {
            print_classification(liters);
            Ok(())
        }
        Commands::Batch { files } => batch(&files),
    }
}

#[derive(Serialize)]
struct AnalyzeReport<'a> {
    analysis: &'a VesselAnalysis,
    method: VolumeMethod,
    volume_cm3: f64,
    volume_l: f64,
    fill_level: Option<f64>,
    percent_filled: Option<f64>,
}

fn analyze(
    file: &Path,
    method: &str,
    level: Option<f64>,
    resample: Option<usize>,
    json: bool,
) -> Result<()> {
    let method: VolumeMethod = method.parse()?;
    let samples = input::read_samples(file)?;
    let name = input::profile_name(file);

    let mut curve = ProfileCurve::from_samples(&samples)?;
    if let Some(n) = resample {
        curve = curve.resample(n)?;
    }
    let analysis = pithos::analyze_curve(&name, curve.clone())?;
    let calc = VolumeCalculator::new(curve)?;
    let volume_cm3 = calc.volume(method, None)?;
    let percent_filled = match level {
        Some(level) => Some(calc.percent_filled(method, level)?),
        None => None,
    };

    if json {
        let report = AnalyzeReport {
            analysis: &analysis,
            method,
            volume_cm3,
            volume_l: volume_cm3 / 1000.0,
            fill_level: level,
            percent_filled,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Profile: {name}");
    println!("  Points:       {}", analysis.sample_count);
    println!("  Height:       {:.2} cm", analysis.height);
    println!("  Max diameter: {:.2} cm", analysis.max_diameter);
    println!();
    println!("Volume ({}):", method.label());
    println!("  {volume_cm3:.2} cm³ ({:.6} L)", volume_cm3 / 1000.0);
    if let (Some(level), Some(percent)) = (level, percent_filled) {
        println!("  Filled to {level:.2} cm: {percent:.1}%");
    }
    println!();
    let c = &analysis.classification;
    println!("Classification:");
    println!("  Group:    {} ({})", c.entry.group, c.quality_label());
    println!(
        "  Range:    {:.3} - {:.3} L (center {:.3} L)",
        c.entry.start_l, c.entry.end_l, c.entry.center_l
    );
    println!(
        "  Quality:  {}",
        if c.strict { "strict" } else { "transitional" }
    );
    println!(
        "  Mobility: class {} - {}",
        c.entry.mobility.index(),
        c.entry.mobility.label()
    );
    println!("  {}", c.entry.description);
    Ok(())
}

fn compare(file: &Path, level: Option<f64>) -> Result<()> {
    let samples = input::read_samples(file)?;
    let calc = VolumeCalculator::new(ProfileCurve::from_samples(&samples)?)?;
    let cmp = calc.compare_all(level);

    println!(
        "Volume up to {:.2} cm ({} profile points, {} fit):",
        cmp.upper,
        calc.curve().sample_count(),
        calc.interpolant_kind().label()
    );
    for mv in &cmp.volumes {
        match mv.volume {
            Some(v) => println!(
                "  {:<40} {:>12.2} cm³  {:>10.6} L",
                mv.method.label(),
                v,
                v / 1000.0
            ),
            None => println!("  {:<40} unavailable", mv.method.label()),
        }
    }

    if cmp.deviations.is_empty() {
        println!("\nNo reference volume available; deviations skipped.");
        return Ok(());
    }
    println!("\nDeviation from the spline reference:");
    for dev in &cmp.deviations {
        println!(
            "  {:<40} {:>+8.3}%  ({})",
            dev.method.label(),
            dev.signed_percent,
            dev.agreement.label()
        );
    }
    Ok(())
}

fn mesh(file: &Path, output: &Path, segments: usize, epsilon: f64) -> Result<()> {
    let samples = input::read_samples(file)?;
    let name = input::profile_name(file);
    let mut curve = ProfileCurve::from_samples(&samples)?;

    let original_points = curve.sample_count();
    if epsilon > 0.0 {
        curve = pithos::simplify_profile(&curve, epsilon)?;
    }

    let revolution = RevolutionMesh::build(&curve, segments)?;
    let triangles = revolution.triangulate();
    let bytes = stl::to_binary_stl_bytes(&triangles, &name);
    fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Wrote {} ({} triangles, {} vertices)",
        output.display(),
        triangles.num_triangles(),
        triangles.num_vertices()
    );
    if epsilon > 0.0 {
        println!(
            "Profile simplified: {} -> {} points (epsilon {epsilon})",
            original_points,
            curve.sample_count()
        );
    }
    Ok(())
}

fn print_classification(liters: f64) {
    let c = classify_liters(liters);
    println!("{liters} L -> group {} ({})", c.entry.group, c.quality_label());
    println!(
        "  Range:    {:.3} - {:.3} L (center {:.3} L)",
        c.entry.start_l, c.entry.end_l, c.entry.center_l
    );
    println!(
        "  Quality:  {}",
        if c.strict { "strict" } else { "transitional" }
    );
    println!(
        "  Mobility: class {} - {}",
        c.entry.mobility.index(),
        c.entry.mobility.label()
    );
    println!("  {}", c.entry.description);
}

fn batch(files: &[PathBuf]) -> Result<()> {
    let mut ok = Vec::new();
    let mut failed = 0usize;

    for file in files {
        let name = input::profile_name(file);
        let result = input::read_samples(file).and_then(|samples| {
            analyze_samples(&name, &samples).map_err(anyhow::Error::from)
        });
        match result {
            Ok(analysis) => {
                println!(
                    "{:<24} {:>10.2} cm³  group {:<5} {}",
                    analysis.name,
                    analysis.volume_cm3,
                    analysis.classification.entry.group,
                    analysis.classification.quality_label()
                );
                ok.push(analysis);
            }
            Err(err) => {
                failed += 1;
                eprintln!("{name:<24} FAILED: {err:#}");
            }
        }
    }

    if !ok.is_empty() {
        let stats = GroupStats::from_analyses(&ok);
        println!();
        println!(
            "{} vessels, {} failed | mean volume {:.2} cm³ | mean height {:.2} cm | total {:.2} cm³",
            stats.count, failed, stats.mean_volume_cm3, stats.mean_height, stats.total_volume_cm3
        );
    } else if failed > 0 {
        anyhow::bail!("all {failed} profiles failed");
    }
    Ok(())
}
