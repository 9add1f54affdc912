use clap::{Args, Parser, Subcommand, ValueEnum};
use ps_app::{
    Advisory, AppError, AppResult, ExportFormat, Scenario, SweepPoint, advisories, describe,
    export, simulate_scenario, sweep, validate_scenario,
};
use ps_controls::GainTerm;
use ps_metrics::PerformanceMetrics;
use ps_plant::{PlantKind, PlantParameters};
use ps_sim::OpenLoopDrive;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ps-cli")]
#[command(about = "SimPID CLI - PID step response simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate open- and closed-loop step responses and print the metrics
    Run {
        /// Scenario file (YAML or JSON); flags override its values
        scenario: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
        /// Print metrics and advisories as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a scenario file without running it
    Validate {
        /// Scenario file (YAML or JSON)
        scenario: PathBuf,
    },
    /// Show transfer functions, poles, tuning advice and valid ranges
    Describe {
        /// Scenario file (YAML or JSON); flags override its values
        scenario: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
        /// Print the description as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rerun a scenario for several values of one gain
    Sweep {
        /// Scenario file (YAML or JSON)
        scenario: PathBuf,
        /// Gain to vary
        #[arg(long, value_enum)]
        gain: GainArg,
        /// Comma-separated gain values
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<f64>,
        /// Print the sweep as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export trajectories of a scenario run
    Export {
        /// Scenario file (YAML or JSON)
        scenario: PathBuf,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format: csv or json
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
    },
}

/// Values that replace those of the scenario (or of the defaults).
#[derive(Args, Default)]
struct Overrides {
    /// Plant type
    #[arg(long, value_enum)]
    kind: Option<KindArg>,
    /// Plant gain K
    #[arg(long)]
    k: Option<f64>,
    /// Time constant τ (first-order plant)
    #[arg(long)]
    tau: Option<f64>,
    /// Natural frequency ωn (second-order plant)
    #[arg(long)]
    wn: Option<f64>,
    /// Damping ratio ζ (second-order plant)
    #[arg(long)]
    zeta: Option<f64>,
    /// Proportional gain
    #[arg(long)]
    kp: Option<f64>,
    /// Integral gain
    #[arg(long)]
    ki: Option<f64>,
    /// Derivative gain
    #[arg(long)]
    kd: Option<f64>,
    /// Simulated time in seconds
    #[arg(long)]
    horizon: Option<f64>,
    /// Integration step in seconds
    #[arg(long)]
    dt: Option<f64>,
    /// Input applied in the open-loop run
    #[arg(long, value_enum)]
    open_loop_drive: Option<DriveArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    FirstOrder,
    SecondOrder,
    Integrator,
}

impl From<KindArg> for PlantKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::FirstOrder => PlantKind::FirstOrder,
            KindArg::SecondOrder => PlantKind::SecondOrder,
            KindArg::Integrator => PlantKind::Integrator,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum GainArg {
    Kp,
    Ki,
    Kd,
}

impl From<GainArg> for GainTerm {
    fn from(arg: GainArg) -> Self {
        match arg {
            GainArg::Kp => GainTerm::Kp,
            GainArg::Ki => GainTerm::Ki,
            GainArg::Kd => GainTerm::Kd,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DriveArg {
    Reference,
    Zero,
}

impl From<DriveArg> for OpenLoopDrive {
    fn from(arg: DriveArg) -> Self {
        match arg {
            DriveArg::Reference => OpenLoopDrive::Reference,
            DriveArg::Zero => OpenLoopDrive::Zero,
        }
    }
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            scenario,
            overrides,
            json,
        } => cmd_run(scenario.as_deref(), &overrides, json),
        Commands::Validate { scenario } => cmd_validate(&scenario),
        Commands::Describe {
            scenario,
            overrides,
            json,
        } => cmd_describe(scenario.as_deref(), &overrides, json),
        Commands::Sweep {
            scenario,
            gain,
            values,
            json,
        } => cmd_sweep(&scenario, gain.into(), &values, json),
        Commands::Export {
            scenario,
            output,
            format,
        } => cmd_export(&scenario, output.as_deref(), format),
    }
}

fn set(slot: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn reject(name: &str, value: Option<f64>, kind: PlantKind) -> AppResult<()> {
    match value {
        Some(_) => Err(AppError::InvalidInput(format!(
            "--{name} does not apply to a {kind} plant"
        ))),
        None => Ok(()),
    }
}

fn build_scenario(path: Option<&Path>, o: &Overrides) -> AppResult<Scenario> {
    let mut scenario = match path {
        Some(path) => ps_app::load(path)?,
        None => Scenario::new("command line", PlantParameters::default()),
    };

    if let Some(kind) = o.kind.map(PlantKind::from)
        && scenario.plant.kind() != kind
    {
        scenario.plant = PlantParameters::default_for(kind);
    }
    let kind = scenario.plant.kind();
    match &mut scenario.plant {
        PlantParameters::FirstOrder { k, tau } => {
            set(k, o.k);
            set(tau, o.tau);
            reject("wn", o.wn, kind)?;
            reject("zeta", o.zeta, kind)?;
        }
        PlantParameters::SecondOrder { k, wn, zeta } => {
            set(k, o.k);
            set(wn, o.wn);
            set(zeta, o.zeta);
            reject("tau", o.tau, kind)?;
        }
        PlantParameters::Integrator { k } => {
            set(k, o.k);
            reject("tau", o.tau, kind)?;
            reject("wn", o.wn, kind)?;
            reject("zeta", o.zeta, kind)?;
        }
    }

    set(&mut scenario.gains.kp, o.kp);
    set(&mut scenario.gains.ki, o.ki);
    set(&mut scenario.gains.kd, o.kd);
    set(&mut scenario.simulation.horizon, o.horizon);
    set(&mut scenario.simulation.step_size, o.dt);
    if let Some(drive) = o.open_loop_drive {
        scenario.simulation.open_loop_drive = drive.into();
    }

    validate_scenario(&scenario)?;
    tracing::debug!(plant = %scenario.plant, controller = %scenario.gains, "scenario ready");
    Ok(scenario)
}

fn fmt_time(t: Option<f64>) -> String {
    match t {
        Some(t) => format!("{:.2} s", t),
        None => "not reached".to_string(),
    }
}

fn print_metrics(metrics: &PerformanceMetrics) {
    println!("  Settling time:      {}", fmt_time(metrics.settling_time));
    println!("  Overshoot:          {:.1}%", metrics.overshoot_percent);
    println!("  Rise time:          {}", fmt_time(metrics.rise_time));
    println!("  Steady-state error: {:.4}", metrics.steady_state_error);
}

#[derive(Serialize)]
struct RunReport<'a> {
    scenario: &'a Scenario,
    metrics: &'a PerformanceMetrics,
    advisories: Vec<Advisory>,
}

fn cmd_run(path: Option<&Path>, overrides: &Overrides, json: bool) -> AppResult<()> {
    let scenario = build_scenario(path, overrides)?;
    let result = simulate_scenario(&scenario)?;
    let notes = advisories(&result.metrics);

    if json {
        let report = RunReport {
            scenario: &scenario,
            metrics: &result.metrics,
            advisories: notes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Plant:      {}", scenario.plant);
    println!("Controller: {}", scenario.gains);
    println!(
        "  horizon = {:.2} s, dt = {:.4} s, {} samples",
        scenario.simulation.horizon,
        scenario.simulation.step_size,
        result.closed_loop.len()
    );
    if let (Some(open), Some(closed)) = (
        result.open_loop.final_output(),
        result.closed_loop.final_output(),
    ) {
        println!("  Final output: open loop {:.4}, closed loop {:.4}", open, closed);
    }

    println!("\nClosed-loop metrics:");
    print_metrics(&result.metrics);

    if notes.is_empty() {
        println!("\n✓ Response meets the overshoot and steady-state targets");
    } else {
        println!("\nAdvisories:");
        for note in notes {
            println!("  ! {}", note);
        }
    }

    Ok(())
}

fn cmd_validate(path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", path.display());
    let scenario = ps_app::load(path)?;
    println!("✓ Scenario is valid");
    if !scenario.name.is_empty() {
        println!("  Name: {}", scenario.name);
    }
    println!("  Plant: {}", scenario.plant);
    println!("  Controller: {}", scenario.gains);
    Ok(())
}

fn cmd_describe(path: Option<&Path>, overrides: &Overrides, json: bool) -> AppResult<()> {
    let scenario = build_scenario(path, overrides)?;
    let d = describe(&scenario.plant, &scenario.gains);

    if json {
        println!("{}", serde_json::to_string_pretty(&d)?);
        return Ok(());
    }

    println!("Plant: {} ({})", d.plant.kind, d.plant.transfer_function);
    println!("  Behavior: {}", d.plant.behavior);
    println!("  DC gain:  {}", d.plant.dc_gain);
    println!("  Type:     {}", d.plant.system_type);
    let poles: Vec<String> = d.plant.poles.iter().map(|p| p.to_string()).collect();
    println!("  Poles:    {}", poles.join(", "));
    if let Some(tau) = d.plant.time_constant {
        println!("  Time constant:     {} s", tau);
    }
    if let Some(wn) = d.plant.natural_frequency {
        println!("  Natural frequency: {} rad/s", wn);
    }
    if let Some(zeta) = d.plant.damping_ratio {
        println!("  Damping ratio:     {}", zeta);
    }

    println!("\nController: {}", d.controller);
    for advice in &d.gain_advice {
        let mark = if advice.ok { "✓" } else { "!" };
        println!("  {} {}: {}", mark, advice.term, advice.note);
    }

    println!("\nParameters:");
    for p in &d.parameters {
        println!(
            "  {:<5} = {:<8} valid [{}, {}]",
            p.field, p.value, p.range.min, p.range.max
        );
    }
    Ok(())
}

fn cmd_sweep(path: &Path, term: GainTerm, values: &[f64], json: bool) -> AppResult<()> {
    let scenario = ps_app::load(path)?;
    let points: Vec<SweepPoint> = sweep(&scenario.request(), term, values, &scenario.metrics)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!("Sweeping {} for scenario: {}", term, path.display());
    println!(
        "  {:>8}  {:>10}  {:>10}  {:>10}  {:>12}",
        term, "settling", "overshoot", "rise", "sse"
    );
    for p in &points {
        let m = &p.metrics;
        println!(
            "  {:>8.3}  {:>10}  {:>9.1}%  {:>10}  {:>12.4}",
            p.value,
            fmt_time(m.settling_time),
            m.overshoot_percent,
            fmt_time(m.rise_time),
            m.steady_state_error
        );
    }
    Ok(())
}

fn cmd_export(path: &Path, output: Option<&Path>, format: ExportFormat) -> AppResult<()> {
    let scenario = ps_app::load(path)?;
    let result = simulate_scenario(&scenario)?;
    let content = export(&result, format)?;

    if let Some(out) = output {
        std::fs::write(out, content).map_err(|source| AppError::FileWrite {
            path: out.to_path_buf(),
            source,
        })?;
        println!(
            "✓ Exported {} samples to {}",
            result.closed_loop.len(),
            out.display()
        );
    } else {
        print!("{}", content);
    }
    Ok(())
}
