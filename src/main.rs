//! Control Room - entry point
//!
//! Interactive console for the plant simulation: parses the run
//! configuration, then loops on operator commands. The console is a
//! pure presentation layer - it only reads snapshots and calls action
//! handlers, never computes physics.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tokio::runtime::Runtime;

use control_room::core::error::Result;
use control_room::{
    Difficulty, PlantController, PlantState, ReactorType, Scenario, SimConfig, SimParams,
};

#[derive(Parser, Debug)]
#[command(name = "control-room", about = "Nuclear power plant simulator")]
struct Args {
    /// Reactor design variant
    #[arg(long, value_enum, default_value = "pwr")]
    reactor: ReactorType,

    /// Accident / operational scenario
    #[arg(long, value_enum, default_value = "normal")]
    scenario: Scenario,

    /// Difficulty tier
    #[arg(long, value_enum, default_value = "normal")]
    difficulty: Difficulty,

    /// Start from a fully cold, shut-down plant
    #[arg(long)]
    cold_start: bool,

    /// Require manual grid synchronization before breaker closure
    #[arg(long)]
    manual_sync: bool,

    /// Enable boron (chemical shim) reactivity control
    #[arg(long)]
    chemical_shim: bool,

    /// Tick interval in milliseconds
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// Seed for the per-region flux jitter
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Load the run configuration from a TOML file instead of flags
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "control_room=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::from_toml_file(path)?,
        None => SimConfig {
            reactor: args.reactor,
            scenario: args.scenario,
            difficulty: args.difficulty,
            cold_start: args.cold_start,
            manual_sync: args.manual_sync,
            chemical_shim: args.chemical_shim,
        },
    };
    let params = SimParams {
        tick_interval_ms: args.tick_ms,
        seed: args.seed,
    };

    tracing::info!(?config, "control room starting");

    let rt = Runtime::new()?;
    let mut controller = PlantController::new(config, params);

    println!("\n=== CONTROL ROOM ===");
    println!(
        "{:?} reactor, scenario {:?}, difficulty {:?}",
        config.reactor, config.scenario, config.difficulty
    );
    println!();
    println!("Commands:");
    println!("  tick / t          - Advance simulation by one tick");
    println!("  run <n>           - Run n ticks immediately");
    println!("  auto <secs>       - Run in real time for n seconds");
    println!("  rod <0-100>       - Set control rod insertion");
    println!("  pumps <0-100>     - Set coolant pump speed");
    println!("  feed <0-100>      - Set feedwater flow");
    println!("  boron <ppm>       - Set boron concentration");
    println!("  breaker           - Toggle the generator breaker");
    println!("  scram             - Manual scram");
    println!("  reset             - Hard reset to the cold default plant");
    println!("  reset-scenario    - Restart with the scenario preset");
    println!("  status / s        - Show the full panel");
    println!("  json              - Dump the state snapshot as JSON");
    println!("  quit / q          - Exit");
    println!();

    loop {
        display_status(&controller.snapshot());

        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            controller.step();
            continue;
        }

        if let Some(n) = input.strip_prefix("run ") {
            match n.trim().parse::<u32>() {
                Ok(n) => {
                    for _ in 0..n {
                        controller.step();
                    }
                    println!("Completed {} ticks.", n);
                }
                Err(_) => println!("Usage: run <number>"),
            }
            continue;
        }

        if let Some(secs) = input.strip_prefix("auto ") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => {
                    let ticks = secs * 1000 / params.tick_interval_ms.max(1);
                    println!("Running {} ticks in real time...", ticks);
                    rt.block_on(control_room::simulation::scheduler::drive(
                        &mut controller,
                        ticks,
                        |s| {
                            if s.tick_count % 10 == 0 {
                                print_ticker_line(s);
                            }
                        },
                    ));
                }
                Err(_) => println!("Usage: auto <seconds>"),
            }
            continue;
        }

        if let Some(v) = input.strip_prefix("rod ") {
            match v.trim().parse::<f64>() {
                Ok(v) => controller.set_rod_position(v),
                Err(_) => println!("Usage: rod <0-100>"),
            }
            continue;
        }

        if let Some(v) = input.strip_prefix("pumps ") {
            match v.trim().parse::<f64>() {
                Ok(v) => controller.set_pump_speed(v),
                Err(_) => println!("Usage: pumps <0-100>"),
            }
            continue;
        }

        if let Some(v) = input.strip_prefix("feed ") {
            match v.trim().parse::<f64>() {
                Ok(v) => controller.set_feedwater_flow(v),
                Err(_) => println!("Usage: feed <0-100>"),
            }
            continue;
        }

        if let Some(v) = input.strip_prefix("boron ") {
            match v.trim().parse::<f64>() {
                Ok(v) => controller.set_boron_concentration(v),
                Err(_) => println!("Usage: boron <ppm>"),
            }
            continue;
        }

        match input {
            "breaker" => controller.toggle_breaker(),
            "scram" => controller.scram(),
            "reset" => controller.reset(),
            "reset-scenario" => controller.reset_with_config(),
            "status" | "s" => display_panel(&controller.snapshot()),
            "json" => println!("{}", serde_json::to_string_pretty(&controller.snapshot())?),
            _ => println!("Unknown command: {input}"),
        }
    }

    println!("Shutting down.");
    Ok(())
}

/// One-line summary shown before every prompt
fn display_status(s: &PlantState) {
    println!(
        "[{:>9}] tick {:>6} | flux {:>6.1}% | fuel {:>7.1}C | pri {:>5.2} MPa | {:>6.1} MW | rods {:>5.1} | alarms: {}",
        s.status.label(),
        s.tick_count,
        s.neutron_flux,
        s.fuel_temp,
        s.pressure,
        s.output_mw,
        s.control_rod_position,
        if s.alarms.is_empty() {
            "none".to_string()
        } else {
            s.alarms.join(", ")
        }
    );
}

fn print_ticker_line(s: &PlantState) {
    println!(
        "  t={:<6} flux {:>6.1}%  fuel {:>7.1}C  turbine {:>6.0} RPM  {:>6.1} MW",
        s.tick_count, s.neutron_flux, s.fuel_temp, s.turbine_speed, s.output_mw
    );
}

/// Full control-panel readout
fn display_panel(s: &PlantState) {
    println!("--- CORE ---");
    println!("  rods      {:>6.1} %", s.control_rod_position);
    println!("  flux      {:>6.1} %", s.neutron_flux);
    println!("  xenon     {:>6.1}", s.xenon_level);
    println!("  boron     {:>6.1} ppm", s.boron_concentration);
    println!("--- THERMAL ---");
    println!("  fuel      {:>7.1} C", s.fuel_temp);
    println!("  coolant   {:>7.1} C", s.coolant_temp);
    println!("  primary   {:>6.2} MPa", s.pressure);
    println!("  steam     {:>6.2} MPa", s.steam_pressure);
    println!("  condenser {:>7.1} C", s.condenser_temp);
    println!("  tower eff {:>6.1} %", s.cooling_tower_efficiency);
    println!("--- CORE GRID ---");
    for row in s.core_regions.chunks(3) {
        let cells: Vec<String> = row.iter().map(|r| format!("{:>7.1}C", r.temp)).collect();
        println!("  {}", cells.join("  "));
    }
    println!("--- ELECTRICAL ---");
    println!("  turbine   {:>6.0} RPM ({:.2} Hz)", s.turbine_speed, s.turbine_freq);
    println!("  phase     {:>6.1} deg (grid {:.2} Hz)", s.turbine_phase, s.grid_freq);
    println!(
        "  breaker   {}",
        if s.breaker_open { "OPEN" } else { "CLOSED" }
    );
    println!("  output    {:>6.1} MW", s.output_mw);
    println!("--- STATUS: {} ---", s.status.label());
    for alarm in &s.alarms {
        println!("  !! {alarm}");
    }
}
