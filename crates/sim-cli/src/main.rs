use std::env;

use contracts::{ArchitectChoice, LogRecord, ScenarioConfig, Theme};
use sim_core::agents::{Agent, AgentKind, AgentRunner, DEFAULT_MAX_TICKS};
use sim_core::catalog;
use sim_core::report;
use sim_core::sink::JsonlSink;
use sim_core::timeline::TimelineRunner;
use sim_core::world::World;

fn print_usage() {
    println!("sim-cli <command> [options]");
    println!("commands:");
    println!("  timeline    replay the scripted trilogy");
    println!("  agents      let Neo, Smith, and the Machines act per tick");
    println!("options:");
    println!("  --scenario <name>        canon | zion_falls | neo_chooses_zion");
    println!("  --architect <choice>     TRINITY | ZION");
    println!("  --smith-rate <float>     Smith growth per spread event");
    println!("  --zion-intensity <float> defense lost per assault");
    println!("  --final-bonus <int>      Neo's bonus in the final fight");
    println!("  --jsonl <path>           append records to a JSONL file (timeline only)");
    println!("  --ticks <n>              agent-mode round cap (default 12)");
    println!("  --seed <n>               agent rng seed (policies are deterministic)");
    println!("  --print-report           theme coverage and final snapshot");
    println!("  --query-theme <tag>      list events carrying a theme");
}

fn parse_u64(value: Option<&String>, label: &str) -> Result<u64, String> {
    let raw = value.ok_or_else(|| format!("missing {}", label))?;
    raw.parse::<u64>()
        .map_err(|_| format!("invalid {}: {}", label, raw))
}

fn parse_i64(value: Option<&String>, label: &str) -> Result<i64, String> {
    let raw = value.ok_or_else(|| format!("missing {}", label))?;
    raw.parse::<i64>()
        .map_err(|_| format!("invalid {}: {}", label, raw))
}

fn parse_f64(value: Option<&String>, label: &str) -> Result<f64, String> {
    let raw = value.ok_or_else(|| format!("missing {}", label))?;
    raw.parse::<f64>()
        .map_err(|_| format!("invalid {}: {}", label, raw))
}

fn parse_architect(value: Option<&String>) -> Result<ArchitectChoice, String> {
    let raw = value.ok_or_else(|| "missing architect".to_string())?;
    ArchitectChoice::parse(raw).ok_or_else(|| format!("invalid architect: {raw}"))
}

#[derive(Debug, Default)]
struct CliOptions {
    scenario: Option<String>,
    architect: Option<ArchitectChoice>,
    smith_rate: Option<f64>,
    zion_intensity: Option<f64>,
    final_bonus: Option<i64>,
    jsonl: Option<String>,
    ticks: Option<u64>,
    seed: Option<u64>,
    print_report: bool,
    query_theme: Option<String>,
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut index = 2;
    while index < args.len() {
        let flag = args[index].as_str();
        let value = args.get(index + 1);
        match flag {
            "--scenario" => {
                options.scenario =
                    Some(value.cloned().ok_or_else(|| "missing scenario".to_string())?);
                index += 2;
            }
            "--architect" => {
                options.architect = Some(parse_architect(value)?);
                index += 2;
            }
            "--smith-rate" => {
                options.smith_rate = Some(parse_f64(value, "smith-rate")?);
                index += 2;
            }
            "--zion-intensity" => {
                options.zion_intensity = Some(parse_f64(value, "zion-intensity")?);
                index += 2;
            }
            "--final-bonus" => {
                options.final_bonus = Some(parse_i64(value, "final-bonus")?);
                index += 2;
            }
            "--jsonl" => {
                options.jsonl = Some(value.cloned().ok_or_else(|| "missing jsonl".to_string())?);
                index += 2;
            }
            "--ticks" => {
                options.ticks = Some(parse_u64(value, "ticks")?);
                index += 2;
            }
            "--seed" => {
                options.seed = Some(parse_u64(value, "seed")?);
                index += 2;
            }
            "--print-report" => {
                options.print_report = true;
                index += 1;
            }
            "--query-theme" => {
                options.query_theme =
                    Some(value.cloned().ok_or_else(|| "missing query-theme".to_string())?);
                index += 2;
            }
            other => return Err(format!("unknown option: {other}")),
        }
    }
    Ok(options)
}

fn scenario_config(name: &str) -> Result<ScenarioConfig, String> {
    match name {
        "canon" => Ok(ScenarioConfig::default()),
        "zion_falls" => Ok(ScenarioConfig {
            architect_choice: ArchitectChoice::Trinity,
            smith_rate: 0.45,
            zion_intensity: 0.40,
            final_bonus: 6,
        }),
        "neo_chooses_zion" => Ok(ScenarioConfig {
            architect_choice: ArchitectChoice::Zion,
            smith_rate: 0.15,
            zion_intensity: 0.15,
            final_bonus: 6,
        }),
        other => Err(format!("unknown scenario: {other}")),
    }
}

/// Preset first, then flag overrides on top.
fn build_config(options: &CliOptions) -> Result<ScenarioConfig, String> {
    let mut config = match &options.scenario {
        Some(name) => scenario_config(name)?,
        None => ScenarioConfig::default(),
    };
    if let Some(choice) = options.architect {
        config.architect_choice = choice;
    }
    if let Some(rate) = options.smith_rate {
        config.smith_rate = rate;
    }
    if let Some(intensity) = options.zion_intensity {
        config.zion_intensity = intensity;
    }
    if let Some(bonus) = options.final_bonus {
        config.final_bonus = bonus;
    }
    Ok(config)
}

fn print_report_and_query(log: &[LogRecord], options: &CliOptions) -> Result<(), String> {
    if !options.print_report && options.query_theme.is_none() {
        return Ok(());
    }

    println!();
    println!("=== Theme Coverage ===");
    for (theme, count) in report::theme_counts(log) {
        println!("{}: {}", theme.as_str(), count);
    }

    println!();
    println!("=== Final Snapshot ===");
    if let Some(record) = log.last() {
        let pretty =
            serde_json::to_string_pretty(&record.snapshot).map_err(|err| err.to_string())?;
        println!("{pretty}");
    }

    if let Some(raw) = &options.query_theme {
        let tag = raw.trim().to_uppercase();
        println!();
        println!("=== Events with theme {tag} ===");
        if let Some(theme) = Theme::parse(&tag) {
            for record in report::records_with_theme(log, theme) {
                println!("{} :: {} - {}", record.movie, record.event, record.desc);
            }
        }
    }
    Ok(())
}

fn run_timeline(args: &[String]) -> Result<(), String> {
    let options = parse_options(args)?;
    let config = build_config(&options)?;
    let script = catalog::trilogy_script(&config);
    let world = World::with_trilogy_cast();

    let runner = match &options.jsonl {
        Some(path) => TimelineRunner::with_sink(world, JsonlSink::new(path)),
        None => TimelineRunner::new(world),
    };
    let finished = runner.run(&script).map_err(|err| err.to_string())?;

    println!("{}", report::format_timeline(finished.log()));
    print_report_and_query(finished.log(), &options)
}

fn run_agents(args: &[String]) -> Result<(), String> {
    let options = parse_options(args)?;
    // scenario flags only shape the scripted catalog; validated, then unused here
    build_config(&options)?;

    let seed = options.seed.unwrap_or(0);
    let max_ticks = options.ticks.unwrap_or(DEFAULT_MAX_TICKS);
    let mut agents = vec![
        Agent::new("NeoAgent", AgentKind::Neo, seed),
        Agent::new("SmithAgent", AgentKind::Smith, seed.wrapping_add(1)),
        Agent::new("MachineAgent", AgentKind::Machines, seed.wrapping_add(2)),
    ];

    let finished = AgentRunner::new(World::with_trilogy_cast(), seed, max_ticks)
        .run(&mut agents)
        .map_err(|err| err.to_string())?;

    println!("{}", report::format_timeline(finished.log()));
    print_report_and_query(finished.log(), &options)
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str);

    match command {
        Some("timeline") => {
            if let Err(err) = run_timeline(&args) {
                eprintln!("error: {err}");
                print_usage();
                std::process::exit(2);
            }
        }
        Some("agents") => {
            if let Err(err) = run_agents(&args) {
                eprintln!("error: {err}");
                print_usage();
                std::process::exit(2);
            }
        }
        _ => {
            print_usage();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_map_to_their_reference_knobs() {
        assert_eq!(
            scenario_config("canon").expect("canon preset"),
            ScenarioConfig::default()
        );

        let falls = scenario_config("zion_falls").expect("zion_falls preset");
        assert_eq!(falls.architect_choice, ArchitectChoice::Trinity);
        assert_eq!(falls.smith_rate, 0.45);
        assert_eq!(falls.zion_intensity, 0.40);
        assert_eq!(falls.final_bonus, 6);

        let reset = scenario_config("neo_chooses_zion").expect("neo_chooses_zion preset");
        assert_eq!(reset.architect_choice, ArchitectChoice::Zion);
        assert_eq!(reset.smith_rate, 0.15);
        assert_eq!(reset.zion_intensity, 0.15);
        assert_eq!(reset.final_bonus, 6);

        assert!(scenario_config("matrix_online").is_err());
    }

    #[test]
    fn flags_override_preset_fields() {
        let args: Vec<String> = [
            "sim-cli",
            "timeline",
            "--scenario",
            "zion_falls",
            "--smith-rate",
            "0.2",
        ]
        .iter()
        .map(|raw| raw.to_string())
        .collect();

        let options = parse_options(&args).expect("options parse");
        let config = build_config(&options).expect("config builds");
        assert_eq!(config.smith_rate, 0.2);
        assert_eq!(config.zion_intensity, 0.40);
        assert_eq!(config.architect_choice, ArchitectChoice::Trinity);
        assert_eq!(config.final_bonus, 6);
    }
}
