use std::{fs::File, path::Path};

use threshold_blackjack::{
    best_configuration, simulate_parallel, GameError, Rule, SimulationResult, Simulator, Tally,
    ThresholdConfig,
};
use threshold_blackjack_drivers::ConfigSimulator;

pub struct Report {
    pub config: ThresholdConfig,
    pub result: SimulationResult,
    pub tally: Tally,
}

/// Plays every threshold config. With one thread all configs share a single random
/// stream seeded once; otherwise each config runs on per-worker streams of the seed.
pub fn simulate_thresholds(
    rule: &Rule,
    thresholds: &[ThresholdConfig],
    simulator_config: &ConfigSimulator,
) -> Result<Vec<Report>, GameError> {
    let mut reports = Vec::with_capacity(thresholds.len());
    if simulator_config.number_of_threads == 1 {
        let mut simulator = Simulator::new(rule, simulator_config.seed);
        for config in thresholds {
            let mut tally = Tally::default();
            let result = simulator.simulate(config, simulator_config.iterations, &mut tally)?;
            reports.push(Report {
                config: config.clone(),
                result,
                tally,
            });
        }
    } else {
        for config in thresholds {
            let (result, tally) = simulate_parallel(
                rule,
                config,
                simulator_config.iterations,
                simulator_config.number_of_threads,
                simulator_config.seed,
            )?;
            reports.push(Report {
                config: config.clone(),
                result,
                tally,
            });
        }
    }
    Ok(reports)
}

pub fn print_reports(reports: &[Report]) {
    const WIDTH: usize = 60;
    for report in reports {
        let header = format!(
            " {} (good {}, fair {}, poor {}) ",
            report.config.name, report.config.good, report.config.fair, report.config.poor
        );
        println!("{:-^WIDTH$}", header);
        println!("{}", report.tally);
        println!("{:<37}{:>23.2}", "total return", report.result.total);
        println!("{:<37}{:>23.6}", "mean return per game", report.result.mean());
        println!("{}", "-".repeat(WIDTH));
    }

    if let Some(best) = best_report(reports) {
        println!(
            "best thresholds: {} with a total return of {:.2}",
            best.config.name, best.result.total
        );
    }
}

pub fn best_report(reports: &[Report]) -> Option<&Report> {
    best_configuration(reports.iter().map(|r| &r.result)).map(|i| &reports[i])
}

pub fn write_results(path: &Path, reports: &[Report]) -> Result<(), Box<dyn std::error::Error>> {
    let results: Vec<&SimulationResult> = reports.iter().map(|r| &r.result).collect();
    let file = File::create(path)?;
    serde_yaml::to_writer(file, &results)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_typical_simulator_config(number_of_threads: usize) -> ConfigSimulator {
        ConfigSimulator {
            iterations: 200,
            seed: 42,
            number_of_threads,
        }
    }

    #[test]
    fn every_config_gets_a_report() {
        let thresholds = vec![
            ThresholdConfig::new("a", 17, 13, 12),
            ThresholdConfig::new("b", 15, 12, 12),
        ];
        for threads in [1, 3] {
            let reports = simulate_thresholds(
                &Rule::default(),
                &thresholds,
                &get_typical_simulator_config(threads),
            )
            .unwrap();
            assert_eq!(reports.len(), 2);
            for report in &reports {
                assert_eq!(report.result.running_total.len(), 200);
                assert_eq!(report.tally.games(), 200);
            }
        }
    }

    #[test]
    fn best_report_keeps_first_maximum() {
        let report = |name: &str, outcomes: Vec<f64>| Report {
            config: ThresholdConfig::new(name, 17, 13, 12),
            result: SimulationResult::from_outcomes(name, outcomes),
            tally: Tally::default(),
        };
        let reports = vec![
            report("a", vec![-1.0]),
            report("b", vec![1.0, 0.5]),
            report("c", vec![1.5]),
        ];
        assert_eq!(best_report(&reports).map(|r| r.config.name.as_str()), Some("b"));
        assert!(best_report(&[]).is_none());
    }

    #[test]
    fn writes_yaml_results() {
        let thresholds = vec![ThresholdConfig::new("a", 17, 13, 12)];
        let reports = simulate_thresholds(
            &Rule::default(),
            &thresholds,
            &get_typical_simulator_config(1),
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.yml");
        write_results(&path, &reports).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<SimulationResult> = serde_yaml::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].total, reports[0].result.total);
        assert_eq!(parsed[0].running_total.len(), 200);
    }
}
