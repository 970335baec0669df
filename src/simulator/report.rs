//! Simulation report generation.

use super::config::SimConfig;
use crate::constants::ENEMY_SPAWN_CHANCE;
use serde::Serialize;

/// Counters from one simulated game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub ticks: u64,
    pub enemies_spawned: u64,
    pub enemies_escaped: u64,
    pub bullets_fired: u64,
    pub kills: u64,
    pub score: u32,
    pub frames_rendered: u64,
}

/// Results of a simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub config: SimConfig,
    pub runs: Vec<RunStats>,

    pub total_ticks: u64,
    pub total_spawned: u64,
    /// Spawns expected at the configured spawn chance
    pub expected_spawns: f64,
    /// Binomial standard deviation of the spawn count
    pub spawn_std_dev: f64,
    pub avg_score: f64,
    /// Fraction of spawned enemies that were shot down
    pub kill_rate: f64,
}

impl SimReport {
    pub fn from_runs(config: &SimConfig, runs: Vec<RunStats>) -> Self {
        let total_ticks: u64 = runs.iter().map(|r| r.ticks).sum();
        let total_spawned: u64 = runs.iter().map(|r| r.enemies_spawned).sum();
        let total_kills: u64 = runs.iter().map(|r| r.kills).sum();

        let n = total_ticks as f64;
        let expected_spawns = n * ENEMY_SPAWN_CHANCE;
        let spawn_std_dev = (n * ENEMY_SPAWN_CHANCE * (1.0 - ENEMY_SPAWN_CHANCE)).sqrt();

        let avg_score = if runs.is_empty() {
            0.0
        } else {
            runs.iter().map(|r| r.score as f64).sum::<f64>() / runs.len() as f64
        };
        let kill_rate = if total_spawned == 0 {
            0.0
        } else {
            total_kills as f64 / total_spawned as f64
        };

        Self {
            config: config.clone(),
            runs,
            total_ticks,
            total_spawned,
            expected_spawns,
            spawn_std_dev,
            avg_score,
            kill_rate,
        }
    }

    /// How many standard deviations the spawn count is from expectation.
    pub fn spawn_deviation_sigmas(&self) -> f64 {
        if self.spawn_std_dev == 0.0 {
            return 0.0;
        }
        (self.total_spawned as f64 - self.expected_spawns) / self.spawn_std_dev
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {}, {} ticks each, {}x{} field\n\n",
            self.runs.len(),
            self.config.ticks_per_run,
            self.config.width,
            self.config.height
        ));

        report.push_str("── SPAWNS ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Enemies Spawned:     {}\n", self.total_spawned));
        report.push_str(&format!(
            "  Expected:            {:.0} ± {:.1}\n",
            self.expected_spawns, self.spawn_std_dev
        ));
        report.push_str(&format!(
            "  Deviation:           {:+.2}σ\n\n",
            self.spawn_deviation_sigmas()
        ));

        report.push_str("── COMBAT ───────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Score:           {:.1}\n", self.avg_score));
        report.push_str(&format!(
            "  Kill Rate:           {:.1}%\n",
            self.kill_rate * 100.0
        ));
        for (i, run) in self.runs.iter().enumerate() {
            report.push_str(&format!(
                "  Run {:3}: score {:6}  kills {:5}  escaped {:5}  shots {:6}\n",
                i + 1,
                run.score,
                run.kills,
                run.enemies_escaped,
                run.bullets_fired
            ));
        }

        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(ticks: u64, spawned: u64, kills: u64) -> RunStats {
        RunStats {
            ticks,
            enemies_spawned: spawned,
            kills,
            score: (kills * 10) as u32,
            ..Default::default()
        }
    }

    #[test]
    fn test_expected_spawns() {
        let report = SimReport::from_runs(&SimConfig::default(), vec![run(100_000, 2_000, 500)]);
        assert!((report.expected_spawns - 2_000.0).abs() < 1e-6);
        assert!((report.spawn_std_dev - 1960f64.sqrt()).abs() < 1e-9);
        assert!(report.spawn_deviation_sigmas().abs() < 1e-9);
        assert!((report.kill_rate - 0.25).abs() < 1e-9);
        assert!((report.avg_score - 5_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(&SimConfig::default(), vec![]);
        assert_eq!(report.total_ticks, 0);
        assert_eq!(report.avg_score, 0.0);
        assert_eq!(report.spawn_deviation_sigmas(), 0.0);
    }

    #[test]
    fn test_text_and_json() {
        let report = SimReport::from_runs(&SimConfig::default(), vec![run(10, 1, 1)]);
        assert!(report.to_text().contains("SIMULATION REPORT"));
        let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();
        assert_eq!(json["total_spawned"], 1);
        assert_eq!(json["runs"][0]["kills"], 1);
    }
}
