//! Simulation report generation.

use crate::scene::CrashCause;
use serde::Serialize;

/// Outcome of one headless run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub score: u32,
    pub survival_secs: f64,
    /// `None` when the run hit the time cap.
    pub crash: Option<CrashCause>,
}

/// Aggregated results from multiple runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub mean_score: f64,
    pub min_score: u32,
    pub max_score: u32,
    pub mean_survival_secs: f64,
    pub ground_crashes: u32,
    pub pipe_crashes: u32,
    pub timed_out: u32,
    pub runs: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>) -> Self {
        let num_runs = runs.len() as u32;
        let divisor = f64::from(num_runs.max(1));

        let mean_score = runs.iter().map(|r| f64::from(r.score)).sum::<f64>() / divisor;
        let mean_survival_secs = runs.iter().map(|r| r.survival_secs).sum::<f64>() / divisor;
        let min_score = runs.iter().map(|r| r.score).min().unwrap_or(0);
        let max_score = runs.iter().map(|r| r.score).max().unwrap_or(0);

        let count = |cause: Option<CrashCause>| runs.iter().filter(|r| r.crash == cause).count() as u32;
        let ground_crashes = count(Some(CrashCause::Ground));
        let pipe_crashes = count(Some(CrashCause::Pipe));
        let timed_out = count(None);

        Self {
            num_runs,
            mean_score,
            min_score,
            max_score,
            mean_survival_secs,
            ground_crashes,
            pipe_crashes,
            timed_out,
            runs,
        }
    }

    /// One-line summary for `--quiet`.
    pub fn summary_line(&self) -> String {
        format!(
            "runs={} mean={:.2} min={} max={} survival={:.1}s ground={} pipe={} timeout={}",
            self.num_runs,
            self.mean_score,
            self.min_score,
            self.max_score,
            self.mean_survival_secs,
            self.ground_crashes,
            self.pipe_crashes,
            self.timed_out
        )
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    FLAPPER SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!("Runs: {}\n\n", self.num_runs));

        report.push_str("── SCORE ────────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Mean:           {:.2}\n", self.mean_score));
        report.push_str(&format!("  Min:            {}\n", self.min_score));
        report.push_str(&format!("  Max:            {}\n", self.max_score));
        report.push_str(&format!(
            "  Mean Survival:  {:.1}s\n\n",
            self.mean_survival_secs
        ));

        report.push_str("── RUN ENDINGS ──────────────────────────────────────────────────\n");
        for (label, n) in [
            ("Ground", self.ground_crashes),
            ("Pipe", self.pipe_crashes),
            ("Time cap", self.timed_out),
        ] {
            let pct = f64::from(n) / f64::from(self.num_runs.max(1)) * 100.0;
            let bar = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  {:<9} {:>4} {:>5.1}% {}\n", label, n, pct, bar));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u32, secs: f64, crash: Option<CrashCause>) -> RunStats {
        RunStats {
            score,
            survival_secs: secs,
            crash,
        }
    }

    #[test]
    fn test_aggregates() {
        let report = SimReport::from_runs(vec![
            run(2, 6.0, Some(CrashCause::Pipe)),
            run(0, 1.0, Some(CrashCause::Ground)),
            run(7, 20.0, None),
            run(3, 9.0, Some(CrashCause::Pipe)),
        ]);
        assert_eq!(report.num_runs, 4);
        assert!((report.mean_score - 3.0).abs() < 1e-9);
        assert_eq!(report.min_score, 0);
        assert_eq!(report.max_score, 7);
        assert!((report.mean_survival_secs - 9.0).abs() < 1e-9);
        assert_eq!(report.pipe_crashes, 2);
        assert_eq!(report.ground_crashes, 1);
        assert_eq!(report.timed_out, 1);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new());
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.mean_score, 0.0);
        assert_eq!(report.max_score, 0);
        assert!(report.to_text().contains("Runs: 0"));
    }

    #[test]
    fn test_json_names_causes() {
        let report = SimReport::from_runs(vec![run(1, 3.0, Some(CrashCause::Pipe))]);
        let json = report.to_json();
        assert!(json.contains("\"pipe_crashes\": 1"));
        assert!(json.contains("\"crash\": \"pipe\""));
    }

    #[test]
    fn test_summary_line() {
        let report = SimReport::from_runs(vec![run(4, 8.0, None)]);
        assert_eq!(
            report.summary_line(),
            "runs=1 mean=4.00 min=4 max=4 survival=8.0s ground=0 pipe=0 timeout=1"
        );
    }
}
