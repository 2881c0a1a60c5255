//! CSV output for the two analysis reports
//!
//! The headers are a recognized interchange format consumed by downstream
//! plotting scripts and must not change: `mean_gamma,std_gamma` for the
//! characterization report and `K,MeanE,StdE,Emin,Emax` for the accumulation
//! report.

use crate::characterize::ErrorSummary;
use crate::simulate::PerKStats;

/// CSV formatter for the characterization report.
#[derive(Debug)]
pub struct GammaCsv<'a> {
    summary: &'a ErrorSummary,
}

impl<'a> GammaCsv<'a> {
    pub fn new(summary: &'a ErrorSummary) -> Self {
        Self { summary }
    }

    /// Generate the CSV report: header plus one data row.
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("mean_gamma,std_gamma\n");
        output.push_str(&format!("{},{}\n", self.summary.mean, self.summary.std));
        output
    }
}

/// CSV formatter for the per-K accumulation report.
#[derive(Debug, Default)]
pub struct AccumCsv {
    rows: Vec<PerKStats>,
}

impl AccumCsv {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append one per-K record; callers supply them in ascending K order.
    pub fn add_row(&mut self, stats: PerKStats) {
        self.rows.push(stats);
    }

    /// Generate the CSV report: header plus one row per K.
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("K,MeanE,StdE,Emin,Emax\n");
        for row in &self.rows {
            output.push_str(&format!(
                "{},{},{},{},{}\n",
                row.k, row.mean_e, row.std_e, row.e_min, row.e_max
            ));
        }
        output
    }
}

impl From<&[PerKStats]> for AccumCsv {
    fn from(rows: &[PerKStats]) -> Self {
        Self {
            rows: rows.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ErrorSummary {
        ErrorSummary {
            mean: -0.25,
            std: 1.5,
            min: -4,
            max: 2,
            samples: 256,
        }
    }

    #[test]
    fn test_gamma_csv_header_exact() {
        let s = summary();
        let csv = GammaCsv::new(&s).to_csv();
        assert!(csv.starts_with("mean_gamma,std_gamma\n"));
    }

    #[test]
    fn test_gamma_csv_single_data_row() {
        let s = summary();
        let csv = GammaCsv::new(&s).to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "-0.25,1.5");
    }

    #[test]
    fn test_gamma_csv_zero_summary() {
        let s = ErrorSummary {
            mean: 0.0,
            std: 0.0,
            min: 0,
            max: 0,
            samples: 256,
        };
        let csv = GammaCsv::new(&s).to_csv();
        assert_eq!(csv, "mean_gamma,std_gamma\n0,0\n");
    }

    #[test]
    fn test_accum_csv_header_exact() {
        let csv = AccumCsv::new().to_csv();
        assert_eq!(csv, "K,MeanE,StdE,Emin,Emax\n");
    }

    #[test]
    fn test_accum_csv_row_order_and_fields() {
        let mut out = AccumCsv::new();
        out.add_row(PerKStats {
            k: 4,
            mean_e: 0.5,
            std_e: 0.25,
            e_min: -1.5,
            e_max: 2.5,
        });
        out.add_row(PerKStats {
            k: 5,
            mean_e: 0.0,
            std_e: 0.0,
            e_min: 0.0,
            e_max: 0.0,
        });
        let csv = out.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "K,MeanE,StdE,Emin,Emax");
        assert_eq!(lines[1], "4,0.5,0.25,-1.5,2.5");
        assert_eq!(lines[2], "5,0,0,0,0");
    }

    #[test]
    fn test_accum_csv_from_slice() {
        let rows = vec![
            PerKStats {
                k: 1,
                mean_e: 1.0,
                std_e: 0.0,
                e_min: -1.0,
                e_max: 1.0,
            },
            PerKStats {
                k: 2,
                mean_e: 0.5,
                std_e: 0.1,
                e_min: -1.4,
                e_max: 1.4,
            },
        ];
        let csv = AccumCsv::from(rows.as_slice()).to_csv();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("1,1,0,-1,1"));
    }
}
