use crate::core::batch::ScoreMatrix;
use crate::core::predictor::Prediction;
use crate::core::top_match::TopMatch;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub mod text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub format: Format,
    /// Appended to the top-match output path to name the matrix file
    pub matrix_suffix: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            format: Format::Csv,
            matrix_suffix: ".matrix".to_string(),
        }
    }
}

pub struct ReportGenerator {
    options: ReportOptions,
}

impl ReportGenerator {
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    pub fn generate_top_matches(&self, matches: &[TopMatch]) -> Result<String> {
        match self.options.format {
            Format::Csv => self.top_matches_csv(matches),
            Format::Json => Ok(serde_json::to_string_pretty(matches)?),
        }
    }

    pub fn generate_matrix(&self, matrix: &ScoreMatrix) -> Result<String> {
        match self.options.format {
            Format::Csv => self.matrix_csv(matrix),
            Format::Json => Ok(serde_json::to_string_pretty(matrix)?),
        }
    }

    /// Path the matrix is written to for a given top-match output path.
    pub fn matrix_path(&self, output: &Path) -> PathBuf {
        let mut name = output.as_os_str().to_owned();
        name.push(&self.options.matrix_suffix);
        PathBuf::from(name)
    }

    /// Write the top matches to `output` and the matrix next to it.
    /// Returns the matrix path.
    pub fn write(&self, prediction: &Prediction, output: &Path) -> Result<PathBuf> {
        std::fs::write(output, self.generate_top_matches(&prediction.top_matches)?)?;
        let matrix_path = self.matrix_path(output);
        std::fs::write(&matrix_path, self.generate_matrix(&prediction.matrix)?)?;
        tracing::info!(
            "Wrote {} and {}",
            output.display(),
            matrix_path.display()
        );
        Ok(matrix_path)
    }

    fn top_matches_csv(&self, matches: &[TopMatch]) -> Result<String> {
        use std::fmt::Write;

        let mut output = String::new();
        writeln!(&mut output, "phage,host,rbo_score")?;
        for m in matches {
            for host in &m.hosts {
                writeln!(&mut output, "{},{},{}", m.virus, host, m.score)?;
            }
        }
        Ok(output)
    }

    /// One row per virus, one column per host.
    fn matrix_csv(&self, matrix: &ScoreMatrix) -> Result<String> {
        use std::fmt::Write;

        let mut output = String::new();
        writeln!(&mut output, ",{}", matrix.hosts().join(","))?;
        for (virus_index, virus) in matrix.viruses().iter().enumerate() {
            let scores: Vec<String> = matrix.column(virus_index).map(|s| s.to_string()).collect();
            writeln!(&mut output, "{},{}", virus, scores.join(","))?;
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_matches() -> Vec<TopMatch> {
        vec![
            TopMatch {
                virus: "V1".to_string(),
                score: 0.625,
                hosts: vec!["H1".to_string()],
            },
            TopMatch {
                virus: "V2".to_string(),
                score: 0.5,
                hosts: vec!["H1".to_string(), "H2".to_string()],
            },
        ]
    }

    #[test]
    fn test_top_matches_csv_one_row_per_tied_host() {
        let generator = ReportGenerator::new(ReportOptions::default());
        let csv = generator.generate_top_matches(&sample_matches()).unwrap();
        assert_eq!(
            csv,
            "phage,host,rbo_score\nV1,H1,0.625\nV2,H1,0.5\nV2,H2,0.5\n"
        );
    }

    #[test]
    fn test_matrix_csv_is_virus_by_host() {
        let matrix = ScoreMatrix::zeros(
            vec!["H1".to_string(), "H2".to_string()],
            vec!["V1".to_string()],
        );
        let generator = ReportGenerator::new(ReportOptions::default());
        assert_eq!(generator.generate_matrix(&matrix).unwrap(), ",H1,H2\nV1,0,0\n");
    }

    #[test]
    fn test_json_output() {
        let generator = ReportGenerator::new(ReportOptions {
            format: Format::Json,
            ..ReportOptions::default()
        });
        let json = generator.generate_top_matches(&sample_matches()).unwrap();
        let parsed: Vec<TopMatch> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_matches());
    }

    #[test]
    fn test_matrix_path() {
        let generator = ReportGenerator::new(ReportOptions::default());
        assert_eq!(
            generator.matrix_path(Path::new("out/hosts.csv")),
            PathBuf::from("out/hosts.csv.matrix")
        );
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<Format>().unwrap(), Format::Csv);
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!("xml".parse::<Format>().is_err());
    }
}
