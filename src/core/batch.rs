/// Parallel scoring of filtered host/virus pairs into a dense matrix
use crate::bio::ranked_list::RankedList;
use crate::core::pair_filter::PairTask;
use crate::core::rbo::rbo;
use crate::utils::parallel::{build_pool, chunk_size_for_parallelism};
use crate::PhirboError;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Dense host × virus score matrix, row-major by host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixData")]
pub struct ScoreMatrix {
    hosts: Vec<String>,
    viruses: Vec<String>,
    scores: Vec<f64>,
}

/// Unchecked serialized form of a [`ScoreMatrix`].
#[derive(Deserialize)]
struct MatrixData {
    hosts: Vec<String>,
    viruses: Vec<String>,
    scores: Vec<f64>,
}

impl TryFrom<MatrixData> for ScoreMatrix {
    type Error = PhirboError;

    fn try_from(data: MatrixData) -> Result<Self, Self::Error> {
        let expected = data.hosts.len() * data.viruses.len();
        if data.scores.len() != expected {
            return Err(PhirboError::Parse(format!(
                "score matrix has {} cells for {} hosts and {} viruses",
                data.scores.len(),
                data.hosts.len(),
                data.viruses.len()
            )));
        }
        if let Some(bad) = data.scores.iter().find(|s| !(0.0..=1.0).contains(*s)) {
            return Err(PhirboError::Parse(format!("score {} outside [0, 1]", bad)));
        }
        Ok(Self {
            hosts: data.hosts,
            viruses: data.viruses,
            scores: data.scores,
        })
    }
}

impl ScoreMatrix {
    /// All-zero matrix. Names are expected in ascending order.
    pub fn zeros(hosts: Vec<String>, viruses: Vec<String>) -> Self {
        let scores = vec![0.0; hosts.len() * viruses.len()];
        Self {
            hosts,
            viruses,
            scores,
        }
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn viruses(&self) -> &[String] {
        &self.viruses
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn virus_count(&self) -> usize {
        self.viruses.len()
    }

    pub fn get(&self, host_index: usize, virus_index: usize) -> f64 {
        self.scores[host_index * self.viruses.len() + virus_index]
    }

    /// Scores of every host against one virus, in host order.
    pub fn column(&self, virus_index: usize) -> impl Iterator<Item = f64> + '_ {
        let stride = self.viruses.len();
        self.scores
            .iter()
            .skip(virus_index)
            .step_by(stride.max(1))
            .take(self.hosts.len())
            .copied()
    }

    pub fn row(&self, host_index: usize) -> &[f64] {
        let start = host_index * self.viruses.len();
        &self.scores[start..start + self.viruses.len()]
    }

    /// Number of non-zero cells.
    pub fn nonzero(&self) -> usize {
        self.scores.iter().filter(|&&s| s != 0.0).count()
    }

    fn set(&mut self, host_index: usize, virus_index: usize, score: f64) {
        let stride = self.viruses.len();
        self.scores[host_index * stride + virus_index] = score;
    }
}

/// Runs the RBO engine over a pair queue on a fixed-size worker pool.
#[derive(Debug, Clone)]
pub struct BatchScorer {
    threads: usize,
    show_progress: bool,
}

impl BatchScorer {
    pub fn new(threads: usize) -> Self {
        Self {
            threads,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Score every task and return the filled matrix.
    ///
    /// `hosts` and `viruses` are indexed by the tasks and must line up with the
    /// names. If any task fails the whole batch fails and nothing is returned.
    pub fn score(
        &self,
        hosts: &[&RankedList],
        viruses: &[&RankedList],
        host_names: Vec<String>,
        virus_names: Vec<String>,
        tasks: &[PairTask],
    ) -> Result<ScoreMatrix, PhirboError> {
        if hosts.len() != host_names.len() || viruses.len() != virus_names.len() {
            return Err(PhirboError::WorkerFailure(format!(
                "{} host lists for {} names, {} virus lists for {} names",
                hosts.len(),
                host_names.len(),
                viruses.len(),
                virus_names.len()
            )));
        }

        let mut matrix = ScoreMatrix::zeros(host_names, virus_names);
        if tasks.is_empty() {
            return Ok(matrix);
        }

        let pool = build_pool(self.threads)?;
        let min_len = chunk_size_for_parallelism(tasks.len(), self.threads);

        let pb = if self.show_progress {
            let pb = ProgressBar::new(tasks.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} Scoring pairs")
                    .map_err(|e| PhirboError::Config(e.to_string()))?
                    .progress_chars("##-"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let results: Vec<(usize, usize, f64)> = pool.install(|| {
            tasks
                .par_iter()
                .with_min_len(min_len)
                .map(|task| {
                    let score = score_task(hosts, viruses, task);
                    pb.inc(1);
                    score
                })
                .collect::<Result<Vec<_>, PhirboError>>()
        })?;

        pb.finish_and_clear();

        for (host_index, virus_index, score) in results {
            matrix.set(host_index, virus_index, score);
        }

        tracing::debug!(
            pairs = tasks.len(),
            threads = self.threads,
            nonzero = matrix.nonzero(),
            "batch scoring complete"
        );
        Ok(matrix)
    }
}

fn score_task(
    hosts: &[&RankedList],
    viruses: &[&RankedList],
    task: &PairTask,
) -> Result<(usize, usize, f64), PhirboError> {
    let host = hosts.get(task.host_index).ok_or_else(|| {
        PhirboError::WorkerFailure(format!("host index {} out of range", task.host_index))
    })?;
    let virus = viruses.get(task.virus_index).ok_or_else(|| {
        PhirboError::WorkerFailure(format!("virus index {} out of range", task.virus_index))
    })?;

    let score = rbo(host, virus, task.p);
    if !score.is_finite() {
        return Err(PhirboError::WorkerFailure(format!(
            "non-finite score for host {} / virus {}",
            task.host_index, task.virus_index
        )));
    }

    Ok((task.host_index, task.virus_index, score))
}
