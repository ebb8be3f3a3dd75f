// Latent Dirichlet Allocation by collapsed Gibbs sampling.
//
// Every token is assigned a topic; each sweep resamples every assignment from
//
//   p(z = k) ∝ (n_dk + alpha) * (n_wk + beta) / (n_k + V * beta)
//
// where n_dk counts topic k in document d, n_wk counts word w under topic k,
// and n_k counts all tokens under topic k. After a fixed number of sweeps the
// smoothed counts give the topic-word and document-topic distributions.
//
// The random stream comes from a ChaCha8 generator seeded explicitly, so two
// runs with the same sequences, topic count, and seed agree bit for bit.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AnalysisError, Field, Result, Stage, ValidationError};
use crate::preprocess::TokenSequence;

use super::model::{
    DocumentTopicDistribution, Topic, TopicAnalysis, TopicModel, TopicTerm, TopicWeight,
};
use super::traits::TopicInference;
use super::vocabulary::Vocabulary;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_ITERATIONS: usize = 200;
pub const DEFAULT_WORDS_PER_TOPIC: usize = 10;
/// Upper bound on `num_topics`; the count matrices grow with it.
pub const MAX_NUM_TOPICS: usize = 1000;

/// Parameters for one inference run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicConfig {
    pub num_topics: usize,
    pub words_per_topic: usize,
    /// Number of full Gibbs sweeps over the corpus.
    pub iterations: usize,
    /// Document-topic prior; `None` means 1 / num_topics.
    pub alpha: Option<f64>,
    /// Topic-word prior; `None` means 1 / num_topics.
    pub beta: Option<f64>,
    pub seed: u64,
}

impl TopicConfig {
    pub fn new(num_topics: usize, seed: u64) -> Self {
        Self {
            num_topics,
            words_per_topic: DEFAULT_WORDS_PER_TOPIC,
            iterations: DEFAULT_ITERATIONS,
            alpha: None,
            beta: None,
            seed,
        }
    }

    fn priors(&self) -> (f64, f64) {
        let default = 1.0 / self.num_topics as f64;
        (self.alpha.unwrap_or(default), self.beta.unwrap_or(default))
    }
}

/// Gibbs-sampled LDA behind the [`TopicInference`] trait.
#[derive(Debug, Clone)]
pub struct GibbsLda {
    config: TopicConfig,
}

impl GibbsLda {
    pub fn new(config: TopicConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TopicConfig {
        &self.config
    }
}

impl TopicInference for GibbsLda {
    fn infer(&self, sequences: &[TokenSequence]) -> Result<TopicAnalysis> {
        let config = &self.config;

        if config.num_topics == 0 {
            return Err(ValidationError::single(Field::NumTopics, "must be at least 1").into());
        }
        if config.num_topics > MAX_NUM_TOPICS {
            return Err(ValidationError::single(
                Field::NumTopics,
                format!("must be at most {MAX_NUM_TOPICS}, got {}", config.num_topics),
            )
            .into());
        }
        if sequences.len() < 2 {
            return Err(AnalysisError::insufficient(
                Stage::Topics,
                format!(
                    "topic inference needs at least two documents, got {}",
                    sequences.len()
                ),
            ));
        }

        let vocab = Vocabulary::build(sequences);
        if vocab.is_empty() {
            return Err(AnalysisError::insufficient(
                Stage::Topics,
                "vocabulary is empty after normalization",
            ));
        }

        let (alpha, beta) = config.priors();
        if !(alpha > 0.0 && beta > 0.0 && alpha.is_finite() && beta.is_finite()) {
            return Err(ValidationError::single(
                Field::NumTopics,
                format!("priors must be positive and finite (alpha={alpha}, beta={beta})"),
            )
            .into());
        }

        let docs: Vec<Vec<usize>> = sequences.iter().map(|s| vocab.encode(s)).collect();

        info!(
            documents = docs.len(),
            vocabulary = vocab.len(),
            tokens = docs.iter().map(Vec::len).sum::<usize>(),
            topics = config.num_topics,
            iterations = config.iterations,
            seed = config.seed,
            "Inferring topics"
        );

        let mut sampler = Sampler::new(&docs, vocab.len(), config.num_topics, alpha, beta, config.seed)?;
        for iteration in 0..config.iterations {
            sampler.sweep(&docs);
            if (iteration + 1) % 50 == 0 {
                debug!(iteration = iteration + 1, "Gibbs sweep complete");
            }
        }

        let topics = sampler.topics(&vocab, config.words_per_topic);
        let distributions = sampler.distributions(&docs)?;

        Ok(TopicAnalysis {
            model: TopicModel {
                topics,
                vocabulary_size: vocab.len(),
                iterations: config.iterations,
                seed: config.seed,
            },
            distributions,
        })
    }
}

/// Infer `num_topics` topics with default sampler settings and an explicit seed.
pub fn infer_topics(
    sequences: &[TokenSequence],
    num_topics: usize,
    seed: u64,
) -> Result<TopicAnalysis> {
    GibbsLda::new(TopicConfig::new(num_topics, seed)).infer(sequences)
}

/// Count matrices and topic assignments for one run.
struct Sampler {
    k: usize,
    v: usize,
    alpha: f64,
    beta: f64,
    /// word-major: n_wk[w * k + t]
    word_topic: Vec<u32>,
    /// document-major: n_dk[d * k + t]
    doc_topic: Vec<u32>,
    topic_totals: Vec<u32>,
    assignments: Vec<Vec<usize>>,
    weights: Vec<f64>,
    rng: ChaCha8Rng,
}

impl Sampler {
    fn new(
        docs: &[Vec<usize>],
        v: usize,
        k: usize,
        alpha: f64,
        beta: f64,
        seed: u64,
    ) -> Result<Self> {
        let (Some(word_cells), Some(doc_cells)) = (v.checked_mul(k), docs.len().checked_mul(k)) else {
            return Err(AnalysisError::Computation {
                stage: Stage::Topics,
                reason: format!("count matrices for {k} topics over {v} terms are too large"),
            });
        };

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut word_topic = vec![0u32; word_cells];
        let mut doc_topic = vec![0u32; doc_cells];
        let mut topic_totals = vec![0u32; k];

        let assignments: Vec<Vec<usize>> = docs
            .iter()
            .enumerate()
            .map(|(d, words)| {
                words
                    .iter()
                    .map(|&w| {
                        let t = rng.random_range(0..k);
                        word_topic[w * k + t] += 1;
                        doc_topic[d * k + t] += 1;
                        topic_totals[t] += 1;
                        t
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            k,
            v,
            alpha,
            beta,
            word_topic,
            doc_topic,
            topic_totals,
            assignments,
            weights: vec![0.0; k],
            rng,
        })
    }

    fn sweep(&mut self, docs: &[Vec<usize>]) {
        let k = self.k;
        let v_beta = self.v as f64 * self.beta;

        for (d, words) in docs.iter().enumerate() {
            for (i, &w) in words.iter().enumerate() {
                let old = self.assignments[d][i];
                self.word_topic[w * k + old] -= 1;
                self.doc_topic[d * k + old] -= 1;
                self.topic_totals[old] -= 1;

                let mut total = 0.0;
                for t in 0..k {
                    let p = (f64::from(self.doc_topic[d * k + t]) + self.alpha)
                        * (f64::from(self.word_topic[w * k + t]) + self.beta)
                        / (f64::from(self.topic_totals[t]) + v_beta);
                    total += p;
                    self.weights[t] = total;
                }

                let u = self.rng.random::<f64>() * total;
                let new = self.weights.iter().position(|&c| u < c).unwrap_or(k - 1);

                self.word_topic[w * k + new] += 1;
                self.doc_topic[d * k + new] += 1;
                self.topic_totals[new] += 1;
                self.assignments[d][i] = new;
            }
        }
    }

    /// Rank every vocabulary term by `(n_wk + beta) / (n_k + V * beta)`.
    fn topics(&self, vocab: &Vocabulary, words_per_topic: usize) -> Vec<Topic> {
        let k = self.k;
        let v_beta = self.v as f64 * self.beta;

        (0..k)
            .map(|t| {
                let denom = f64::from(self.topic_totals[t]) + v_beta;
                let mut ranked: Vec<(usize, f64)> = (0..self.v)
                    .map(|w| (w, (f64::from(self.word_topic[w * k + t]) + self.beta) / denom))
                    .collect();
                // stable: equal weights stay in vocabulary order
                ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

                let terms = ranked
                    .into_iter()
                    .take(words_per_topic)
                    .map(|(w, weight)| TopicTerm {
                        term: vocab.term(w).to_string(),
                        weight,
                    })
                    .collect();
                Topic::new(t, terms)
            })
            .collect()
    }

    /// `(n_dk + alpha) / (N_d + K * alpha)`, renormalized so each row sums to 1.
    fn distributions(&self, docs: &[Vec<usize>]) -> Result<Vec<DocumentTopicDistribution>> {
        let k = self.k;

        docs.iter()
            .enumerate()
            .map(|(d, words)| {
                let denom = words.len() as f64 + k as f64 * self.alpha;
                let raw: Vec<f64> = (0..k)
                    .map(|t| ((f64::from(self.doc_topic[d * k + t]) + self.alpha) / denom).max(0.0))
                    .collect();
                let sum: f64 = raw.iter().sum();

                if !sum.is_finite() || sum <= 0.0 || raw.iter().any(|w| !w.is_finite()) {
                    return Err(AnalysisError::Computation {
                        stage: Stage::Topics,
                        reason: format!("document {d} has a degenerate topic distribution"),
                    });
                }

                Ok(DocumentTopicDistribution {
                    weights: raw
                        .into_iter()
                        .enumerate()
                        .map(|(topic, w)| TopicWeight {
                            topic,
                            weight: w / sum,
                        })
                        .collect(),
                })
            })
            .collect()
    }
}
