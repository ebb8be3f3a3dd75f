// Topic modeling: shared vocabulary, Gibbs-sampled LDA, and result types.

pub mod lda;
pub mod model;
pub mod traits;
pub mod vocabulary;

pub use lda::{infer_topics, GibbsLda, TopicConfig};
pub use model::{DocumentTopicDistribution, Topic, TopicAnalysis, TopicModel, TopicTerm, TopicWeight};
pub use traits::TopicInference;
