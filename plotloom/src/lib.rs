// Plotloom: structure scoring and reordering for multi-part written works.
//
// Scores how well each unit (scene, section) of a document reflects the
// author's declared intent, how well adjacent units connect, and searches
// for a unit order that maximizes the combined story score.
//
// Architecture (data flows top to bottom):
// - tokenize.rs: separator-based splitting into lowercase tokens / keywords
// - connection.rs: directional A -> B connection score and document total
// - alignment.rs: intent keyword overlap minus constraint penalties
// - composite.rs: story score objective, per-unit score annotations, bands
// - sa.rs: simulated annealing over unit permutations
// - revision.rs: prompts and reply parsing for rewriting low-scoring units
// - types.rs: `Intent`, `Unit`, `Score`, `Document`
// - intent.rs: normalizes stored intent JSON shapes into `Intent`
// - config.rs: `ScoringWeights` and the JSON-loadable `EngineConfig`
//
// All scoring is pure and total: empty text, empty intents and empty unit
// lists produce zero scores rather than errors. The optimizer is
// deterministic given the `SearchRng` it is handed.

pub mod alignment;
pub mod composite;
pub mod config;
pub mod connection;
pub mod intent;
pub mod revision;
pub mod sa;
pub mod tokenize;
pub mod types;

pub use alignment::{score_alignment, total_alignment_score};
pub use composite::{ScoreBand, attach_scores, score_to_band, story_score, unit_scores};
pub use config::{EngineConfig, ScoringWeights};
pub use connection::{score_connection, total_connection_score};
pub use plotloom_prng::SearchRng;
pub use sa::{AnnealConfig, AnnealResult, anneal_order, optimize_order};
pub use tokenize::tokenize;
pub use types::{Document, Intent, Score, Unit};
