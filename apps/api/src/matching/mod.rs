// Matching engine and its HTTP surface.
// Implements: per-dimension sub-scores, weighted aggregation, batch ranking.
// All similarity calls go through the Embedder trait — no backend specifics here.

pub mod aggregate;
pub mod engine;
pub mod handlers;
pub mod subscores;
