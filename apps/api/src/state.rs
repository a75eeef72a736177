use std::sync::Arc;

use crate::matching::engine::MatchEngine;

/// Shared application state injected into all route handlers via Axum
/// extractors. The engine owns the taxonomy, parser, embedder, and scoring
/// configuration; handlers never reach around it.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MatchEngine>,
}

#[cfg(test)]
impl AppState {
    /// State over the bundled taxonomy and the default hashing embedder,
    /// for router-level tests.
    pub fn for_tests() -> Self {
        use std::path::Path;

        use crate::embedding::hashing::HashingEmbedder;
        use crate::matching::engine::MatchConfig;
        use crate::taxonomy::SkillTaxonomy;
        use crate::text::normalizer::NormalizerConfig;

        let taxonomy_path =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("data/skill_taxonomy.json");
        let taxonomy = SkillTaxonomy::load(&taxonomy_path, &NormalizerConfig::default())
            .expect("bundled taxonomy loads");

        AppState {
            engine: Arc::new(MatchEngine::new(
                Arc::new(taxonomy),
                Arc::new(HashingEmbedder::default()),
                MatchConfig::default(),
            )),
        }
    }
}
