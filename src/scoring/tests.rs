use super::*;
use std::sync::Arc;

use crate::classifier::{Classifier, TrainingConfig, seed_dataset, train};
use crate::config::Config;
use crate::corpus::Document;
use crate::embedding::{EmbedderConfig, SentenceEmbedder, TextEmbedder};
use crate::vectordb::{IndexBuilder, VectorIndex};
use tempfile::TempDir;

fn articles() -> Vec<Document> {
    vec![
        Document::new("Vaccine trial results", "Researchers report improved outcomes.", "u1"),
        Document::new("Miracle cure scam", "Celebrity product pulled from shelves.", "u2"),
        Document::new("Policy update", "The government confirmed a new policy.", "u3"),
    ]
}

fn parts() -> (Classifier, VectorIndex, SentenceEmbedder) {
    let classifier = train(&seed_dataset(), &TrainingConfig::default()).unwrap();
    let embedder = SentenceEmbedder::load(EmbedderConfig::stub()).unwrap();
    let index = IndexBuilder::new(&embedder).build(articles()).unwrap();
    (classifier, index, embedder)
}

/// Stub vectors reported under the model backend's name.
struct ModelLabeledStub(SentenceEmbedder);

impl TextEmbedder for ModelLabeledStub {
    fn embed(&self, text: &str) -> Result<Vec<f32>, crate::embedding::EmbeddingError> {
        self.0.embed(text)
    }

    fn embedding_dim(&self) -> usize {
        self.0.embedding_dim()
    }

    fn mode(&self) -> &'static str {
        "model"
    }
}

fn context() -> ServingContext {
    let (classifier, index, embedder) = parts();
    ServingContext::new(
        Arc::new(classifier),
        Arc::new(index),
        Arc::new(embedder),
        5,
        0.5,
    )
    .unwrap()
}

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_analyze_returns_classification_and_evidence() {
        let ctx = context();
        let result = ctx
            .pipeline()
            .analyze(&AnalyzeRequest::new("", "Shocking: vaccine causes instant harm!"))
            .unwrap();

        assert_eq!(result.classification.label, 1);
        assert!((0.0..=1.0).contains(&result.classification.fake_probability));
        assert_eq!(result.evidence().len(), 3);
        assert_eq!(result.verification.verdict, Verdict::NotImplemented);
        assert!(result.verification.confidence.is_none());
        assert!(result.evidence().windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_analyze_evidence_capped_by_top_k() {
        let (classifier, index, embedder) = parts();
        let pipeline = ScoringPipeline::new(&classifier, &index, &embedder, 2, 0.5).unwrap();

        let result = pipeline.analyze(&AnalyzeRequest::new("", "policy news")).unwrap();
        assert_eq!(result.evidence().len(), 2);
    }

    #[test]
    fn test_analyze_uses_title_for_retrieval() {
        let ctx = context();
        let indexed = &articles()[1];

        let result = ctx
            .pipeline()
            .analyze(&AnalyzeRequest::new(indexed.title(), indexed.text()))
            .unwrap();

        let top = &result.evidence()[0];
        assert_eq!(top.url, "u2");
        assert!((top.score - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_classification_ignores_title() {
        let ctx = context();
        let pipeline = ctx.pipeline();

        let plain = pipeline.analyze(&AnalyzeRequest::new("", "miracle cure")).unwrap();
        let titled = pipeline
            .analyze(&AnalyzeRequest::new("Government research", "miracle cure"))
            .unwrap();

        assert_eq!(plain.classification, titled.classification);
    }

    #[test]
    fn test_analyze_empty_text_rejected() {
        let ctx = context();
        for text in ["", "   ", "\n\t"] {
            let err = ctx
                .pipeline()
                .analyze(&AnalyzeRequest::new("A title", text))
                .unwrap_err();
            assert!(err.is_empty_input());
            assert_eq!(err.code(), "empty_input");
        }
    }

    #[test]
    fn test_analyze_empty_index_yields_no_evidence() {
        let (classifier, _, embedder) = parts();
        let index = VectorIndex::new(embedder.embedding_dim()).unwrap();
        let pipeline = ScoringPipeline::new(&classifier, &index, &embedder, 5, 0.5).unwrap();

        let result = pipeline.analyze(&AnalyzeRequest::new("", "anything")).unwrap();
        assert!(result.evidence().is_empty());
    }

    #[test]
    fn test_pipeline_rejects_dimension_disagreement() {
        let (classifier, _, embedder) = parts();
        let index = VectorIndex::new(2).unwrap();

        let err = ScoringPipeline::new(&classifier, &index, &embedder, 5, 0.5).unwrap_err();
        assert!(matches!(err, ScoringError::Dimension(_)));
        assert_eq!(err.code(), "dimension_mismatch");
    }

    #[test]
    fn test_long_title_retrieves_its_own_document() {
        let (classifier, _, embedder) = parts();
        let title = "t".repeat(300);
        let text = "Officials confirmed the figures on Monday.";
        let mut docs = articles();
        docs.push(Document::new(&title, text, "u4"));
        let index = IndexBuilder::new(&embedder).build(docs).unwrap();
        let pipeline = ScoringPipeline::new(&classifier, &index, &embedder, 1, 0.5).unwrap();

        let result = pipeline.analyze(&AnalyzeRequest::new(&title, text)).unwrap();

        assert_eq!(result.evidence()[0].url, "u4");
        assert!((result.evidence()[0].score - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_analyze_after_long_whitespace_prefix() {
        let ctx = context();
        let padded = format!(
            "{}Shocking: vaccine causes instant harm!",
            " ".repeat(crate::constants::MAX_TEXT_CHARS)
        );

        let result = ctx.pipeline().analyze(&AnalyzeRequest::new("", padded)).unwrap();
        assert_eq!(result.classification.label, 1);
        assert_eq!(result.evidence().len(), 3);
    }

    #[test]
    fn test_pipeline_rejects_other_embedder_backend() {
        let (classifier, index, embedder) = parts();
        let labeled = ModelLabeledStub(embedder);

        let err = ScoringPipeline::new(&classifier, &index, &labeled, 5, 0.5).unwrap_err();
        assert!(matches!(err, ScoringError::EmbedderMismatch { .. }));
        assert_eq!(err.code(), "embedder_mismatch");
    }

    #[test]
    fn test_result_serializes_to_api_shape() {
        let ctx = context();
        let result = ctx
            .pipeline()
            .analyze(&AnalyzeRequest::new("", "policy news"))
            .unwrap();

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["classification"]["label"].is_u64());
        assert!(json["classification"]["fake_probability"].is_f64());
        assert_eq!(json["verification"]["verdict"], "not_implemented");
        assert!(json["verification"]["confidence"].is_null());
        assert!(json["verification"]["evidence"][0]["url"].is_string());
    }
}

mod request_tests {
    use super::*;

    #[test]
    fn test_request_title_defaults_to_empty() {
        let req: AnalyzeRequest = serde_json::from_str(r#"{"text":"body"}"#).unwrap();
        assert_eq!(req.title, "");
        assert_eq!(req.semantic_query(), "body");
    }

    #[test]
    fn test_request_requires_text() {
        assert!(serde_json::from_str::<AnalyzeRequest>(r#"{"title":"t"}"#).is_err());
    }

    #[test]
    fn test_semantic_query_with_title() {
        let req = AnalyzeRequest::new("Headline", "Body.");
        assert_eq!(req.semantic_query(), "Headline. Body.");
    }

    #[test]
    fn test_semantic_query_matches_indexed_text() {
        let title = "h".repeat(crate::constants::MAX_TITLE_CHARS + 100);
        let text = "b".repeat(crate::constants::MAX_TEXT_CHARS + 100);

        let req = AnalyzeRequest::new(&title, &text);
        let indexed = Document::new(&title, &text, "u");
        assert_eq!(req.semantic_query(), indexed.embedding_text());
    }
}

mod context_tests {
    use super::*;

    #[test]
    fn test_context_load_from_disk() {
        let dir = TempDir::new().unwrap();
        let (classifier, index, _) = parts();

        let config = Config {
            classifier_path: dir.path().join("baseline.rkyv"),
            index_dir: dir.path().join("vector_index"),
            embedder_path: None,
            top_k: 1,
            ..Default::default()
        };
        classifier.save(&config.classifier_path).unwrap();
        index.persist(&config.index_dir).unwrap();

        let ctx = ServingContext::load(&config).unwrap();
        assert_eq!(ctx.index().len(), 3);
        assert_eq!(ctx.embedder().mode(), "stub");

        let result = ctx
            .pipeline()
            .analyze(&AnalyzeRequest::new("", "vaccine harm"))
            .unwrap();
        assert_eq!(result.evidence().len(), 1);
    }

    #[test]
    fn test_context_load_missing_classifier() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            classifier_path: dir.path().join("missing.rkyv"),
            index_dir: dir.path().join("vector_index"),
            ..Default::default()
        };

        let err = ServingContext::load(&config).unwrap_err();
        assert_eq!(err.code(), "model_not_found");
    }

    #[test]
    fn test_context_load_missing_index() {
        let dir = TempDir::new().unwrap();
        let (classifier, _, _) = parts();
        let config = Config {
            classifier_path: dir.path().join("baseline.rkyv"),
            index_dir: dir.path().join("vector_index"),
            ..Default::default()
        };
        classifier.save(&config.classifier_path).unwrap();

        let err = ServingContext::load(&config).unwrap_err();
        assert_eq!(err.code(), "index_not_found");
    }

    #[test]
    fn test_context_rejects_index_from_other_backend() {
        let (classifier, index, embedder) = parts();
        let labeled: Arc<dyn TextEmbedder> = Arc::new(ModelLabeledStub(embedder));

        let err = ServingContext::new(Arc::new(classifier), Arc::new(index), labeled, 5, 0.5)
            .unwrap_err();
        assert_eq!(err.code(), "embedder_mismatch");
    }

    #[test]
    fn test_context_is_shareable_across_threads() {
        let ctx = context();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ctx = ctx.clone();
                std::thread::spawn(move || {
                    ctx.pipeline()
                        .analyze(&AnalyzeRequest::new("", format!("policy {i}")))
                        .map(|r| r.evidence().len())
                })
            })
            .collect();

        for h in handles {
            assert_eq!(h.join().unwrap().unwrap(), 3);
        }
    }
}
