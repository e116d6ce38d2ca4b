use super::*;
use crate::features::{LexicalVector, Vocabulary};
use tempfile::TempDir;

fn trained() -> Classifier {
    train(&seed_dataset(), &TrainingConfig::default()).expect("seed data should train")
}

mod model_tests {
    use super::*;

    #[test]
    fn test_sigmoid_is_stable() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-7);
        assert!(sigmoid(20.0) > 0.999);
        assert!(sigmoid(-20.0) < 0.001);
        assert!(sigmoid(1000.0).is_finite());
        assert!(sigmoid(-1000.0).is_finite());
        assert_eq!(sigmoid(-1000.0), 0.0);
    }

    #[test]
    fn test_new_rejects_weight_mismatch() {
        let vocab = Vocabulary::fit(&["alpha beta"], 10);
        let err = Classifier::new(vocab, vec![0.1], 0.0).unwrap_err();
        assert!(matches!(err, ClassifierError::DimensionMismatch { weights: 1, .. }));
    }

    #[test]
    fn test_new_rejects_non_finite_parameters() {
        let vocab = Vocabulary::fit(&["alpha"], 10);
        let err = Classifier::new(vocab, vec![f32::NAN], 0.0).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidArtifact { .. }));
    }

    #[test]
    fn test_score_empty_vector_is_sigmoid_of_bias() {
        let vocab = Vocabulary::fit(&["alpha"], 10);
        let model = Classifier::new(vocab, vec![3.0], -1.0).unwrap();
        let p = model.score(&LexicalVector::default());
        assert!((p - sigmoid(-1.0)).abs() < 1e-7);
    }

    #[test]
    fn test_predict_threshold_boundary() {
        let vocab = Vocabulary::fit(&["alpha"], 10);
        let model = Classifier::new(vocab, vec![0.0], 0.0).unwrap();

        // Zero weights and bias give exactly 0.5.
        let at = model.predict("alpha", 0.5).unwrap();
        assert_eq!(at.fake_probability, 0.5);
        assert_eq!(at.label, 1);

        let above = model.predict("alpha", 0.500_001).unwrap();
        assert_eq!(above.label, 0);
    }

    #[test]
    fn test_predict_extreme_thresholds() {
        let model = trained();
        assert_eq!(model.predict("policy today", 0.0).unwrap().label, 1);
        assert_eq!(model.predict("policy today", 1.0).unwrap().label, 0);
    }

    #[test]
    fn test_predict_rejects_out_of_range_threshold() {
        let model = trained();
        for bad in [-0.1, 1.5, f32::NAN] {
            let err = model.predict("anything", bad).unwrap_err();
            assert!(matches!(err, ClassifierError::InvalidThreshold { .. }));
        }
    }

    #[test]
    fn test_predict_empty_text() {
        let model = trained();
        let err = model.predict_default("   ").unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::Feature(crate::features::FeatureError::EmptyInput)
        ));
    }

    #[test]
    fn test_predict_probability_in_unit_interval() {
        let model = trained();
        for text in [
            "Shocking miracle cure",
            "government research trials",
            "completely unrelated words here",
            "x",
        ] {
            let c = model.predict_default(text).unwrap();
            assert!((0.0..=1.0).contains(&c.fake_probability), "{text}");
            assert_eq!(c.is_fake(), c.fake_probability >= 0.5);
        }
    }
}

mod train_tests {
    use super::*;

    #[test]
    fn test_seed_dataset_scenario() {
        let model = trained();

        let fake = model
            .predict_default("Shocking: vaccine causes instant harm!")
            .unwrap();
        assert_eq!(fake.label, 1);
        assert!(fake.fake_probability > 0.5);

        let real = model
            .predict_default("The government confirmed new policy today")
            .unwrap();
        assert_eq!(real.label, 0);
    }

    #[test]
    fn test_predict_after_long_whitespace_prefix() {
        let model = trained();
        let text = "Shocking: vaccine causes instant harm!";
        let padded = format!("{}{text}", " ".repeat(crate::constants::MAX_TEXT_CHARS));

        let result = model.predict_default(&padded).unwrap();
        assert_eq!(result, model.predict_default(text).unwrap());
        assert_eq!(result.label, 1);
    }

    #[test]
    fn test_train_empty_corpus() {
        let err = train(&[], &TrainingConfig::default()).unwrap_err();
        assert!(matches!(err, ClassifierError::EmptyCorpus));
    }

    #[test]
    fn test_train_single_class() {
        let rows = vec![LabeledRow::new("one text", 1), LabeledRow::new("two text", 1)];
        let err = train(&rows, &TrainingConfig::default()).unwrap_err();
        assert!(matches!(err, ClassifierError::SingleClass { label: 1 }));
    }

    #[test]
    fn test_train_respects_max_features() {
        let config = TrainingConfig {
            max_features: 3,
            ..Default::default()
        };
        let model = train(&seed_dataset(), &config).unwrap();
        assert_eq!(model.vocabulary().len(), 3);
        assert_eq!(model.weights().len(), 3);
    }

    #[test]
    fn test_train_is_deterministic() {
        assert_eq!(trained(), trained());
    }

    #[test]
    fn test_train_tolerates_blank_rows() {
        let mut rows = seed_dataset();
        rows.push(LabeledRow::new("", 0));
        let model = train(&rows, &TrainingConfig::default()).unwrap();
        assert!(!model.vocabulary().is_empty());
    }

    #[test]
    fn test_unpenalized_bias_tracks_class_balance() {
        let rows = vec![
            LabeledRow::new("spam spam", 1),
            LabeledRow::new("spam eggs", 1),
            LabeledRow::new("spam ham", 1),
            LabeledRow::new("plain news", 0),
        ];
        let model = train(&rows, &TrainingConfig::default()).unwrap();
        assert!(model.bias() > 0.0);
    }
}

mod dataset_tests {
    use super::*;

    #[test]
    fn test_seed_dataset_is_balanced() {
        let rows = seed_dataset();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows.iter().filter(|r| r.label == 1).count(), 2);
    }

    #[test]
    fn test_load_or_seed_writes_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("small_labeled.csv");

        let rows = load_or_seed(&path).unwrap();

        assert!(path.exists());
        assert_eq!(rows, seed_dataset());
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("text,label"));
    }

    #[test]
    fn test_load_or_seed_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("train.csv");
        std::fs::write(&path, "text,label\nsome fake thing,1\nsome real thing,0\n").unwrap();

        let rows = load_or_seed(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], LabeledRow::new("some fake thing", 1));
    }

    #[test]
    fn test_read_training_csv_handles_quoted_commas() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("train.csv");
        std::fs::write(&path, "text,label\n\"Hello, world\",0\n").unwrap();

        let rows = read_training_csv(&path).unwrap();
        assert_eq!(rows[0].text, "Hello, world");
    }

    #[test]
    fn test_read_training_csv_rejects_bad_label() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("train.csv");
        std::fs::write(&path, "text,label\nok,0\nbad,2\n").unwrap();

        let err = read_training_csv(&path).unwrap_err();
        match err {
            ClassifierError::InvalidLabel { row, label } => {
                assert_eq!(row, 2);
                assert_eq!(label, "2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_training_csv_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_training_csv(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, ClassifierError::Csv(_)));
    }
}

mod artifact_tests {
    use super::*;

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models").join("baseline.rkyv");
        let model = trained();

        model.save(&path).unwrap();
        let loaded = Classifier::load(&path).unwrap();

        assert_eq!(loaded, model);
        let text = "Celebrity miracle cure";
        assert_eq!(
            loaded.predict_default(text).unwrap(),
            model.predict_default(text).unwrap()
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Classifier::load(&dir.path().join("absent.rkyv")).unwrap_err();
        assert!(matches!(err, ClassifierError::ModelNotFound { .. }));
    }

    #[test]
    fn test_load_garbage_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.rkyv");
        std::fs::write(&path, b"definitely not an archive").unwrap();

        let err = Classifier::load(&path).unwrap_err();
        assert!(matches!(err, ClassifierError::InvalidArtifact { .. }));
    }

    fn write_artifact(path: &std::path::Path, artifact: &ClassifierArtifact) {
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(artifact).unwrap();
        std::fs::write(path, &bytes).unwrap();
    }

    #[test]
    fn test_load_rejects_length_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.rkyv");
        write_artifact(
            &path,
            &ClassifierArtifact {
                format_version: ARTIFACT_FORMAT_VERSION,
                terms: vec!["aa".into(), "bb".into()],
                idf: vec![1.0, 1.0],
                weights: vec![0.5],
                bias: 0.0,
            },
        );

        let err = Classifier::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::DimensionMismatch {
                vocabulary: 2,
                weights: 1,
                idf: 2
            }
        ));
    }

    #[test]
    fn test_load_rejects_unknown_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("future.rkyv");
        write_artifact(
            &path,
            &ClassifierArtifact {
                format_version: ARTIFACT_FORMAT_VERSION + 1,
                terms: vec![],
                idf: vec![],
                weights: vec![],
                bias: 0.0,
            },
        );

        let err = Classifier::load(&path).unwrap_err();
        assert!(err.to_string().contains("format version"));
    }
}
