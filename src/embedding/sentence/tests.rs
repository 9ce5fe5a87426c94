use super::*;
use std::path::PathBuf;

mod config_tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_embedder_config_default() {
        let config = EmbedderConfig::default();
        assert_eq!(config.embedding_dim, SENTENCE_EMBEDDING_DIM);
        assert_eq!(config.max_seq_len, SENTENCE_MAX_SEQ_LEN);
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert!(!config.testing_stub);
        assert!(config.model_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_embedder_config_new() {
        let config = EmbedderConfig::new("/models/minilm");
        assert_eq!(config.model_dir, PathBuf::from("/models/minilm"));
        assert!(!config.testing_stub);
    }

    #[test]
    fn test_embedder_config_stub() {
        let config = EmbedderConfig::stub();
        assert!(config.testing_stub);
        assert!(config.model_dir.as_os_str().is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_embedder_config_validation_empty_path_no_stub() {
        let config = EmbedderConfig::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_embedder_config_validation_nonexistent_dir() {
        let config = EmbedderConfig::new("/nonexistent/minilm");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
    }

    #[test]
    fn test_embedder_config_validation_zero_batch() {
        let config = EmbedderConfig::stub().with_batch_size(0);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, EmbeddingError::InvalidConfig { .. }));
    }

    #[test]
    fn test_missing_model_file_reports_first_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("config.json"), "{}").expect("write config");

        let config = EmbedderConfig::new(dir.path());
        assert_eq!(
            config.missing_model_file(),
            Some(dir.path().join("model.safetensors"))
        );
        assert!(!config.model_available());
    }

    #[test]
    fn test_load_fails_when_model_files_missing() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = SentenceEmbedder::load(EmbedderConfig::new(dir.path())).unwrap_err();
        match err {
            EmbeddingError::ModelNotFound { path } => {
                assert_eq!(path, dir.path().join("config.json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_env_constant() {
        assert_eq!(EmbedderConfig::ENV_MODEL_DIR, "GLOSAURUS_MODEL_DIR");
    }

    #[test]
    #[serial]
    fn test_from_env_unset_is_stub() {
        unsafe {
            env::remove_var(EmbedderConfig::ENV_MODEL_DIR);
        }

        let config = EmbedderConfig::from_env();
        assert!(config.testing_stub);
    }

    #[test]
    #[serial]
    fn test_from_env_whitespace_is_stub() {
        unsafe {
            env::set_var(EmbedderConfig::ENV_MODEL_DIR, "  \t");
        }

        let config = EmbedderConfig::from_env();
        assert!(config.testing_stub);

        unsafe {
            env::remove_var(EmbedderConfig::ENV_MODEL_DIR);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_with_dir() {
        unsafe {
            env::set_var(EmbedderConfig::ENV_MODEL_DIR, "/opt/models/minilm");
        }

        let config = EmbedderConfig::from_env();
        assert!(!config.testing_stub);
        assert_eq!(config.model_dir, PathBuf::from("/opt/models/minilm"));

        unsafe {
            env::remove_var(EmbedderConfig::ENV_MODEL_DIR);
        }
    }
}

mod stub_tests {
    use super::*;

    fn stub() -> SentenceEmbedder {
        SentenceEmbedder::stub().expect("stub embedder should load")
    }

    #[test]
    fn test_stub_reports_mode() {
        let embedder = stub();
        assert!(embedder.is_stub());
        assert!(!embedder.has_model());
        assert_eq!(embedder.embedding_dim(), SENTENCE_EMBEDDING_DIM);
    }

    #[test]
    fn test_stub_embedding_dimension() {
        let embedder = stub();
        let vector = embedder.embed_one("bonheur").expect("embed");
        assert_eq!(vector.len(), SENTENCE_EMBEDDING_DIM);
    }

    #[test]
    fn test_stub_is_deterministic() {
        let embedder = stub();
        let a = embedder.embed_one("content").expect("embed");
        let b = embedder.embed_one("content").expect("embed");
        assert_eq!(a, b);

        let other = stub();
        assert_eq!(a, other.embed_one("content").expect("embed"));
    }

    #[test]
    fn test_stub_differs_per_text() {
        let embedder = stub();
        let a = embedder.embed_one("content").expect("embed");
        let b = embedder.embed_one("joyeux").expect("embed");
        assert_ne!(a, b);
    }

    #[test]
    fn test_stub_values_in_range() {
        let embedder = stub();
        let vector = embedder.embed_one("ravi").expect("embed");
        assert!(vector.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_embed_many_matches_embed_one_in_order() {
        let embedder = stub();
        let texts = ["heureux", "triste", "heureux"];
        let batch = embedder.embed_many(&texts).expect("embed_many");

        assert_eq!(batch.len(), 3);
        for (text, vector) in texts.iter().zip(&batch) {
            assert_eq!(vector, &embedder.embed_one(text).expect("embed"));
        }
        assert_eq!(batch[0], batch[2]);
    }

    #[test]
    fn test_embed_many_empty() {
        let embedder = stub();
        assert!(embedder.embed_many(&[]).expect("embed_many").is_empty());
    }

    #[test]
    fn test_stub_custom_dimension() {
        let config = EmbedderConfig {
            embedding_dim: 16,
            ..EmbedderConfig::stub()
        };
        let embedder = SentenceEmbedder::load(config).expect("load");
        assert_eq!(embedder.embed_one("x").expect("embed").len(), 16);
    }

    #[test]
    fn test_debug_format() {
        let debug = format!("{:?}", stub());
        assert!(debug.contains("SentenceEmbedder"));
        assert!(debug.contains("Stub"));
    }
}

mod model_tests {
    use super::*;
    use crate::embedding::bert::EncoderArch;
    use crate::embedding::fixtures::{TINY_HIDDEN, max_abs_diff, write_model_dir};

    const TEXTS: [&str; 4] = ["le chat noir", "chien", "la petite chatte grise", "grand chien gris"];

    fn load(dir: &std::path::Path, batch_size: usize) -> SentenceEmbedder {
        SentenceEmbedder::load(EmbedderConfig::new(dir).with_batch_size(batch_size))
            .expect("tiny model should load")
    }

    #[test]
    fn test_loads_tiny_xlm_roberta_model() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_model_dir(dir.path(), EncoderArch::XlmRoberta);

        let embedder = load(dir.path(), DEFAULT_BATCH_SIZE);
        assert!(embedder.has_model());
        assert!(!embedder.is_stub());
        assert_eq!(embedder.embedding_dim(), TINY_HIDDEN);
    }

    #[test]
    fn test_padded_batch_matches_single_inputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_model_dir(dir.path(), EncoderArch::XlmRoberta);
        let embedder = load(dir.path(), DEFAULT_BATCH_SIZE);

        let batch = embedder.embed_many(&TEXTS).expect("embed_many");
        assert_eq!(batch.len(), TEXTS.len());

        for (text, batched) in TEXTS.iter().zip(&batch) {
            let single = embedder.embed_one(text).expect("embed_one");
            let drift = max_abs_diff(&single, batched);
            assert!(drift < 1e-5, "{text:?} changed by {drift} when padded");
        }
    }

    #[test]
    fn test_chunked_batches_keep_input_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_model_dir(dir.path(), EncoderArch::XlmRoberta);

        let whole = load(dir.path(), DEFAULT_BATCH_SIZE)
            .embed_many(&TEXTS)
            .expect("one chunk");
        for batch_size in [1, 3] {
            let chunked = load(dir.path(), batch_size)
                .embed_many(&TEXTS)
                .expect("several chunks");

            assert_eq!(chunked.len(), whole.len());
            for (a, b) in chunked.iter().zip(&whole) {
                assert!(max_abs_diff(a, b) < 1e-5, "batch_size {batch_size} reordered output");
            }
        }
    }

    #[test]
    fn test_distinct_texts_get_distinct_vectors() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_model_dir(dir.path(), EncoderArch::XlmRoberta);
        let embedder = load(dir.path(), 1);

        let vectors = embedder.embed_many(&["chat", "chien"]).expect("embed_many");
        assert!(max_abs_diff(&vectors[0], &vectors[1]) > 1e-6);
    }
}
