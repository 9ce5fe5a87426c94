//! Cross-cutting, shared constants.
//!
//! The embedding defaults describe `paraphrase-multilingual-MiniLM-L12-v2`. A model with a
//! different hidden size reports its own dimension at load time; these values remain the
//! defaults for stub mode and configuration.

/// Output dimension of the default sentence embedding model.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token budget per text for the default sentence embedding model.
pub const DEFAULT_MAX_SEQ_LEN: usize = 128;

/// Hugging Face identifier of the default sentence embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str =
    "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";

/// Default local text generation model.
pub const DEFAULT_GENERATOR_MODEL: &str = "qwen3:0.6b";

/// Default generation budget (tokens) for synonym lists.
pub const DEFAULT_GENERATOR_MAX_TOKENS: u32 = 300;

/// Default number of cached embeddings.
pub const DEFAULT_EMBED_CACHE_CAPACITY: u64 = 10_000;

/// Default HTTP request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default HTTP port (matches the front-end's expectations).
pub const DEFAULT_PORT: u16 = 8000;

/// Origins allowed by CORS when none are configured.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:80",
    "http://127.0.0.1",
    "http://127.0.0.1:80",
    "http://localhost:5173",
    "http://127.0.0.1:5173",
];

/// Response header carrying a short machine-readable outcome.
pub const GLOSAURUS_STATUS_HEADER: &str = "x-glosaurus-status";
