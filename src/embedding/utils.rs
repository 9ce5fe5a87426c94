use std::io;
use std::path::Path;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

/// Loads a tokenizer from a model directory or an explicit `tokenizer.json` path.
pub fn load_tokenizer(model_path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_path.is_dir() {
        model_path.join("tokenizer.json")
    } else {
        model_path.to_path_buf()
    };

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}

/// Loads a tokenizer configured for batched sentence embedding.
///
/// Inputs longer than `max_len` tokens are truncated; a batch is padded to its longest
/// member so the attention mask marks the real tokens for pooling.
pub fn load_batch_tokenizer(model_path: &Path, max_len: usize) -> io::Result<Tokenizer> {
    let mut tokenizer = load_tokenizer(model_path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| io::Error::other(format!("Failed to configure truncation: {}", e)))?;

    if tokenizer.get_padding().is_none() {
        let mut padding = PaddingParams::default();
        // XLM-R style vocabularies (the multilingual MiniLM) pad with `<pad>`, not `[PAD]`.
        if let Some(pad_id) = tokenizer.token_to_id("<pad>") {
            padding.pad_id = pad_id;
            padding.pad_token = "<pad>".to_string();
        }
        tokenizer.with_padding(Some(padding));
    }

    Ok(tokenizer)
}
