//! Tiny random-weight checkpoints written to disk, for exercising the model path without
//! downloading a real model.

use std::collections::BTreeMap;
use std::path::Path;

use candle_core::{DType, Device};
use candle_nn::{VarBuilder, VarMap};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use candle_transformers::models::xlm_roberta::{Config as XlmRobertaConfig, XLMRobertaModel};
use serde_json::json;

use super::bert::EncoderArch;

pub const TINY_HIDDEN: usize = 8;
pub const PAD_ID: u32 = 1;

/// Vocabulary of the tiny checkpoints. Ids 0..=3 are the XLM-R specials.
pub const VOCAB: [&str; 12] = [
    "<s>", "<pad>", "</s>", "<unk>", "chat", "noir", "gris", "chien", "petit", "grand", "le",
    "la",
];

pub fn tiny_config(arch: EncoderArch) -> serde_json::Value {
    let model_type = match arch {
        EncoderArch::Bert => "bert",
        EncoderArch::XlmRoberta => "xlm-roberta",
    };
    json!({
        "model_type": model_type,
        "vocab_size": 16,
        "hidden_size": TINY_HIDDEN,
        "num_hidden_layers": 1,
        "num_attention_heads": 2,
        "intermediate_size": 16,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.1,
        "attention_probs_dropout_prob": 0.1,
        "max_position_embeddings": 24,
        "type_vocab_size": 1,
        "initializer_range": 0.02,
        "layer_norm_eps": 1e-5,
        "pad_token_id": PAD_ID,
        "position_embedding_type": "absolute"
    })
}

/// Writes `config.json` and `model.safetensors` with random weights; returns the weights.
pub fn write_checkpoint(dir: &Path, arch: EncoderArch) -> VarMap {
    let config = tiny_config(arch);
    std::fs::write(dir.join("config.json"), config.to_string()).expect("write config.json");

    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    match arch {
        EncoderArch::Bert => {
            let config: BertConfig = serde_json::from_value(config).expect("bert config");
            BertModel::load(vb, &config).expect("init bert weights");
        }
        EncoderArch::XlmRoberta => {
            let config: XlmRobertaConfig =
                serde_json::from_value(config).expect("xlm-roberta config");
            XLMRobertaModel::new(&config, vb).expect("init xlm-roberta weights");
        }
    }

    varmap
        .save(dir.join("model.safetensors"))
        .expect("save model.safetensors");
    varmap
}

/// Writes a whitespace word-level `tokenizer.json` over [`VOCAB`].
pub fn write_tokenizer(dir: &Path) {
    let vocab: BTreeMap<&str, usize> = VOCAB.iter().enumerate().map(|(i, w)| (*w, i)).collect();
    let tokenizer = json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "<unk>"
        }
    });
    std::fs::write(dir.join("tokenizer.json"), tokenizer.to_string())
        .expect("write tokenizer.json");
}

/// Writes a complete model directory (config, weights, tokenizer).
pub fn write_model_dir(dir: &Path, arch: EncoderArch) -> VarMap {
    write_tokenizer(dir);
    write_checkpoint(dir, arch)
}

pub fn max_abs_diff(a: &[f32], b: &[f32]) -> f32 {
    assert_eq!(a.len(), b.len(), "vector lengths differ");
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f32::max)
}
