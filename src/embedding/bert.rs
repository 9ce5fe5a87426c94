use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use candle_transformers::models::xlm_roberta::{Config as XlmRobertaConfig, XLMRobertaModel};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

/// Transformer architecture behind a checkpoint, read from `config.json`'s `model_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderArch {
    Bert,
    /// RoBERTa family: position ids start after `pad_token_id` and skip padding.
    XlmRoberta,
}

impl EncoderArch {
    pub fn from_model_type(model_type: Option<&str>) -> Self {
        match model_type {
            Some("xlm-roberta") | Some("roberta") | Some("camembert") => Self::XlmRoberta,
            _ => Self::Bert,
        }
    }
}

enum EncoderModel {
    Bert(BertModel),
    XlmRoberta(XLMRobertaModel),
}

/// Sentence encoder with attention-masked mean pooling.
///
/// Covers the sentence-transformers MiniLM checkpoints, both the English BERT ones and the
/// multilingual XLM-R ones. Safetensors are stored either bare or under a `bert.` /
/// `roberta.` prefix.
#[derive(Clone)]
pub struct BertEncoder {
    model: Arc<EncoderModel>,
    arch: EncoderArch,
    hidden_size: usize,
}

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_path = model_dir.join("config.json");
        let weights_path = model_dir.join("model.safetensors");

        let config_content = std::fs::read_to_string(config_path)?;
        let mut raw: Value = serde_json::from_str(&config_content)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;
        let arch = EncoderArch::from_model_type(raw.get("model_type").and_then(Value::as_str));

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };
        let vb = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            vb.pp("bert")
        } else if vb.contains_tensor("roberta.embeddings.word_embeddings.weight") {
            vb.pp("roberta")
        } else {
            vb
        };

        let (model, hidden_size) = match arch {
            EncoderArch::Bert => {
                let config: BertConfig = parse_config(raw)?;
                (EncoderModel::Bert(BertModel::load(vb, &config)?), config.hidden_size)
            }
            EncoderArch::XlmRoberta => {
                if let Some(obj) = raw.as_object_mut() {
                    obj.entry("position_embedding_type")
                        .or_insert_with(|| Value::from("absolute"));
                }
                let config: XlmRobertaConfig = parse_config(raw)?;
                (
                    EncoderModel::XlmRoberta(XLMRobertaModel::new(&config, vb)?),
                    config.hidden_size,
                )
            }
        };

        Ok(Self {
            model: Arc::new(model),
            arch,
            hidden_size,
        })
    }

    pub fn arch(&self) -> EncoderArch {
        self.arch
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Runs the encoder and mean-pools token states over the attention mask.
    ///
    /// Inputs are `[batch, seq_len]`; the result is `[batch, hidden_size]`.
    pub fn encode(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let hidden = match self.model.as_ref() {
            EncoderModel::Bert(model) => {
                model.forward(input_ids, token_type_ids, Some(attention_mask))?
            }
            EncoderModel::XlmRoberta(model) => {
                model.forward(input_ids, attention_mask, token_type_ids, None, None, None)?
            }
        };

        mean_pool(&hidden, attention_mask)
    }
}

/// Averages `[batch, seq_len, hidden]` states over the positions where `mask` is 1.
pub fn mean_pool(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let mask = attention_mask.to_dtype(DType::F32)?.unsqueeze(2)?;
    let summed = hidden.broadcast_mul(&mask)?.sum(1)?;
    let counts = (mask.sum(1)? + 1e-9)?;

    summed.broadcast_div(&counts)
}

fn parse_config<T: serde::de::DeserializeOwned>(raw: Value) -> Result<T> {
    serde_json::from_value(raw)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))
}
