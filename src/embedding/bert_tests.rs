use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{Config as XlmRobertaConfig, XLMRobertaModel};

use super::bert::{BertEncoder, EncoderArch, mean_pool};
use super::fixtures::{PAD_ID, TINY_HIDDEN, max_abs_diff, tiny_config, write_checkpoint};

fn ids(rows: &[&[u32]]) -> Tensor {
    Tensor::new(rows.iter().map(|r| r.to_vec()).collect::<Vec<_>>(), &Device::Cpu)
        .expect("ids tensor")
}

fn encode(encoder: &BertEncoder, input: &[&[u32]], mask: &[&[u32]]) -> Vec<Vec<f32>> {
    let input_ids = ids(input);
    let attention_mask = ids(mask);
    let token_type_ids = input_ids.zeros_like().expect("token types");
    encoder
        .encode(&input_ids, &token_type_ids, &attention_mask)
        .expect("encode")
        .to_vec2::<f32>()
        .expect("to_vec2")
}

#[test]
fn test_arch_from_model_type() {
    assert_eq!(
        EncoderArch::from_model_type(Some("xlm-roberta")),
        EncoderArch::XlmRoberta
    );
    assert_eq!(
        EncoderArch::from_model_type(Some("roberta")),
        EncoderArch::XlmRoberta
    );
    assert_eq!(EncoderArch::from_model_type(Some("bert")), EncoderArch::Bert);
    assert_eq!(EncoderArch::from_model_type(None), EncoderArch::Bert);
}

#[test]
fn test_loads_xlm_roberta_checkpoint_as_xlm_roberta() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_checkpoint(dir.path(), EncoderArch::XlmRoberta);

    let encoder = BertEncoder::load(dir.path(), &Device::Cpu).expect("load");
    assert_eq!(encoder.arch(), EncoderArch::XlmRoberta);
    assert_eq!(encoder.hidden_size(), TINY_HIDDEN);
}

#[test]
fn test_xlm_roberta_matches_reference_model() {
    let dir = tempfile::tempdir().expect("tempdir");
    let varmap = write_checkpoint(dir.path(), EncoderArch::XlmRoberta);
    let encoder = BertEncoder::load(dir.path(), &Device::Cpu).expect("load");

    let config: XlmRobertaConfig =
        serde_json::from_value(tiny_config(EncoderArch::XlmRoberta)).expect("config");
    let reference = XLMRobertaModel::new(
        &config,
        VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu),
    )
    .expect("reference model");

    let input_ids = ids(&[&[0, 7, 9, 2]]);
    let attention_mask = ids(&[&[1, 1, 1, 1]]);
    let token_type_ids = input_ids.zeros_like().expect("token types");
    let hidden = reference
        .forward(&input_ids, &attention_mask, &token_type_ids, None, None, None)
        .expect("reference forward");
    let expected = mean_pool(&hidden, &attention_mask)
        .expect("pool")
        .to_vec2::<f32>()
        .expect("to_vec2");

    let actual = encode(&encoder, &[&[0, 7, 9, 2]], &[&[1, 1, 1, 1]]);

    let drift = max_abs_diff(&actual[0], &expected[0]);
    assert!(drift < 1e-5, "encoder drifts from XLM-R by {drift}");
}

#[test]
fn test_bert_checkpoint_stays_bert() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_checkpoint(dir.path(), EncoderArch::Bert);

    let encoder = BertEncoder::load(dir.path(), &Device::Cpu).expect("load");
    assert_eq!(encoder.arch(), EncoderArch::Bert);
}

#[test]
fn test_padding_does_not_change_pooled_vector() {
    for arch in [EncoderArch::XlmRoberta, EncoderArch::Bert] {
        let dir = tempfile::tempdir().expect("tempdir");
        write_checkpoint(dir.path(), arch);
        let encoder = BertEncoder::load(dir.path(), &Device::Cpu).expect("load");

        let alone = encode(&encoder, &[&[4, 5]], &[&[1, 1]]);
        let padded = encode(&encoder, &[&[4, 5, PAD_ID]], &[&[1, 1, 0]]);

        let drift = max_abs_diff(&alone[0], &padded[0]);
        assert!(drift < 1e-5, "{arch:?}: padding shifted the vector by {drift}");
    }
}

#[test]
fn test_batch_rows_are_independent() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_checkpoint(dir.path(), EncoderArch::XlmRoberta);
    let encoder = BertEncoder::load(dir.path(), &Device::Cpu).expect("load");

    let batch = encode(
        &encoder,
        &[&[4, 5, 6], &[7, PAD_ID, PAD_ID]],
        &[&[1, 1, 1], &[1, 0, 0]],
    );
    let first = encode(&encoder, &[&[4, 5, 6]], &[&[1, 1, 1]]);
    let second = encode(&encoder, &[&[7]], &[&[1]]);

    assert!(max_abs_diff(&batch[0], &first[0]) < 1e-5);
    assert!(max_abs_diff(&batch[1], &second[0]) < 1e-5);
}

#[test]
fn test_mean_pool_ignores_masked_positions() {
    let hidden = Tensor::new(
        &[[[1.0f32, 2.0], [3.0, 4.0], [100.0, 100.0]]],
        &Device::Cpu,
    )
    .expect("hidden");
    let mask = ids(&[&[1, 1, 0]]);

    let pooled = mean_pool(&hidden, &mask)
        .expect("pool")
        .to_vec2::<f32>()
        .expect("to_vec2");
    assert!(max_abs_diff(&pooled[0], &[2.0, 3.0]) < 1e-5);
}
