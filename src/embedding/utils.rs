use std::path::Path;

use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// Loads `tokenizer.json` from `model_dir`, truncating to `max_len` tokens and
/// padding batches to their longest member.
pub fn load_tokenizer_with_truncation(
    model_dir: &Path,
    max_len: usize,
) -> Result<Tokenizer, tokenizers::Error> {
    let mut tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json"))?;

    tokenizer.with_truncation(Some(TruncationParams {
        max_length: max_len,
        ..Default::default()
    }))?;
    tokenizer.with_padding(Some(PaddingParams {
        strategy: PaddingStrategy::BatchLongest,
        ..Default::default()
    }));

    Ok(tokenizer)
}
