//! Token-level plumbing for the direct NLLB strategy: source sequence
//! layout and greedy decoding with a forced target-language token. Kept free
//! of any inference runtime so it can be exercised with fake logits.

/// Special token ids and limits for one generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    /// First decoder input; NLLB starts decoding from `</s>`
    pub decoder_start_token_id: u32,
    /// Target language tag forced as the first generated token
    pub forced_bos_token_id: u32,
    pub eos_token_id: u32,
    /// Upper bound on the decoder sequence length, start token included
    pub max_length: usize,
}

/// Lay out encoder input as `[source_tag] body [</s>]`, truncating the body
/// so the whole sequence fits in `max_input_tokens`.
pub fn build_source_ids(
    source_tag_id: u32,
    body: &[u32],
    eos_token_id: u32,
    max_input_tokens: usize,
) -> Vec<u32> {
    let body_budget = max_input_tokens.saturating_sub(2);
    let body = &body[..body.len().min(body_budget)];

    let mut ids = Vec::with_capacity(body.len() + 2);
    ids.push(source_tag_id);
    ids.extend_from_slice(body);
    ids.push(eos_token_id);
    ids
}

/// Index of the highest logit. NaN entries never win.
pub fn argmax(logits: &[f32]) -> Option<u32> {
    logits
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, best_v)) if best_v >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i as u32)
}

/// Greedy decoding.
///
/// `next_logits` receives the decoder ids so far and returns the logits for
/// the next position. The returned sequence includes the start token, the
/// forced language token and the terminating `</s>` when one was produced.
pub fn greedy_generate<F>(params: &GenerationParams, mut next_logits: F) -> Result<Vec<u32>, String>
where
    F: FnMut(&[u32]) -> Result<Vec<f32>, String>,
{
    let mut ids = vec![params.decoder_start_token_id];
    if params.max_length < 2 {
        return Ok(ids);
    }
    ids.push(params.forced_bos_token_id);

    while ids.len() < params.max_length {
        let logits = next_logits(&ids)?;
        let next = argmax(&logits).ok_or_else(|| "model produced empty logits".to_string())?;
        ids.push(next);
        if next == params.eos_token_id {
            break;
        }
    }

    Ok(ids)
}
