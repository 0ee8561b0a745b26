use regex::Regex;
use std::sync::OnceLock;

/// Split text into batches of at most `max_chars` characters.
///
/// Batches break after sentence punctuation where possible, then on
/// whitespace, and only as a last resort inside a word. Lengths are counted
/// in characters so multi-byte scripts such as Tamil are never cut inside a
/// UTF-8 sequence.
pub fn split_into_batches(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if char_len(text) <= max_chars {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current_batch = String::new();

    for sentence in split_sentences(text) {
        let sentence_len = char_len(&sentence);

        if sentence_len > max_chars {
            flush(&mut batches, &mut current_batch);
            split_long_sentence(&sentence, max_chars, &mut batches);
            continue;
        }

        if !current_batch.is_empty() && char_len(&current_batch) + sentence_len > max_chars {
            flush(&mut batches, &mut current_batch);
        }
        current_batch.push_str(&sentence);
    }

    flush(&mut batches, &mut current_batch);
    batches
}

/// Sentences keep their trailing punctuation and whitespace
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last_end = 0;

    for mat in sentence_pattern().find_iter(text) {
        sentences.push(text[last_end..mat.end()].to_string());
        last_end = mat.end();
    }
    if last_end < text.len() {
        sentences.push(text[last_end..].to_string());
    }

    sentences
}

fn split_long_sentence(sentence: &str, max_chars: usize, batches: &mut Vec<String>) {
    let mut current = String::new();

    for word in sentence.split_whitespace() {
        let word_len = char_len(word);

        if word_len > max_chars {
            flush(batches, &mut current);
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                batches.push(chunk.iter().collect());
            }
            continue;
        }

        let separator = usize::from(!current.is_empty());
        if char_len(&current) + separator + word_len > max_chars {
            flush(batches, &mut current);
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    flush(batches, &mut current);
}

fn flush(batches: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        batches.push(trimmed.to_string());
    }
    current.clear();
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn sentence_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.!?।]+\s+").expect("sentence pattern is valid"))
}
