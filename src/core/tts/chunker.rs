//! Splits text into pieces small enough for a single engine request.
//!
//! Cuts prefer sentence punctuation, then whitespace, and only split inside a
//! word when the word alone exceeds the limit. Adjacent pieces are re-joined
//! while they still fit, so short texts stay a single request.

/// Maximum characters the Google Translate endpoint accepts per request
pub const MAX_CHUNK_CHARS: usize = 100;

fn is_boundary(ch: char) -> bool {
    matches!(
        ch,
        '.' | '!'
            | '?'
            | ';'
            | ':'
            | ','
            | '\n'
            | '¡'
            | '¿'
            | '。'
            | '！'
            | '？'
            | '；'
            | '：'
            | '，'
            | '、'
            | '।'
            | '॥'
    )
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Chunks that contain nothing speakable (only punctuation) are dropped, so the
/// result can be empty.
pub fn split_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut pieces = Vec::new();

    for sentence in sentences(text) {
        if sentence.chars().any(char::is_alphanumeric) {
            split_long(sentence, max_chars, &mut pieces);
        }
    }

    merge(pieces, max_chars)
}

fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut after_boundary = false;

    for (idx, ch) in text.char_indices() {
        if is_boundary(ch) {
            after_boundary = true;
        } else if after_boundary {
            out.push(&text[start..idx]);
            start = idx;
            after_boundary = false;
        }
    }
    if start < text.len() {
        out.push(&text[start..]);
    }

    out.into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn split_long(segment: &str, max_chars: usize, out: &mut Vec<String>) {
    if segment.chars().count() <= max_chars {
        out.push(segment.to_string());
        return;
    }

    let mut current = String::new();
    let mut current_len = 0;

    for word in segment.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                out.push(piece.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            out.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        out.push(current);
    }
}

fn merge(pieces: Vec<String>, max_chars: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(pieces.len());

    for piece in pieces {
        if let Some(last) = out.last_mut()
            && last.chars().count() + 1 + piece.chars().count() <= max_chars
        {
            last.push(' ');
            last.push_str(&piece);
            continue;
        }
        out.push(piece);
    }

    out
}
