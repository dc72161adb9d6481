//! Sentence- and word-aware text chunking.
//!
//! The translation primitive only accepts bounded input, so long messages are
//! cut into ordered segments before translation. Lengths are measured in
//! Unicode scalar values, not bytes.

/// Splits `text` into ordered chunks of at most `max_length` characters.
///
/// Text that already fits is returned unchanged as a single chunk, even when
/// it is empty. Longer text is split after sentence terminators (`.`, `!`, `?`
/// followed by whitespace) and sentences are packed greedily into chunks
/// joined by a single space. A sentence that is too long on its own is split
/// between words, and a word that is too long on its own is split into
/// `max_length`-sized pieces.
///
/// Splitting never produces an empty chunk, so oversized whitespace-only
/// input yields no chunks.
pub fn chunk(text: &str, max_length: usize) -> Vec<String> {
    let max_length = max_length.max(1);

    if char_len(text) <= max_length {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if char_len(sentence) > max_length {
            flush(&mut current, &mut chunks);
            chunks.extend(split_words(sentence, max_length));
        } else {
            append_bounded(&mut current, sentence, max_length, &mut chunks);
        }
    }
    flush(&mut current, &mut chunks);

    chunks
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Splits after `.`, `!` or `?` when the next character is whitespace.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        let at_boundary = matches!(c, '.' | '!' | '?')
            && chars.peek().is_some_and(|(_, next)| next.is_whitespace());
        if at_boundary {
            let end = idx + c.len_utf8();
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, segment: &'a str) {
    let segment = segment.trim();
    if !segment.is_empty() {
        out.push(segment);
    }
}

fn split_words(sentence: &str, max_length: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in sentence.split_whitespace() {
        if char_len(word) > max_length {
            flush(&mut current, &mut chunks);
            let chars: Vec<char> = word.chars().collect();
            chunks.extend(chars.chunks(max_length).map(|piece| piece.iter().collect()));
        } else {
            append_bounded(&mut current, word, max_length, &mut chunks);
        }
    }
    flush(&mut current, &mut chunks);

    chunks
}

/// Appends `piece` to `current`, flushing first if it would overflow.
fn append_bounded(current: &mut String, piece: &str, max_length: usize, chunks: &mut Vec<String>) {
    if current.is_empty() {
        current.push_str(piece);
    } else if char_len(current) + 1 + char_len(piece) <= max_length {
        current.push(' ');
        current.push_str(piece);
    } else {
        flush(current, chunks);
        current.push_str(piece);
    }
}

fn flush(current: &mut String, chunks: &mut Vec<String>) {
    if !current.is_empty() {
        chunks.push(std::mem::take(current));
    }
}
