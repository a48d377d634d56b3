use super::document::Document;

/// A retrieval unit: a bounded window of one document's text
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub text: String,
    /// Source path, kept for diagnostics
    pub source: String,
}

/// Split a document into overlapping fixed-size character windows.
///
/// Consecutive windows share `overlap` characters so context spanning a
/// window boundary is still retrievable from either side.
pub fn chunk_document(doc: &Document, chunk_size: usize, overlap: usize) -> Vec<Chunk> {
    let source = doc.source.to_string_lossy().into_owned();
    chunk_text(&doc.content, chunk_size, overlap)
        .into_iter()
        .map(|text| Chunk {
            text,
            source: source.clone(),
        })
        .collect()
}

/// Window `text` into chunks of at most `chunk_size` characters, stepping
/// `chunk_size - overlap` each time.  Operates on characters, so multi-byte
/// text is never split mid-sequence.  An overlap at or above the window size
/// is clamped so the window always advances.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chunk_size = chunk_size.max(1);
    let overlap = overlap.min(chunk_size - 1);
    let step = chunk_size - overlap;

    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut start = 0;

    while start < chars.len() {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}
