//! Fixed-size, character-based text chunking with overlap.
//!
//! A cursor walks the text in steps of `chunk_size - overlap` characters and
//! emits the window `[cursor, cursor + chunk_size)` at every position, so the
//! last few windows shrink as the text runs out. Lengths are counted in
//! `char`s, never bytes.

use serde::Deserialize;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_OVERLAP: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkError {
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,

    #[error("overlap ({overlap}) must be smaller than chunk size ({chunk_size})")]
    OverlapTooLarge { chunk_size: usize, overlap: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl ChunkingConfig {
    pub fn validate(&self) -> Result<(), ChunkError> {
        if self.chunk_size == 0 {
            return Err(ChunkError::ZeroChunkSize);
        }
        if self.overlap >= self.chunk_size {
            return Err(ChunkError::OverlapTooLarge {
                chunk_size: self.chunk_size,
                overlap: self.overlap,
            });
        }
        Ok(())
    }

    pub fn chunk(&self, text: &str) -> Result<Vec<String>, ChunkError> {
        chunk_text(text, self.chunk_size, self.overlap)
    }
}

/// Splits `text` into overlapping windows of at most `chunk_size` characters.
///
/// Fails when `overlap >= chunk_size`, since the cursor would never advance.
pub fn chunk_text(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>, ChunkError> {
    ChunkingConfig {
        chunk_size,
        overlap,
    }
    .validate()?;

    if text.is_empty() {
        return Ok(Vec::new());
    }

    let step = chunk_size - overlap;
    let mut chunks = Vec::with_capacity(text.chars().count().div_ceil(step));
    let mut start = 0;

    loop {
        let rest = &text[start..];
        let end = rest
            .char_indices()
            .nth(chunk_size)
            .map_or(text.len(), |(i, _)| start + i);
        chunks.push(text[start..end].to_string());

        // At most `step` chars left: the next cursor would be at or past the end.
        match rest.char_indices().nth(step) {
            Some((i, _)) => start += i,
            None => break,
        }
    }

    Ok(chunks)
}
