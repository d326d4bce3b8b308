use std::collections::VecDeque;

use crate::error::DrawError;
use crate::rand::SecureRandomSource;

/// Hands out the scripted words in order, then fails as an exhausted provider would
pub struct ScriptedEntropy {
    words: VecDeque<u32>,
    pub drawn: usize,
}

impl ScriptedEntropy {
    pub fn new(words: &[u32]) -> Self {
        Self {
            words: words.iter().copied().collect(),
            drawn: 0,
        }
    }
}

impl SecureRandomSource for ScriptedEntropy {
    fn next_word(&mut self) -> Result<u32, DrawError> {
        let word = self
            .words
            .pop_front()
            .ok_or_else(|| DrawError::EntropyUnavailable("scripted words exhausted".to_string()))?;
        self.drawn += 1;
        Ok(word)
    }
}

pub struct UnavailableEntropy;

impl SecureRandomSource for UnavailableEntropy {
    fn next_word(&mut self) -> Result<u32, DrawError> {
        Err(DrawError::EntropyUnavailable("provider offline".to_string()))
    }
}
