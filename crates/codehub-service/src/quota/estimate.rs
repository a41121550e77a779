//! Token cost estimation.
//!
//! A coarse deterministic character-count proxy, **not** a tokenizer:
//! the figure charged against the quota is unrelated to whatever the
//! generation backend actually consumes. Kept explicit so nothing
//! downstream mistakes it for a backend contract.

/// Minimum tokens charged for any generation, however short the prompt.
pub const MIN_TOKENS: u64 = 50;

/// Assumed average characters per token.
pub const CHARS_PER_TOKEN: u64 = 4;

/// Estimated token cost of a prompt:
/// `max(MIN_TOKENS, ceil(chars / CHARS_PER_TOKEN))`.
pub fn estimate_tokens(prompt: &str) -> u64 {
    let chars = prompt.chars().count() as u64;
    chars.div_ceil(CHARS_PER_TOKEN).max(MIN_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prompt_hits_floor() {
        assert_eq!(estimate_tokens(""), MIN_TOKENS);
        assert_eq!(estimate_tokens(&"x".repeat(20)), MIN_TOKENS);
        assert_eq!(estimate_tokens(&"x".repeat(200)), MIN_TOKENS);
    }

    #[test]
    fn test_long_prompt_scales() {
        assert_eq!(estimate_tokens(&"x".repeat(400)), 100);
        // Ceiling division: 401 chars is 101 tokens, not 100.
        assert_eq!(estimate_tokens(&"x".repeat(401)), 101);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        // 400 multibyte characters are still 100 tokens.
        assert_eq!(estimate_tokens(&"ä".repeat(400)), 100);
    }
}
