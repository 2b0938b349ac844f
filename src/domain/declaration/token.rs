/// Largest token the parser keeps; longer words are truncated.
pub const MAX_TOKEN_LEN: usize = 1024;

/// Reusable buffer holding the word currently being read.
///
/// Clearing keeps the allocation so one buffer serves the whole stream.
#[derive(Debug, Clone)]
pub struct Token {
    bytes: Vec<u8>,
    truncated: bool,
}

impl Token {
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(64),
            truncated: false,
        }
    }

    /// Appends one byte. Returns `false` once the buffer is full.
    pub fn push(&mut self, byte: u8) -> bool {
        if self.bytes.len() >= MAX_TOKEN_LEN {
            self.truncated = true;
            return false;
        }
        self.bytes.push(byte);
        true
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
        self.truncated = false;
    }

    /// Replaces the contents with another token's.
    pub fn copy_from(&mut self, other: &Token) {
        self.bytes.clear();
        self.bytes.extend_from_slice(&other.bytes);
        self.truncated = other.truncated;
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn as_str(&self) -> &str {
        // Only printable ASCII is ever pushed.
        std::str::from_utf8(&self.bytes).unwrap_or_default()
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_clear_reuse_buffer() {
        let mut token = Token::new();
        for byte in b"projects" {
            assert!(token.push(*byte));
        }
        assert_eq!(token.as_str(), "projects");
        assert!(token == *"projects");

        let capacity = token.bytes.capacity();
        token.clear();
        assert!(token.bytes.is_empty());
        assert_eq!(token.bytes.capacity(), capacity);
    }

    #[test]
    fn test_push_stops_at_capacity() {
        let mut token = Token::new();
        for _ in 0..MAX_TOKEN_LEN {
            assert!(token.push(b'x'));
        }
        assert!(!token.is_truncated());
        assert!(!token.push(b'y'));
        assert!(token.is_truncated());
        assert_eq!(token.bytes.len(), MAX_TOKEN_LEN);
    }

    #[test]
    fn test_copy_from() {
        let mut source = Token::new();
        b"w1".iter().for_each(|byte| {
            source.push(*byte);
        });
        let mut alias = Token::new();
        alias.copy_from(&source);
        source.clear();
        assert_eq!(alias.as_str(), "w1");
    }
}
