//! Convenience constructors for common buffer sizes.

use crate::StreamBuffer;

/// Creates a 1KB stream buffer.
pub fn bytes_1kb() -> StreamBuffer {
    StreamBuffer::new(1024)
}

/// Creates a 4KB stream buffer.
pub fn bytes_4kb() -> StreamBuffer {
    StreamBuffer::new(4096)
}

/// Creates a 16KB stream buffer.
pub fn bytes_16kb() -> StreamBuffer {
    StreamBuffer::new(16384)
}

/// Creates a 64KB stream buffer.
pub fn bytes_64kb() -> StreamBuffer {
    StreamBuffer::new(65536)
}

/// Creates a 256B stream buffer.
pub fn bytes_256b() -> StreamBuffer {
    StreamBuffer::new(256)
}

/// Creates a default 1KB stream buffer.
pub fn bytes() -> StreamBuffer {
    bytes_1kb()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_convenience_functions() {
        assert_eq!(bytes_1kb().capacity(), 1024);
        assert_eq!(bytes_4kb().capacity(), 4096);
        assert_eq!(bytes_16kb().capacity(), 16384);
        assert_eq!(bytes_64kb().capacity(), 65536);
        assert_eq!(bytes_256b().capacity(), 256);
        assert_eq!(bytes().capacity(), 1024);
    }
}
