//! Bounded thread-safe byte buffer for streaming between threads.
//!
//! This crate provides [`StreamBuffer`], a fixed-capacity circular byte
//! buffer shared between producer and consumer threads. Writes block when
//! the buffer is full and reads block when it is empty, so the buffer
//! doubles as a backpressure mechanism. Closing the buffer lets a blocked
//! reader drain the remaining bytes and return short instead of hanging.
//!
//! # Example
//!
//! ```
//! use mtbuf::StreamBuffer;
//! use std::thread;
//!
//! let buf = StreamBuffer::new(4);
//! let writer = buf.clone();
//!
//! // Producer thread
//! let producer = thread::spawn(move || {
//!     writer.write(b"streamed across threads").unwrap();
//!     writer.close();
//! });
//!
//! // Consumer thread: a short count signals the end of the stream.
//! let mut out = [0u8; 64];
//! let n = buf.read(&mut out);
//!
//! producer.join().unwrap();
//! assert_eq!(&out[..n], b"streamed across threads");
//! ```
//!
//! # Closing
//!
//! [`close`](StreamBuffer::close) is one-way: writes fail with
//! [`BufferError::Closed`] afterwards, while reads continue to drain
//! whatever is buffered and then report exhaustion through a short return
//! count rather than an error.
//!
//! # Capacity
//!
//! The capacity is fixed at construction but can be changed at runtime
//! with [`set_capacity`](StreamBuffer::set_capacity). Growing preserves
//! all buffered bytes; shrinking below the current fill keeps the oldest
//! bytes and drops the newest.
//!
//! # Thread Safety
//!
//! `StreamBuffer` is `Send + Sync` and is shared between threads via
//! `Clone`, which hands out another handle to the same underlying buffer.
//!
//! # Convenience Functions
//!
//! The [`bytes`] module provides pre-sized constructors:
//!
//! ```
//! use mtbuf::{bytes, bytes_4kb};
//!
//! let default_sized = bytes();
//! let larger = bytes_4kb();
//! ```

mod bytes;
mod error;
mod ring;
mod stream;

pub use bytes::*;
pub use error::BufferError;
pub use stream::StreamBuffer;
