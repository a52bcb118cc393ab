//! Bounded blocking stream buffer implementation.

use std::sync::{Arc, Condvar, Mutex};

use bytemuck::{Pod, Zeroable};
use tracing::trace;

use crate::error::BufferError;
use crate::ring::Ring;

/// A thread-safe bounded byte buffer used as an inter-thread stream.
///
/// `StreamBuffer` is a circular byte buffer with a fixed (but resizable)
/// capacity. It blocks on write when full and blocks on read when empty,
/// providing backpressure between producer and consumer threads. Closing
/// the buffer lets a blocked reader drain the remaining bytes and return
/// short instead of waiting forever.
///
/// # Semantics
///
/// - **Read**: blocks when empty; once the buffer is closed, returns the
///   buffered tail of the stream and reports the shortfall through the
///   return count
/// - **Write**: blocks when full, fails with [`BufferError::Closed`]
///   after [`close`](StreamBuffer::close)
/// - **Close**: one-way; readers drain, writers are rejected
///
/// Bytes written by a single thread appear in the stream in call order
/// and are read back FIFO. With several concurrent writers (or readers)
/// only mutual exclusion is guaranteed; the interleaving of different
/// callers' bytes is unspecified.
///
/// # Example
///
/// ```
/// use mtbuf::StreamBuffer;
/// use std::thread;
///
/// let buf = StreamBuffer::new(4);
/// let writer = buf.clone();
///
/// // Producer thread (blocks whenever the buffer is full)
/// let producer = thread::spawn(move || {
///     writer.write(b"hello world").unwrap();
///     writer.close();
/// });
///
/// let mut out = [0u8; 16];
/// let n = buf.read(&mut out);
/// assert_eq!(&out[..n], b"hello world");
/// producer.join().unwrap();
/// ```
pub struct StreamBuffer {
    inner: Arc<StreamBufferInner>,
}

struct StreamBufferInner {
    state: Mutex<StreamBufferState>,
    /// Signalled when a read frees space; writers wait here.
    not_full: Condvar,
    /// Signalled when a write lands or the buffer closes; readers and
    /// `wait_for_write` wait here.
    not_empty: Condvar,
}

struct StreamBufferState {
    ring: Ring,
    closed: bool,
    write_occurred: bool,
    total_read: u64,
    total_written: u64,
}

impl Clone for StreamBuffer {
    fn clone(&self) -> Self {
        StreamBuffer {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for StreamBuffer {
    /// Creates a buffer with the default 1 KiB capacity.
    fn default() -> Self {
        Self::new(1024)
    }
}

impl StreamBuffer {
    /// Creates a new open, empty buffer with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        StreamBuffer {
            inner: Arc::new(StreamBufferInner {
                state: Mutex::new(StreamBufferState {
                    ring: Ring::new(capacity),
                    closed: false,
                    write_occurred: false,
                    total_read: 0,
                    total_written: 0,
                }),
                not_full: Condvar::new(),
                not_empty: Condvar::new(),
            }),
        }
    }

    /// Returns the number of bytes currently buffered.
    pub fn len(&self) -> usize {
        let state = self.inner.state.lock().unwrap();
        state.ring.len()
    }

    /// Returns the buffer capacity.
    pub fn capacity(&self) -> usize {
        let state = self.inner.state.lock().unwrap();
        state.ring.capacity()
    }

    /// Returns true if the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        let state = self.inner.state.lock().unwrap();
        state.ring.is_empty()
    }

    /// Returns true if the buffer is at capacity.
    pub fn is_full(&self) -> bool {
        let state = self.inner.state.lock().unwrap();
        state.ring.is_full()
    }

    /// Returns true once the buffer has been closed.
    pub fn closed(&self) -> bool {
        let state = self.inner.state.lock().unwrap();
        state.closed
    }

    /// Cumulative count of bytes read, including bytes discarded via
    /// [`skip`](StreamBuffer::skip).
    pub fn total_read(&self) -> u64 {
        let state = self.inner.state.lock().unwrap();
        state.total_read
    }

    /// Cumulative count of bytes written.
    pub fn total_written(&self) -> u64 {
        let state = self.inner.state.lock().unwrap();
        state.total_written
    }

    /// Returns a copy of the buffered bytes, oldest first, without
    /// consuming them.
    pub fn to_vec(&self) -> Vec<u8> {
        let state = self.inner.state.lock().unwrap();
        state.ring.to_vec()
    }

    /// Changes the buffer capacity.
    ///
    /// Growing keeps every buffered byte in order. Shrinking below the
    /// current fill keeps the oldest bytes and permanently drops the
    /// newest; callers who shrink a non-empty buffer accept that loss.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn set_capacity(&self, capacity: usize) {
        let mut state = self.inner.state.lock().unwrap();
        let growing = capacity > state.ring.capacity();
        state.ring.set_capacity(capacity);
        if growing {
            // A blocked writer may now have room.
            self.inner.not_full.notify_one();
        }
    }

    /// Closes the buffer to future writes.
    ///
    /// Blocked readers wake, drain whatever is buffered and return short;
    /// a pending [`wait_for_write`](StreamBuffer::wait_for_write) is
    /// released. Closing is idempotent and cannot be undone.
    ///
    /// A writer already blocked on a full buffer is not woken by `close`;
    /// it stays blocked until a reader frees space, and only then observes
    /// the closed state.
    pub fn close(&self) {
        let mut state = self.inner.state.lock().unwrap();
        trace!("closing stream buffer");

        state.closed = true;
        state.write_occurred = true; // releases wait_for_write

        // Wake any read in progress so it can return.
        self.inner.not_empty.notify_all();
    }

    /// Empties the buffer.
    ///
    /// The closed state and the cumulative counters are unaffected.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock().unwrap();
        state.ring.clear();
    }

    /// Writes all of `data` into the buffer, blocking while it is full.
    ///
    /// Returns the number of bytes written, which is always `data.len()`
    /// on success. Fails with [`BufferError::Closed`] if the buffer is
    /// closed when the call starts; a close that lands mid-call surfaces
    /// the same error once the current chunk has been placed, and the
    /// bytes already copied stay in the buffer.
    pub fn write(&self, data: &[u8]) -> Result<usize, BufferError> {
        if data.is_empty() {
            return Ok(0);
        }

        let mut written = 0;
        while written < data.len() {
            let mut state = self.inner.state.lock().unwrap();

            // Only check once we hold the lock; no race with close().
            if state.closed {
                return Err(BufferError::Closed);
            }

            while state.ring.is_full() {
                trace!("writer waiting");
                state = self.inner.not_full.wait(state).unwrap();
            }

            let chunk = (data.len() - written).min(state.ring.free());
            state.ring.push(&data[written..written + chunk]);
            state.total_written += chunk as u64;
            state.write_occurred = true;
            written += chunk;
            trace!(bytes = chunk, "wrote chunk");

            // Wake any blocked readers.
            self.inner.not_empty.notify_all();
        }

        Ok(written)
    }

    /// Reads up to `buf.len()` bytes, blocking while the buffer is empty
    /// and open.
    ///
    /// Returns the number of bytes read. This is `buf.len()` unless the
    /// buffer was closed, in which case the remaining buffered bytes are
    /// delivered and the call returns short; inspect the count rather
    /// than assuming full satisfaction.
    pub fn read(&self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }

        let mut bytes_read = 0;
        while bytes_read < buf.len() {
            let mut state = self.inner.state.lock().unwrap();

            // close() may have signalled before this reader started
            // waiting, so only wait while the store is empty and open.
            while state.ring.is_empty() && !state.closed {
                trace!("reader waiting");
                state = self.inner.not_empty.wait(state).unwrap();
            }

            let chunk = (buf.len() - bytes_read).min(state.ring.len());
            state.ring.pop(&mut buf[bytes_read..bytes_read + chunk]);
            state.total_read += chunk as u64;
            bytes_read += chunk;
            trace!(bytes = chunk, "read chunk");

            // Wake a blocked writer.
            self.inner.not_full.notify_one();

            // Deliver buffered bytes before reporting the close.
            if state.closed {
                break;
            }
        }

        bytes_read
    }

    /// Discards up to `count` bytes from the front of the stream.
    ///
    /// Blocks exactly as [`read`](StreamBuffer::read) would and counts
    /// the discarded bytes toward [`total_read`](StreamBuffer::total_read).
    pub fn skip(&self, count: usize) -> usize {
        let mut scratch = vec![0u8; count];
        self.read(&mut scratch)
    }

    /// Blocks until at least one write has occurred since the buffer was
    /// created, or the buffer has been closed. No bytes are consumed.
    ///
    /// This is a single-waiter primitive: after waking it re-notifies the
    /// channel once so a second waiter is also released, but correctness
    /// is not guaranteed for more than one concurrent caller.
    pub fn wait_for_write(&self) {
        let mut state = self.inner.state.lock().unwrap();

        // wait() can return spuriously, so re-check in a loop.
        while !state.write_occurred {
            state = self.inner.not_empty.wait(state).unwrap();
        }
        trace!("wait_for_write signalled");

        // In case another thread is waiting, pass the notification on.
        self.inner.not_empty.notify_one();
    }

    /// Writes the raw bytes of a plain-data value.
    ///
    /// Blocking and error behavior are those of
    /// [`write`](StreamBuffer::write).
    pub fn write_value<T: Pod>(&self, value: &T) -> Result<usize, BufferError> {
        self.write(bytemuck::bytes_of(value))
    }

    /// Reads one plain-data value from the stream.
    ///
    /// Returns `None` if the buffer is closed before a full value
    /// arrives; any partial bytes are consumed and discarded.
    pub fn read_value<T: Pod>(&self) -> Option<T> {
        let mut value = T::zeroed();
        let n = self.read(bytemuck::bytes_of_mut(&mut value));
        (n == size_of::<T>()).then_some(value)
    }
}
