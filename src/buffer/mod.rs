//! Growable, cursor-based byte buffer with copy-on-write borrowing.
//!
//! A [`ByteBuffer`] tracks two offsets into its storage: the read cursor
//! (`position`) and the logical end of written data (`end_offset`). Reads
//! advance the cursor without moving bytes; appends write at the end. This
//! makes the buffer a cheap single-producer/single-consumer queue, with
//! [`ByteBuffer::normalize`] compacting unread bytes to the front on demand.
//!
//! Storage is either owned or borrowed from the caller. A borrowed buffer is
//! read-only: the first mutating call copies the bytes into owned storage
//! (copy-on-write) and the caller's memory is never touched.
//!
//! ```
//! use zenframe::ByteBuffer;
//!
//! let wire = [1u8, 2, 3, 4];
//! let mut buf = ByteBuffer::borrowed(&wire);
//! assert!(!buf.is_owned());
//!
//! buf.add_bytes(&[5, 6])?;
//! assert!(buf.is_owned());
//! assert_eq!(buf.data(), &[1, 2, 3, 4, 5, 6]);
//! assert_eq!(wire, [1, 2, 3, 4]);
//! # Ok::<(), zenframe::FrameError>(())
//! ```

mod growth;

pub use growth::GrowthPolicy;

use alloc::vec::Vec;

use crate::error::FrameError;

#[derive(Debug)]
enum Storage<'a> {
    /// `vec.len()` is the capacity. Bytes past `end` are scratch.
    Owned(Vec<u8>),
    /// Read-only view. Its length is both capacity and end.
    Borrowed(&'a [u8]),
}

/// Byte buffer with a read cursor and owned-or-borrowed storage.
///
/// Invariants after every call: `position <= end_offset <= capacity`; a
/// borrowed buffer has `end_offset == capacity`; once the cursor reaches the
/// end both offsets collapse to zero.
#[derive(Debug)]
pub struct ByteBuffer<'a> {
    storage: Storage<'a>,
    end: usize,
    pos: usize,
    growth: GrowthPolicy,
}

fn alloc_zeroed(len: usize) -> Result<Vec<u8>, FrameError> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len)
        .map_err(|_| FrameError::AllocationFailure { requested: len })?;
    vec.resize(len, 0);
    Ok(vec)
}

impl<'a> ByteBuffer<'a> {
    /// Empty owned buffer with no storage.
    pub fn new() -> Self {
        Self {
            storage: Storage::Owned(Vec::new()),
            end: 0,
            pos: 0,
            growth: GrowthPolicy::default(),
        }
    }

    /// Owned buffer of `size` readable bytes (zero-filled).
    pub fn with_size(size: usize) -> Result<Self, FrameError> {
        let mut buf = Self::new();
        buf.set_capacity(size)?;
        buf.end = size;
        Ok(buf)
    }

    /// Wrap caller memory without copying.
    pub fn borrowed(bytes: &'a [u8]) -> Self {
        Self {
            storage: Storage::Borrowed(bytes),
            end: bytes.len(),
            pos: 0,
            growth: GrowthPolicy::default(),
        }
    }

    /// Owned deep copy of `bytes`.
    pub fn copied(bytes: &[u8]) -> Result<Self, FrameError> {
        let mut vec = Vec::new();
        vec.try_reserve_exact(bytes.len())
            .map_err(|_| FrameError::AllocationFailure {
                requested: bytes.len(),
            })?;
        vec.extend_from_slice(bytes);
        Ok(Self::from_vec(vec))
    }

    /// Take over `vec` without copying. Capacity is `vec.len()`.
    pub fn from_vec(vec: Vec<u8>) -> Self {
        let end = vec.len();
        Self {
            storage: Storage::Owned(vec),
            end,
            pos: 0,
            growth: GrowthPolicy::default(),
        }
    }

    /// Build from optional external bytes.
    ///
    /// With `shallow_copy` the bytes are borrowed, otherwise copied. `None`
    /// always yields an owned empty buffer.
    pub fn from_external(bytes: Option<&'a [u8]>, shallow_copy: bool) -> Result<Self, FrameError> {
        let mut buf = Self::new();
        buf.set_buffer(bytes, shallow_copy)?;
        Ok(buf)
    }

    /// Replace the growth policy used by [`add_bytes`](Self::add_bytes).
    pub fn with_growth_policy(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    /// Release current storage and take `bytes` as in [`from_external`](Self::from_external).
    pub fn set_buffer(&mut self, bytes: Option<&'a [u8]>, shallow_copy: bool) -> Result<(), FrameError> {
        self.storage = Storage::Owned(Vec::new());
        self.end = 0;
        self.pos = 0;
        match bytes {
            Some(bytes) if shallow_copy => {
                self.storage = Storage::Borrowed(bytes);
                self.end = bytes.len();
            }
            Some(bytes) => self.set_copied(bytes)?,
            None => {}
        }
        Ok(())
    }

    /// Release current storage and take an owned copy of `bytes`.
    ///
    /// `bytes` only needs to live for the call.
    pub fn set_copied(&mut self, bytes: &[u8]) -> Result<(), FrameError> {
        self.storage = Storage::Owned(alloc_zeroed(bytes.len())?);
        self.owned_mut()?.copy_from_slice(bytes);
        self.end = bytes.len();
        self.pos = 0;
        Ok(())
    }

    /// Convert into a buffer that owns its bytes and outlives the source.
    ///
    /// Owned storage moves across without a copy; borrowed storage is copied.
    pub fn take_ownership(self) -> Result<ByteBuffer<'static>, FrameError> {
        let storage = match self.storage {
            Storage::Owned(vec) => vec,
            Storage::Borrowed(slice) => {
                let mut vec = alloc_zeroed(slice.len())?;
                vec.copy_from_slice(slice);
                vec
            }
        };
        Ok(ByteBuffer {
            storage: Storage::Owned(storage),
            end: self.end,
            pos: self.pos,
            growth: self.growth,
        })
    }

    /// Whether the buffer owns its storage.
    pub fn is_owned(&self) -> bool {
        matches!(self.storage, Storage::Owned(_))
    }

    /// Promote borrowed storage to owned. No-op when already owned.
    ///
    /// The new storage has the same capacity and the same `[0, end)` bytes.
    pub fn copy_on_write(&mut self) -> Result<(), FrameError> {
        if let Storage::Borrowed(slice) = self.storage {
            let mut vec = alloc_zeroed(slice.len())?;
            vec[..self.end].copy_from_slice(&slice[..self.end]);
            self.storage = Storage::Owned(vec);
        }
        Ok(())
    }

    fn owned_mut(&mut self) -> Result<&mut Vec<u8>, FrameError> {
        self.copy_on_write()?;
        match &mut self.storage {
            Storage::Owned(vec) => Ok(vec),
            Storage::Borrowed(_) => unreachable!("storage promoted by copy_on_write"),
        }
    }

    /// Append `data` at the logical end, independent of the read cursor.
    pub fn add_bytes(&mut self, data: &[u8]) -> Result<(), FrameError> {
        if data.is_empty() {
            return Ok(());
        }
        self.copy_on_write()?;

        let overflow = FrameError::AllocationFailure {
            requested: usize::MAX,
        };
        // Required size counts the cursor on top of the end offset.
        let required = self
            .end
            .checked_add(self.pos)
            .and_then(|n| n.checked_add(data.len()))
            .ok_or(overflow)?;
        if required > self.capacity() {
            let capacity = self
                .growth
                .next_capacity(required)
                .ok_or(FrameError::AllocationFailure { requested: required })?;
            self.set_capacity(capacity)?;
        }

        let start = self.end;
        self.owned_mut()?[start..start + data.len()].copy_from_slice(data);
        self.end += data.len();
        Ok(())
    }

    /// Set the readable length to `readable`, keeping the cursor where it is.
    ///
    /// Grows capacity to exactly what is needed; never shrinks it. Borrowed
    /// storage is promoted first.
    pub fn resize(&mut self, readable: usize) -> Result<(), FrameError> {
        let end = self
            .pos
            .checked_add(readable)
            .ok_or(FrameError::AllocationFailure {
                requested: usize::MAX,
            })?;
        self.copy_on_write()?;
        if end > self.capacity() {
            self.set_capacity(end)?;
        }
        self.end = end;
        self.collapse_if_drained();
        Ok(())
    }

    /// Reallocate storage to exactly `capacity` bytes.
    ///
    /// Shrinking below the written end clamps the end (and the cursor).
    pub fn set_capacity(&mut self, capacity: usize) -> Result<(), FrameError> {
        let vec = self.owned_mut()?;
        if capacity > vec.len() {
            vec.try_reserve_exact(capacity - vec.len())
                .map_err(|_| FrameError::AllocationFailure {
                    requested: capacity,
                })?;
            vec.resize(capacity, 0);
        } else if capacity < vec.len() {
            vec.truncate(capacity);
            vec.shrink_to_fit();
        }
        self.end = self.end.min(capacity);
        self.pos = self.pos.min(self.end);
        self.collapse_if_drained();
        Ok(())
    }

    /// Move unread bytes to offset 0 and reset the cursor.
    pub fn normalize(&mut self) -> Result<(), FrameError> {
        let (pos, end) = (self.pos, self.end);
        let vec = self.owned_mut()?;
        if pos > 0 && end > pos {
            vec.copy_within(pos..end, 0);
            self.end = end - pos;
            self.pos = 0;
        } else if pos == end {
            self.end = 0;
            self.pos = 0;
        }
        Ok(())
    }

    /// Advance the cursor by up to `count` bytes. Returns the number skipped.
    pub fn discard_bytes_from_start(&mut self, count: usize) -> usize {
        let count = count.min(self.len());
        self.pos += count;
        self.collapse_if_drained();
        count
    }

    /// Copy up to `dest.len()` readable bytes into `dest` and consume them.
    pub fn get_bytes(&mut self, dest: &mut [u8]) -> usize {
        let copied = self.peek_bytes(0, dest);
        self.pos += copied;
        self.collapse_if_drained();
        copied
    }

    /// Copy up to `dest.len()` bytes starting `offset` past the cursor.
    ///
    /// The cursor does not move. Returns 0 when `offset` is past the data.
    pub fn peek_bytes(&self, offset: usize, dest: &mut [u8]) -> usize {
        let Some(src) = self.data().get(offset..) else {
            return 0;
        };
        let n = src.len().min(dest.len());
        dest[..n].copy_from_slice(&src[..n]);
        n
    }

    /// Drop all data. A borrowed buffer lets go of the caller's bytes and
    /// becomes an empty owned buffer.
    pub fn reset(&mut self) {
        self.end = 0;
        self.pos = 0;
        if let Storage::Borrowed(_) = self.storage {
            self.storage = Storage::Owned(Vec::new());
        }
    }

    fn collapse_if_drained(&mut self) {
        if self.pos < self.end {
            return;
        }
        self.pos = 0;
        self.end = 0;
        if let Storage::Borrowed(slice) = self.storage {
            self.storage = Storage::Borrowed(&slice[..0]);
        }
    }

    /// Unread bytes.
    pub fn data(&self) -> &[u8] {
        match &self.storage {
            Storage::Owned(vec) => &vec[self.pos..self.end],
            Storage::Borrowed(slice) => &slice[self.pos..self.end],
        }
    }

    /// Unread bytes, mutably. Promotes borrowed storage first.
    pub fn data_mut(&mut self) -> Result<&mut [u8], FrameError> {
        let (pos, end) = (self.pos, self.end);
        Ok(&mut self.owned_mut()?[pos..end])
    }

    /// Number of unread bytes.
    pub fn len(&self) -> usize {
        self.end - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.end || self.capacity() == 0
    }

    pub fn capacity(&self) -> usize {
        match &self.storage {
            Storage::Owned(vec) => vec.len(),
            Storage::Borrowed(slice) => slice.len(),
        }
    }

    /// Read cursor, as an offset from the start of storage.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Logical end of written data, as an offset from the start of storage.
    pub fn end_offset(&self) -> usize {
        self.end
    }
}

impl Default for ByteBuffer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy of the readable region into owned storage.
impl Clone for ByteBuffer<'_> {
    fn clone(&self) -> Self {
        Self::from_vec(self.data().to_vec()).with_growth_policy(self.growth)
    }
}

impl From<Vec<u8>> for ByteBuffer<'_> {
    fn from(vec: Vec<u8>) -> Self {
        Self::from_vec(vec)
    }
}
