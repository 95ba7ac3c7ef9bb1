//! RawQueue — очередь непрозрачных записей фиксированного размера
//! RawQueue — queue of opaque fixed-size records
//!
//! Размер записи задаётся во время выполнения; записи копируются побайтно.
//! Нужна там, где тип элемента не известен на этапе компиляции: записи
//! драйверов, сообщения IPC с фиксированной разметкой.
//!
//! The record size is a runtime value; records are copied byte by byte.
//! Used where the item type is not known at compile time: driver records,
//! IPC messages with a fixed layout.
//!
//! Разметка буфера / Buffer layout:
//!   [ slot 0 | slot 1 | ... | slot capacity-1 ]   каждый / each = item_size байт / bytes

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec::Vec};
use core::fmt;

use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::ring::Ring;

pub struct RawQueue<B: AsRef<[u8]> + AsMut<[u8]>> {
    ring:      Ring,
    item_size: usize,
    buf:       B,
}

#[cfg(feature = "alloc")]
pub type HeapRawQueue = RawQueue<Box<[u8]>>;

pub type StaticRawQueue<'a> = RawQueue<&'a mut [u8]>;

/// Сколько байт нужно под записи: `item_size * capacity`. None — переполнение.
/// Bytes needed for the records: `item_size * capacity`. None on overflow.
pub const fn required_bytes(item_size: usize, capacity: usize) -> Option<usize> {
    item_size.checked_mul(capacity)
}

#[cfg(feature = "alloc")]
impl RawQueue<Box<[u8]>> {
    /// Создать очередь в куче / Create a heap-backed queue
    pub fn with_capacity(item_size: usize, capacity: usize) -> Result<Self> {
        check_params(item_size, capacity)?;

        let bytes = required_bytes(item_size, capacity);
        let mut buf: Vec<u8> = Vec::new();
        let reserved = match bytes {
            Some(bytes) => buf.try_reserve_exact(bytes).is_ok(),
            None        => false,
        };
        if !reserved {
            warn!("[kqueue] allocation failed: capacity={} item_size={}", capacity, item_size);
            return Err(Error::AllocationFailure);
        }
        // resize уже обнуляет / resize zero-fills already
        buf.resize(item_size * capacity, 0u8);

        Ok(Self::assemble(buf.into_boxed_slice(), item_size, capacity))
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> RawQueue<B> {
    /// Создать очередь на готовом буфере (без аллокаций).
    /// Create a queue on an existing buffer (no allocation).
    ///
    /// Буфер должен вмещать `item_size * capacity` байт, иначе
    /// `InvalidArgument`. Используемая часть обнуляется, хвост не трогается.
    /// The buffer must hold `item_size * capacity` bytes, otherwise
    /// `InvalidArgument`. The used part is zeroed; any excess is left alone.
    pub fn from_buffer(mut buf: B, item_size: usize, capacity: usize) -> Result<Self> {
        check_params(item_size, capacity)?;

        let bytes = match required_bytes(item_size, capacity) {
            Some(bytes) if bytes <= buf.as_ref().len() => bytes,
            _ => {
                warn!("[kqueue] buffer too small: have={} need={}x{}",
                      buf.as_ref().len(), item_size, capacity);
                return Err(Error::InvalidArgument);
            }
        };
        buf.as_mut()[..bytes].fill(0);

        Ok(Self::assemble(buf, item_size, capacity))
    }

    // Параметры проверены, используемая часть буфера обнулена.
    // Parameters are checked and the used part of the buffer is zeroed.
    fn assemble(buf: B, item_size: usize, capacity: usize) -> Self {
        debug!("[kqueue] created raw: capacity={} item_size={}", capacity, item_size);
        Self { ring: Ring::new(capacity), item_size, buf }
    }

    /// Скопировать запись в хвост. Длина записи обязана равняться `item_size`.
    /// Copy a record to the tail. The record length must equal `item_size`.
    pub fn push(&mut self, item: &[u8]) -> Result<()> {
        if item.len() != self.item_size {
            return Err(Error::InvalidArgument);
        }
        let slot = self.ring.push_slot().ok_or(Error::Full)?;
        let range = self.slot_range(slot);
        self.buf.as_mut()[range].copy_from_slice(item);
        Ok(())
    }

    /// Скопировать запись из головы в `out` / Copy the head record into `out`
    pub fn pop(&mut self, out: &mut [u8]) -> Result<()> {
        if out.len() != self.item_size {
            return Err(Error::InvalidArgument);
        }
        let slot = self.ring.pop_slot().ok_or(Error::Empty)?;
        let range = self.slot_range(slot);
        out.copy_from_slice(&self.buf.as_ref()[range]);
        Ok(())
    }

    pub fn peek(&self) -> Option<&[u8]> {
        let slot = self.ring.peek_slot()?;
        Some(&self.buf.as_ref()[self.slot_range(slot)])
    }

    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ring.is_full()
    }

    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn item_size(&self) -> usize {
        self.item_size
    }

    /// Выбросить все записи (flush) / Discard every record (flush)
    pub fn clear(&mut self) {
        let dropped = self.ring.len();
        self.ring.reset();
        debug!("[kqueue] flushed {} record(s)", dropped);
    }

    /// Уничтожить очередь. Буфер из кучи освобождается, буфер вызывающего — нет.
    /// Destroy the queue. A heap buffer is freed; a caller buffer is not.
    pub fn destroy(self) {
        trace!("[kqueue] destroyed raw: capacity={} discarded={}", self.capacity(), self.len());
    }

    /// Уничтожить очередь и вернуть буфер / Destroy the queue and return the buffer
    pub fn into_buffer(self) -> B {
        trace!("[kqueue] destroyed raw: capacity={} discarded={}", self.capacity(), self.len());
        self.buf
    }

    fn slot_range(&self, slot: usize) -> core::ops::Range<usize> {
        let start = slot * self.item_size;
        start..start + self.item_size
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> fmt::Debug for RawQueue<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawQueue")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("item_size", &self.item_size)
            .finish()
    }
}

fn check_params(item_size: usize, capacity: usize) -> Result<()> {
    if item_size == 0 || capacity == 0 {
        warn!("[kqueue] rejected: capacity={} item_size={}", capacity, item_size);
        return Err(Error::InvalidArgument);
    }
    Ok(())
}
