//! KQueue — типизированная очередь фиксированной ёмкости
//! KQueue — typed fixed-capacity queue
//!
//! Не блокируется и не берёт блокировок: изменение требует `&mut self`,
//! так что «один владелец за раз» проверяет компилятор. Для общего доступа
//! из нескольких контекстов — [`SpinQueue`](crate::SpinQueue) или
//! блокирующий адаптер уровнем выше.
//!
//! Never blocks and never locks: mutation needs `&mut self`, so the
//! "single owner at a time" rule is checked by the compiler. For access from
//! several contexts use [`SpinQueue`](crate::SpinQueue) or a blocking adapter
//! layered on top.

#[cfg(feature = "alloc")]
use alloc::{boxed::Box, vec::Vec};
use core::{
    fmt,
    marker::PhantomData,
    mem::{self, ManuallyDrop, MaybeUninit},
    ptr,
};

use log::{debug, trace, warn};

use crate::error::{Error, PushError, Result};
use crate::ring::Ring;
use crate::slots::Slots;

/// Очередь элементов `T` поверх хранилища `S`.
/// A queue of `T` items on top of slot storage `S`.
pub struct KQueue<T, S: Slots<T>> {
    ring:    Ring,
    slots:   S,
    _marker: PhantomData<T>,
}

/// Очередь в куче / Heap-backed queue
#[cfg(feature = "alloc")]
pub type HeapQueue<T> = KQueue<T, Box<[MaybeUninit<T>]>>;

/// Очередь на буфере вызывающего / Queue over a caller-supplied buffer
pub type StaticQueue<'a, T> = KQueue<T, &'a mut [MaybeUninit<T>]>;

/// Очередь со встроенным массивом (годится для `static`).
/// Queue with an inline array (usable in a `static`).
pub type InlineQueue<T, const N: usize> = KQueue<T, [MaybeUninit<T>; N]>;

#[cfg(feature = "alloc")]
impl<T> KQueue<T, Box<[MaybeUninit<T>]>> {
    /// Создать очередь в куче на `capacity` элементов.
    /// Create a heap-backed queue for `capacity` items.
    ///
    /// Память берётся через fallible-резервирование: нехватка памяти или
    /// переполнение размера дают `AllocationFailure`, а не abort.
    /// Memory is reserved fallibly: exhaustion or size overflow yield
    /// `AllocationFailure` instead of aborting.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        check_params::<T>(capacity)?;

        let mut buf: Vec<MaybeUninit<T>> = Vec::new();
        if buf.try_reserve_exact(capacity).is_err() {
            warn!("[kqueue] allocation failed: capacity={} item_size={}",
                  capacity, mem::size_of::<T>());
            return Err(Error::AllocationFailure);
        }
        buf.resize_with(capacity, MaybeUninit::uninit);

        Self::from_slots(buf.into_boxed_slice())
    }
}

impl<T, const N: usize> KQueue<T, [MaybeUninit<T>; N]> {
    /// Пустая очередь со встроенным хранилищем, вычисляется на этапе компиляции.
    /// Empty queue with inline storage, evaluated at compile time.
    ///
    /// ```
    /// use kqueue::{InlineQueue, SpinQueue};
    ///
    /// static EVENTS: SpinQueue<u16, [core::mem::MaybeUninit<u16>; 8]> =
    ///     SpinQueue::new(InlineQueue::new());
    ///
    /// EVENTS.push(3).unwrap();
    /// assert_eq!(EVENTS.pop(), Ok(3));
    /// ```
    pub const fn new() -> Self {
        const {
            assert!(N > 0, "queue capacity must be non-zero");
            assert!(mem::size_of::<T>() > 0, "queue item size must be non-zero");
        }
        Self {
            ring:    Ring::new(N),
            slots:   [const { MaybeUninit::uninit() }; N],
            _marker: PhantomData,
        }
    }
}

impl<T, const N: usize> Default for KQueue<T, [MaybeUninit<T>; N]> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: Slots<T>> KQueue<T, S> {
    /// Создать очередь поверх готового хранилища (без аллокаций).
    /// Create a queue on top of existing storage (no allocation).
    ///
    /// Ёмкость равна числу слотов. Пустое хранилище или `T` нулевого
    /// размера — `InvalidArgument`.
    /// Capacity equals the number of slots. Empty storage or a zero-sized
    /// `T` yields `InvalidArgument`.
    pub fn from_slots(slots: S) -> Result<Self> {
        let capacity = slots.slots().len();
        check_params::<T>(capacity)?;

        debug!("[kqueue] created: capacity={} item_size={}", capacity, mem::size_of::<T>());
        Ok(Self { ring: Ring::new(capacity), slots, _marker: PhantomData })
    }

    /// Положить элемент в хвост. При `Full` элемент возвращается, состояние не меняется.
    /// Push an item at the tail. On `Full` the item comes back and nothing changes.
    pub fn push(&mut self, item: T) -> core::result::Result<(), PushError<T>> {
        match self.ring.push_slot() {
            Some(slot) => {
                self.slots.slots_mut()[slot].write(item);
                Ok(())
            }
            None => Err(PushError::new(Error::Full, item)),
        }
    }

    /// Забрать элемент из головы / Pop the item at the head
    pub fn pop(&mut self) -> Result<T> {
        let slot = self.ring.pop_slot().ok_or(Error::Empty)?;
        // SAFETY: кольцо считало слот занятым, значит он инициализирован
        // SAFETY: the ring counted the slot as occupied, so it is initialised
        Ok(unsafe { self.slots.slots()[slot].assume_init_read() })
    }

    /// Посмотреть на голову без извлечения / Look at the head without removing it
    pub fn peek(&self) -> Option<&T> {
        let slot = self.ring.peek_slot()?;
        // SAFETY: см. pop / see pop
        Some(unsafe { self.slots.slots()[slot].assume_init_ref() })
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

    /// Размер одного элемента в байтах / Size of one item in bytes
    pub const fn item_size(&self) -> usize {
        mem::size_of::<T>()
    }

    /// Выбросить все элементы (flush). Ёмкость сохраняется.
    /// Discard every item (flush). Capacity is kept.
    pub fn clear(&mut self) {
        let dropped = self.discard();
        debug!("[kqueue] flushed {} item(s)", dropped);
    }

    /// Уничтожить очередь. Оставшиеся элементы уничтожаются, память из кучи
    /// освобождается, память вызывающего не трогается.
    /// Destroy the queue. Remaining items are dropped, heap memory is freed,
    /// caller-owned memory is left alone.
    pub fn destroy(self) {
        drop(self);
    }

    /// Уничтожить очередь и вернуть хранилище вызывающему.
    /// Destroy the queue and hand the storage back to the caller.
    pub fn into_storage(mut self) -> S {
        self.discard();
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` больше не используется и не будет уничтожен
        // SAFETY: `this` is never used again and never dropped
        unsafe { ptr::read(&this.slots) }
    }

    // Уничтожить живые элементы; кольцо сбрасывается до вызова drop,
    // поэтому паника в drop элемента приводит лишь к утечке.
    // Drop live items; the ring is reset before any drop runs, so a
    // panicking item destructor can only leak.
    fn discard(&mut self) -> usize {
        let ring = self.ring;
        self.ring.reset();
        if mem::needs_drop::<T>() {
            let slots = self.slots.slots_mut();
            for slot in ring.occupied() {
                // SAFETY: слот был занят в старом кольце / slot was occupied in the old ring
                unsafe { slots[slot].assume_init_drop() };
            }
        }
        ring.len()
    }
}

impl<T, S: Slots<T>> Drop for KQueue<T, S> {
    fn drop(&mut self) {
        let dropped = self.discard();
        trace!("[kqueue] destroyed: capacity={} discarded={}", self.ring.capacity(), dropped);
    }
}

impl<T, S: Slots<T>> fmt::Debug for KQueue<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KQueue")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .field("item_size", &self.item_size())
            .finish()
    }
}

fn check_params<T>(capacity: usize) -> Result<()> {
    if capacity == 0 || mem::size_of::<T>() == 0 {
        warn!("[kqueue] rejected: capacity={} item_size={}", capacity, mem::size_of::<T>());
        return Err(Error::InvalidArgument);
    }
    Ok(())
}
