//! Кольцевая арифметика индексов / Ring index arithmetic
//!
//! head == tail неоднозначно (пусто или полно), поэтому храним count явно.
//! head == tail is ambiguous (empty or full), so count is kept explicitly.
//!
//!   push: slot = tail; tail = (tail + 1) mod capacity; count += 1
//!   pop:  slot = head; head = (head + 1) mod capacity; count -= 1

/// Состояние кольца / Ring bookkeeping
///
/// head, tail и count — одна логическая единица, меняются только вместе.
/// head, tail and count are one logical unit and only change together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ring {
    capacity: usize,
    count:    usize,
    head:     usize,
    tail:     usize,
}

impl Ring {
    pub(crate) const fn new(capacity: usize) -> Self {
        Self { capacity, count: 0, head: 0, tail: 0 }
    }

    pub(crate) const fn capacity(&self) -> usize { self.capacity }
    pub(crate) const fn len(&self) -> usize      { self.count }
    pub(crate) const fn is_empty(&self) -> bool  { self.count == 0 }
    pub(crate) const fn is_full(&self) -> bool   { self.count == self.capacity }

    /// Занять слот под запись. None — кольцо полно, состояние не меняется.
    /// Claim the slot to write into. None means full; state is untouched.
    pub(crate) fn push_slot(&mut self) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let slot = self.tail;
        self.tail = self.advance(slot);
        self.count += 1;
        Some(slot)
    }

    /// Освободить слот для чтения. None — кольцо пусто.
    /// Release the slot to read from. None means empty.
    pub(crate) fn pop_slot(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let slot = self.head;
        self.head = self.advance(slot);
        self.count -= 1;
        Some(slot)
    }

    pub(crate) fn peek_slot(&self) -> Option<usize> {
        if self.is_empty() { None } else { Some(self.head) }
    }

    pub(crate) fn reset(&mut self) {
        self.count = 0;
        self.head  = 0;
        self.tail  = 0;
    }

    /// Занятые слоты в порядке FIFO / Occupied slots in FIFO order
    pub(crate) fn occupied(&self) -> impl Iterator<Item = usize> {
        let Self { capacity, count, head, .. } = *self;
        (0..count).map(move |i| {
            let idx = head + i;
            if idx >= capacity { idx - capacity } else { idx }
        })
    }

    // Без деления: ёмкость не обязана быть степенью двойки
    // No division: capacity need not be a power of two
    fn advance(&self, idx: usize) -> usize {
        let next = idx + 1;
        if next == self.capacity { 0 } else { next }
    }
}
