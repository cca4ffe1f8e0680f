//! Seven-row ring of mirrored, padded image rows.
//!
//! Logical slot `s` holds image row `center - 3 + s`, so slot 3 is the row
//! being emitted. Each slot is `cols + 6` bytes wide and padded column `p`
//! holds image column `reflect(p - 3, cols)`. Both invariants hold after
//! every [`RowWindow::prime`], [`RowWindow::load`] and
//! [`RowWindow::copy_slot`]; [`RowWindow::advance`] rotates the ring by one
//! slot without moving any bytes.

use std::io;

use super::RowSource;
use crate::api::HalftoneError;
use crate::matrix::{reflect, try_zeroed};

/// Rows held by the window.
pub const WINDOW_ROWS: usize = 7;

/// Mirrored columns on each side of a padded row.
pub const PAD: usize = 3;

#[derive(Debug)]
pub struct RowWindow {
    data: Vec<u8>,
    cols: usize,
    width: usize,
    head: usize,
}

impl RowWindow {
    pub fn new(cols: usize) -> Result<Self, HalftoneError> {
        let width = cols
            .checked_add(2 * PAD)
            .ok_or(HalftoneError::NoMemory { buffer: "window" })?;
        let len = width
            .checked_mul(WINDOW_ROWS)
            .ok_or(HalftoneError::NoMemory { buffer: "window" })?;
        Ok(Self {
            data: try_zeroed(len, "window")?,
            cols,
            width,
            head: 0,
        })
    }

    #[inline]
    fn offset(&self, slot: usize) -> usize {
        debug_assert!(slot < WINDOW_ROWS);
        ((self.head + slot) % WINDOW_ROWS) * self.width
    }

    /// Padded row in logical slot `slot`.
    #[inline]
    pub fn row(&self, slot: usize) -> &[u8] {
        let start = self.offset(slot);
        &self.data[start..start + self.width]
    }

    /// Read the next image row into `slot` and mirror its padding.
    pub fn load<S: RowSource + ?Sized>(&mut self, slot: usize, source: &mut S) -> io::Result<()> {
        let start = self.offset(slot);
        let (cols, width) = (self.cols, self.width);
        let line = &mut self.data[start..start + width];
        source.next_row(&mut line[PAD..PAD + cols])?;
        for p in (0..PAD).chain(PAD + cols..width) {
            line[p] = line[PAD + reflect(p as isize - PAD as isize, cols)];
        }
        Ok(())
    }

    /// Overwrite slot `to` with a copy of slot `from`.
    pub fn copy_slot(&mut self, from: usize, to: usize) {
        let src = self.offset(from);
        let dst = self.offset(to);
        self.data.copy_within(src..src + self.width, dst);
    }

    /// Fill the window for the first output row.
    ///
    /// Image rows 0..=3 go to slots 3..=6; rows -3..=-1 are their mirror
    /// images 3..=1, copied from slots 6, 5 and 4.
    pub fn prime<S: RowSource + ?Sized>(&mut self, source: &mut S) -> io::Result<()> {
        self.head = 0;
        for slot in PAD..WINDOW_ROWS {
            self.load(slot, source)?;
        }
        for slot in 0..PAD {
            self.copy_slot(WINDOW_ROWS - 1 - slot, slot);
        }
        Ok(())
    }

    /// Drop slot 0 and shift every other slot up by one.
    ///
    /// The old slot 0 becomes slot 6 and must be refilled before use.
    pub fn advance(&mut self) {
        self.head = (self.head + 1) % WINDOW_ROWS;
    }
}
