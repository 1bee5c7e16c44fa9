//! volume/open — открытие и закрытие записей.

use log::debug;

use crate::dir::{Cursor, WriteCursor};
use crate::error::{FsError, Result};
use crate::storage::Storage;
use crate::word::Word;

use super::Volume;

impl<S: Storage> Volume<S> {
    /// Открыть запись `rec`.
    ///
    /// Существующая запись привязывается на чтение (курсоры сбрасываются,
    /// в том числе незавершённая запись). Отсутствующая — создаётся: сканер
    /// выделяет первый экстент, на носитель ложится заголовок
    /// normal+size(0), запись открыта на запись.
    pub fn open(&mut self, rec: u8) -> Result<()> {
        let exists = self.dir.slot(rec)?.first > 0;
        if exists {
            self.dir.slot_mut(rec)?.cursor = Cursor::Idle;
            return Ok(());
        }

        let hole = self.find_contiguous()?;
        self.store.seek(hole.start)?;
        self.store.write(&Word::normal_size(rec, 0).encode())?;

        let slot = self.dir.slot_mut(rec)?;
        slot.first = hole.start;
        slot.cursor = Cursor::Write(WriteCursor {
            base: hole.data_start,
            cap: hole.data_size,
            len: 0,
        });
        debug!(
            "record {}: created at {} (cap {})",
            rec, hole.start, hole.data_size
        );
        Ok(())
    }

    /// Закрыть запись: сбросить курсоры.
    ///
    /// Идемпотентно для открытой-но-неиспользованной записи;
    /// InvalidOperation, если ни открытого состояния, ни записи нет.
    pub fn close(&mut self, rec: u8) -> Result<()> {
        let slot = self.dir.slot_mut(rec)?;
        match slot.cursor {
            Cursor::Write(_) | Cursor::Read(_) => {
                slot.cursor = Cursor::Idle;
                Ok(())
            }
            Cursor::Idle if slot.first > 0 => Ok(()),
            Cursor::Idle => Err(FsError::InvalidOperation(rec)),
        }
    }
}
