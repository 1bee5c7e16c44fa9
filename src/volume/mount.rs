//! volume/mount — загрузочный скан.
//!
//! Таблицы размещения на носителе нет: каталог восстанавливается линейным
//! проходом по области данных. Нулевые байты — свободное место между
//! записями; ненулевой байт начинает слово метаданных. Слова с нагрузкой
//! size перешагиваются на длину данных; pointer-слова ничего не
//! перешагивают — их цель лежит дальше по адресам и будет разобрана в
//! порядке обхода.

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use crate::consts::{DATA_START, SLATE_MAGIC, SLATE_VERSION, SUPERBLOCK_SIZE};
use crate::error::{FsError, Result, StorageError};
use crate::storage::Storage;
use crate::word::{PayloadKind, Word, WordKind};

use super::Volume;

impl<S: Storage> Volume<S> {
    /// Смонтировать том: проверить суперблок и восстановить каталог.
    ///
    /// Ошибки: NotFormatted (нет сигнатуры/не та версия), OutOfRange
    /// (повреждённые метаданные, указатель за пределами носителя,
    /// повторный первичный заголовок), Io.
    pub fn mount(&mut self) -> Result<()> {
        self.dir.clear();

        self.store.seek(0)?;
        let mut sb = [0u8; SUPERBLOCK_SIZE as usize];
        self.store.read(&mut sb)?;
        if LittleEndian::read_u32(&sb[0..4]) != SLATE_MAGIC || sb[4] != SLATE_VERSION {
            return Err(FsError::NotFormatted);
        }

        let total = self.store.size();
        self.store.seek(DATA_START)?;

        'walk: loop {
            // пропустить свободные байты до следующего слова
            loop {
                let mut b = [0u8; 1];
                match self.store.read(&mut b) {
                    Ok(()) => {}
                    Err(StorageError::OutOfBounds) => break 'walk, // конец носителя
                    Err(e) => return Err(e.into()),
                }
                if b[0] != 0 {
                    break;
                }
            }
            self.store.backtrack(1)?;
            let at = self.store.pos();

            let mut raw = [0u8; 3];
            match self.store.read(&mut raw) {
                Ok(()) => {}
                // обрезанный хвост (< 3 байт до края) — терпимо, скан окончен
                Err(StorageError::OutOfBounds) => break 'walk,
                Err(e) => return Err(e.into()),
            }

            let w = Word::decode(raw)?;
            if w.index >= self.dir.max_records() {
                return Err(FsError::OutOfRange);
            }

            match (w.kind, w.payload_kind) {
                (WordKind::Normal, PayloadKind::Size) => {
                    // начало записи; двух первичных заголовков быть не может
                    let slot = self.dir.slot_mut(w.index)?;
                    if slot.first != 0 {
                        return Err(FsError::OutOfRange);
                    }
                    slot.first = at;
                    debug!("mount: record {} at {} (len {})", w.index, at, w.payload);
                    self.skip_payload(w.payload)?;
                }
                (WordKind::Fragment, PayloadKind::Pointer) => {
                    // цель указателя будет разобрана в порядке адресов,
                    // двигаться никуда не нужно — только проверить границы
                    if w.payload <= SUPERBLOCK_SIZE || w.payload >= total {
                        return Err(FsError::OutOfRange);
                    }
                }
                (WordKind::Fragment, PayloadKind::Size) => {
                    self.skip_payload(w.payload)?;
                }
                (WordKind::Normal, PayloadKind::Pointer) => {
                    // такой комбинации формат не знает
                    return Err(FsError::OutOfRange);
                }
            }

            if self.store.at_end() {
                break;
            }
        }

        debug!("mount: {} record(s) found", self.dir.count());
        Ok(())
    }

    /// Перешагнуть данные экстента; выход за край носителя означает,
    /// что заявленная длина лжёт.
    fn skip_payload(&mut self, len: u16) -> Result<()> {
        match self.store.advance(len) {
            Ok(()) => Ok(()),
            Err(StorageError::OutOfBounds) => Err(FsError::OutOfRange),
            Err(e) => Err(e.into()),
        }
    }
}
