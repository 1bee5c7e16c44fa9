//! volume/write — последовательная запись с сцеплением экстентов.
//!
//! Порядок на носителе жёсткий: данные экстента -> патч его заголовка;
//! pointer-слово в хвосте заполненного экстента -> заголовок
//! fragment+size(0) нового экстента -> продолжение данных. Скан,
//! увидевший pointer-слово, находит либо его цель, либо нули.

use log::debug;

use crate::consts::{MAX_RECORD_SIZE, PAYLOAD_MAX, WORD_SIZE};
use crate::dir::{Cursor, WriteCursor};
use crate::error::{FsError, Result};
use crate::storage::{Storage, StorageResult};
use crate::word::Word;

use super::Volume;

impl<S: Storage> Volume<S> {
    /// Дописать `data` в запись, открытую на запись.
    ///
    /// Длина одного вызова строго ограничена 15-битным полем длины
    /// заголовка (MAX_RECORD_SIZE = 32767): большее значение молча не
    /// влезает в слово метаданных. Несколько последовательных вызовов
    /// продолжают с места останова. При I/O-сбое или NoSpace посреди
    /// записи заголовок текущего экстента всё равно отражает устойчиво
    /// записанные байты.
    pub fn write(&mut self, rec: u8, data: &[u8]) -> Result<()> {
        if data.len() > MAX_RECORD_SIZE {
            return Err(FsError::InvalidRecord(rec));
        }
        let slot = self.dir.slot(rec)?;
        let first = slot.first;
        let mut wc = match slot.cursor {
            Cursor::Write(wc) => wc,
            _ => return Err(FsError::NotWritable(rec)),
        };

        let mut written = 0usize;
        let res: Result<()> = loop {
            if written >= data.len() {
                // вход доставлен: зафиксировать длину текущего экстента
                break self.patch_extent_header(rec, first, &wc);
            }

            if wc.len < wc.cap {
                // в экстенте ещё есть место
                let n = (data.len() - written).min((wc.cap - wc.len) as usize);
                if let Err(e) = self.write_chunk(wc.base + wc.len, &data[written..written + n]) {
                    // заголовок должен покрыть то, что легло до сбоя
                    let _ = self.patch_extent_header(rec, first, &wc);
                    break Err(e.into());
                }
                wc.len += n as u16;
                written += n;

                if wc.len >= wc.cap {
                    // экстент заполнен: длина фиксируется немедленно
                    if let Err(e) = self.patch_extent_header(rec, first, &wc) {
                        break Err(e);
                    }
                }
            } else {
                // экстент исчерпан, вход остался: сцепляем следующий
                let hole = match self.find_contiguous() {
                    Ok(h) => h,
                    // NoSpace: заполненный экстент уже запатчен выше
                    Err(e) => break Err(e),
                };

                let ptr_slot = wc.base + wc.cap;
                if hole.start != ptr_slot {
                    // цель за пределами 15-битного поля указателя
                    // недостижима для сцепления
                    if hole.start > PAYLOAD_MAX {
                        break Err(FsError::NoSpace);
                    }
                    // pointer-слово сразу за данными заполненного экстента
                    let ptr = Word::fragment_pointer(rec, hole.start);
                    if let Err(e) = self.write_chunk(ptr_slot, &ptr.encode()) {
                        break Err(e.into());
                    }
                }
                // иначе дыра примыкает вплотную (ёмкость экстента упёрлась
                // в 15-битное поле): экстенты смежные, заголовок
                // fragment+size ложится прямо в слот указателя

                debug!(
                    "record {}: chained extent at {} (cap {})",
                    rec, hole.start, hole.data_size
                );
                wc = WriteCursor {
                    base: hole.data_start,
                    cap: hole.data_size,
                    len: 0,
                };
                // заголовок нового экстента (fragment+size(0)) — до данных
                if let Err(e) = self.patch_extent_header(rec, first, &wc) {
                    break Err(e);
                }
            }
        };

        // курсор сохраняется и при ошибке: следующий вызов продолжит честно
        self.dir.slot_mut(rec)?.cursor = Cursor::Write(wc);
        res
    }

    fn write_chunk(&mut self, at: u16, buf: &[u8]) -> StorageResult<()> {
        self.store.seek(at)?;
        self.store.write(buf)
    }

    /// Переписать заголовок активного экстента: нагрузка = записанные байты.
    /// Первичный экстент остаётся normal+size, все последующие — fragment+size.
    fn patch_extent_header(&mut self, rec: u8, first: u16, wc: &WriteCursor) -> Result<()> {
        let hdr = wc.base - WORD_SIZE;
        let word = if hdr == first {
            Word::normal_size(rec, wc.len)
        } else {
            Word::fragment_size(rec, wc.len)
        };
        self.store.seek(hdr)?;
        self.store.write(&word.encode())?;
        Ok(())
    }
}
