//! volume/read — общий обход цепочки экстентов.
//!
//! Одна машина состояний обслуживает и чтение, и стирание: от первичного
//! заголовка по парам pointer->size, отдавая байты вызывающему либо
//! обнуляя метаданные и данные по пути. Цепочка считается законченной,
//! когда за данными лежит свободное место, чужое слово или край носителя.
//!
//! Фаза обхода хранится в слоте: последовательные вызовы read продолжают
//! с места останова. Стирание всегда перезапускается с головы.

use log::debug;

use crate::consts::WORD_SIZE;
use crate::dir::{Cursor, ReadPhase};
use crate::error::{FsError, Result, StorageError};
use crate::storage::{Storage, StorageResult};
use crate::word::{self, PayloadKind, Word, WordKind};

use super::Volume;

/// Страховка от зацикленных указателей на повреждённом носителе.
const MAX_CHAIN_HOPS: u32 = 16 * 1024;

impl<S: Storage> Volume<S> {
    /// Прочитать до `out.len()` байт записи; возвращает фактически
    /// прочитанное (минимум из запрошенного и остатка записи).
    pub fn read(&mut self, rec: u8, out: &mut [u8]) -> Result<usize> {
        self.traverse(rec, Some(out), false)
    }

    /// Стереть запись: обнулить метаданные и данные всех экстентов,
    /// убрать запись из каталога. Неудачное (I/O) стирание оставляет
    /// запись в каталоге — можно повторить.
    pub fn erase(&mut self, rec: u8) -> Result<()> {
        let slot = self.dir.slot(rec)?;
        if matches!(slot.cursor, Cursor::Write(_)) {
            return Err(FsError::NotReadable(rec));
        }
        if slot.first == 0 {
            return Err(FsError::InvalidOperation(rec));
        }

        // стирание всегда идёт с головы цепочки
        self.dir.slot_mut(rec)?.cursor = Cursor::Idle;
        self.traverse(rec, None, true)?;

        let slot = self.dir.slot_mut(rec)?;
        slot.cursor = Cursor::Idle;
        slot.first = 0;
        debug!("record {}: erased", rec);
        Ok(())
    }

    /// Суммарная длина записи (по заголовкам, без курсоров слота).
    pub fn size_of(&mut self, rec: u8) -> Result<u16> {
        let slot = self.dir.slot(rec)?;
        if slot.first == 0 {
            return Err(FsError::InvalidOperation(rec));
        }
        let first = slot.first;
        let size = self.store.size() as u32;

        let mut raw = [0u8; 3];
        self.read_at(first, &mut raw).map_err(FsError::from)?;
        let mut total = word::payload_of(&raw) as u32;
        let mut at = first as u32 + WORD_SIZE as u32 + total;
        let mut hops = 0u32;

        loop {
            hops += 1;
            if hops > MAX_CHAIN_HOPS {
                return Err(FsError::OutOfRange);
            }
            if at + WORD_SIZE as u32 > size {
                break;
            }
            let mut raw = [0u8; 3];
            match self.read_at(at as u16, &mut raw) {
                Ok(()) => {}
                Err(StorageError::OutOfBounds) => break,
                Err(e) => return Err(e.into()),
            }
            let w = match Word::decode(raw) {
                Ok(w) => w,
                Err(_) => break,
            };
            if w.index != rec {
                break;
            }
            match (w.kind, w.payload_kind) {
                (WordKind::Fragment, PayloadKind::Size) => {
                    total += w.payload as u32;
                    at += WORD_SIZE as u32 + w.payload as u32;
                }
                (WordKind::Fragment, PayloadKind::Pointer) => {
                    at = w.payload as u32;
                }
                (WordKind::Normal, _) => break,
            }
        }

        Ok(total.min(u16::MAX as u32) as u16)
    }

    /// Машина обхода. `out == None` вместе с `erase == true` — стирание;
    /// иначе чтение в буфер вызывающего.
    fn traverse(&mut self, rec: u8, mut out: Option<&mut [u8]>, erase: bool) -> Result<usize> {
        let slot = self.dir.slot(rec)?;
        if matches!(slot.cursor, Cursor::Write(_)) {
            return Err(FsError::NotReadable(rec));
        }
        if slot.first == 0 {
            return Err(FsError::InvalidOperation(rec));
        }
        let first = slot.first;
        let want = out.as_ref().map_or(usize::MAX, |b| b.len());
        let mut phase = match slot.cursor {
            Cursor::Read(p) => p,
            _ => ReadPhase::Start,
        };

        let mut effective = 0usize;
        let mut hops = 0u32;

        let res: Result<()> = loop {
            if !erase && effective >= want {
                break Ok(());
            }

            match phase {
                ReadPhase::Start => {
                    // первичный заголовок: каталогу верим, индекс не сверяем
                    let mut raw = [0u8; 3];
                    if let Err(e) = self.read_at(first, &mut raw) {
                        break Err(e.into());
                    }
                    let len = word::payload_of(&raw);
                    let at = first + WORD_SIZE;
                    phase = if len > 0 {
                        ReadPhase::Data { at, left: len }
                    } else {
                        ReadPhase::Header { at }
                    };
                    if erase {
                        if let Err(e) = self.zero_range(first, WORD_SIZE) {
                            break Err(e);
                        }
                    }
                }

                ReadPhase::Data { at, left } => {
                    let n = if erase {
                        left
                    } else {
                        (want - effective).min(left as usize) as u16
                    };
                    if erase {
                        if let Err(e) = self.zero_range(at, n) {
                            break Err(e);
                        }
                    } else if let Some(buf) = out.as_deref_mut() {
                        let dst = &mut buf[effective..effective + n as usize];
                        if let Err(e) = self.read_at(at, dst) {
                            break Err(e.into());
                        }
                    }
                    effective += n as usize;
                    phase = if n == left {
                        ReadPhase::Header { at: at + n }
                    } else {
                        ReadPhase::Data {
                            at: at + n,
                            left: left - n,
                        }
                    };
                }

                ReadPhase::Header { at } => {
                    hops += 1;
                    if hops > MAX_CHAIN_HOPS {
                        break Err(FsError::OutOfRange);
                    }
                    let mut raw = [0u8; 3];
                    match self.read_at(at, &mut raw) {
                        Ok(()) => {}
                        // слово не помещается до края — цепочка закончилась
                        Err(StorageError::OutOfBounds) => break Ok(()),
                        Err(e) => break Err(e.into()),
                    }
                    let w = match Word::decode(raw) {
                        Ok(w) => w,
                        // нулевой прогон: за данными свободное место
                        Err(_) => break Ok(()),
                    };
                    if w.index != rec {
                        // чужие метаданные — запись кончилась
                        break Ok(());
                    }
                    match (w.kind, w.payload_kind) {
                        (WordKind::Fragment, PayloadKind::Size) => {
                            let data = at + WORD_SIZE;
                            phase = if w.payload > 0 {
                                ReadPhase::Data {
                                    at: data,
                                    left: w.payload,
                                }
                            } else {
                                ReadPhase::Header { at: data }
                            };
                        }
                        (WordKind::Fragment, PayloadKind::Pointer) => {
                            phase = ReadPhase::Header { at: w.payload };
                        }
                        (WordKind::Normal, _) => break Ok(()),
                    }
                    if erase {
                        if let Err(e) = self.zero_range(at, WORD_SIZE) {
                            break Err(e);
                        }
                    }
                }
            }
        };

        if !erase {
            // фаза остаётся в слоте: следующий read продолжит отсюда
            self.dir.slot_mut(rec)?.cursor = Cursor::Read(phase);
        }
        res.map(|_| effective)
    }

    fn read_at(&mut self, at: u16, buf: &mut [u8]) -> StorageResult<()> {
        self.store.seek(at)?;
        self.store.read(buf)
    }

    /// Обнулить `n` байт начиная с `at`.
    fn zero_range(&mut self, at: u16, n: u16) -> Result<()> {
        if n == 0 {
            return Ok(());
        }
        self.store.seek(at)?;
        let zeros = [0u8; 32];
        let mut left = n as usize;
        while left > 0 {
            let k = left.min(zeros.len());
            self.store.write(&zeros[..k])?;
            left -= k;
        }
        Ok(())
    }
}
