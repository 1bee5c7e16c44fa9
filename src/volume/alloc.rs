//! volume/alloc — сканер непрерывного свободного места.
//!
//! Единственный участок, который обязан отличать метаданные от свободного
//! места без внешнего состояния; опирается исключительно на инвариант
//! «первый байт валидного слова ненулевой».
//!
//! Дыра пригодна, если нулевой прогон не короче MIN_HOLE (7): 3 байта
//! заголовка + хотя бы 1 байт данных + 3 байта под хвостовой
//! pointer-фрагмент. Сообщаемая ёмкость — run - 7: резерв под хвостовой
//! указатель не отдаётся под данные.

use log::debug;

use crate::consts::{DATA_START, MIN_HOLE, PAYLOAD_MAX, WORD_SIZE};
use crate::error::{FsError, Result, StorageError};
use crate::storage::Storage;
use crate::word;

use super::Volume;

/// Найденная дыра: смещение будущего заголовка, начало и ёмкость данных.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hole {
    pub start: u16,
    pub data_start: u16,
    pub data_size: u16,
}

impl<S: Storage> Volume<S> {
    /// Ближайшая к началу области данных пригодная дыра.
    ///
    /// NoSpace — обход упёрся в край носителя, так и не набрав дыры;
    /// Io — настоящий отказ устройства.
    pub(crate) fn find_contiguous(&mut self) -> Result<Hole> {
        self.store.seek(DATA_START)?;

        loop {
            let mut raw = [0u8; 3];
            match self.store.read(&mut raw) {
                Ok(()) => {}
                Err(StorageError::OutOfBounds) => return Err(FsError::NoSpace),
                Err(e) => return Err(e.into()),
            }

            if word::is_blank(&raw) {
                // окно задело свободное место: считаем нулевой прогон,
                // три прочитанных байта уже в счёте
                let start = self.store.pos() - WORD_SIZE;
                let mut run = WORD_SIZE;
                loop {
                    let mut b = [0u8; 1];
                    match self.store.read(&mut b) {
                        Ok(()) => {}
                        Err(StorageError::OutOfBounds) => break, // дыра дотянулась до края
                        Err(e) => return Err(e.into()),
                    }
                    if b[0] == 0 {
                        run += 1;
                    } else {
                        // прогон оборвался: этот байт — начало чужого слова
                        self.store.backtrack(1)?;
                        break;
                    }
                }

                if run >= MIN_HOLE {
                    // ёмкость не больше 15-битного поля длины в заголовке:
                    // гигантская дыра режется, остаток дыры остаётся свободным
                    let hole = Hole {
                        start,
                        data_start: start + WORD_SIZE,
                        data_size: (run - MIN_HOLE).min(PAYLOAD_MAX),
                    };
                    debug!(
                        "free space at {} (data at {}, cap {})",
                        hole.start, hole.data_start, hole.data_size
                    );
                    return Ok(hole);
                }
                // дыра мала — продолжаем с байта, на котором оборвался прогон
            } else if word::is_size_payload(&raw) {
                // слово с длиной: перешагнуть данные экстента
                match self.store.advance(word::payload_of(&raw)) {
                    Ok(()) => {}
                    Err(StorageError::OutOfBounds) => return Err(FsError::NoSpace),
                    Err(e) => return Err(e.into()),
                }
            }
            // pointer-слово: следующее слово лежит сразу за ним
        }
    }

    /// Суммарный объём свободных байт в области данных.
    ///
    /// Оценка для инструментов и диагностики: считаются все нулевые
    /// прогоны, включая дыры короче MIN_HOLE, непригодные для размещения.
    /// Нули внутри данных экстентов не считаются — их длины перешагиваются
    /// по заголовкам, как в сканере.
    pub fn free_bytes(&mut self) -> Result<u16> {
        self.store.seek(DATA_START)?;
        let mut free: u32 = 0;

        loop {
            let mut b = [0u8; 1];
            match self.store.read(&mut b) {
                Ok(()) => {}
                Err(StorageError::OutOfBounds) => break, // конец носителя
                Err(e) => return Err(e.into()),
            }
            if b[0] == 0 {
                free += 1;
                continue;
            }

            // ненулевой байт — начало слова метаданных
            self.store.backtrack(1)?;
            let mut raw = [0u8; 3];
            match self.store.read(&mut raw) {
                Ok(()) => {}
                // обрезок слова у края: занят, но не считается свободным
                Err(StorageError::OutOfBounds) => break,
                Err(e) => return Err(e.into()),
            }
            if word::is_size_payload(&raw) {
                match self.store.advance(word::payload_of(&raw)) {
                    Ok(()) => {}
                    Err(StorageError::OutOfBounds) => break,
                    Err(e) => return Err(e.into()),
                }
            }
        }

        Ok(free.min(u16::MAX as u32) as u16)
    }
}
