// src/dir.rs — SlateFS (каталог в RAM)
//
// На носителе таблицы размещения нет: каталог целиком восстанавливается
// mount-сканом. Слот хранит смещение первичного заголовка записи
// (0 = записи нет) и типизированный курсор открытого состояния.
//
// Инварианты:
// - first == 0 тогда и только тогда, когда записи не существует;
// - запись не бывает одновременно открыта на чтение и на запись
//   (варианты Write/Read взаимоисключающие);
// - в режиме записи len <= cap.

use crate::error::{FsError, Result};

/// Курсор записи: текущий экстент.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteCursor {
    /// Абсолютное смещение начала данных экстента (заголовок + 3).
    pub base: u16,
    /// Ёмкость области данных экстента.
    pub cap: u16,
    /// Сколько байт в экстент уже записано.
    pub len: u16,
}

/// Фаза обхода цепочки (чтение/стирание).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadPhase {
    /// Следующий шаг разбирает первичный заголовок.
    Start,
    /// Идём по данным экстента: `at` — абсолютный курсор, `left` — остаток.
    Data { at: u16, left: u16 },
    /// Данные экстента исчерпаны: по смещению `at` ожидается слово метаданных.
    Header { at: u16 },
}

/// Открытое состояние слота.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Idle,
    Write(WriteCursor),
    Read(ReadPhase),
}

/// Слот каталога.
#[derive(Debug, Clone, Copy, Default)]
pub struct Slot {
    /// Смещение первичного заголовка записи; 0 — записи нет.
    pub first: u16,
    pub cursor: Cursor,
}

/// Каталог: логический индекс записи -> слот.
#[derive(Debug)]
pub struct Directory {
    slots: Vec<Slot>,
}

impl Directory {
    pub fn new(max_records: u8) -> Self {
        Directory {
            slots: vec![Slot::default(); max_records as usize],
        }
    }

    /// Предельное количество записей тома (N).
    #[inline]
    pub fn max_records(&self) -> u8 {
        self.slots.len() as u8
    }

    /// Сбросить все слоты (начало mount-скана).
    pub fn clear(&mut self) {
        for s in &mut self.slots {
            *s = Slot::default();
        }
    }

    pub fn slot(&self, rec: u8) -> Result<&Slot> {
        self.slots
            .get(rec as usize)
            .ok_or(FsError::InvalidRecord(rec))
    }

    pub fn slot_mut(&mut self, rec: u8) -> Result<&mut Slot> {
        self.slots
            .get_mut(rec as usize)
            .ok_or(FsError::InvalidRecord(rec))
    }

    /// Существующие индексы по возрастанию: заполняет `out` до его ёмкости,
    /// возвращает фактическое общее количество записей (не обрезанное).
    pub fn list(&self, out: &mut [u8]) -> usize {
        let mut total = 0usize;
        for (i, s) in self.slots.iter().enumerate() {
            if s.first != 0 {
                if total < out.len() {
                    out[total] = i as u8;
                }
                total += 1;
            }
        }
        total
    }

    /// Наименьший свободный индекс; OutOfRange, если том заполнен.
    pub fn next_available(&self) -> Result<u8> {
        for (i, s) in self.slots.iter().enumerate() {
            if s.first == 0 {
                return Ok(i as u8);
            }
        }
        Err(FsError::OutOfRange)
    }

    /// Число существующих записей.
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.first != 0).count()
    }
}
