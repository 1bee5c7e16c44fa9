//! Общие константы формата носителя (суперблок, слово метаданных, лимиты).

// -------- Суперблок --------
//
// Layout (offset 0, LE):
// [magic u32 = 0x534C5966]["версия" u8 = 1]
// Байты 5..size-1 — область данных, изначально нули.
pub const SLATE_MAGIC: u32 = 0x534C5966;
pub const SLATE_VERSION: u8 = 1;
pub const SUPERBLOCK_SIZE: u16 = 5;

/// Начало области данных (сразу после суперблока).
pub const DATA_START: u16 = SUPERBLOCK_SIZE;

// -------- Слово метаданных --------
//
// Ровно 3 байта [b0,b1,b2]:
// b0 bit7  — вид записи (0=normal, 1=fragment)
// b0 b6..0 — логический индекс записи + INDEX_BIAS (0 в этом поле запрещён)
// b1 bit7  — вид полезной нагрузки (0=pointer, 1=size)
// b1 b6..0 + b2 — 15-битная полезная нагрузка (0..=32767)
pub const WORD_SIZE: u16 = 3;
pub const PAYLOAD_MAX: u16 = 0x7FFF;

/// Смещение индекса на носителе: гарантирует, что первый байт любого
/// валидного слова метаданных ненулевой (нулевые прогоны = свободное место).
pub const INDEX_BIAS: u8 = 1;

// -------- Лимиты --------

/// Минимальная дыра, пригодная для размещения экстента:
/// 3 байта заголовка + >= 1 байт данных + 3 байта под хвостовой
/// pointer-фрагмент на случай последующего сцепления.
pub const MIN_HOLE: u16 = 7;

/// Жёсткий потолок длины одной операции записи: ровно то, что вмещает
/// 15-битное поле нагрузки заголовка (на байт меньше 32 KiB). Ёмкость
/// экстента ограничена тем же полем при размещении, так что длина в
/// заголовке не переполняется и при дозаписи несколькими вызовами.
pub const MAX_RECORD_SIZE: usize = PAYLOAD_MAX as usize;

/// Верхняя граница количества записей тома (7-битное поле индекса минус смещение).
pub const MAX_RECORDS_LIMIT: u8 = 126;

/// Количество записей по умолчанию.
pub const DEFAULT_MAX_RECORDS: u8 = 32;
