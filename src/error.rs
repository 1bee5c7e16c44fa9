//! Типизированные ошибки SlateFS.
//!
//! Политика: ни одна ошибка не гасится внутри ядра — всё всплывает к
//! вызывающему. Запись, оборвавшаяся по I/O, успевает запатчить заголовок
//! текущего экстента, так что чтение никогда не выйдет за устойчиво
//! записанный префикс.

use thiserror::Error;

/// Result-алиас ядра.
pub type Result<T> = std::result::Result<T, FsError>;

/// Ошибки адаптера носителя.
///
/// `OutOfBounds` отделён от настоящего отказа устройства: для сканеров
/// выход за край носителя — штатный терминатор обхода, а не сбой.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("access beyond the end of the medium")]
    OutOfBounds,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Ошибки операций тома.
#[derive(Debug, Error)]
pub enum FsError {
    /// Отказ адаптера носителя на seek/read/write; состояние может быть частичным.
    #[error("storage failure: {0}")]
    Io(#[from] StorageError),

    /// На носителе нет сигнатуры/версии — том не отформатирован.
    #[error("no filesystem signature on the medium")]
    NotFormatted,

    /// Индекс записи за пределами тома либо длина записи больше допустимой.
    #[error("record {0}: index or size out of range")]
    InvalidRecord(u8),

    /// Сканер не нашёл пригодной дыры.
    #[error("no contiguous free space left on the medium")]
    NoSpace,

    /// Запись не открыта на запись.
    #[error("record {0} is not open for writing")]
    NotWritable(u8),

    /// Чтение/стирание записи, открытой на запись.
    #[error("record {0} is open for writing")]
    NotReadable(u8),

    /// Операция над записью без открытого состояния (или без самой записи).
    #[error("record {0} has no open state")]
    InvalidOperation(u8),

    /// Повреждённые метаданные либо указатель за пределами носителя.
    #[error("malformed metadata on the medium")]
    OutOfRange,

    /// Непригодная конфигурация тома.
    #[error("configuration error: {0}")]
    Config(String),
}
