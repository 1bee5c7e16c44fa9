//! storage — адаптер носителя (курсорная модель).
//!
//! Ядро видит носитель как плоский массив байтов фиксированного размера
//! с одним курсором: seek/read/write/advance/backtrack. Каждый обмен
//! двигает курсор; ядро никогда не полагается на то, что курсор переживёт
//! чужую операцию, и делает seek перед каждым доступом.
//!
//! Семантика границ:
//! - курсор живёт в диапазоне 0..=size (size — «за последним байтом»);
//! - seek принимает только 0..=size-1;
//! - read/write требуют, чтобы обмен целиком помещался до конца носителя,
//!   иначе OutOfBounds без частичной передачи;
//! - advance может довести курсор ровно до size (дальше — OutOfBounds).
//!
//! Реализации: MemStorage (RAM-образ) и FileStorage (файл-образ,
//! симулятор EEPROM).

pub mod file;
pub mod mem;

pub use file::FileStorage;
pub use mem::MemStorage;

use crate::error::StorageError;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Байт-адресуемый носитель с курсором.
pub trait Storage {
    /// Ёмкость носителя в байтах.
    fn size(&self) -> u16;

    /// Установить курсор; ошибка, если `off > size()-1`.
    fn seek(&mut self, off: u16) -> StorageResult<()>;

    /// Текущая позиция курсора.
    fn pos(&self) -> u16;

    /// Сдвинуть курсор вперёд на `n` байт.
    fn advance(&mut self, n: u16) -> StorageResult<()>;

    /// Сдвинуть курсор назад на `n` байт.
    fn backtrack(&mut self, n: u16) -> StorageResult<()>;

    /// Прочитать `buf.len()` байт с курсора, сдвинув его.
    fn read(&mut self, buf: &mut [u8]) -> StorageResult<()>;

    /// Записать `buf` с курсора, сдвинув его.
    fn write(&mut self, buf: &[u8]) -> StorageResult<()>;

    /// Курсор стоит на последнем адресуемом байте?
    fn at_end(&self) -> bool;

    /// Дотолкнуть буферы до устройства.
    fn sync(&mut self) -> StorageResult<()>;

    /// Завершить работу с носителем (финальный sync).
    fn close(&mut self) -> StorageResult<()>;
}
