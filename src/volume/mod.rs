//! volume — операции тома поверх адаптера носителя.
//!
//! Разделение по подмодулям:
//! - core.rs  — структура Volume, конструкторы, format, list/next_available, sync
//! - mount.rs — загрузочный скан: восстановление каталога из метаданных носителя
//! - alloc.rs — сканер непрерывного свободного места (дыры >= MIN_HOLE)
//! - open.rs  — open (привязка на чтение / размещение на запись), close
//! - write.rs — последовательная запись с сцеплением экстентов и патчем заголовков
//! - read.rs  — общий обход цепочки для read/erase, size_of

pub mod alloc;
pub mod core;
pub mod mount;
pub mod open;
pub mod read;
pub mod write;

pub use self::core::Volume;
