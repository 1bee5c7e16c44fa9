#![allow(non_snake_case)]

// Базовые модули
pub mod config;
pub mod consts;
pub mod dir;
pub mod error;
pub mod word;

// Адаптеры носителя (RAM / файл-образ)
pub mod storage; // src/storage/{mod,mem,file}.rs

// Ядро тома: format/mount/open/write/read/erase
pub mod volume; // src/volume/{mod,core,mount,alloc,open,write,read}.rs

// Удобные реэкспорты
pub use config::VolumeConfig;
pub use dir::Directory;
pub use error::{FsError, Result, StorageError};
pub use storage::{FileStorage, MemStorage, Storage};
pub use volume::Volume;
pub use word::{PayloadKind, Word, WordKind};
