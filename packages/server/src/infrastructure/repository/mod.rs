//! Repository 実装
//!
//! ドメイン層の RoomRepository trait を実装します。
//! 接続とルーム所属はプロセス内のメモリにのみ保持され、永続化はしません。

pub mod inmemory;

pub use inmemory::InMemoryRoomRepository;
