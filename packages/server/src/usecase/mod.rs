//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod generate_reply;
pub mod join_room;
pub mod relay_sensor;

pub use connect_participant::ConnectParticipantUseCase;
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, DisconnectError, JoinRoomError, RelaySensorError};
pub use generate_reply::GenerateReplyUseCase;
pub use join_room::JoinRoomUseCase;
pub use relay_sensor::RelaySensorUseCase;
