//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ValueObjectError;

/// 接続処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("Connection '{0}' is already registered")]
    DuplicateConnection(String),
}

/// ルーム参加処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error("Invalid room name: {0}")]
    InvalidRoomName(#[from] ValueObjectError),

    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),
}

/// センサー中継処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelaySensorError {
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),
}

/// 切断処理のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("Connection '{0}' is not registered")]
    ConnectionNotFound(String),
}
