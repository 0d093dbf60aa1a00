//! Infrastructure layer: DTOs, the in-memory repository and upstream LLM clients.

pub mod dto;
pub mod llm;
pub mod repository;
