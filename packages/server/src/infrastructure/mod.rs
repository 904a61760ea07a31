//! Infrastructure layer: implementations of the domain traits, the survey
//! definition loader, and DTOs.

pub mod broadcast;
pub mod definition;
pub mod dto;
pub mod message_pusher;
pub mod repository;
