// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod practice;
pub mod preferences;
pub mod prompt;
pub mod voice;

pub use practice::{create_practice_session, CreateSessionRequest, ProvisionedSession};
pub use prompt::{compose_system_prompt, PromptInput};
pub use voice::{RoomConnection, VoiceBackendClient};
