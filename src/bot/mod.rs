// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Conversation layer: commands, the list/select/edit/delete flow, and
//! per-user session state. Knows nothing about the transport.

pub mod handlers;
pub mod keyboards;
pub mod session;

pub use handlers::{Bot, BotConfig, Reply};
pub use keyboards::{Callback, InlineButton, Keyboard, MAIN_MENU_BUTTON};
pub use session::{Session, SessionStore, UserId};
