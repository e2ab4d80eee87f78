//! # Notification Surface
//!
//! The contract the reconciler holds against the external notification
//! platform, plus the presentation types rendered into it. The platform
//! client itself (transport, rich-message encoding) is a collaborator behind
//! the [`NotificationSurface`] trait.

pub mod presentation;
pub mod surface;

pub use presentation::{
    clean_server_address, next_update_text, offline_presentation, online_presentation,
};
pub use surface::{
    ActionButton, EmbedField, MessageContent, MessageRef, NotificationSurface, StatusEmbed,
};
