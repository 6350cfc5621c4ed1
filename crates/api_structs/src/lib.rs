mod event;
mod notification;
mod push_token;
mod status;

pub mod dtos {
    pub use crate::event::dtos::*;
}

pub use crate::event::api::*;
pub use crate::notification::api::*;
pub use crate::push_token::api::*;
pub use crate::status::api::*;
