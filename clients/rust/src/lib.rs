mod base;
mod event;
mod notification;
mod push_token;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
use event::EventClient;
pub use event::{CreateEventInput, GetEventsInput, UpdateEventInput, UpdateGameInput};
pub use gemschihub_api_structs::dtos::*;
pub use gemschihub_api_structs::BroadcastResultDTO as BroadcastResult;
pub use gemschihub_domain::{
    EventCategory, Game, InterclubMatch, MatchStatus, SetScore, TotalScore, ID,
};
use notification::NotificationClient;
use push_token::PushTokenClient;
use status::StatusClient;
use std::sync::Arc;

// Domain
pub use gemschihub_api_structs::dtos::EventDTO as Event;

/// GemschiHub Server SDK
///
/// The SDK contains methods for interacting with the GemschiHub server
/// API.
#[derive(Clone)]
pub struct GemschiSDK {
    pub event: EventClient,
    pub notification: NotificationClient,
    pub push_token: PushTokenClient,
    pub status: StatusClient,
}

impl GemschiSDK {
    /// `address` includes the api prefix, e.g. `http://localhost:5000/api/v1`
    pub fn new(address: String) -> Self {
        Self::create(BaseClient::new(address))
    }

    /// Client that authenticates every request with the given bearer token
    pub fn new_with_token<T: Into<String>>(address: String, token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_token(token.into());
        Self::create(base)
    }

    fn create(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let event = EventClient::new(base.clone());
        let notification = NotificationClient::new(base.clone());
        let push_token = PushTokenClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            event,
            notification,
            push_token,
            status,
        }
    }
}
