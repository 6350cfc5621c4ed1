use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastResultDTO {
    pub success_count: usize,
    pub failure_count: usize,
    pub removed_tokens: usize,
}

pub mod send_notification {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub body: String,
    }

    pub type APIResponse = BroadcastResultDTO;
}
