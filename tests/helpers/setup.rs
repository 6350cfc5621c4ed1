use gemschihub_api::Application;
use gemschihub_infra::{Config, GemschiContext, InMemoryPushSender};
use gemschihub_sdk::GemschiSDK;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;

pub const ADMIN_USER_ID: &str = "captain";

#[derive(Serialize)]
struct Claims {
    exp: usize,
    sub: String,
}

pub struct TestApp {
    pub config: Config,
    pub address: String,
    pub push: Arc<InMemoryPushSender>,
}

impl TestApp {
    pub fn token_for(&self, user_id: &str) -> String {
        let claims = Claims {
            exp: 4_102_444_800, // 2100-01-01
            sub: user_id.into(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )
        .expect("Expected to sign token")
    }

    /// Client authenticated as the given user
    pub fn sdk_for(&self, user_id: &str) -> GemschiSDK {
        GemschiSDK::new_with_token(self.address.clone(), self.token_for(user_id))
    }

    pub fn admin_sdk(&self) -> GemschiSDK {
        self.sdk_for(ADMIN_USER_ID)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, GemschiSDK) {
    let mut ctx = GemschiContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.jwt_secret = "integration-test-secret".into();
    ctx.config.admin_user_ids = vec![ADMIN_USER_ID.into()];
    let push = Arc::new(InMemoryPushSender::new());
    ctx.push = push.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        address: address.clone(),
        push,
    };
    let sdk = GemschiSDK::new(address);
    (app, sdk)
}
