mod register_push_token;
mod unregister_push_token;

use actix_web::web;
use register_push_token::register_push_token_controller;
use unregister_push_token::unregister_push_token_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/push-tokens", web::post().to(register_push_token_controller));
    cfg.route(
        "/push-tokens",
        web::delete().to(unregister_push_token_controller),
    );
}
