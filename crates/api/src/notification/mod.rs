pub mod broadcast;
mod send_notification;

use actix_web::web;
use send_notification::send_notification_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::post().to(send_notification_controller));
}
