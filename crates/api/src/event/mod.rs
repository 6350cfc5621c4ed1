mod create_event;
mod delete_event;
mod get_event;
mod get_events;
mod subscribers;
mod update_event;
mod update_game;

use actix_web::web;
use create_event::create_event_controller;
use delete_event::delete_event_controller;
use gemschihub_domain::Event;
use get_event::get_event_controller;
use get_events::get_events_controller;
use update_event::update_event_controller;
use update_game::update_game_controller;

/// Snapshots of an event around a successful modification
#[derive(Debug, Clone)]
pub struct EventUpdate {
    pub previous: Event,
    pub current: Event,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::post().to(create_event_controller));
    cfg.route("/events", web::get().to(get_events_controller));

    cfg.route("/events/{event_id}", web::get().to(get_event_controller));
    cfg.route("/events/{event_id}", web::put().to(update_event_controller));
    cfg.route(
        "/events/{event_id}",
        web::delete().to(delete_event_controller),
    );

    cfg.route(
        "/events/{event_id}/games/{game_number}",
        web::put().to(update_game_controller),
    );
}
