pub mod auth;
pub mod catchers;
pub mod config;
pub mod error;
pub mod processor;
pub mod queries;
pub mod routes;
pub mod store;

use rocket::figment::Figment;
use rocket::{catchers, routes, Build, Rocket};

use crate::catchers::{bad_request, conflict, internal_error, not_found, unauthorized, unprocessable_entity};
use crate::config::ElectionFairing;
use crate::routes::{add_candidate, cast_vote, get_candidate, list_votes, reset, tally, version};

/// Builds the server from Rocket's default configuration sources.
pub fn build() -> Rocket<Build> {
    build_with(rocket::Config::figment())
}

pub fn build_with(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(ElectionFairing)
        .mount(
            "/api",
            routes![
                version,
                add_candidate,
                get_candidate,
                cast_vote,
                reset,
                tally,
                list_votes
            ],
        )
        .register(
            "/",
            catchers![
                unauthorized,
                bad_request,
                conflict,
                unprocessable_entity,
                internal_error,
                not_found
            ],
        )
}

#[cfg(test)]
mod tests;
