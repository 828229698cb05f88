//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod automations;
#[allow(clippy::missing_errors_doc)]
pub mod devices;
#[allow(clippy::missing_errors_doc)]
pub mod groups;
#[allow(clippy::missing_errors_doc)]
pub mod hubs;
#[allow(clippy::missing_errors_doc)]
pub mod users;

use axum::Router;
use axum::routing::{MethodRouter, get, post};

use crate::state::{AppState, Ports};

/// Register `path` both with and without a trailing slash.
fn route<S>(router: Router<S>, path: &str, method: MethodRouter<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .route(path, method.clone())
        .route(&format!("{path}/"), method)
}

/// Build the resource routes.
pub fn routes<P: Ports>() -> Router<AppState<P>> {
    let mut router = Router::new();

    // Users
    router = route(router, "/users/signup", post(users::signup::<P>));
    router = route(router, "/users/login", post(users::login::<P>));
    router = route(router, "/users/logout", post(users::logout::<P>));
    router = route(router, "/users/forgot", post(users::forgot::<P>));
    router = route(router, "/users/reset", post(users::reset::<P>));
    router = route(router, "/users/account", get(users::account::<P>));
    router = route(
        router,
        "/users/account/profile",
        post(users::update_profile::<P>),
    );
    router = route(
        router,
        "/users/account/password",
        post(users::update_password::<P>),
    );
    router = route(
        router,
        "/users/account/delete",
        post(users::delete_account::<P>),
    );

    // Hubs
    router = route(router, "/hubs", get(hubs::list::<P>));
    router = route(router, "/hubs/register", post(hubs::register::<P>));
    router = route(router, "/hubs/add", post(hubs::add::<P>));
    router = route(router, "/hubs/delete", post(hubs::delete::<P>));
    router = route(
        router,
        "/hubs/checkUpdates",
        post(hubs::check_updates::<P>),
    );

    // Devices
    router = route(router, "/devices", post(devices::list::<P>));
    router = route(router, "/devices/register", post(devices::register::<P>));
    router = route(router, "/devices/nearby", post(devices::nearby::<P>));
    router = route(router, "/devices/add", post(devices::add::<P>));
    router = route(router, "/devices/update", post(devices::update::<P>));
    router = route(router, "/devices/delete", post(devices::delete::<P>));
    router = route(router, "/devices/{device_id}", get(devices::get::<P>));

    // Groups
    router = route(router, "/groups", post(groups::list::<P>));
    router = route(router, "/groups/add", post(groups::add::<P>));
    router = route(router, "/groups/addDevice", post(groups::add_device::<P>));
    router = route(
        router,
        "/groups/removeDevice",
        post(groups::remove_device::<P>),
    );
    router = route(router, "/groups/delete", post(groups::delete::<P>));
    router = route(router, "/groups/{group_id}", get(groups::get::<P>));

    // Automations
    router = route(router, "/automations", post(automations::list::<P>));
    router = route(router, "/automations/add", post(automations::add::<P>));
    router = route(
        router,
        "/automations/addDevice",
        post(automations::add_device::<P>),
    );
    router = route(
        router,
        "/automations/removeDevice",
        post(automations::remove_device::<P>),
    );
    router = route(router, "/automations/send", post(automations::send::<P>));
    router = route(router, "/automations/delete", post(automations::delete::<P>));
    route(
        router,
        "/automations/{automation_id}",
        get(automations::get::<P>),
    )
}
