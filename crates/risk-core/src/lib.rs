// Library root for the College Football Risk client: wire types, domain
// model, API client, configuration, and the four fetchers the dashboard
// is built from.

pub mod api;
pub mod config;
pub mod model;
pub mod moves;
pub mod mvp;
pub mod odds;
pub mod seasons;
