mod api_routes;
mod page;
mod server;

pub use api_routes::routes;
pub use server::WebUI;
