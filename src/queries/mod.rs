pub mod _structs;
pub mod find_bus;
pub mod find_stop;
pub mod handler;
pub mod plan_routes;
pub mod render_map;

pub use _structs::{QueryError, Response, ResponseBody, StatRequest};
pub use handler::RequestHandler;
