pub mod json_api;

pub use json_api::{
    run_request, timekeeping_json, TimekeepingRequest, TimekeepingResponse, SCHEMA_VERSION,
};
