// Job listings: the data-service store seam and the employer-facing endpoints.

pub mod handlers;
pub mod store;
