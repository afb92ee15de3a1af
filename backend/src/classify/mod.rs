pub mod labels;
pub mod model;
pub mod preprocess;
pub mod response;
pub mod triage;
