pub mod line;
pub mod parser;
pub mod router;

pub use line::run as run_line;
pub use router::Router;
