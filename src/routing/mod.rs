//! Declarative request routing: path patterns and the ordered rule table.

pub mod matcher;
pub mod table;

pub use matcher::{PathParams, PathPattern};
pub use table::{MethodMatch, RouteMatch, RouteRule, RouteTable};
