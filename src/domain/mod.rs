pub mod run;
pub mod timeline;
pub mod user;

pub use run::*;
pub use timeline::*;
pub use user::*;
