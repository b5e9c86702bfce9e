pub mod claims;
pub mod token;

pub use claims::Claims;
pub use token::decode;
