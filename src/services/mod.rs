pub mod asset_resolver;
pub mod kijiji_bot;
pub mod poster;
pub mod validator;

pub use asset_resolver::AssetResolver;
pub use kijiji_bot::KijijiBot;
pub use poster::{PostOutcome, Poster};
pub use validator::validate_record;
