pub mod constants;
pub mod currency;
pub mod errors;
pub mod lootbox;
pub mod poll;
pub mod rewards;
pub mod user;

pub use constants::*;
pub use currency::*;
pub use errors::*;
pub use lootbox::*;
pub use poll::*;
pub use rewards::*;
pub use user::*;
