pub mod cookies;
pub mod inspect;
