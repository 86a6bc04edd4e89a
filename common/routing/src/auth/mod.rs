pub mod claims;
pub mod oauth;
pub mod token;
