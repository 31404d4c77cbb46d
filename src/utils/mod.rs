pub mod currency;
pub mod data_url;
pub mod password;
pub mod token;
