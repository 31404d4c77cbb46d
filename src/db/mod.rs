pub mod db;
pub mod payoutdb;
pub mod persistence;
pub mod productdb;
pub mod referraldb;
pub mod shopdb;
pub mod supportdb;
pub mod userdb;
