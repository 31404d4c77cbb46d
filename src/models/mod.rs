pub mod productmodel;
pub mod referralmodel;
pub mod shopmodel;
pub mod supportmodel;
pub mod usermodel;
pub mod walletmodels;
