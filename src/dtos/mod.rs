pub mod commissiondtos;
pub mod shopdtos;
pub mod supportdtos;
pub mod userdtos;
