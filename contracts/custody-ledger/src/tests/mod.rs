pub mod burn_test;
pub mod transfer_test;
