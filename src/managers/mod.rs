pub mod ads;
pub mod call;
pub mod create;
