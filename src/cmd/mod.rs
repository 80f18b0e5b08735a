pub mod recommend;
pub mod serve;
