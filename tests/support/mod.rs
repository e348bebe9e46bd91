#![allow(dead_code)]

pub mod formscope_env;
pub mod poses;
