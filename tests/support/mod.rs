#![allow(dead_code)]

pub mod pipelines;
pub mod prognos_env;
