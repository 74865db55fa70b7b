// ==========================================
// 集成测试共享辅助模块
// ==========================================

#![allow(dead_code)]

pub mod catalog_builder;
pub mod test_env;
