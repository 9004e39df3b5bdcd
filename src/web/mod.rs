//! 原生 Web API 封装模块
//!
//! 此模块集中了对浏览器原生能力（HTTP、LocalStorage、History API）
//! 的封装，并为前两者提供可注入的抽象接口，保证核心逻辑可以在
//! 非 wasm 环境下测试。

pub mod http;
pub mod route;
pub mod router;
pub mod storage;
