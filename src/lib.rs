//! # NAER Exam Download
//!
//! 从国家教育研究院「全国中小学题库网」下载试卷与答案
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 抓取搜索结果页并解析成 `ListingPage`
//!
//! ### ② 业务能力层（Services）
//! - `row_parser` - 一行表格 → `ExamRecord`
//! - `filename` - `ExamRecord` → 文件名与下载任务
//! - `DocumentDownloader` - 下载单个文档
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/harvester` - 读取总页数、分页循环、进度与终止事件
//! - `orchestrator/page_processor` - 处理单页的所有行
//!
//! ### 外部协作者
//! - `browser/` - 让使用者在浏览器中确认搜索条件，只产生网址字符串
//! - `app` - 终端展示与 Ctrl-C 取消

pub mod app;
pub mod browser;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{HarvestError, HarvestResult};
pub use models::{ExamRecord, HarvestEvent, HarvestOutcome, HarvestProgress, SearchUrlTemplate};
pub use orchestrator::{HarvestHandle, Harvester};
