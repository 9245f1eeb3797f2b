//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责分页循环和流程调度，是整个下载流程的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `harvester` - 分页下载器
//! - 读取总页数并依序处理每一页
//! - 发送进度与终止事件
//! - 在单一后台任务中执行，支持取消
//!
//! ### `page_processor` - 单页处理器
//! - 遍历单页的所有行
//! - 解析行、生成文件名、下载文档
//! - 输出单页统计
//!
//! ## 层次关系
//!
//! ```text
//! harvester (处理 1..=N 页)
//!     ↓
//! page_processor (处理 Vec<ListingRow>)
//!     ↓
//! services (能力层：row_parser / filename / downloader)
//!     ↓
//! clients (基础设施：ListingClient)
//! ```

pub mod harvester;
pub mod page_processor;

pub use harvester::{HarvestHandle, Harvester};
pub use page_processor::{process_page, PageContext, PageResult};
