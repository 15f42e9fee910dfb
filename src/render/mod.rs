// ==========================================
// 制作团队排班系统 - 渲染层
// ==========================================
// 职责: 将排班结果渲染为各视图并输出
// 输入: 排班表 + 分配日志 (只读)
// ==========================================

pub mod sheets;
pub mod writer;

pub use sheets::{
    saturday_role_order, saturday_sheet, saturday_sheet_name, summary_sheet, sunday_role_order,
    sunday_sheet, totals_sheet, Sheet, SUMMARY_SHEET, SUNDAY_SHEET, TOTALS_SHEET,
};
pub use writer::{write_json_report, CsvSheetWriter, RenderError, RenderResult, RosterReport};

use crate::config::RosterConfig;
use crate::engine::{RosterOutcome, ServiceCalendar};

/// 渲染全部视图: 周日, 周六, 汇总, 人员合计
pub fn render_all(
    outcome: &RosterOutcome,
    config: &RosterConfig,
    calendar: &ServiceCalendar,
) -> Vec<Sheet> {
    vec![
        sunday_sheet(&outcome.schedule, config, calendar.sunday_dates()),
        saturday_sheet(&outcome.schedule, config, calendar.saturday_dates()),
        summary_sheet(&outcome.log),
        totals_sheet(&outcome.log, config),
    ]
}
