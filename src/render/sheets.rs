// ==========================================
// 制作团队排班系统 - 表格视图
// ==========================================
// 职责: 排班表/分配日志 → 二维表 (岗位 × 日期, 汇总)
// 红线: 只读输出, 不参与排班决策
// ==========================================

use crate::config::RosterConfig;
use crate::domain::assignment::AssignmentLog;
use crate::domain::schedule::{ScheduleState, ServiceKey};
use crate::domain::types::{
    assistant_role, main_role, DayCategory, ASSISTANT_ROLE, DIRECTOR_ROLE,
};
use chrono::NaiveDate;
use serde::Serialize;

pub const SUNDAY_SHEET: &str = "Sunday_Services";
pub const SUMMARY_SHEET: &str = "Summary";
pub const TOTALS_SHEET: &str = "Totals";

// ==========================================
// Sheet - 二维表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// 按首列查找行
    pub fn row(&self, label: &str) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|r| r.first().map(String::as_str) == Some(label))
            .map(Vec::as_slice)
    }
}

/// 周六表名, 如 "Tygerberg_Saturday"
pub fn saturday_sheet_name(config: &RosterConfig) -> String {
    ServiceKey::new(DayCategory::Saturday, &config.saturday_venue).to_string()
}

/// 周日岗位行顺序: 各岗位 Main/Assistant 成对, 最后 Director
pub fn sunday_role_order(config: &RosterConfig) -> Vec<String> {
    let mut order = Vec::with_capacity(config.roles.len() * 2 + 1);
    for role in &config.roles {
        order.push(main_role(role));
        order.push(assistant_role(role));
    }
    order.push(DIRECTOR_ROLE.to_string());
    order
}

/// 周六岗位行顺序: 各岗位, Director, Assistant
pub fn saturday_role_order(config: &RosterConfig) -> Vec<String> {
    let mut order: Vec<String> = config.roles.clone();
    order.push(DIRECTOR_ROLE.to_string());
    order.push(ASSISTANT_ROLE.to_string());
    order
}

fn date_headers(first: &str, dates: &[NaiveDate]) -> Vec<String> {
    std::iter::once(first.to_string())
        .chain(dates.iter().map(|d| d.format("%Y-%m-%d").to_string()))
        .collect()
}

/// 周日视图: 每个场地一个分块 (场地横幅行 + 岗位行)
pub fn sunday_sheet(schedule: &ScheduleState, config: &RosterConfig, dates: &[NaiveDate]) -> Sheet {
    let mut sheet = Sheet::new(SUNDAY_SHEET, date_headers("Role", dates));
    let roles = sunday_role_order(config);

    for venue in &config.venues {
        let mut banner = vec![format!("Campus: {}", venue)];
        banner.resize(dates.len() + 1, String::new());
        sheet.rows.push(banner);

        for role in &roles {
            let mut row = vec![role.clone()];
            row.extend(dates.iter().map(|d| {
                schedule
                    .get(DayCategory::Sunday, venue, *d, role)
                    .unwrap_or_default()
                    .to_string()
            }));
            sheet.rows.push(row);
        }
    }
    sheet
}

/// 周六视图: 岗位 × 日期
pub fn saturday_sheet(schedule: &ScheduleState, config: &RosterConfig, dates: &[NaiveDate]) -> Sheet {
    let mut sheet = Sheet::new(saturday_sheet_name(config), date_headers("Role", dates));

    for role in saturday_role_order(config) {
        let mut row = vec![role.clone()];
        row.extend(dates.iter().map(|d| {
            schedule
                .get(DayCategory::Saturday, &config.saturday_venue, *d, &role)
                .unwrap_or_default()
                .to_string()
        }));
        sheet.rows.push(row);
    }
    sheet
}

/// 汇总视图: (Day, Name, Campus, Role) 分组计数
pub fn summary_sheet(log: &AssignmentLog) -> Sheet {
    let headers = ["Day", "Name", "Campus", "Role", "Count"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut sheet = Sheet::new(SUMMARY_SHEET, headers);

    for group in log.grouped_counts() {
        sheet.rows.push(vec![
            group.day.to_string(),
            group.person,
            group.venue,
            group.role,
            group.count.to_string(),
        ]);
    }
    sheet
}

/// 人员合计视图: 总次数 + 周日各场地次数 + 周六次数
pub fn totals_sheet(log: &AssignmentLog, config: &RosterConfig) -> Sheet {
    let mut headers = vec!["Name".to_string(), "Total".to_string()];
    headers.extend(config.venues.iter().map(|v| format!("Sunday {}", v)));
    headers.push("Saturday".to_string());
    let mut sheet = Sheet::new(TOTALS_SHEET, headers);

    let by_day = log.counts_by_person_day();
    let mut sunday_by_venue = std::collections::BTreeMap::new();
    for a in log.iter().filter(|a| a.day == DayCategory::Sunday) {
        *sunday_by_venue
            .entry((a.person.as_str(), a.venue.as_str()))
            .or_insert(0usize) += 1;
    }

    for (person, total) in log.totals_by_person() {
        let mut row = vec![person.clone(), total.to_string()];
        for venue in &config.venues {
            let n = sunday_by_venue
                .get(&(person.as_str(), venue.as_str()))
                .copied()
                .unwrap_or(0);
            row.push(n.to_string());
        }
        let saturday = by_day
            .get(&(person.clone(), DayCategory::Saturday))
            .copied()
            .unwrap_or(0);
        row.push(saturday.to_string());
        sheet.rows.push(row);
    }
    sheet
}
