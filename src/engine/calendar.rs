// ==========================================
// 制作团队排班系统 - 服务日历
// ==========================================
// 职责: 将日期列按星期分类为周六/周日服务日
// 红线: 无法解析的日期列直接拒绝
// ==========================================

use crate::domain::types::DayCategory;
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;
use tracing::debug;

/// 日期列格式
pub const DATE_HEADER_FORMAT: &str = "%Y-%m-%d";

// ==========================================
// ServiceCalendar - 服务日历
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCalendar {
    saturdays: Vec<NaiveDate>,
    sundays: Vec<NaiveDate>,
    ignored: Vec<NaiveDate>,
}

impl ServiceCalendar {
    /// 按星期分类, 保持输入顺序
    ///
    /// # 返回
    /// - Err(DuplicateDate): 同一日期出现多次
    pub fn from_dates(dates: &[NaiveDate]) -> EngineResult<Self> {
        let mut calendar = Self::default();
        let mut seen = HashSet::with_capacity(dates.len());
        for date in dates {
            if !seen.insert(*date) {
                return Err(EngineError::DuplicateDate { date: *date });
            }
            match DayCategory::from_weekday(date.weekday()) {
                Some(DayCategory::Saturday) => calendar.saturdays.push(*date),
                Some(DayCategory::Sunday) => calendar.sundays.push(*date),
                None => {
                    debug!(date = %date, "非周末日期, 不参与排班");
                    calendar.ignored.push(*date);
                }
            }
        }
        Ok(calendar)
    }

    /// 从表头字符串构建
    ///
    /// # 返回
    /// - Err(MalformedDateHeader): 任一表头不是 YYYY-MM-DD
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> EngineResult<Self> {
        let dates = headers
            .iter()
            .map(|h| parse_date_header(h.as_ref()))
            .collect::<EngineResult<Vec<_>>>()?;
        Self::from_dates(&dates)
    }

    pub fn saturday_dates(&self) -> &[NaiveDate] {
        &self.saturdays
    }

    pub fn sunday_dates(&self) -> &[NaiveDate] {
        &self.sundays
    }

    pub fn ignored_dates(&self) -> &[NaiveDate] {
        &self.ignored
    }

    /// 总监阶段的遍历顺序: 先全部周六, 再全部周日
    pub fn service_dates(&self) -> impl Iterator<Item = (DayCategory, NaiveDate)> + '_ {
        self.saturdays
            .iter()
            .map(|d| (DayCategory::Saturday, *d))
            .chain(self.sundays.iter().map(|d| (DayCategory::Sunday, *d)))
    }

    pub fn is_empty(&self) -> bool {
        self.saturdays.is_empty() && self.sundays.is_empty()
    }
}

/// 解析单个日期表头
pub fn parse_date_header(header: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(header.trim(), DATE_HEADER_FORMAT).map_err(|_| {
        EngineError::MalformedDateHeader {
            header: header.to_string(),
        }
    })
}
