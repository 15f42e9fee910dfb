// ==========================================
// 制作团队排班系统 - 排班配置
// ==========================================
// 职责: 场地/岗位/门槛/标记等可调参数
// 说明: 文件中未出现的键取默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::skill::SkillColumn;
use crate::domain::types::{SkillLevel, LEVEL_ASSIST, LEVEL_LEAD};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 配置键 (与 JSON 字段名一致, 用于错误提示)
pub mod config_keys {
    pub const VENUES: &str = "venues";
    pub const SATURDAY_VENUE: &str = "saturday_venue";
    pub const ROLES: &str = "roles";
    pub const DIRECTOR_COLUMN: &str = "director_column";
    pub const NAME_COLUMN: &str = "name_column";
    pub const AFFIRMATIVE_MARKER: &str = "affirmative_marker";
    pub const LEAD_LEVEL: &str = "lead_level";
    pub const ASSIST_LEVEL: &str = "assist_level";
}

// ==========================================
// RosterConfig - 排班配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// 周日场地 (按此顺序处理)
    pub venues: Vec<String>,

    /// 周六唯一场地
    pub saturday_venue: String,

    /// 非总监岗位 (按此顺序填充)
    pub roles: Vec<String>,

    /// 技能表中的总监列名
    pub director_column: String,

    /// 两张表共用的姓名列名
    pub name_column: String,

    /// 可用性单元格的肯定标记 (去空白后精确匹配)
    pub affirmative_marker: String,

    /// 总监 / 主岗门槛
    pub lead_level: SkillLevel,

    /// 助理门槛
    pub assist_level: SkillLevel,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            venues: vec!["Tygerberg".to_string(), "Stellies".to_string()],
            saturday_venue: "Tygerberg".to_string(),
            roles: vec!["Sound".to_string(), "Lights".to_string(), "Resi".to_string()],
            director_column: "Director".to_string(),
            name_column: "Name".to_string(),
            affirmative_marker: "Yes".to_string(),
            lead_level: LEVEL_LEAD,
            assist_level: LEVEL_ASSIST,
        }
    }
}

impl RosterConfig {
    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.venues.is_empty() {
            return Err(invalid(config_keys::VENUES, "至少需要一个场地"));
        }
        if has_blank_or_duplicate(&self.venues) {
            return Err(invalid(config_keys::VENUES, "场地不能为空或重复"));
        }
        if self.saturday_venue.trim().is_empty() {
            return Err(invalid(config_keys::SATURDAY_VENUE, "周六场地不能为空"));
        }
        if self.roles.is_empty() {
            return Err(invalid(config_keys::ROLES, "至少需要一个岗位"));
        }
        if has_blank_or_duplicate(&self.roles) {
            return Err(invalid(config_keys::ROLES, "岗位不能为空或重复"));
        }
        if self.director_column.trim().is_empty() {
            return Err(invalid(config_keys::DIRECTOR_COLUMN, "总监列名不能为空"));
        }
        if self.name_column.trim().is_empty() {
            return Err(invalid(config_keys::NAME_COLUMN, "姓名列名不能为空"));
        }
        if self.affirmative_marker.trim().is_empty() {
            return Err(invalid(config_keys::AFFIRMATIVE_MARKER, "肯定标记不能为空"));
        }
        if self.assist_level > self.lead_level {
            return Err(invalid(
                config_keys::ASSIST_LEVEL,
                &format!(
                    "助理门槛 {} 不能高于主岗门槛 {}",
                    self.assist_level, self.lead_level
                ),
            ));
        }
        Ok(())
    }

    /// 技能表必须具备的全部技能列 (总监列 + 周日各场地 + 周六场地)
    pub fn required_skill_columns(&self) -> Vec<SkillColumn> {
        let mut columns = vec![SkillColumn::Director];
        let mut venues: Vec<&str> = self.venues.iter().map(String::as_str).collect();
        if !venues.contains(&self.saturday_venue.as_str()) {
            venues.push(&self.saturday_venue);
        }
        for venue in venues {
            for role in &self.roles {
                columns.push(SkillColumn::role(role, venue));
            }
        }
        columns
    }

    /// 周六场地的各岗位技能列 (周六助理资格判定用)
    pub fn saturday_role_columns(&self) -> Vec<SkillColumn> {
        self.roles
            .iter()
            .map(|role| SkillColumn::role(role, &self.saturday_venue))
            .collect()
    }

    pub fn header_of(&self, column: &SkillColumn) -> String {
        column.header(&self.director_column)
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn has_blank_or_duplicate(values: &[String]) -> bool {
    let mut seen = HashSet::new();
    values
        .iter()
        .any(|v| v.trim().is_empty() || !seen.insert(v.as_str()))
}
