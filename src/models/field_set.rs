use serde::{Deserialize, Serialize};

/// 健康页面中一个字段都没提取到时的错误文本
pub const NO_DATA_ERROR: &str = "no membership data found";

/// 会员记录中的数据字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    NameInitials,
    MembershipStatus,
    MemberGrade,
    StandardsAssociationMember,
    SocietyMemberships,
}

/// 单个会员号的校验结果
///
/// 要么至少有一个数据字段，要么只有 `error`，两者互斥；请通过构造函数创建。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet {
    pub identifier: String,
    pub name_initials: Option<String>,
    pub membership_status: Option<String>,
    pub member_grade: Option<String>,
    pub standards_association_member: Option<String>,
    pub society_memberships: Option<String>,
    pub error: Option<String>,
}

impl FieldSet {
    /// 由提取到的字段构建结果；若全部缺失则转为 `NO_DATA_ERROR`
    pub fn from_fields<I>(identifier: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (FieldKey, Option<String>)>,
    {
        let mut set = Self::empty(identifier.into());
        for (key, value) in fields {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                *set.slot_mut(key) = Some(value);
            }
        }
        if !set.has_data() {
            set.error = Some(NO_DATA_ERROR.to_string());
        }
        set
    }

    /// 只携带错误描述的结果
    pub fn failed(identifier: impl Into<String>, error: impl Into<String>) -> Self {
        let mut set = Self::empty(identifier.into());
        set.error = Some(error.into());
        set
    }

    /// 是否至少有一个数据字段
    pub fn has_data(&self) -> bool {
        [
            &self.name_initials,
            &self.membership_status,
            &self.member_grade,
            &self.standards_association_member,
            &self.society_memberships,
        ]
        .iter()
        .any(|v| v.is_some())
    }

    fn slot_mut(&mut self, key: FieldKey) -> &mut Option<String> {
        match key {
            FieldKey::NameInitials => &mut self.name_initials,
            FieldKey::MembershipStatus => &mut self.membership_status,
            FieldKey::MemberGrade => &mut self.member_grade,
            FieldKey::StandardsAssociationMember => &mut self.standards_association_member,
            FieldKey::SocietyMemberships => &mut self.society_memberships,
        }
    }

    fn empty(identifier: String) -> Self {
        Self {
            identifier,
            name_initials: None,
            membership_status: None,
            member_grade: None,
            standards_association_member: None,
            society_memberships: None,
            error: None,
        }
    }
}
