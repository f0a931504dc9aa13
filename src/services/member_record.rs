//! 会员记录提取 - 业务能力层
//!
//! 把一份健康的结果页变成 `FieldSet`

use crate::models::field_set::{FieldKey, FieldSet};
use crate::services::field_extractor::{extract_field, FieldDescriptor, PageIndex};
use crate::services::society_extractor::{extract_society_memberships, BRAND_TOKEN, SOCIETY_LABEL};
use scraper::Html;

/// 按标签提取的字段（学会列表单独处理）
pub const MEMBER_FIELDS: [FieldDescriptor; 4] = [
    FieldDescriptor {
        key: FieldKey::NameInitials,
        label: "First and last name initials",
        multi_part: true,
    },
    FieldDescriptor {
        key: FieldKey::MembershipStatus,
        label: "Membership status",
        multi_part: false,
    },
    FieldDescriptor {
        key: FieldKey::MemberGrade,
        label: "IEEE member grade",
        multi_part: false,
    },
    FieldDescriptor {
        key: FieldKey::StandardsAssociationMember,
        label: "Standards Association Member",
        multi_part: false,
    },
];

/// 解析页面并提取全部字段
pub fn extract_member_record(identifier: &str, html: &str) -> FieldSet {
    let document = Html::parse_document(html);
    let index = PageIndex::build(&document);

    let mut fields: Vec<(FieldKey, Option<String>)> = MEMBER_FIELDS
        .iter()
        .map(|descriptor| (descriptor.key, extract_field(&index, descriptor)))
        .collect();
    fields.push((
        FieldKey::SocietyMemberships,
        extract_society_memberships(&index, SOCIETY_LABEL, BRAND_TOKEN),
    ));

    FieldSet::from_fields(identifier, fields)
}
