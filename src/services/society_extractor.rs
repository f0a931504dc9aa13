//! 学会会员提取 - 业务能力层
//!
//! 学会列表是结构化的：标签后面跟一个 `<ul>`/`<ol>`，条目里带组织品牌名。

use crate::services::field_extractor::{element_text, following_elements, next_element, PageIndex};
use scraper::ElementRef;

pub const SOCIETY_LABEL: &str = "Society membership";
pub const BRAND_TOKEN: &str = "IEEE";
/// 非列表兄弟元素的文字还必须包含的词
const SOCIETY_WORD: &str = "Society";

/// 提取学会会员列表，按 ", " 连接；没有符合条件的条目时返回 `None`
pub fn extract_society_memberships(
    index: &PageIndex<'_>,
    label: &str,
    brand: &str,
) -> Option<String> {
    let anchor = index.find_anchor(label)?;
    let row = anchor.row()?;

    // 紧邻的列表（锚点之后或行之后）
    let adjacent = [next_element(anchor.element), next_element(row)]
        .into_iter()
        .flatten()
        .find(|el| is_list(*el));

    if let Some(list) = adjacent {
        let items = branded_items(list, brand);
        if !items.is_empty() {
            return Some(items.join(", "));
        }
    }

    // 继续扫描行之后的兄弟（包括嵌套列表），去重
    let mut societies: Vec<String> = Vec::new();
    for sibling in following_elements(row) {
        let candidates = if is_list(sibling) || contains_list_items(sibling) {
            branded_items(sibling, brand)
        } else {
            let text = element_text(sibling);
            if text.contains(brand) && text.contains(SOCIETY_WORD) {
                vec![text]
            } else {
                Vec::new()
            }
        };

        for candidate in candidates {
            if !societies.contains(&candidate) {
                societies.push(candidate);
            }
        }
    }

    if societies.is_empty() {
        None
    } else {
        Some(societies.join(", "))
    }
}

fn is_list(element: ElementRef<'_>) -> bool {
    matches!(element.value().name(), "ul" | "ol")
}

fn list_items<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "li")
}

fn contains_list_items(element: ElementRef<'_>) -> bool {
    list_items(element).next().is_some()
}

fn branded_items(list: ElementRef<'_>, brand: &str) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for text in list_items(list).map(element_text) {
        if !text.is_empty() && text.contains(brand) && !items.contains(&text) {
            items.push(text);
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn extract(html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let index = PageIndex::build(&document);
        extract_society_memberships(&index, SOCIETY_LABEL, BRAND_TOKEN)
    }

    #[test]
    fn test_adjacent_list_filters_by_brand() {
        let html = r#"<div>
            <div><strong>Society memberships</strong></div>
            <ul>
                <li>IEEE Computer Society Membership</li>
                <li>Unrelated Club</li>
                <li>IEEE Signal Processing Society Membership</li>
            </ul>
        </div>"#;
        assert_eq!(
            extract(html).as_deref(),
            Some("IEEE Computer Society Membership, IEEE Signal Processing Society Membership")
        );
    }

    #[test]
    fn test_list_next_to_heading_inside_row() {
        let html = r#"<section><div>
            <h3>Society membership</h3>
            <ol><li>IEEE Power &amp; Energy Society</li></ol>
        </div></section>"#;
        assert_eq!(extract(html).as_deref(), Some("IEEE Power & Energy Society"));
    }

    #[test]
    fn test_scans_later_siblings_and_nested_lists() {
        let html = r#"<div>
            <div><strong>Society membership</strong></div>
            <p>No societies listed above</p>
            <div><ul><li>IEEE Robotics and Automation Society</li></ul></div>
            <p>IEEE Photonics Society</p>
            <div><ul><li>IEEE Robotics and Automation Society</li></ul></div>
        </div>"#;
        assert_eq!(
            extract(html).as_deref(),
            Some("IEEE Robotics and Automation Society, IEEE Photonics Society")
        );
    }

    #[test]
    fn test_no_branded_items_is_none() {
        let html = r#"<div>
            <div><strong>Society memberships</strong></div>
            <ul><li>Chess Club</li></ul>
        </div>"#;
        assert_eq!(extract(html), None);
    }

    #[test]
    fn test_missing_label_is_none() {
        assert_eq!(extract("<div><ul><li>IEEE Computer Society</li></ul></div>"), None);
    }
}
