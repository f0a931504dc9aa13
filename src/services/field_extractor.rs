//! 字段提取服务 - 业务能力层
//!
//! 在一份已解析的结果页中定位标签锚点，再按固定顺序尝试多种取值策略。
//!
//! 门户返回的 HTML 不受我们控制，同一个字段可能是以下任意一种写法：
//!
//! ```text
//! <div><strong>Membership status</strong></div><span>Active</span>     兄弟值标签
//! <p><strong>Membership status:</strong> Active</p>                     冒号分隔
//! <div><b>Membership status</b></div><div></div><div>Active</div>      延后的兄弟
//! ```
//!
//! 取值顺序从最具体到最宽松，先命中者为准。缺失永远不是错误，只返回 `None`。

use crate::models::field_set::FieldKey;
use scraper::{ElementRef, Html};

/// 专用标签元素（标签文字通常放在这些标签里）
const LABEL_TAGS: &[&str] = &["strong", "b", "label", "em", "dt", "th"];
/// 专用的行内值标签
const VALUE_TAG: &str = "span";

/// 字段描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: FieldKey,
    /// 页面上的标签文字
    pub label: &'static str,
    /// 值是否被拆成多个连续的值标签（例如姓名首字母）
    pub multi_part: bool,
}

/// 取值策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolver {
    /// 行的下一个兄弟是值标签
    SiblingValueTag,
    /// 行自身文字中第一个冒号之后的部分
    ColonDelimited,
    /// 行之后第一个非空且不重复标签的兄弟
    FollowingSibling,
}

/// 按顺序尝试，先命中者为准
pub const RESOLVER_CHAIN: [Resolver; 3] = [
    Resolver::SiblingValueTag,
    Resolver::ColonDelimited,
    Resolver::FollowingSibling,
];

impl Resolver {
    pub fn resolve(self, row: ElementRef<'_>, descriptor: &FieldDescriptor) -> Option<String> {
        match self {
            Resolver::SiblingValueTag => resolve_sibling_value(row, descriptor.multi_part),
            Resolver::ColonDelimited => {
                let text = element_text(row);
                let (_, rest) = text.split_once(':')?;
                non_empty(rest.trim())
            }
            Resolver::FollowingSibling => following_elements(row)
                .map(element_text)
                .find(|text| !text.is_empty() && !text.contains(descriptor.label)),
        }
    }
}

fn resolve_sibling_value(row: ElementRef<'_>, multi_part: bool) -> Option<String> {
    let first = next_element(row).filter(|el| is_value_tag(*el))?;

    if !multi_part {
        return non_empty(&element_text(first));
    }

    let parts: Vec<String> = std::iter::successors(Some(first), |el| next_element(*el))
        .take_while(|el| is_value_tag(*el))
        .map(element_text)
        .map(|part| part.trim_end_matches('.').trim().to_string())
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(format!("{}.", parts.join(". ")))
    }
}

/// 标签锚点
#[derive(Debug, Clone, Copy)]
pub struct LabelAnchor<'a> {
    pub element: ElementRef<'a>,
    /// 锚点是专用标签元素
    pub dedicated: bool,
    /// 锚点文字只有标签本身（允许结尾冒号）
    pub label_only: bool,
}

impl<'a> LabelAnchor<'a> {
    /// 提升为"行"上下文
    ///
    /// 专用标签或纯标签元素取其父元素；自身已经包含值的容器元素就是行本身。
    pub fn row(&self) -> Option<ElementRef<'a>> {
        if self.dedicated || self.label_only {
            self.element.parent().and_then(ElementRef::wrap)
        } else {
            Some(self.element)
        }
    }
}

struct IndexedElement<'a> {
    element: ElementRef<'a>,
    text: String,
    dedicated: bool,
}

/// 一次遍历建立的元素索引（文档顺序）
///
/// 同一份文档上查找多个标签时只遍历一次 DOM；查找结果与逐个顺序扫描一致。
pub struct PageIndex<'a> {
    elements: Vec<IndexedElement<'a>>,
}

impl<'a> PageIndex<'a> {
    pub fn build(document: &'a Html) -> Self {
        let elements = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .map(|element| IndexedElement {
                element,
                text: element_text(element),
                dedicated: is_label_tag(element),
            })
            .collect();
        Self { elements }
    }

    /// 按文档顺序找到第一个标签锚点
    ///
    /// 优先专用标签元素；没有时退回到文字包含标签的最内层元素。
    pub fn find_anchor(&self, label: &str) -> Option<LabelAnchor<'a>> {
        if label.is_empty() {
            return None;
        }

        let hit = self
            .elements
            .iter()
            .find(|e| e.dedicated && e.text.contains(label))
            .or_else(|| {
                self.elements.iter().find(|e| {
                    e.text.contains(label) && !has_child_containing(e.element, label)
                })
            })?;

        Some(LabelAnchor {
            element: hit.element,
            dedicated: hit.dedicated,
            label_only: hit.text.trim_end_matches(':').trim() == label,
        })
    }
}

/// 提取单个字段
pub fn extract_field(index: &PageIndex<'_>, descriptor: &FieldDescriptor) -> Option<String> {
    let anchor = index.find_anchor(descriptor.label)?;
    let row = anchor.row()?;
    RESOLVER_CHAIN
        .iter()
        .find_map(|resolver| resolver.resolve(row, descriptor))
}

// ========== DOM 辅助函数 ==========

/// 元素的可见文字：先拼接所有文本节点，再把空白折叠为单个空格
///
/// 行内标签不引入空格，`Mem<b>ber</b>` 读作 `Member`。
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    let joined: String = element.text().collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn next_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

pub(crate) fn following_elements<'a>(
    element: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    element.next_siblings().filter_map(ElementRef::wrap)
}

fn has_child_containing(element: ElementRef<'_>, label: &str) -> bool {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .any(|child| element_text(child).contains(label))
}

fn is_label_tag(element: ElementRef<'_>) -> bool {
    LABEL_TAGS.contains(&element.value().name())
}

fn is_value_tag(element: ElementRef<'_>) -> bool {
    element.value().name() == VALUE_TAG
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
