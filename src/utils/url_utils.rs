// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 搜索模板中关键词的占位符
pub const KEYWORDS_PLACEHOLDER: &str = "{keywords}";

/// 将可能为相对路径的URL转换为绝对路径URL，并去掉片段标识
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    let mut url = base_url.join(path)?;
    url.set_fragment(None);
    Ok(url)
}

/// 用空格连接关键词并代入搜索模板
///
/// 关键词整体做百分号编码，模板中缺少占位符时返回错误
pub fn build_search_url(template: &str, keywords: &[String]) -> Result<Url, String> {
    if !template.contains(KEYWORDS_PLACEHOLDER) {
        return Err(format!(
            "template `{}` has no {} placeholder",
            template, KEYWORDS_PLACEHOLDER
        ));
    }

    let phrase = keywords.join(" ");
    let encoded = urlencoding::encode(&phrase);
    let raw = template.replace(KEYWORDS_PLACEHOLDER, &encoded);

    Url::parse(&raw).map_err(|e| format!("{}: {}", raw, e))
}
